#[macro_use]
extern crate error_chain;

pub mod errors;
pub mod radix_set;

pub use radix_set::RadixSet;
