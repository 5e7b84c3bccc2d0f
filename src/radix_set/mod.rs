mod set;
pub use self::set::RadixSet;

mod key;

mod edge;

mod debug;
pub use self::debug::TreeView;

#[cfg(test)]
mod proptests;
