// Rendering a set is the only fallible operation; everything else is total.
error_chain! {
    foreign_links {
        Io(::std::io::Error);
    }
}
