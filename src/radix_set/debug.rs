use std::cell::Cell;
use std::fmt;

use super::edge::Edge;

pub const DEFAULT_INDENT_SIZE: usize = 3;

const EDGE_MARKER: &str = "`- ";

/// Borrowed rendering of a set, one line per edge:
///
/// ```text
/// Root
/// `- foo [x]
///    `- bar [x]
///    `- l [x]
/// ```
pub struct TreeView<'a> {
    root: &'a [Edge],
    context: TreeViewContext,
}

impl<'a> TreeView<'a> {
    pub fn new(root: &'a [Edge], indent_size: usize) -> Self {
        TreeView {
            root,
            context: TreeViewContext::new(indent_size),
        }
    }
}

impl<'a> fmt::Display for TreeView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Root")?;

        for edge in self.root.iter() {
            recursive_tree_format(edge, f, &self.context)?;
        }

        Ok(())
    }
}

impl<'a> fmt::Debug for TreeView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

struct TreeViewContext {
    depth: Cell<usize>,
    indent_size: usize,
}

impl TreeViewContext {
    fn new(indent_size: usize) -> Self {
        TreeViewContext {
            depth: Cell::new(0),
            indent_size,
        }
    }
}

fn recursive_tree_format(
    current: &Edge,
    f: &mut fmt::Formatter,
    context: &TreeViewContext,
) -> fmt::Result {
    let depth = context.depth.get();

    writeln!(
        f,
        "{:indent$}{}{} {}",
        "",
        EDGE_MARKER,
        current.label(),
        if current.is_final() { "[x]" } else { "[ ]" },
        indent = depth * context.indent_size
    )?;

    context.depth.set(depth + 1);
    for child in current.children().iter() {
        recursive_tree_format(child, f, context)?;
    }
    context.depth.set(depth);

    Ok(())
}
