use std::fmt;
use std::io;
use std::iter::FromIterator;

use tracing::trace;

use crate::errors::Result;

use super::debug::{TreeView, DEFAULT_INDENT_SIZE};
use super::edge::{descend_contains, descend_insert, recursive_remove, EdgeChildren, MatchMode};
use super::key::KeyProbe;

#[cfg(test)]
use super::edge::Edge;

/// A set of byte strings stored as a compressed prefix tree.
///
/// Keys are anything that can be viewed as bytes. The empty key is never a
/// member, but is treated as a prefix of everything.
#[derive(Debug, Clone, Default)]
pub struct RadixSet {
    size: usize,
    root: EdgeChildren,
}

impl RadixSet {
    pub fn new() -> Self {
        RadixSet {
            size: 0,
            root: EdgeChildren::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        trace!(members = self.size, "resetting set");

        self.root = EdgeChildren::new();
        self.size = 0;
    }

    /// Adds `key` to the set. Returns whether the set changed, which is never
    /// the case for the empty key.
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K) -> bool {
        let key = key.as_ref();
        if key.is_empty() {
            return false;
        }

        let inserted = descend_insert(&mut self.root, KeyProbe::new(key));
        if inserted {
            self.size += 1;
        }

        inserted
    }

    /// With `as_prefix` unset, checks that `key` is a member. Otherwise checks
    /// that some member starts with `key`. The empty key is always contained.
    pub fn contains<K: AsRef<[u8]>>(&self, key: K, as_prefix: bool) -> bool {
        let key = key.as_ref();
        if key.is_empty() {
            return true;
        }

        let mode = MatchMode::from_prefix_flag(as_prefix);
        descend_contains(&self.root, KeyProbe::new(key), mode)
    }

    /// With `as_prefix` unset, removes the member `key`. Otherwise removes
    /// every member starting with `key`.
    ///
    /// Removing the empty prefix resets the set and reports a change even when
    /// the set was already empty.
    pub fn remove<K: AsRef<[u8]>>(&mut self, key: K, as_prefix: bool) -> bool {
        let key = key.as_ref();
        if key.is_empty() {
            if as_prefix {
                self.clear();
            }
            return as_prefix;
        }

        let mode = MatchMode::from_prefix_flag(as_prefix);
        match recursive_remove(&mut self.root, KeyProbe::new(key), mode) {
            Some(removed) => {
                self.size -= removed;
                true
            }
            None => false,
        }
    }

    /// Writes the tree rendering to `out`, stopping at the first I/O error.
    pub fn format<W: io::Write>(&self, out: &mut W) -> Result<()> {
        write!(out, "{}", self.debug_view())?;

        Ok(())
    }

    pub fn debug_view(&self) -> TreeView {
        self.debug_view_with_indent(DEFAULT_INDENT_SIZE)
    }

    pub fn debug_view_with_indent(&self, indent_size: usize) -> TreeView {
        TreeView::new(&self.root, indent_size)
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &[Edge] {
        &self.root
    }
}

impl fmt::Display for RadixSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.debug_view(), f)
    }
}

impl<K: AsRef<[u8]>> Extend<K> for RadixSet {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: AsRef<[u8]>> FromIterator<K> for RadixSet {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut set = RadixSet::new();
        set.extend(iter);
        set
    }
}
