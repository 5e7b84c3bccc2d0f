use std::mem;

use tracing::trace;

use super::key::{KeyMatchResult, KeyProbe, Label};

pub type EdgeChildren = Vec<Edge>;

/// How a query key is compared against the members of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    // The key itself must be a member
    Exact,
    // Any member starting with the key qualifies
    Prefix,
}

impl MatchMode {
    pub fn from_prefix_flag(as_prefix: bool) -> Self {
        if as_prefix {
            MatchMode::Prefix
        } else {
            MatchMode::Exact
        }
    }

    pub fn is_prefix(self) -> bool {
        self == MatchMode::Prefix
    }
}

/// A labelled edge and the subtree hanging below it.
///
/// An edge is final when the labels from the root down to and including this
/// one spell a member. Finality is independent of the children: for the
/// members "foo" and "foobar" the tree is ([x] marks final)
///
/// Root
/// `- foo [x]
///    `- bar [x]
///
/// while for "foobar" and "fooqux" the "foo" edge is only a branch point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    label: Label,
    is_final: bool,
    children: EdgeChildren,
}

impl Edge {
    pub fn new_leaf(remaining: KeyProbe) -> Self {
        Edge {
            label: From::from(remaining),
            is_final: true,
            children: EdgeChildren::new(),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn children(&self) -> &[Edge] {
        &self.children
    }

    /// Number of members spelled by this edge and everything below it.
    pub fn member_count(&self) -> usize {
        let below: usize = self.children.iter().map(Edge::member_count).sum();

        below + self.is_final as usize
    }

    /// Cuts the label at `split_index`, pushing the tail, the old finality and
    /// the old children down into a single new child. The edge is left as a
    /// non-final branch point.
    pub fn split_at(&mut self, split_index: usize) {
        let tail_label = self.label.split_off(split_index);
        trace!(head = %self.label, tail = %tail_label, "splitting edge");

        let tail = Edge {
            label: tail_label,
            is_final: self.is_final,
            children: mem::take(&mut self.children),
        };

        self.is_final = false;
        self.children.push(tail);
    }

    /// Folds a lone child into a non-final edge, concatenating the labels.
    /// Returns whether a merge happened.
    pub fn compact(&mut self) -> bool {
        if self.is_final || self.children.len() != 1 {
            return false;
        }

        match self.children.pop() {
            Some(child) => {
                trace!(parent = %self.label, child = %child.label, "merging edges");

                let Edge {
                    label,
                    is_final,
                    children,
                } = child;

                self.label.append(label);
                self.is_final = is_final;
                self.children = children;

                true
            }
            None => false,
        }
    }
}

/// Finds the sibling sharing a non-empty prefix with `probe`, if any.
fn find_sibling<'p>(
    children: &[Edge],
    probe: KeyProbe<'p>,
) -> Option<(usize, KeyMatchResult<'p>)> {
    children
        .iter()
        .enumerate()
        .find_map(|(idx, edge)| match edge.label.match_with(probe) {
            KeyMatchResult::Incomplete(0, _) => None,
            matched => Some((idx, matched)),
        })
}

/// Adds the non-empty key held by `probe` below `root`. Returns whether the
/// membership changed.
pub fn descend_insert(root: &mut EdgeChildren, probe: KeyProbe) -> bool {
    debug_assert!(!probe.is_empty());

    let mut children = root;
    let mut probe = probe;

    loop {
        let (idx, matched) = match find_sibling(children, probe) {
            Some(found) => found,
            None => {
                trace!(label = %probe, "appending leaf edge");
                children.push(Edge::new_leaf(probe));
                return true;
            }
        };

        match matched {
            KeyMatchResult::Complete => {
                return !mem::replace(&mut children[idx].is_final, true);
            }
            KeyMatchResult::Partial(remaining_probe) => {
                children = &mut children[idx].children;
                probe = remaining_probe;
            }
            // The key ends inside this label, so the split point is the member.
            KeyMatchResult::LongerPrefix(split_index) => {
                let edge = &mut children[idx];
                edge.split_at(split_index);
                edge.is_final = true;
                return true;
            }
            KeyMatchResult::Incomplete(split_index, remaining_probe) => {
                let edge = &mut children[idx];
                edge.split_at(split_index);
                edge.children.push(Edge::new_leaf(remaining_probe));
                return true;
            }
        }
    }
}

pub fn descend_contains(root: &[Edge], probe: KeyProbe, mode: MatchMode) -> bool {
    let mut children = root;
    let mut probe = probe;

    loop {
        let (idx, matched) = match find_sibling(children, probe) {
            Some(found) => found,
            None => return false,
        };

        match matched {
            KeyMatchResult::Complete => return mode.is_prefix() || children[idx].is_final,
            KeyMatchResult::Partial(remaining_probe) => {
                children = children[idx].children();
                probe = remaining_probe;
            }
            KeyMatchResult::LongerPrefix(_) => return mode.is_prefix(),
            KeyMatchResult::Incomplete(..) => return false,
        }
    }
}

/// Removes the key (or, in prefix mode, every member under the key) from the
/// subtree `children`. Returns the number of members removed, or `None` when
/// the tree was left untouched.
pub fn recursive_remove(
    children: &mut EdgeChildren,
    probe: KeyProbe,
    mode: MatchMode,
) -> Option<usize> {
    let (idx, matched) = find_sibling(children, probe)?;

    match matched {
        KeyMatchResult::Complete => remove_edge(children, idx, mode),
        KeyMatchResult::LongerPrefix(_) if mode.is_prefix() => remove_edge(children, idx, mode),
        KeyMatchResult::Partial(remaining_probe) => {
            let parent = &mut children[idx];
            let removed = recursive_remove(&mut parent.children, remaining_probe, mode)?;

            // A detached child may leave the parent as a non-final edge with a
            // single child, which has to be folded back in.
            parent.compact();

            Some(removed)
        }
        _ => None,
    }
}

fn remove_edge(children: &mut EdgeChildren, idx: usize, mode: MatchMode) -> Option<usize> {
    let edge = &mut children[idx];

    if !mode.is_prefix() && !edge.is_final {
        return None;
    }

    if mode.is_prefix() || edge.children.is_empty() {
        let detached = children.remove(idx);
        trace!(label = %detached.label, "detaching edge");

        Some(detached.member_count())
    } else {
        edge.is_final = false;
        edge.compact();

        Some(1)
    }
}
