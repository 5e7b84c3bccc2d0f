use std::fmt;

use bytes::BytesMut;

/// The bytes carried by a single edge.
///
/// Labels are never empty. Splitting hands out the tail as a view into the
/// same allocation, so a split followed by a merge of the same two halves
/// does not copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    bytes: BytesMut,
}

impl Label {
    pub fn new(label_bytes: &[u8]) -> Label {
        debug_assert!(!label_bytes.is_empty(), "edge labels must be non-empty");

        Label {
            bytes: BytesMut::from(label_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Truncates `self` to `[0, idx)` and returns `[idx, len)`.
    pub fn split_off(&mut self, idx: usize) -> Label {
        debug_assert!(idx > 0 && idx < self.len());

        Label {
            bytes: self.bytes.split_off(idx),
        }
    }

    /// Appends `tail` to the end of this label.
    pub fn append(&mut self, tail: Label) {
        self.bytes.unsplit(tail.bytes);
    }

    pub fn match_with<'a>(&self, probe: KeyProbe<'a>) -> KeyMatchResult<'a> {
        let shared = shared_prefix_len(self.bytes(), probe.bytes());

        if shared == self.len() {
            if probe.len() > shared {
                let (_, right) = probe.split_at(shared);
                KeyMatchResult::Partial(right)
            } else {
                KeyMatchResult::Complete
            }
        } else if shared == probe.len() {
            KeyMatchResult::LongerPrefix(shared)
        } else {
            let (_, right) = probe.split_at(shared);
            KeyMatchResult::Incomplete(shared, right)
        }
    }
}

impl<'a> From<KeyProbe<'a>> for Label {
    fn from(src: KeyProbe<'a>) -> Self {
        Label::new(src.bytes())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.bytes()))
    }
}

/// Length of the longest common leading run of `left` and `right`.
/// i.e. `shared_prefix_len(b"court", b"coral") == 2`
pub fn shared_prefix_len(left: &[u8], right: &[u8]) -> usize {
    left.iter()
        .zip(right.iter())
        .take_while(|&(l, r)| l == r)
        .count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMatchResult<'a> {
    // The label is a proper prefix of the probe.
    // Returns the end of the probe that did not match
    // Label: "ABC"
    // Probe: "ABCDEF"
    // The result should be Partial("DEF")
    Partial(KeyProbe<'a>),

    // Label and probe are equal
    // Label: "ABC"
    // Probe: "ABC"
    Complete,

    // The probe is a proper prefix of the label.
    // Returns the index at which to split the label
    // Label: "ABCDEF"
    // Probe: "ABC"
    // The result should be LongerPrefix(3)
    LongerPrefix(usize),

    // Label and probe diverge before either one ends.
    // Returns the length of the shared prefix and the remnants of the probe

    // Example 1 - match diverges in the middle
    // Label: "ABZDEF"
    // Probe: "ABCDEF"
    // The result should be Incomplete(2, "CDEF")

    // Example 2 - no portion matches at all
    // Label: "ABCDEF"
    // Probe: "GHIJKL"
    // The result should be Incomplete(0, "GHIJKL")
    Incomplete(usize, KeyProbe<'a>),
}

/// The part of a key that has not been matched against the tree yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyProbe<'a> {
    key_portion: &'a [u8],
}

impl<'a> KeyProbe<'a> {
    pub fn new(key: &'a [u8]) -> Self {
        KeyProbe { key_portion: key }
    }

    pub fn len(&self) -> usize {
        self.key_portion.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_portion.is_empty()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.key_portion
    }

    pub fn split_at(self, idx: usize) -> (KeyProbe<'a>, KeyProbe<'a>) {
        let (left_bytes, right_bytes) = self.key_portion.split_at(idx);

        (KeyProbe::new(left_bytes), KeyProbe::new(right_bytes))
    }
}

impl<'a> fmt::Display for KeyProbe<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.key_portion))
    }
}
