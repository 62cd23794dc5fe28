// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::api;
use std::hash::{Hash, Hasher};

/// An owned, already-resolved frame.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Frame {
    pub function: Box<str>,
    pub filename: Box<str>,
    pub line: i64,
    pub address: u64,
}

impl From<&api::Frame<'_>> for Frame {
    fn from(frame: &api::Frame<'_>) -> Self {
        Self {
            function: frame.function.into(),
            filename: frame.filename.into(),
            line: frame.line,
            address: frame.address,
        }
    }
}

/// An owned call stack. The leaf is at frames\[0\].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StackTrace {
    pub frames: Box<[Frame]>,
}

impl StackTrace {
    pub fn from_api(frames: &[api::Frame<'_>]) -> Self {
        Self {
            frames: frames.iter().map(Frame::from).collect(),
        }
    }
}

// Hashes frame-by-frame with no length prefix so that a borrowed
// [api::Frame] sequence can be hashed identically without building the
// owned representation first. See [BorrowedStack].
impl Hash for StackTrace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for frame in &self.frames {
            frame.hash(state);
        }
    }
}

/// Borrowed lookup key over the caller's frames. Hash and equality agree
/// with [StackTrace] so the interner can probe its maps without allocating
/// on the hit path.
#[derive(Copy, Clone, Debug)]
pub(crate) struct BorrowedStack<'a>(pub &'a [api::Frame<'a>]);

impl Hash for BorrowedStack<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must match the derived field order of [Frame].
        for frame in self.0 {
            frame.function.hash(state);
            frame.filename.hash(state);
            frame.line.hash(state);
            frame.address.hash(state);
        }
    }
}

impl BorrowedStack<'_> {
    pub(crate) fn matches(&self, stack: &StackTrace) -> bool {
        self.0.len() == stack.frames.len()
            && self.0.iter().zip(&stack.frames).all(|(a, b)| {
                a.function == &*b.function
                    && a.filename == &*b.filename
                    && a.line == b.line
                    && a.address == b.address
            })
    }
}

/// Identity of an interned stack. Ids are handed out monotonically and are
/// never reused, even across interner resets.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StackTraceId(u32);

impl StackTraceId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn to_raw_id(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::BuildHasher;

    fn fx_hash<T: Hash>(value: &T) -> u64 {
        std::hash::BuildHasherDefault::<rustc_hash::FxHasher>::default().hash_one(value)
    }

    #[test]
    fn borrowed_and_owned_stacks_hash_alike() {
        let frames = [
            api::Frame {
                function: "phpinfo",
                filename: "/srv/public/index.php",
                line: 3,
                address: 0,
            },
            api::Frame {
                function: "{main}",
                filename: "/srv/public/index.php",
                line: 0,
                address: 0,
            },
        ];
        let owned = StackTrace::from_api(&frames);
        let borrowed = BorrowedStack(&frames);
        assert_eq!(fx_hash(&owned), fx_hash(&borrowed));
        assert!(borrowed.matches(&owned));
    }

    #[test]
    fn differing_stacks_do_not_match() {
        let frames = [api::Frame {
            function: "a",
            filename: "a.rs",
            line: 1,
            address: 0,
        }];
        let other = [api::Frame {
            function: "b",
            filename: "a.rs",
            line: 1,
            address: 0,
        }];
        let owned = StackTrace::from_api(&frames);
        assert!(!BorrowedStack(&other).matches(&owned));

        let shorter: [api::Frame; 0] = [];
        assert!(!BorrowedStack(&shorter).matches(&owned));
    }
}
