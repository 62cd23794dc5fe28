// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::identifiable::{FxIndexSet, Id};

/// Offset of an interned string within a profile document's string table.
/// Index zero is always the empty string, as pprof requires.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct StringId(u32);

impl StringId {
    pub const ZERO: StringId = StringId(0);

    #[inline]
    pub fn to_offset(self) -> usize {
        self.0 as usize
    }
}

impl Id for StringId {
    type RawId = i64;

    fn from_offset(offset: usize) -> Self {
        let index: u32 = offset.try_into().expect("StringId to fit into a u32");
        Self(index)
    }

    fn to_raw_id(&self) -> Self::RawId {
        self.0.into()
    }
}

/// Insertion-ordered string interning scoped to a single profile document.
pub struct StringTable {
    strings: FxIndexSet<Box<str>>,
}

impl StringTable {
    /// Creates a table whose only entry is the empty string at offset zero.
    pub fn new() -> Self {
        let mut strings = FxIndexSet::default();
        strings.insert(Box::from(""));
        Self { strings }
    }

    pub fn intern(&mut self, str: &str) -> StringId {
        match self.strings.get_index_of(str) {
            Some(offset) => StringId::from_offset(offset),
            None => {
                let (offset, inserted) = self.strings.insert_full(Box::from(str));
                debug_assert!(inserted);
                StringId::from_offset(offset)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Consumes the table into the pprof string_table representation.
    pub fn into_vec(self) -> Vec<String> {
        self.strings.into_iter().map(String::from).collect()
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_id_zero() {
        let mut table = StringTable::new();
        assert_eq!(StringId::ZERO, table.intern(""));
        assert_eq!(1, table.len());
    }

    #[test]
    fn interning_is_idempotent() {
        let mut table = StringTable::new();
        let a = table.intern("cpu-time");
        let b = table.intern("nanoseconds");
        assert_ne!(a, b);
        assert_eq!(a, table.intern("cpu-time"));
        assert_eq!(b, table.intern("nanoseconds"));
        assert_eq!(vec!["", "cpu-time", "nanoseconds"], table.into_vec());
    }
}
