// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Borrowed-input types accepted at the recording boundary. Callers keep
//! ownership of their strings; data is copied into owned storage only once
//! the recorder knows it will be retained.

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ValueType<'a> {
    pub r#type: &'a str,
    pub unit: &'a str,
}

impl<'a> ValueType<'a> {
    pub fn new(r#type: &'a str, unit: &'a str) -> Self {
        Self { r#type, unit }
    }
}

/// An already-resolved frame descriptor. The sampling hook has mapped
/// addresses to names before handing the stack over.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Frame<'a> {
    pub function: &'a str,
    pub filename: &'a str,
    pub line: i64,
    pub address: u64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Label<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

#[derive(Copy, Clone, Debug)]
pub struct Sample<'a> {
    /// The leaf is at frames\[0\].
    pub frames: &'a [Frame<'a>],
    /// Additional context for this sample, e.g. a thread name.
    pub labels: &'a [Label<'a>],
    /// One entry per active value type, in registry order.
    pub values: &'a [i64],
}
