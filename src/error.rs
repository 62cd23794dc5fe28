// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::io;
use thiserror::Error;

/// Invalid or unknown value-type setup. Surfaces at startup, never at
/// sample time.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown sample type: {0}")]
    UnknownSampleType(Box<str>),

    #[error("duplicate sample type: {0}")]
    DuplicateSampleType(Box<str>),

    #[error("at least one sample type must be enabled")]
    EmptySampleTypes,
}

/// A malformed sample. Recovered locally: the sample is dropped as a whole,
/// the recorder's drop counter is incremented, and the producer keeps
/// running.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum InvalidSampleError {
    #[error("expected {expected} sample values, got {actual}")]
    WrongValueCount { expected: usize, actual: usize },

    #[error("negative value {value} at position {index}")]
    NegativeValue { index: usize, value: i64 },

    #[error("duplicate label key: {0}")]
    DuplicateLabelKey(Box<str>),
}

/// A desync between aggregator and interner, or an encoding failure during
/// export. These indicate a bug and are surfaced loudly instead of quietly
/// producing a corrupt profile.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("stack id {0} has no interned stack trace")]
    UnknownStackId(u32),

    #[error("failed to encode profile")]
    Encode(#[from] prost::EncodeError),

    #[error("failed to compress profile")]
    Compression(#[from] lz4_flex::frame::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Any failure the recorder facade can report.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    InvalidSample(#[from] InvalidSampleError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),
}
