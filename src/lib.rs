// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! In-process aggregation engine for profiling samples.
//!
//! Sampling hooks hand over discrete, labeled observations through
//! [`SampleRecorder::record_sample`]; the recorder interns the call stack,
//! folds the observation into the matching bucket, and on
//! [`SampleRecorder::flush`] detaches the accumulated window into an
//! immutable [`internal::Profile`] that can be encoded as a compressed
//! pprof document.

pub mod api;
pub mod collections;
pub mod config;
pub mod error;
pub mod internal;
pub mod pprof;
pub mod recorder;
pub mod serializer;

pub use config::RecorderConfig;
pub use error::RecorderError;
pub use recorder::{RecorderStats, SampleRecorder};
