// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::internal::SampleType;
use serde::Deserialize;

/// Startup configuration for the recorder.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    /// Names of the enabled dimensions, in output order. Validated against
    /// the supported set when the recorder is created; unknown names fail
    /// startup rather than sample recording.
    pub sample_types: Vec<String>,

    /// Whether interned stacks are dropped on every flush.
    ///
    /// Keeping them (the default) makes stack identity stable for the
    /// process lifetime, at the cost of memory growing with the number of
    /// distinct stacks ever seen. Resetting bounds memory, and recurring
    /// stacks are re-interned under fresh ids each window.
    pub reset_stacks_between_flushes: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            sample_types: SampleType::DEFAULT_ENABLED
                .iter()
                .map(|t| t.name().to_string())
                .collect(),
            reset_stacks_between_flushes: false,
        }
    }
}
