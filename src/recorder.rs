// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::api;
use crate::config::RecorderConfig;
use crate::error::{InvalidSampleError, RecorderError};
use crate::internal::{
    LabelSet, Profile, SampleAggregator, StackTraceInterner, ValueTypeRegistry,
};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

/// Process-wide ingestion counters. `samples_recorded` plus
/// `samples_dropped` together account for every
/// [SampleRecorder::record_sample] call ever made.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RecorderStats {
    pub samples_recorded: u64,
    pub samples_dropped: u64,
}

/// The recording entry point. Composes the stack interner and the sample
/// aggregator and owns the active collection window.
///
/// Many producer threads may call [SampleRecorder::record_sample]
/// concurrently while one consumer periodically calls
/// [SampleRecorder::flush]. Producers only ever take shard locks and a
/// shared read lock on the window barrier; a flush takes the barrier
/// exclusively just long enough to detach the window, and serialization
/// happens on the detached state.
pub struct SampleRecorder {
    registry: ValueTypeRegistry,
    interner: StackTraceInterner,
    aggregator: SampleAggregator,
    reset_stacks_between_flushes: bool,
    // Makes intern + record atomic with respect to the window swap, so a
    // bucket can never reference a stack the flushed table has not seen.
    window_barrier: RwLock<()>,
    window_start: Mutex<SystemTime>,
    samples_recorded: AtomicU64,
    samples_dropped: AtomicU64,
}

impl SampleRecorder {
    pub fn try_new(config: &RecorderConfig) -> Result<Self, RecorderError> {
        let registry = ValueTypeRegistry::try_from_names(&config.sample_types)
            .map_err(RecorderError::Configuration)?;
        Ok(Self::with_registry(
            registry,
            config.reset_stacks_between_flushes,
        ))
    }

    pub fn with_registry(registry: ValueTypeRegistry, reset_stacks_between_flushes: bool) -> Self {
        let aggregator = SampleAggregator::new(&registry);
        Self {
            registry,
            interner: StackTraceInterner::new(),
            aggregator,
            reset_stacks_between_flushes,
            window_barrier: RwLock::new(()),
            window_start: Mutex::new(SystemTime::now()),
            samples_recorded: AtomicU64::new(0),
            samples_dropped: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &ValueTypeRegistry {
        &self.registry
    }

    /// Records one sample: interns the stack and folds the values into the
    /// matching bucket.
    ///
    /// Malformed samples are dropped as a whole: nothing reaches the
    /// aggregator, the drop counter is bumped, and the error is returned
    /// for observability. Recording never panics on sample data, so a bad
    /// sample cannot take the profiled process down.
    pub fn record_sample(&self, sample: api::Sample<'_>) -> Result<(), RecorderError> {
        match self.record_sample_inner(sample) {
            Ok(()) => {
                self.samples_recorded.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(err) => {
                self.samples_dropped.fetch_add(1, Ordering::Relaxed);
                log::debug!("dropped sample: {err}");
                Err(RecorderError::InvalidSample(err))
            }
        }
    }

    fn record_sample_inner(&self, sample: api::Sample<'_>) -> Result<(), InvalidSampleError> {
        let labels = LabelSet::from_api(sample.labels)?;
        let _window = self.window_barrier.read();
        let stack_id = self.interner.intern(sample.frames);
        self.aggregator.record(stack_id, labels, sample.values)
    }

    /// Ends the current window: atomically detaches the accumulated state,
    /// starts the next window, and builds the profile from the detached
    /// snapshot.
    ///
    /// Every sample recorded before this call lands either in the returned
    /// profile or in a later one, never in both. A build failure means the
    /// window's data is discarded rather than exported corrupt.
    pub fn flush(&self) -> Result<Profile, RecorderError> {
        let end = SystemTime::now();

        let (snapshot, stack_table, start) = {
            let _window = self.window_barrier.write();
            let snapshot = self.aggregator.snapshot_and_reset();
            let stack_table = self.interner.stack_table();
            if self.reset_stacks_between_flushes {
                self.interner.reset();
            }
            let start = std::mem::replace(&mut *self.window_start.lock(), end);
            (snapshot, stack_table, start)
        };

        Profile::build(&self.registry, snapshot, &stack_table, start, end).map_err(|err| {
            log::error!("discarding profile window, build failed: {err}");
            RecorderError::Serialization(err)
        })
    }

    pub fn stats(&self) -> RecorderStats {
        RecorderStats {
            samples_recorded: self.samples_recorded.load(Ordering::Relaxed),
            samples_dropped: self.samples_dropped.load(Ordering::Relaxed),
        }
    }
}
