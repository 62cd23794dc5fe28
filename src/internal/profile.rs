// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::collections::StringTable;
use crate::error::SerializationError;
use crate::serializer::CompressedProfileSerializer;
use std::sync::Arc;
use std::time::SystemTime;

/// One exported sample: a full stack, its labels, and the accumulated
/// values aligned to the profile's value types.
#[derive(Clone, Debug)]
pub struct ProfileSample {
    pub stack_id: StackTraceId,
    pub stack: Arc<StackTrace>,
    pub labels: LabelSet,
    pub values: Box<[i64]>,
}

/// A point-in-time, read-only export of one collection window. Once built
/// it shares no mutable state with the live aggregator.
#[derive(Clone, Debug)]
pub struct Profile {
    value_types: Box<[ValueType]>,
    samples: Vec<ProfileSample>,
    start: SystemTime,
    end: SystemTime,
}

pub struct EncodedProfile {
    pub start: SystemTime,
    pub end: SystemTime,
    pub buffer: Vec<u8>,
}

impl Profile {
    /// Assembles a profile from a detached aggregator snapshot.
    ///
    /// Pure and deterministic: identical inputs produce an identical
    /// profile. Samples are emitted in ascending (stack id, label set)
    /// order. A bucket referencing a stack id the table cannot resolve
    /// means the aggregator and interner went out of sync, which is a bug,
    /// not a data error.
    pub fn build(
        registry: &ValueTypeRegistry,
        snapshot: AggregatorSnapshot,
        stack_table: &StackTable,
        start: SystemTime,
        end: SystemTime,
    ) -> Result<Self, SerializationError> {
        let mut buckets = snapshot.into_buckets();
        buckets.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut samples = Vec::with_capacity(buckets.len());
        for (key, values) in buckets {
            let stack = stack_table
                .get(key.stack_id)
                .ok_or(SerializationError::UnknownStackId(key.stack_id.to_raw_id()))?;
            samples.push(ProfileSample {
                stack_id: key.stack_id,
                stack: Arc::clone(stack),
                labels: key.labels,
                values,
            });
        }

        Ok(Self {
            value_types: registry.get_active_value_types().into(),
            samples,
            start,
            end,
        })
    }

    pub fn value_types(&self) -> &[ValueType] {
        &self.value_types
    }

    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    pub fn start(&self) -> SystemTime {
        self.start
    }

    pub fn end(&self) -> SystemTime {
        self.end
    }

    /// Serializes the profile into a compressed pprof document.
    pub fn serialize_into_compressed_pprof(&self) -> Result<EncodedProfile, SerializationError> {
        const INITIAL_PPROF_BUFFER_SIZE: usize = 32 * 1024;

        let mut strings = StringTable::new();
        let mut functions: FxIndexSet<Function> = Default::default();
        let mut locations: FxIndexSet<Location> = Default::default();

        let sample_types = self
            .value_types
            .iter()
            .map(|vt| pprof::ValueType {
                r#type: strings.intern(&vt.name).to_raw_id(),
                unit: strings.intern(&vt.unit).to_raw_id(),
            })
            .collect();

        let mut samples = Vec::with_capacity(self.samples.len());
        for sample in &self.samples {
            let location_ids = sample
                .stack
                .frames
                .iter()
                .map(|frame| {
                    let function = Function {
                        name: strings.intern(&frame.function),
                        filename: strings.intern(&frame.filename),
                    };
                    let function_id = functions.dedup(function);
                    let location = Location {
                        function_id,
                        address: frame.address,
                        line: frame.line,
                    };
                    locations.dedup(location).to_raw_id()
                })
                .collect();

            let labels = sample
                .labels
                .iter()
                .map(|label| {
                    pprof::Label::str(
                        strings.intern(label.key()).to_raw_id(),
                        strings.intern(label.value()).to_raw_id(),
                    )
                })
                .collect();

            samples.push(pprof::Sample {
                location_ids,
                values: sample.values.to_vec(),
                labels,
            });
        }

        let time_nanos = self
            .start
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |duration| duration.as_nanos().min(i64::MAX as u128) as i64);
        // The clock may have been adjusted between start and end; a zero
        // duration beats throwing the whole profile away.
        let duration_nanos = self
            .end
            .duration_since(self.start)
            .map_or(0, |duration| duration.as_nanos().min(i64::MAX as u128) as i64);

        let profile = pprof::Profile {
            sample_types,
            samples,
            locations: into_pprof_iter(locations).collect(),
            functions: into_pprof_iter(functions).collect(),
            string_table: strings.into_vec(),
            time_nanos,
            duration_nanos,
        };

        let mut serializer = CompressedProfileSerializer::with_capacity(INITIAL_PPROF_BUFFER_SIZE);
        serializer.encode(&profile)?;

        Ok(EncodedProfile {
            start: self.start,
            end: self.end,
            buffer: serializer.finish()?,
        })
    }
}
