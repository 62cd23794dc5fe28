// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::{LabelSet, StackTraceId, ValueTypeRegistry};
use crate::collections::FxHashMap;
use crate::error::InvalidSampleError;
use crossbeam_utils::CachePadded;
use hashbrown::hash_map::Entry;
use parking_lot::Mutex;
use rustc_hash::FxHasher;
use std::hash::{BuildHasher, BuildHasherDefault};

/// Aggregation key: which stack and which labels.
///
/// The derived ordering (stack id first, then label set) is the stable
/// total order the profile builder emits samples in.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub stack_id: StackTraceId,
    pub labels: LabelSet,
}

const SHARD_COUNT: usize = 16;

type Buckets = FxHashMap<BucketKey, Box<[i64]>>;

/// Accumulates per-(stack, labels) totals as samples arrive.
///
/// Buckets are sharded by key hash with one mutex per shard, so updates to
/// independent buckets proceed without contention. Only
/// [SampleAggregator::snapshot_and_reset] ever holds more than one shard
/// lock at a time.
pub struct SampleAggregator {
    shards: Box<[CachePadded<Mutex<Buckets>>]>,
    value_count: usize,
}

impl SampleAggregator {
    pub fn new(registry: &ValueTypeRegistry) -> Self {
        let shards = (0..SHARD_COUNT)
            .map(|_| CachePadded::new(Mutex::new(Buckets::default())))
            .collect();
        Self {
            shards,
            value_count: registry.len(),
        }
    }

    #[inline]
    fn select_shard(hash: u64) -> usize {
        (hash as usize) & (SHARD_COUNT - 1)
    }

    /// Folds one observation into its bucket. The values slice must match
    /// the registry order and length and be non-negative; a violation drops
    /// the whole sample, so a bucket is never partially updated.
    pub fn record(
        &self,
        stack_id: StackTraceId,
        labels: LabelSet,
        values: &[i64],
    ) -> Result<(), InvalidSampleError> {
        if values.len() != self.value_count {
            return Err(InvalidSampleError::WrongValueCount {
                expected: self.value_count,
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| **v < 0) {
            return Err(InvalidSampleError::NegativeValue { index, value });
        }

        let key = BucketKey { stack_id, labels };
        let hash = BuildHasherDefault::<FxHasher>::default().hash_one(&key);
        let mut shard = self.shards[Self::select_shard(hash)].lock();
        match shard.entry(key) {
            Entry::Occupied(mut entry) => {
                for (total, value) in entry.get_mut().iter_mut().zip(values) {
                    *total = total.saturating_add(*value);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(values.to_vec().into_boxed_slice());
            }
        }
        Ok(())
    }

    /// Atomically captures the current totals and clears them for the next
    /// window. Every shard lock is held across the swap, so no concurrent
    /// [SampleAggregator::record] call can land astride the boundary: each
    /// observation ends up in exactly one snapshot.
    pub fn snapshot_and_reset(&self) -> AggregatorSnapshot {
        let mut guards: Vec<_> = self.shards.iter().map(|shard| shard.lock()).collect();
        let mut buckets = Vec::new();
        for guard in &mut guards {
            buckets.extend(std::mem::take(&mut **guard));
        }
        AggregatorSnapshot { buckets }
    }

    pub fn bucket_count(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }
}

/// Detached totals for one flush window. Shares no state with the live
/// aggregator.
#[derive(Debug, Default)]
pub struct AggregatorSnapshot {
    buckets: Vec<(BucketKey, Box<[i64]>)>,
}

impl AggregatorSnapshot {
    pub fn into_buckets(self) -> Vec<(BucketKey, Box<[i64]>)> {
        self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::SampleType;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn registry() -> ValueTypeRegistry {
        ValueTypeRegistry::from_sample_types(&[SampleType::CpuSamples, SampleType::WallTime])
            .unwrap()
    }

    fn stack(raw: u32) -> StackTraceId {
        StackTraceId::new(raw)
    }

    #[test]
    fn repeated_records_accumulate() {
        let aggregator = SampleAggregator::new(&registry());
        for _ in 0..3 {
            aggregator
                .record(stack(0), LabelSet::default(), &[1, 500])
                .unwrap();
        }
        let buckets = aggregator.snapshot_and_reset().into_buckets();
        assert_eq!(1, buckets.len());
        assert_eq!(&[3, 1500][..], &*buckets[0].1);
    }

    #[test]
    fn wrong_value_count_is_rejected() {
        let aggregator = SampleAggregator::new(&registry());
        let err = aggregator
            .record(stack(0), LabelSet::default(), &[1])
            .unwrap_err();
        assert_eq!(
            InvalidSampleError::WrongValueCount {
                expected: 2,
                actual: 1
            },
            err
        );
        assert_eq!(0, aggregator.bucket_count());
    }

    #[test]
    fn negative_values_drop_the_whole_sample() {
        let aggregator = SampleAggregator::new(&registry());
        let err = aggregator
            .record(stack(0), LabelSet::default(), &[1, -500])
            .unwrap_err();
        assert_eq!(
            InvalidSampleError::NegativeValue {
                index: 1,
                value: -500
            },
            err
        );
        assert!(aggregator.snapshot_and_reset().is_empty());
    }

    #[test]
    fn distinct_labels_get_distinct_buckets() {
        let aggregator = SampleAggregator::new(&registry());
        let thread_main = LabelSet::from_api(&[crate::api::Label {
            key: "thread",
            value: "main",
        }])
        .unwrap();
        aggregator
            .record(stack(0), LabelSet::default(), &[1, 10])
            .unwrap();
        aggregator.record(stack(0), thread_main, &[1, 20]).unwrap();
        assert_eq!(2, aggregator.bucket_count());
    }

    #[test]
    fn snapshot_clears_state_for_the_next_window() {
        let aggregator = SampleAggregator::new(&registry());
        aggregator
            .record(stack(0), LabelSet::default(), &[1, 10])
            .unwrap();
        assert_eq!(1, aggregator.snapshot_and_reset().len());
        assert_eq!(0, aggregator.bucket_count());
        assert!(aggregator.snapshot_and_reset().is_empty());
    }

    #[test]
    fn saturating_accumulation_does_not_wrap() {
        let aggregator = SampleAggregator::new(&registry());
        aggregator
            .record(stack(0), LabelSet::default(), &[1, i64::MAX])
            .unwrap();
        aggregator
            .record(stack(0), LabelSet::default(), &[1, i64::MAX])
            .unwrap();
        let buckets = aggregator.snapshot_and_reset().into_buckets();
        assert_eq!(&[2, i64::MAX][..], &*buckets[0].1);
    }

    #[test]
    fn concurrent_records_account_for_every_sample() {
        let aggregator = std::sync::Arc::new(SampleAggregator::new(&registry()));
        let mut handles = Vec::new();
        for worker in 0..8u32 {
            let aggregator = std::sync::Arc::clone(&aggregator);
            handles.push(std::thread::spawn(move || {
                for i in 0..1000u32 {
                    aggregator
                        .record(stack(worker * 16 + i % 16), LabelSet::default(), &[1, 5])
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        let buckets = aggregator.snapshot_and_reset().into_buckets();
        let total: i64 = buckets.iter().map(|(_, values)| values[0]).sum();
        assert_eq!(8000, total);
    }

    proptest! {
        // Shadow model: sequential HashMap accumulation must agree with the
        // sharded aggregator for any interleaving-free input.
        #[test]
        fn proptest_matches_sequential_shadow(
            samples in proptest::collection::vec((0u32..8, 0i64..1000, 0i64..1000), 0..256)
        ) {
            let aggregator = SampleAggregator::new(&registry());
            let mut shadow: HashMap<u32, (i64, i64)> = HashMap::new();

            for (raw_stack, count, time) in &samples {
                aggregator
                    .record(stack(*raw_stack), LabelSet::default(), &[*count, *time])
                    .unwrap();
                let entry = shadow.entry(*raw_stack).or_default();
                entry.0 += count;
                entry.1 += time;
            }

            let buckets = aggregator.snapshot_and_reset().into_buckets();
            prop_assert_eq!(shadow.len(), buckets.len());
            for (key, values) in buckets {
                let expected = shadow[&key.stack_id.to_raw_id()];
                prop_assert_eq!(expected.0, values[0]);
                prop_assert_eq!(expected.1, values[1]);
            }
        }
    }
}
