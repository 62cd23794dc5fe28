// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use super::stack_trace::{BorrowedStack, StackTrace, StackTraceId};
use crate::api;
use crate::collections::FxHashMap;
use crossbeam_utils::CachePadded;
use hashbrown::Equivalent;
use parking_lot::RwLock;
use rustc_hash::FxHasher;
use std::hash::{BuildHasher, BuildHasherDefault};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

impl Equivalent<Arc<StackTrace>> for BorrowedStack<'_> {
    fn equivalent(&self, key: &Arc<StackTrace>) -> bool {
        self.matches(key)
    }
}

const SHARD_COUNT: usize = 16;

#[derive(Default)]
struct Shard {
    stacks: FxHashMap<Arc<StackTrace>, StackTraceId>,
    by_id: FxHashMap<StackTraceId, Arc<StackTrace>>,
}

/// Deduplicates call stacks behind stable integer identities.
///
/// Storage is sharded by stack hash; each shard has its own read-write lock
/// so concurrent reporting threads interning unrelated stacks do not
/// contend. Interned stacks live until [StackTraceInterner::reset]; without
/// resets, memory grows with the number of distinct stacks ever seen.
pub struct StackTraceInterner {
    shards: Box<[CachePadded<RwLock<Shard>>]>,
    next_id: AtomicU32,
}

impl StackTraceInterner {
    pub fn new() -> Self {
        let shards = (0..SHARD_COUNT)
            .map(|_| CachePadded::new(RwLock::new(Shard::default())))
            .collect();
        Self {
            shards,
            next_id: AtomicU32::new(0),
        }
    }

    #[inline]
    fn select_shard(hash: u64) -> usize {
        (hash as usize) & (SHARD_COUNT - 1)
    }

    /// Resolves the id for a frame sequence, interning it on first sight.
    /// Structurally equal sequences always yield the same id within a
    /// reset window; new sequences get a fresh, monotonically increasing id.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct stacks are ever interned.
    pub fn intern(&self, frames: &[api::Frame<'_>]) -> StackTraceId {
        let key = BorrowedStack(frames);
        let hash = BuildHasherDefault::<FxHasher>::default().hash_one(key);
        let lock = &self.shards[Self::select_shard(hash)];

        {
            let guard = lock.read();
            if let Some(&id) = guard.stacks.get(&key) {
                return id;
            }
        }

        let mut guard = lock.write();
        // Another thread may have interned the same stack between the read
        // and write acquisitions.
        if let Some(&id) = guard.stacks.get(&key) {
            return id;
        }

        let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
        assert!(raw != u32::MAX, "stack trace ids exhausted");
        let id = StackTraceId::new(raw);
        let stack = Arc::new(StackTrace::from_api(frames));
        guard.stacks.insert(Arc::clone(&stack), id);
        guard.by_id.insert(id, stack);
        id
    }

    /// Point-in-time copy of every interned stack, keyed by id.
    pub fn stack_table(&self) -> StackTable {
        let mut stacks = FxHashMap::default();
        for shard in &self.shards {
            let guard = shard.read();
            stacks.extend(guard.by_id.iter().map(|(&id, stack)| (id, Arc::clone(stack))));
        }
        StackTable { stacks }
    }

    /// Drops all interned stacks. The id counter is not rewound, so ids
    /// from before the reset can never alias a stack interned after it.
    pub fn reset(&self) {
        for shard in &self.shards {
            let mut guard = shard.write();
            guard.stacks.clear();
            guard.by_id.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().by_id.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StackTraceInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// A detached id → stack mapping handed to the profile builder.
pub struct StackTable {
    stacks: FxHashMap<StackTraceId, Arc<StackTrace>>,
}

impl StackTable {
    pub fn get(&self, id: StackTraceId) -> Option<&Arc<StackTrace>> {
        self.stacks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}
