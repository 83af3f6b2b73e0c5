//! The chunk-index: a sequence of (key, container) pairs sorted ascending
//! by key. Plays the role the original spec assigns to the "chunk-index
//! collaborator" (`ra_get_size`, `ra_get_key_at_index`,
//! `ra_get_container_at_index`, `ra_append`), here as inherent methods
//! rather than free functions, since Rust has no need for the C
//! array-of-structs-plus-parallel-type-array indirection.

use std::collections::BTreeMap;

use roaring_base::{err, Result};

use crate::container::array::ArrayContainer;
use crate::container::Container;
use crate::repair::run_optimize;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ChunkEntry {
    pub key: u16,
    pub container: Container,
}

/// A set of 32-bit values, represented as a sorted sequence of chunks. No
/// two chunks share a key; no chunk's container is empty.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Bitmap {
    chunks: Vec<ChunkEntry>,
}

impl Bitmap {
    pub fn new() -> Self {
        Bitmap { chunks: Vec::new() }
    }

    pub fn chunks(&self) -> &[ChunkEntry] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn key_at(&self, index: usize) -> u16 {
        self.chunks[index].key
    }

    pub fn container_at(&self, index: usize) -> &Container {
        &self.chunks[index].container
    }

    /// Appends a chunk. The key must be strictly greater than the last
    /// appended key, and the container must be non-empty; both are
    /// bitmap invariants the engine maintains internally.
    pub fn append(&mut self, key: u16, container: Container) {
        debug_assert!(self.chunks.last().map_or(true, |c| c.key < key));
        debug_assert!(container.nonzero_cardinality());
        self.chunks.push(ChunkEntry { key, container });
    }

    /// Like [`Self::append`], but for callers outside this crate:
    /// checked in every build, and fails with an error instead of
    /// silently building a bitmap that violates the ascending-key,
    /// nonempty-container invariants the rest of the engine relies on.
    pub fn try_append(&mut self, key: u16, container: Container) -> Result<()> {
        if !self.chunks.last().map_or(true, |c| c.key < key) {
            return Err(err("chunk keys must be appended in strictly ascending order"));
        }
        if !container.nonzero_cardinality() {
            return Err(err("a chunk's container must not be empty"));
        }
        self.chunks.push(ChunkEntry { key, container });
        Ok(())
    }

    /// Replaces every chunk's container with `f(container)`, in place.
    /// Used by `repair::repair_after_lazy` to canonicalize every chunk in
    /// one pass.
    pub fn retain_map(&mut self, mut f: impl FnMut(Container) -> Container) {
        for entry in self.chunks.iter_mut() {
            let placeholder = Container::Array(ArrayContainer::default());
            let taken = std::mem::replace(&mut entry.container, placeholder);
            entry.container = f(taken);
        }
    }

    /// Builds a bitmap from an arbitrary (unordered, possibly duplicated)
    /// sequence of 32-bit values. Not a serialization format, just the
    /// minimal construction surface the union engine needs to be
    /// independently testable.
    pub fn from_values(values: impl IntoIterator<Item = u32>) -> Self {
        let mut by_key: BTreeMap<u16, Vec<u16>> = BTreeMap::new();
        for v in values {
            let key = (v >> 16) as u16;
            let low = (v & 0xFFFF) as u16;
            by_key.entry(key).or_default().push(low);
        }
        let mut bitmap = Bitmap::new();
        for (key, mut lows) in by_key {
            lows.sort_unstable();
            lows.dedup();
            if lows.is_empty() {
                continue;
            }
            let container = run_optimize(Container::Array(ArrayContainer::from_sorted_values(lows)));
            bitmap.append(key, container);
        }
        bitmap
    }

    /// Iterates the represented set of 32-bit values in ascending order.
    pub fn iter_values(&self) -> impl Iterator<Item = u32> + '_ {
        self.chunks.iter().flat_map(|entry| {
            let key = entry.key;
            entry
                .container
                .to_values()
                .into_iter()
                .map(move |low| ((key as u32) << 16) | low as u32)
        })
    }

    pub fn contains(&self, value: u32) -> bool {
        let key = (value >> 16) as u16;
        let low = (value & 0xFFFF) as u16;
        match self.chunks.binary_search_by_key(&key, |c| c.key) {
            Ok(idx) => match &self.chunks[idx].container {
                Container::Bitset(b) => b.get(low),
                Container::Array(a) => a.values().binary_search(&low).is_ok(),
                Container::Run(r) => r
                    .runs()
                    .iter()
                    .any(|rle| low >= rle.value && (low as u32) <= rle.value as u32 + rle.length as u32),
            },
            Err(_) => false,
        }
    }
}
