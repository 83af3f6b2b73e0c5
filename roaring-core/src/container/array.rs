//! Sorted, duplicate-free container: efficient while the chunk is sparse.

use super::bitset::BitsetContainer;
use roaring_base::{err, Result};

/// The maximum cardinality at which an [`ArrayContainer`] beats a
/// [`BitsetContainer`] on space: 4,096 u16s (8KB) is the same size as the
/// 1,024-word bitset.
pub const ARRAY_THRESHOLD: usize = 4096;

/// A higher watermark used only by the lazy array-union path: during
/// batched accumulation it's worth keeping an oversized array around a
/// little longer rather than promoting to a bitset on every chunk.
pub const ARRAY_LAZY_LOWERBOUND: usize = 8192;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ArrayContainer {
    values: Vec<u16>,
}

impl ArrayContainer {
    pub fn create_given_capacity(capacity: usize) -> Self {
        ArrayContainer {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Builds from a slice the caller guarantees is already sorted and
    /// duplicate-free. Only checked in debug builds; every call site
    /// within this crate already holds the invariant by construction.
    pub fn from_sorted_values(values: Vec<u16>) -> Self {
        debug_assert!(values.windows(2).all(|w| w[0] < w[1]));
        ArrayContainer { values }
    }

    /// Like [`Self::from_sorted_values`], but for callers outside this
    /// crate that can't be trusted to uphold the invariant at compile
    /// time: checked in every build, and fails with an error instead of
    /// corrupting the container or panicking.
    pub fn try_from_sorted_values(values: Vec<u16>) -> Result<Self> {
        if !values.windows(2).all(|w| w[0] < w[1]) {
            return Err(err("values must be sorted and duplicate-free"));
        }
        Ok(ArrayContainer { values })
    }

    pub fn from_bitset(bitset: &BitsetContainer) -> Self {
        ArrayContainer::from_sorted_values(bitset.extract_setbits())
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn cardinality(&self) -> u32 {
        self.values.len() as u32
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == 1 << 16
    }

    pub fn copy_from(&mut self, other: &ArrayContainer) {
        self.values.clear();
        self.values.extend_from_slice(&other.values);
    }

    pub fn append(&mut self, value: u16) {
        debug_assert!(match self.values.last() {
            Some(&last) => last < value,
            None => true,
        });
        self.values.push(value);
    }

    pub fn shrink_to_fit(&mut self) {
        self.values.shrink_to_fit();
    }

    /// Sorted-sequence union of two arrays into a fresh, capacity-sized one.
    pub fn union(&self, other: &ArrayContainer) -> ArrayContainer {
        let mut out = Vec::with_capacity(self.values.len() + other.values.len());
        union_uint16(&self.values, &other.values, &mut out);
        ArrayContainer { values: out }
    }

    /// In-place union: grows `self` if needed and merges `other` in.
    pub fn union_inplace(&mut self, other: &ArrayContainer) {
        let merged = self.union(other);
        self.values = merged.values;
    }
}

/// Merges two sorted, duplicate-free u16 slices into `dst` (sorted,
/// duplicate-free). `dst` is cleared first; this mirrors the standalone
/// `union_uint16` helper so the array∪array path in [`crate::mixed_union`]
/// and [`ArrayContainer::union`] share one merge routine.
pub fn union_uint16(a: &[u16], b: &[u16], dst: &mut Vec<u16>) {
    dst.clear();
    dst.reserve(a.len() + b.len());
    let mut ai = 0;
    let mut bi = 0;
    while ai < a.len() && bi < b.len() {
        match a[ai].cmp(&b[bi]) {
            std::cmp::Ordering::Less => {
                dst.push(a[ai]);
                ai += 1;
            }
            std::cmp::Ordering::Greater => {
                dst.push(b[bi]);
                bi += 1;
            }
            std::cmp::Ordering::Equal => {
                dst.push(a[ai]);
                ai += 1;
                bi += 1;
            }
        }
    }
    dst.extend_from_slice(&a[ai..]);
    dst.extend_from_slice(&b[bi..]);
}
