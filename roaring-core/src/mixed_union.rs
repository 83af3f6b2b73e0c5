//! Pairwise unions between container variant pairs.
//!
//! The original C library's signatures let `dst` alias one input and copy
//! the other in when it doesn't; Rust's borrow checker makes that aliasing
//! question moot; (a `&mut` destination and a separate `&` source can never
//! be the same in-place buffer by accident). So each of these is simply an
//! in-place accumulation: `dst.union_with(src)`. The "start a fresh
//! accumulator from this container" half of the original contract is
//! handled at the call site with an ordinary `.clone()` (see
//! `chunk_union`), which is exactly what the C code's "copy when not
//! aliased" branch amounted to anyway.
//!
//! A "lazy" variant skips the final cardinality recomputation and leaves
//! the bitset's cardinality `UNKNOWN`, trusting the caller to resolve it
//! later (see [`crate::repair`]) once a batch of lazy unions has been
//! folded in.

use crate::container::array::{self, ArrayContainer, ARRAY_LAZY_LOWERBOUND, ARRAY_THRESHOLD};
use crate::container::bitset::BitsetContainer;
use crate::container::run::{self, RunContainer};
use crate::container::Container;

/// Array ∪ Bitset → Bitset, eager, in place: recomputes cardinality.
pub fn array_bitset_union(dst: &mut BitsetContainer, src: &ArrayContainer) {
    dst.set_list_withcard(src.values());
}

/// Array ∪ Bitset → Bitset, lazy, in place: leaves cardinality `UNKNOWN`.
pub fn array_bitset_union_lazy(dst: &mut BitsetContainer, src: &ArrayContainer) {
    dst.set_list(src.values());
    dst.set_cardinality(None);
}

/// Run ∪ Bitset → Bitset, eager, in place. Precondition: `src` is not
/// full; the caller is expected to have already short-circuited on full
/// containers.
pub fn run_bitset_union(dst: &mut BitsetContainer, src: &RunContainer) {
    debug_assert!(!src.is_full(), "full run must be caught upstream");
    for rle in src.runs() {
        dst.set_lenrange(rle.value, rle.length as u32 + 1);
    }
    dst.resolve_cardinality();
}

/// Run ∪ Bitset → Bitset, lazy, in place.
pub fn run_bitset_union_lazy(dst: &mut BitsetContainer, src: &RunContainer) {
    debug_assert!(!src.is_full(), "full run must be caught upstream");
    for rle in src.runs() {
        dst.set_lenrange(rle.value, rle.length as u32 + 1);
    }
    dst.set_cardinality(None);
}

/// Array ∪ Run → Run. If `src2` is full, returns a copy of it.
pub fn array_run_union(src1: &ArrayContainer, src2: &RunContainer) -> RunContainer {
    run::array_run_union(src1.values(), src2)
}

/// Array ∪ Run → Run, in place. `src2` is both an input and the output.
pub fn array_run_union_inplace(src1: &ArrayContainer, src2: &mut RunContainer) {
    run::array_run_union_inplace(src1.values(), src2)
}

/// Array ∪ Array → Array or Bitset, eager. Promotes to a bitset only when
/// the combined cardinality exceeds [`ARRAY_THRESHOLD`], and demotes back
/// to an array if heavy overlap brought the bitset's true cardinality back
/// under the threshold.
pub fn array_array_union(src1: &ArrayContainer, src2: &ArrayContainer) -> Container {
    array_array_union_with_threshold(src1, src2, ARRAY_THRESHOLD)
}

/// Array ∪ Array → Array or Bitset, lazy: uses the higher
/// [`ARRAY_LAZY_LOWERBOUND`] watermark so intermediate arrays survive
/// longer during batched accumulation, and leaves a promoted bitset's
/// cardinality `UNKNOWN`.
pub fn array_array_union_lazy(src1: &ArrayContainer, src2: &ArrayContainer) -> Container {
    let total = src1.cardinality() as usize + src2.cardinality() as usize;
    if total <= ARRAY_LAZY_LOWERBOUND {
        return Container::Array(src1.union(src2));
    }
    let mut bitset = BitsetContainer::create();
    bitset.set_list(src1.values());
    bitset.set_list(src2.values());
    bitset.set_cardinality(None);
    Container::Bitset(bitset)
}

fn array_array_union_with_threshold(
    src1: &ArrayContainer,
    src2: &ArrayContainer,
    threshold: usize,
) -> Container {
    let total = src1.cardinality() as usize + src2.cardinality() as usize;
    if total <= threshold {
        return Container::Array(src1.union(src2));
    }
    let mut bitset = BitsetContainer::create();
    bitset.set_list(src1.values());
    let card = bitset.set_list_withcard(src2.values());
    if card as usize <= ARRAY_THRESHOLD {
        return Container::Array(ArrayContainer::from_bitset(&bitset));
    }
    Container::Bitset(bitset)
}

/// Bitset ∪ Bitset → Bitset, lazy: word-wise OR, cardinality left
/// `UNKNOWN`.
pub fn bitset_bitset_union_lazy(dst: &mut BitsetContainer, src2: &BitsetContainer) {
    dst.or_nocard(src2);
}

/// Run ∪ Run → Run, in place: merge-appends the two run sequences.
pub fn run_run_union_inplace(dst: &mut RunContainer, src2: &RunContainer) {
    dst.union_inplace(src2);
}

/// Sorted-sequence union shared by the array∪array path and
/// `ArrayContainer::union`.
pub fn union_uint16(a: &[u16], b: &[u16], dst: &mut Vec<u16>) {
    array::union_uint16(a, b, dst)
}
