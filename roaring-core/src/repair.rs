//! Finalization: resolve deferred cardinalities, pick the canonical
//! (smallest) representation for each chunk.

use tracing::debug;

use crate::bitmap::Bitmap;
use crate::container::array::{ArrayContainer, ARRAY_THRESHOLD};
use crate::container::bitset::{BitsetContainer, BITS_PER_CONTAINER, WORDS_PER_CONTAINER};
use crate::container::run::RunContainer;
use crate::container::Container;

const BITSET_BYTES: usize = WORDS_PER_CONTAINER * 8;

/// Picks the most compact canonical variant for `container`, resolving any
/// `UNKNOWN` bitset cardinality along the way. This is the crate's
/// `convert_run_optimize`, named as an external collaborator elsewhere;
/// it lives here since nothing else provides it.
///
/// Policy: a non-full container is only ever Run when its cardinality
/// exceeds `ARRAY_THRESHOLD` (so Array isn't a legal candidate at all) and
/// the run encoding is no bigger than a bitset would be. Below that
/// threshold the canonical form is always Array, matching `finalize_bitset`'s
/// long-standing rule that a container is only promoted to Run when it is
/// exactly full. An earlier draft converted any short, contiguous Array to
/// Run whenever raw run bytes undercut array bytes; that produced a Run for
/// a small contiguous range (e.g. seven values), where the canonical form
/// must stay an Array.
pub fn run_optimize(container: Container) -> Container {
    match container {
        Container::Bitset(b) => finalize_bitset(b),
        Container::Array(a) => finalize_array(a),
        Container::Run(r) => finalize_run(r),
    }
}

fn finalize_bitset(mut b: BitsetContainer) -> Container {
    let card = match b.cardinality() {
        Some(c) => c,
        None => {
            debug!(target: "roaring_core", "repair: resolving unknown bitset cardinality");
            b.resolve_cardinality()
        }
    };
    if card as usize == BITS_PER_CONTAINER {
        return Container::Run(RunContainer::create_range(0, BITS_PER_CONTAINER as u32));
    }
    if card as usize <= ARRAY_THRESHOLD {
        return Container::Array(ArrayContainer::from_bitset(&b));
    }
    Container::Bitset(b)
}

/// The lazy array∪array path (`mixed_union::array_array_union_lazy`) can
/// leave an array above `ARRAY_THRESHOLD`, up to `ARRAY_LAZY_LOWERBOUND`,
/// mid-accumulation; repair must not hand that back out uncompacted.
fn finalize_array(a: ArrayContainer) -> Container {
    if a.is_full() {
        return Container::Run(RunContainer::create_range(0, BITS_PER_CONTAINER as u32));
    }
    let card = a.cardinality() as usize;
    if card <= ARRAY_THRESHOLD {
        return Container::Array(a);
    }
    let mut bitset = BitsetContainer::create();
    bitset.set_list(a.values());
    bitset.resolve_cardinality();
    Container::Bitset(bitset)
}

fn finalize_run(r: RunContainer) -> Container {
    if r.is_full() {
        return Container::Run(r);
    }
    let card = r.cardinality() as usize;
    if card <= ARRAY_THRESHOLD {
        return Container::Array(ArrayContainer::from_sorted_values(r.to_values()));
    }
    // Array isn't a legal candidate above ARRAY_THRESHOLD; pick whichever of
    // Run or Bitset is no bigger than the other. `BITSET_BYTES` is the one
    // size figure this crate can state with certainty (it's exactly the word
    // count this crate's own `BitsetContainer` carries), unlike a fabricated
    // run-versus-array byte formula.
    if r.size_in_bytes() <= BITSET_BYTES {
        return Container::Run(r);
    }
    let mut bitset = BitsetContainer::create();
    for rle in r.runs() {
        bitset.set_lenrange(rle.value, rle.length as u32 + 1);
    }
    bitset.resolve_cardinality();
    Container::Bitset(bitset)
}

/// Walks the result bitmap's chunk-index and canonicalizes every chunk.
/// Pure bookkeeping; no interaction with the inputs that produced it.
pub fn repair_after_lazy(bitmap: &mut Bitmap) {
    bitmap.retain_map(|container| run_optimize(container));
}
