//! Outer driver: drains the priority queue in ascending key order, folding
//! same-key runs of chunks via `chunk_union::container_lazy_ior`.

use tracing::trace;

use crate::bitmap::Bitmap;
use crate::chunk_union::container_lazy_ior;
use crate::container::Container;
use crate::pq::Pq;
use crate::repair::repair_after_lazy;

/// Computes the union of `bitmaps` using a heap-driven merge rather than
/// the naive fold-all-pairs approach. The invariant that each chunk is
/// processed exactly once, in ascending key order, falls out of the heap's
/// ordering on key alone; fullness/size tiebreaks only affect which
/// cursor is processed first among several sharing a key, never the key
/// order itself.
pub fn or_many_heap(bitmaps: &[&Bitmap]) -> Bitmap {
    match bitmaps.len() {
        0 => return Bitmap::new(),
        1 => return bitmaps[0].clone(),
        _ => {}
    }

    let mut result = Bitmap::new();
    let mut pq = Pq::build(bitmaps);
    let mut pending: Option<(u16, Container)> = None;

    while !pq.is_empty() {
        let top = pq.peek().expect("loop guarded by is_empty");
        let key = pq.key_of(top);
        // Cloning is required: the container is borrowed from an input
        // bitmap, and `pending` must outlive this iteration.
        let container = pq.container_of(top).clone();
        pq.advance_top();

        pending = Some(match pending {
            Some((pending_key, pending_container)) if pending_key == key => {
                (pending_key, container_lazy_ior(pending_container, &container))
            }
            Some((pending_key, pending_container)) => {
                result.append(pending_key, pending_container);
                (key, container)
            }
            None => (key, container),
        });
    }

    if let Some((key, container)) = pending {
        result.append(key, container);
    }

    trace!(target: "roaring_core", chunks = result.len(), "or_many_heap: repairing result");
    repair_after_lazy(&mut result);
    result
}
