//! N-way union of containers that all share one high-order key.

use tracing::trace;

use crate::container::bitset::BitsetContainer;
use crate::container::run::RunContainer;
use crate::container::Container;
use crate::mixed_union;
use crate::repair::run_optimize;

/// Folds `containers` (all implicitly sharing one key) into a single
/// container. Maintains at most two accumulators, a bitset and a run,
/// and deliberately never an array accumulator: arrays are useless once a
/// chunk grows past [`crate::container::ARRAY_THRESHOLD`], so the first
/// array encountered promotes straight to a bitset. This is the simpler
/// of the two policies the original source carries (it also has an
/// alternate bitset+array+run path); we port only this one.
pub fn container_or_many(containers: &[Container]) -> Option<Container> {
    match containers.len() {
        0 => return None,
        1 => return Some(containers[0].clone()),
        _ => {}
    }

    if containers.iter().any(Container::is_full) {
        trace!(target: "roaring_core", "container_or_many: full container short-circuit");
        return Some(Container::a_full_run());
    }

    let mut bitset: Option<BitsetContainer> = None;
    let mut run: Option<RunContainer> = None;

    for c in containers {
        if !c.nonzero_cardinality() {
            continue;
        }
        match c {
            Container::Bitset(b) => match &mut bitset {
                None => bitset = Some(b.clone()),
                Some(acc) => mixed_union::bitset_bitset_union_lazy(acc, b),
            },
            Container::Array(a) => match &mut bitset {
                None => {
                    trace!(target: "roaring_core", "container_or_many: promoting first array to bitset accumulator");
                    bitset = Some(BitsetContainer::from_array(a));
                }
                Some(acc) => mixed_union::array_bitset_union_lazy(acc, a),
            },
            Container::Run(r) => match &mut run {
                None => run = Some(r.clone()),
                Some(acc) => {
                    mixed_union::run_run_union_inplace(acc, r);
                    if acc.is_full() {
                        trace!(target: "roaring_core", "container_or_many: run accumulator became full mid-fold");
                        return Some(Container::a_full_run());
                    }
                }
            },
        }
    }

    let result = match (bitset, run) {
        (Some(mut b), Some(r)) => {
            mixed_union::run_bitset_union_lazy(&mut b, &r);
            Container::Bitset(b)
        }
        (Some(b), None) => Container::Bitset(b),
        (None, Some(r)) => Container::Run(r),
        (None, None) => return None,
    };

    Some(run_optimize(result))
}

/// `container_lazy_ior`: in-place lazy union of two containers of
/// arbitrary (possibly differing) variants, used by the heap aggregator to
/// fold a newly-visited chunk into the pending accumulator for its key.
/// Returns the (possibly differently-typed) accumulated container.
pub fn container_lazy_ior(dst: Container, src: &Container) -> Container {
    if dst.is_full() {
        return dst;
    }
    if src.is_full() {
        return Container::a_full_run();
    }
    match (dst, src) {
        (Container::Bitset(mut b), Container::Bitset(s)) => {
            mixed_union::bitset_bitset_union_lazy(&mut b, s);
            Container::Bitset(b)
        }
        (Container::Bitset(mut b), Container::Array(s)) => {
            mixed_union::array_bitset_union_lazy(&mut b, s);
            Container::Bitset(b)
        }
        (Container::Bitset(mut b), Container::Run(s)) => {
            mixed_union::run_bitset_union_lazy(&mut b, s);
            Container::Bitset(b)
        }
        (Container::Array(a), Container::Bitset(s)) => {
            let mut b = s.clone();
            mixed_union::array_bitset_union_lazy(&mut b, &a);
            Container::Bitset(b)
        }
        (Container::Array(a), Container::Array(s)) => mixed_union::array_array_union_lazy(&a, s),
        (Container::Array(a), Container::Run(s)) => Container::Run(mixed_union::array_run_union(&a, s)),
        (Container::Run(r), Container::Bitset(s)) => {
            let mut b = s.clone();
            mixed_union::run_bitset_union_lazy(&mut b, &r);
            Container::Bitset(b)
        }
        (Container::Run(r), Container::Array(s)) => {
            Container::Run(mixed_union::array_run_union(s, &r))
        }
        (Container::Run(mut r), Container::Run(s)) => {
            mixed_union::run_run_union_inplace(&mut r, s);
            if r.is_full() {
                Container::a_full_run()
            } else {
                Container::Run(r)
            }
        }
    }
}
