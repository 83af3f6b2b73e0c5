use test_log::test;

use crate::container::array::{ArrayContainer, ARRAY_THRESHOLD};
use crate::container::bitset::BitsetContainer;
use crate::container::run::{self, Rle16, RunContainer};
use crate::container::Container;
use crate::mixed_union;
use crate::repair::run_optimize;

#[test]
fn bitset_get_and_set_list() {
    let mut b = BitsetContainer::create();
    b.set_list(&[0, 1, 65535]);
    assert!(b.get(0));
    assert!(b.get(1));
    assert!(b.get(65535));
    assert!(!b.get(2));
}

#[test]
fn bitset_resolve_cardinality_after_or_nocard() {
    let mut a = BitsetContainer::create();
    a.set_list_withcard(&[1, 2, 3]);
    let mut b = BitsetContainer::create();
    b.set_list_withcard(&[3, 4]);

    a.or_nocard(&b);
    assert_eq!(a.cardinality(), None);
    assert_eq!(a.resolve_cardinality(), 4);
}

#[test]
fn bitset_set_lenrange_full_container_is_full() {
    let mut b = BitsetContainer::create();
    b.set_lenrange(0, 1 << 16);
    b.resolve_cardinality();
    assert!(b.is_full());
}

#[test]
fn array_union_merges_and_dedups() {
    let a = ArrayContainer::from_sorted_values(vec![1, 2, 5]);
    let b = ArrayContainer::from_sorted_values(vec![2, 3, 5, 6]);
    let result = a.union(&b);
    assert_eq!(result.values(), &[1, 2, 3, 5, 6]);
}

#[test]
fn array_array_union_promotes_to_bitset_past_threshold() {
    let a: Vec<u16> = (0..(ARRAY_THRESHOLD as u32 + 1) as u16).collect();
    let b = ArrayContainer::from_sorted_values(vec![u16::MAX]);
    let a = ArrayContainer::from_sorted_values(a);
    let result = mixed_union::array_array_union(&a, &b);
    assert!(matches!(result, Container::Bitset(_)));
}

#[test]
fn array_array_union_stays_array_under_threshold() {
    let a = ArrayContainer::from_sorted_values(vec![1, 2, 3]);
    let b = ArrayContainer::from_sorted_values(vec![4, 5]);
    let result = mixed_union::array_array_union(&a, &b);
    assert!(matches!(result, Container::Array(_)));
}

#[test]
fn run_container_append_value_merges_adjacent() {
    let mut r = RunContainer::create_given_capacity(4);
    let mut previous = r.append_value_first(1);
    r.append_value(2, &mut previous);
    r.append_value(3, &mut previous);
    r.append_value(10, &mut previous);
    assert_eq!(r.runs(), &[Rle16 { value: 1, length: 2 }, Rle16 { value: 10, length: 0 }]);
}

#[test]
fn run_container_union_inplace_merges_two_sequences() {
    let mut a = RunContainer::create_given_capacity(2);
    a.copy_from(&run::from_sorted_values(&[1, 2, 3, 10]));
    let b = run::from_sorted_values(&[2, 3, 4, 20]);
    a.union_inplace(&b);
    assert_eq!(a.to_values(), vec![1, 2, 3, 4, 10, 20]);
}

#[test]
fn run_container_full_union_short_circuits() {
    let mut full = RunContainer::create_range(0, 1 << 16);
    let other = run::from_sorted_values(&[5, 6]);
    full.union_inplace(&other);
    assert!(full.is_full());
}

#[test]
fn array_run_union_merges_values_into_runs() {
    let values = ArrayContainer::from_sorted_values(vec![0, 4, 5]);
    let run = run::from_sorted_values(&[1, 2, 3, 10]);
    let merged = mixed_union::array_run_union(&values, &run);
    assert_eq!(merged.to_values(), vec![0, 1, 2, 3, 4, 5, 10]);
}

#[test]
fn array_run_union_inplace_matches_non_inplace() {
    let values = ArrayContainer::from_sorted_values(vec![0, 4, 5, 200]);
    let mut run_a = run::from_sorted_values(&[1, 2, 3, 10]);
    let run_b = run::from_sorted_values(&[1, 2, 3, 10]);

    let expected = mixed_union::array_run_union(&values, &run_b);
    mixed_union::array_run_union_inplace(&values, &mut run_a);
    assert_eq!(run_a.to_values(), expected.to_values());
}

#[test]
fn run_optimize_picks_array_for_sparse_run() {
    let run = run::from_sorted_values(&[1, 1000, 2000]);
    let result = run_optimize(Container::Run(run));
    assert!(matches!(result, Container::Array(_)));
}

#[test]
fn run_optimize_keeps_contiguous_array_under_threshold_as_array() {
    // A contiguous range is cheap as a Run, but canonical form below
    // ARRAY_THRESHOLD is always Array, e.g. a 7-element contiguous union
    // stays an ArrayContainer rather than collapsing to a single-run
    // RunContainer.
    let values = ArrayContainer::from_sorted_values((0..2000).collect());
    let result = run_optimize(Container::Array(values));
    assert!(matches!(result, Container::Array(_)));
}

#[test]
fn run_optimize_keeps_large_contiguous_run_as_run() {
    // Above ARRAY_THRESHOLD, Array is no longer a legal canonical form, so a
    // large contiguous run stays a RunContainer rather than becoming a
    // BitsetContainer.
    let run = run::from_sorted_values(&(0..50_000u32).map(|v| v as u16).collect::<Vec<_>>());
    let result = run_optimize(Container::Run(run));
    assert!(matches!(result, Container::Run(_)));
}

#[test]
fn run_optimize_resolves_unknown_bitset_cardinality() {
    let mut b = BitsetContainer::create();
    b.set_list(&(0..5000u32).map(|v| v as u16).collect::<Vec<_>>());
    b.set_cardinality(None);
    let result = run_optimize(Container::Bitset(b));
    match result {
        Container::Bitset(b) => assert_eq!(b.cardinality(), Some(5000)),
        other => panic!("expected bitset to stay a bitset at this density, got {other:?}"),
    }
}

#[test]
fn run_optimize_demotes_oversized_lazy_array_to_bitset() {
    // `array_array_union_lazy` can hand back an Array above ARRAY_THRESHOLD
    // (up to ARRAY_LAZY_LOWERBOUND) while batching lazy unions. Repair must
    // never let that escape as a canonical Array.
    let values: Vec<u16> = (0..(ARRAY_THRESHOLD as u32 + 100) as u16).collect();
    let oversized = ArrayContainer::from_sorted_values(values);
    let result = run_optimize(Container::Array(oversized));
    match result {
        Container::Bitset(b) => assert_eq!(b.cardinality(), Some(ARRAY_THRESHOLD as u32 + 100)),
        other => panic!("expected an oversized array to demote to bitset, got {other:?}"),
    }
}

#[test]
fn array_try_from_sorted_values_rejects_unsorted_input() {
    assert!(ArrayContainer::try_from_sorted_values(vec![1, 2, 3]).is_ok());
    assert!(ArrayContainer::try_from_sorted_values(vec![2, 1]).is_err());
    assert!(ArrayContainer::try_from_sorted_values(vec![1, 1]).is_err());
}

#[test]
fn full_container_detection_across_variants() {
    let full_run = Container::a_full_run();
    assert!(full_run.is_full());

    let mut full_bitset = BitsetContainer::create();
    full_bitset.set_lenrange(0, 1 << 16);
    full_bitset.resolve_cardinality();
    assert!(Container::Bitset(full_bitset).is_full());

    let full_array = ArrayContainer::from_sorted_values((0..=u16::MAX).collect());
    assert!(Container::Array(full_array).is_full());
}
