use test_log::test;

use crate::bitmap::Bitmap;
use crate::container::Container;
use crate::roaring_bitmap_or_many_heap as or_many_heap;

mod container;

fn values_of(bitmap: &Bitmap) -> Vec<u32> {
    bitmap.iter_values().collect()
}

#[test]
fn or_many_heap_empty_input_is_empty_bitmap() {
    let result = or_many_heap(&[]);
    assert!(result.is_empty());
}

#[test]
fn or_many_heap_single_input_is_a_deep_copy() {
    let b = Bitmap::from_values([1, 2, 3]);
    let result = or_many_heap(&[&b]);
    assert_eq!(values_of(&result), values_of(&b));
}

#[test]
fn or_many_heap_basic_three_way_union() {
    let a = Bitmap::from_values([1, 2, 3]);
    let b = Bitmap::from_values([3, 4, 5]);
    let c = Bitmap::from_values([5, 6, 7]);
    let result = or_many_heap(&[&a, &b, &c]);
    assert_eq!(values_of(&result), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(result.len(), 1);
    assert!(
        matches!(result.chunks()[0].container, Container::Array(_)),
        "a 7-element union must stay an ArrayContainer, got {:?}",
        result.chunks()[0].container
    );
}

#[test]
fn or_many_heap_spans_multiple_chunks() {
    let a = Bitmap::from_values([0x1_0000, 0x1_0001]);
    let b = Bitmap::from_values([0x2_0000]);
    let result = or_many_heap(&[&a, &b]);
    assert_eq!(result.len(), 2);
    assert_eq!(result.key_at(0), 1);
    assert_eq!(result.key_at(1), 2);
    assert_eq!(values_of(&result), vec![0x1_0000, 0x1_0001, 0x2_0000]);
    assert!(matches!(result.chunks()[0].container, Container::Array(_)));
    assert!(matches!(result.chunks()[1].container, Container::Array(_)));
}

#[test]
fn or_many_heap_is_commutative() {
    let a = Bitmap::from_values([1, 5, 9, 100_000]);
    let b = Bitmap::from_values([2, 5, 10, 200_000]);
    let ab = or_many_heap(&[&a, &b]);
    let ba = or_many_heap(&[&b, &a]);
    assert_eq!(ab, ba);
}

#[test]
fn or_many_heap_is_associative() {
    let a = Bitmap::from_values([1, 70_000]);
    let b = Bitmap::from_values([2, 70_001]);
    let c = Bitmap::from_values([3, 70_002]);

    let bc = or_many_heap(&[&b, &c]);
    let left = or_many_heap(&[&a, &bc]);
    let right = or_many_heap(&[&a, &b, &c]);
    assert_eq!(left, right);
}

#[test]
fn or_many_heap_is_idempotent() {
    let b = Bitmap::from_values([1, 2, 3, 70_000]);
    let result = or_many_heap(&[&b, &b]);
    assert_eq!(values_of(&result), values_of(&b));
}

#[test]
fn or_many_heap_identity_with_empty_bitmap() {
    let b = Bitmap::from_values([1, 2, 3]);
    let empty = Bitmap::new();
    let result = or_many_heap(&[&b, &empty]);
    assert_eq!(values_of(&result), values_of(&b));
}

#[test]
fn or_many_heap_three_copies_of_mixed_variant_bitmap_is_stable() {
    // Mixes a dense run (0..5000), a sparse set (in a different chunk)
    // and a lone high value, so the result spans bitset/array/run chunks.
    let mut values: Vec<u32> = (0..5000).collect();
    values.push(100_000);
    values.push(100_050);
    values.push(3_000_000_123);
    let b = Bitmap::from_values(values);

    let once = or_many_heap(&[&b]);
    let thrice = or_many_heap(&[&b, &b, &b]);
    assert_eq!(once, thrice);
}
