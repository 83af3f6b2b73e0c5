//! The multi-way union (OR-many) engine for a Roaring-style compressed
//! bitmap: per-chunk N-way union ([`chunk_union::container_or_many`]) and
//! cross-chunk heap-driven aggregation
//! ([`heap_aggregator::or_many_heap`]).
//!
//! Everything else a full bitmap library needs (serialization, the other
//! set operations, CLI tooling) is out of scope for this crate.

#[cfg(test)]
mod test;

pub mod bitmap;
pub mod chunk_union;
pub mod container;
pub mod heap_aggregator;
pub mod mixed_union;
pub mod repair;

mod pq;

pub use bitmap::Bitmap;
pub use container::Container;

pub use chunk_union::container_or_many;
/// Alias matching the original public entry point's name.
pub use heap_aggregator::or_many_heap as roaring_bitmap_or_many_heap;
