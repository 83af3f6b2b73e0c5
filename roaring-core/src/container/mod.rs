//! The three container variants and their single-input operations.
//!
//! The original C library tags each container with a separate `uint8_t
//! type` living beside its pointer, plus a "shared container" indirection
//! for copy-on-write sharing between bitmaps. Rust ownership makes both
//! unnecessary: [`Container`] is a plain three-armed sum type, always the
//! concrete owned variant.

pub mod array;
pub mod bitset;
pub mod run;

pub use array::{ArrayContainer, ARRAY_LAZY_LOWERBOUND, ARRAY_THRESHOLD};
pub use bitset::BitsetContainer;
pub use run::{Rle16, RunContainer};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Container {
    Bitset(BitsetContainer),
    Array(ArrayContainer),
    Run(RunContainer),
}

impl Container {
    pub fn is_full(&self) -> bool {
        match self {
            Container::Bitset(b) => b.is_full(),
            Container::Array(a) => a.is_full(),
            Container::Run(r) => r.is_full(),
        }
    }

    /// `false` when the true cardinality is known to be zero. A container
    /// with an `UNKNOWN` (deferred) bitset cardinality is conservatively
    /// treated as nonzero, since resolving it would defeat the point of
    /// deferring it.
    pub fn nonzero_cardinality(&self) -> bool {
        match self {
            Container::Bitset(b) => b.cardinality().map_or(true, |c| c != 0),
            Container::Array(a) => a.cardinality() != 0,
            Container::Run(r) => !r.runs().is_empty(),
        }
    }

    pub fn a_full_run() -> Container {
        Container::Run(RunContainer::create_range(0, 1 << 16))
    }

    /// Expands the container back to its individual 16-bit values, sorted
    /// ascending. Used by `Bitmap::iter_values` for inspection/testing;
    /// never on a hot union path.
    pub fn to_values(&self) -> Vec<u16> {
        match self {
            Container::Bitset(b) => b.extract_setbits(),
            Container::Array(a) => a.values().to_vec(),
            Container::Run(r) => r.to_values(),
        }
    }
}
