//! Dense bit-array container: one bit per value in `0..=65535`.

use super::array::ArrayContainer;

pub(crate) const BITS_PER_CONTAINER: usize = 1 << 16;
pub(crate) const WORDS_PER_CONTAINER: usize = BITS_PER_CONTAINER / 64;

/// A 65,536-bit dense bitmap, plus a cardinality that may be deferred.
///
/// `cardinality == None` is the `BITSET_UNKNOWN_CARDINALITY` sentinel: it
/// shows up only transiently, in the middle of a lazy union chain, and must
/// be resolved (see [`crate::repair`]) before a bitmap is handed back to a
/// caller.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitsetContainer {
    words: Box<[u64; WORDS_PER_CONTAINER]>,
    cardinality: Option<u32>,
}

impl BitsetContainer {
    pub fn create() -> Self {
        BitsetContainer {
            words: Box::new([0u64; WORDS_PER_CONTAINER]),
            cardinality: Some(0),
        }
    }

    pub fn from_array(array: &ArrayContainer) -> Self {
        let mut bitset = Self::create();
        bitset.set_list(array.values());
        bitset.cardinality = Some(array.cardinality());
        bitset
    }

    pub fn words(&self) -> &[u64; WORDS_PER_CONTAINER] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [u64; WORDS_PER_CONTAINER] {
        &mut self.words
    }

    /// The stored cardinality, or `None` if it's been deferred by a lazy op.
    pub fn cardinality(&self) -> Option<u32> {
        self.cardinality
    }

    pub fn set_cardinality(&mut self, card: Option<u32>) {
        self.cardinality = card;
    }

    pub fn compute_cardinality(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Recomputes and stores the true cardinality, returning it.
    pub fn resolve_cardinality(&mut self) -> u32 {
        let card = self.compute_cardinality();
        self.cardinality = Some(card);
        card
    }

    pub fn get(&self, i: u16) -> bool {
        let i = i as usize;
        (self.words[i / 64] & (1u64 << (i % 64))) != 0
    }

    fn set_bit(&mut self, i: u16) {
        let i = i as usize;
        self.words[i / 64] |= 1u64 << (i % 64);
    }

    /// Sets one bit per value; leaves the cardinality as-is (caller decides
    /// whether to mark it unknown or recompute).
    pub fn set_list(&mut self, values: &[u16]) {
        for &v in values {
            self.set_bit(v);
        }
    }

    /// Sets one bit per value and returns the resulting true cardinality.
    pub fn set_list_withcard(&mut self, values: &[u16]) -> u32 {
        self.set_list(values);
        self.resolve_cardinality()
    }

    /// Sets the contiguous bit range `[start, start+length)`.
    pub fn set_lenrange(&mut self, start: u16, length: u32) {
        if length == 0 {
            return;
        }
        let start = start as usize;
        let end = start + length as usize; // exclusive, may equal 65536
        let mut i = start;
        while i < end {
            self.set_bit(i as u16);
            i += 1;
        }
    }

    /// Dense -> sorted u16 list, used only by run-optimize conversion back
    /// to an array container.
    pub fn extract_setbits(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(self.cardinality.unwrap_or(0) as usize);
        for (word_idx, &word) in self.words.iter().enumerate() {
            let mut w = word;
            while w != 0 {
                let bit = w.trailing_zeros();
                out.push((word_idx * 64 + bit as usize) as u16);
                w &= w - 1;
            }
        }
        out
    }

    /// Word-wise OR in place; cardinality is left as `UNKNOWN` since the
    /// caller almost always wants to batch several of these before paying
    /// for a popcount pass.
    pub fn or_nocard(&mut self, other: &BitsetContainer) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= *b;
        }
        self.cardinality = None;
    }

    pub fn is_full(&self) -> bool {
        match self.cardinality {
            Some(c) => c as usize == BITS_PER_CONTAINER,
            None => self.words.iter().all(|w| *w == u64::MAX),
        }
    }
}
