//! Flat-array binary min-heap over cursors into the input bitmaps, ordered
//! by (key, fullness, unknown-cardinality, cheap size estimate).

use crate::bitmap::Bitmap;
use crate::container::Container;

/// A cursor: which input bitmap, and which chunk within it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PqElement {
    bitmap_index: usize,
    pos: usize,
}

pub(crate) struct Pq<'a> {
    bitmaps: &'a [&'a Bitmap],
    elements: Vec<PqElement>,
}

impl<'a> Pq<'a> {
    /// Builds the heap from the non-empty input bitmaps only, via
    /// bottom-up heapify. Cursor slots are assigned against a compacted
    /// push count rather than the raw input index, so an empty bitmap
    /// ahead of a non-empty one never leaves a gap in the element array
    /// (the original source's `create_pq` has exactly this bug: it
    /// indexes `answer->elements[i]` by the raw loop index even when a
    /// bitmap is skipped).
    pub(crate) fn build(bitmaps: &'a [&'a Bitmap]) -> Self {
        let mut elements = Vec::with_capacity(bitmaps.len());
        for (i, bitmap) in bitmaps.iter().enumerate() {
            if !bitmap.is_empty() {
                elements.push(PqElement {
                    bitmap_index: i,
                    pos: 0,
                });
            }
        }
        let mut pq = Pq { bitmaps, elements };
        let n = pq.elements.len();
        for i in (0..n / 2).rev() {
            pq.percolate_down(i);
        }
        pq
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub(crate) fn key_of(&self, e: PqElement) -> u16 {
        self.bitmaps[e.bitmap_index].key_at(e.pos)
    }

    pub(crate) fn container_of(&self, e: PqElement) -> &Container {
        self.bitmaps[e.bitmap_index].container_at(e.pos)
    }

    pub(crate) fn peek(&self) -> Option<PqElement> {
        self.elements.first().copied()
    }

    /// Advances the top cursor to the next chunk in its bitmap (sifting
    /// down in place), or pops it if it was the bitmap's last chunk.
    /// Returns the cursor as it stood *before* advancing, for the caller
    /// to process.
    pub(crate) fn advance_top(&mut self) -> PqElement {
        let top = self.elements[0];
        let bitmap = self.bitmaps[top.bitmap_index];
        if top.pos + 1 < bitmap.len() {
            self.elements[0] = PqElement {
                bitmap_index: top.bitmap_index,
                pos: top.pos + 1,
            };
            self.percolate_down(0);
        } else {
            self.pop();
        }
        top
    }

    fn pop(&mut self) {
        let n = self.elements.len();
        if n > 1 {
            self.elements[0] = self.elements[n - 1];
            self.elements.pop();
            self.percolate_down(0);
        } else {
            self.elements.pop();
        }
    }

    fn percolate_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        let moving = self.elements[i];
        loop {
            let l = 2 * i + 1;
            if l >= n {
                break;
            }
            let r = l + 1;
            let mut best = l;
            if r < n && self.less(self.elements[r], self.elements[best]) {
                best = r;
            }
            if !self.less(self.elements[best], moving) {
                break;
            }
            self.elements[i] = self.elements[best];
            i = best;
        }
        self.elements[i] = moving;
    }

    /// `true` if `a` should sort ahead of `b`.
    fn less(&self, a: PqElement, b: PqElement) -> bool {
        let (k1, c1) = (self.key_of(a), self.container_of(a));
        let (k2, c2) = (self.key_of(b), self.container_of(b));

        if k1 != k2 {
            return k1 < k2;
        }
        if c1.is_full() {
            return true;
        }
        if c2.is_full() {
            return false;
        }
        if is_unknown_cardinality(c1) {
            return true;
        }
        if is_unknown_cardinality(c2) {
            return false;
        }
        size_estimate(c1) > size_estimate(c2)
    }
}

fn is_unknown_cardinality(c: &Container) -> bool {
    matches!(c, Container::Bitset(b) if b.cardinality().is_none())
}

/// A cheap-to-compute size estimate used only to break ties among
/// same-key cursors: folding into the larger accumulator tends to need
/// fewer reallocations.
fn size_estimate(c: &Container) -> usize {
    match c {
        Container::Bitset(b) => b.cardinality().expect("unknown cardinality handled by caller") as usize,
        Container::Array(a) => a.cardinality() as usize,
        Container::Run(r) => {
            if r.n_runs() <= 16 {
                r.cardinality() as usize
            } else {
                r.size_in_bytes()
            }
        }
    }
}
