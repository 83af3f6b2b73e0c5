//! Run-length container: a sorted, disjoint, non-adjacent sequence of runs.

/// One run, covering `[value, value + length as u32 + 1)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rle16 {
    pub value: u16,
    pub length: u16,
}

impl Rle16 {
    fn end_exclusive(&self) -> u32 {
        self.value as u32 + self.length as u32 + 1
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RunContainer {
    runs: Vec<Rle16>,
}

impl RunContainer {
    pub fn create_given_capacity(capacity: usize) -> Self {
        RunContainer {
            runs: Vec::with_capacity(capacity),
        }
    }

    /// A container with a single run spanning `[start, end)`, or empty if
    /// `start >= end`.
    pub fn create_range(start: u32, end: u32) -> Self {
        let mut runs = Vec::new();
        if end > start {
            runs.push(Rle16 {
                value: start as u16,
                length: (end - start - 1) as u16,
            });
        }
        RunContainer { runs }
    }

    pub fn runs(&self) -> &[Rle16] {
        &self.runs
    }

    pub fn copy_from(&mut self, other: &RunContainer) {
        self.runs.clear();
        self.runs.extend_from_slice(&other.runs);
    }

    pub fn grow(&mut self, min_capacity: usize) {
        if self.runs.capacity() < min_capacity {
            self.runs.reserve(min_capacity - self.runs.len());
        }
    }

    pub fn n_runs(&self) -> usize {
        self.runs.len()
    }

    pub fn cardinality(&self) -> u32 {
        self.runs.iter().map(|r| r.length as u32 + 1).sum()
    }

    /// Approximate byte footprint, used by the priority-queue comparator
    /// when `n_runs` is too large to bother computing an exact cardinality.
    pub fn size_in_bytes(&self) -> usize {
        self.runs.len() * std::mem::size_of::<Rle16>()
    }

    pub fn is_full(&self) -> bool {
        self.runs.len() == 1 && self.runs[0].value == 0 && self.runs[0].length == u16::MAX
    }

    /// Appends a run already known to be disjoint-and-not-adjacent with
    /// everything before it; returns it so the caller can track it as the
    /// new "previous" run for subsequent `append` calls.
    pub fn append_first(&mut self, rle: Rle16) -> Rle16 {
        self.runs.push(rle);
        rle
    }

    /// Merge-appends `rle`, extending `previous` in place if `rle` overlaps
    /// or touches it, else starting a new run.
    pub fn append(&mut self, rle: Rle16, previous: &mut Rle16) {
        append_run(&mut self.runs, previous, rle);
    }

    pub fn append_value_first(&mut self, value: u16) -> Rle16 {
        let rle = Rle16 { value, length: 0 };
        self.runs.push(rle);
        rle
    }

    pub fn append_value(&mut self, value: u16, previous: &mut Rle16) {
        append_run(
            &mut self.runs,
            previous,
            Rle16 {
                value,
                length: 0,
            },
        );
    }

    /// Merges `other`'s runs into `self` in place (required by `ChunkUnion`
    /// for the run accumulator).
    pub fn union_inplace(&mut self, other: &RunContainer) {
        if self.is_full() {
            return;
        }
        if other.is_full() {
            self.runs.clear();
            self.runs.push(other.runs[0]);
            return;
        }
        self.runs = merge_run_sequences(&self.runs, &other.runs);
    }
}

/// Shared merge-emission step for both the run∪run path (`append`) and the
/// array∪run path (`append_value`): extends `previous` when `rle` overlaps
/// or touches it, otherwise starts a new run.
fn append_run(runs: &mut Vec<Rle16>, previous: &mut Rle16, rle: Rle16) {
    let prev_end = previous.end_exclusive();
    if rle.value as u32 <= prev_end {
        let new_end = rle.end_exclusive();
        if new_end > prev_end {
            previous.length = (new_end - previous.value as u32 - 1) as u16;
            *runs.last_mut().expect("previous run must already be pushed") = *previous;
        }
    } else {
        runs.push(rle);
        *previous = rle;
    }
}

fn merge_run_sequences(a: &[Rle16], b: &[Rle16]) -> Vec<Rle16> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    if a.is_empty() && b.is_empty() {
        return out;
    }
    let mut ai = 0;
    let mut bi = 0;
    let mut previous = if bi >= b.len() || (ai < a.len() && a[ai].value <= b[bi].value) {
        let rle = a[ai];
        ai += 1;
        rle
    } else {
        let rle = b[bi];
        bi += 1;
        rle
    };
    out.push(previous);
    while ai < a.len() && bi < b.len() {
        if a[ai].value <= b[bi].value {
            append_run(&mut out, &mut previous, a[ai]);
            ai += 1;
        } else {
            append_run(&mut out, &mut previous, b[bi]);
            bi += 1;
        }
    }
    while ai < a.len() {
        append_run(&mut out, &mut previous, a[ai]);
        ai += 1;
    }
    while bi < b.len() {
        append_run(&mut out, &mut previous, b[bi]);
        bi += 1;
    }
    out
}

/// Builds a run container from an already-sorted, duplicate-free value
/// list, merging adjacent values into runs. Used when `repair` considers
/// converting an array to its run-encoded form.
pub fn from_sorted_values(values: &[u16]) -> RunContainer {
    let mut runs = Vec::new();
    let mut iter = values.iter().copied();
    if let Some(first) = iter.next() {
        let mut start = first;
        let mut prev = first;
        for v in iter {
            if v as u32 == prev as u32 + 1 {
                prev = v;
            } else {
                runs.push(Rle16 {
                    value: start,
                    length: (prev - start) as u16,
                });
                start = v;
                prev = v;
            }
        }
        runs.push(Rle16 {
            value: start,
            length: (prev - start) as u16,
        });
    }
    RunContainer { runs }
}

impl RunContainer {
    /// Expands every run back to its individual values, sorted ascending.
    pub fn to_values(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(self.cardinality() as usize);
        for rle in &self.runs {
            let end = rle.value as u32 + rle.length as u32 + 1;
            for v in (rle.value as u32)..end {
                out.push(v as u16);
            }
        }
        out
    }
}

/// Array∪Run → Run: merges a sorted value list and a run sequence,
/// returning a fresh run container. If `run` is already full, returns a
/// copy of it untouched (the caller's fast path should usually catch this
/// earlier, but the function stays correct either way).
pub fn array_run_union(values: &[u16], run: &RunContainer) -> RunContainer {
    if run.is_full() {
        return run.clone();
    }
    let mut dst = RunContainer::create_given_capacity(2 * (values.len() + run.n_runs()));
    merge_values_and_runs_into(values, run.runs(), &mut dst);
    dst
}

/// In-place Array∪Run: grows `run` to hold both sequences, shifts the
/// existing runs to the tail of the buffer, then merges into the freed
/// head space. Correct even though `run` is both source and destination.
pub fn array_run_union_inplace(values: &[u16], run: &mut RunContainer) {
    if run.is_full() {
        return;
    }
    let max_output = values.len() + run.n_runs();
    let needed_capacity = max_output + run.n_runs();
    run.grow(needed_capacity);

    let original: Vec<Rle16> = run.runs.drain(..).collect();
    merge_values_and_runs_into(values, &original, run);
}

fn merge_values_and_runs_into(values: &[u16], runs: &[Rle16], dst: &mut RunContainer) {
    if values.is_empty() && runs.is_empty() {
        return;
    }
    let mut vi = 0;
    let mut ri = 0;
    let mut previous = if ri < runs.len() && (vi >= values.len() || runs[ri].value <= values[vi]) {
        let rle = runs[ri];
        ri += 1;
        dst.append_first(rle)
    } else {
        let v = values[vi];
        vi += 1;
        dst.append_value_first(v)
    };
    while ri < runs.len() && vi < values.len() {
        if runs[ri].value <= values[vi] {
            dst.append(runs[ri], &mut previous);
            ri += 1;
        } else {
            dst.append_value(values[vi], &mut previous);
            vi += 1;
        }
    }
    if vi < values.len() {
        while vi < values.len() {
            dst.append_value(values[vi], &mut previous);
            vi += 1;
        }
    } else {
        while ri < runs.len() {
            dst.append(runs[ri], &mut previous);
            ri += 1;
        }
    }
}
