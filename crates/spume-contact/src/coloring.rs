//! Conflict-free grouping of candidate pairs.
//!
//! Two pairs conflict when they name a common body index: applying
//! their corrections in parallel could touch the same columns. Greedy
//! coloring assigns every pair the lowest class whose pairs share no
//! body with it, so each class can be resolved from one arena snapshot
//! and applied without interference.

use crate::broad::CandidatePair;

/// Candidate-pair coloring for batched conflict-free resolution.
///
/// Instead of materializing the pair-conflict graph, the coloring keeps
/// one `u64` bitmask per body recording which classes already touch it;
/// a pair's class is the first bit clear in the union of its two
/// endpoint masks. A cluster dense enough to need more than 64 classes
/// overflows into the last class, which may then share bodies and
/// degrades to the same bounded overcorrection as the accumulate path.
pub struct PairColoring;

impl PairColoring {
    /// Partitions `pairs` into conflict-free classes.
    ///
    /// Returns `(grouped, offsets)`: `grouped` holds the same pairs
    /// reordered so each class is one contiguous run, and `offsets[c]..
    /// offsets[c + 1]` is the range of class `c`.
    pub fn color_pairs(
        pairs: &[CandidatePair],
        body_count: usize,
    ) -> (Vec<CandidatePair>, Vec<usize>) {
        if pairs.is_empty() {
            return (Vec::new(), vec![0]);
        }

        let mut body_mask: Vec<u64> = vec![0; body_count];
        let mut pair_class: Vec<u8> = Vec::with_capacity(pairs.len());
        let mut class_sizes: Vec<usize> = Vec::new();

        for pair in pairs {
            let used = body_mask[pair.a as usize] | body_mask[pair.b as usize];
            let class = (!used).trailing_zeros().min(63) as usize;

            let bit = 1u64 << class;
            body_mask[pair.a as usize] |= bit;
            body_mask[pair.b as usize] |= bit;

            if class >= class_sizes.len() {
                class_sizes.resize(class + 1, 0);
            }
            class_sizes[class] += 1;
            pair_class.push(class as u8);
        }

        // Prefix-sum the class sizes into start offsets, then scatter
        // each pair into its class slot.
        let mut offsets = Vec::with_capacity(class_sizes.len() + 1);
        let mut running = 0;
        offsets.push(0);
        for &size in &class_sizes {
            running += size;
            offsets.push(running);
        }

        let mut cursor: Vec<usize> = offsets[..class_sizes.len()].to_vec();
        let mut grouped = vec![CandidatePair { a: 0, b: 0 }; pairs.len()];
        for (pair, &class) in pairs.iter().zip(pair_class.iter()) {
            let slot = cursor[class as usize];
            grouped[slot] = *pair;
            cursor[class as usize] += 1;
        }

        (grouped, offsets)
    }
}
