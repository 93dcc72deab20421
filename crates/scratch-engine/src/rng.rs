//! Random sources and weighted selection

use indexmap::IndexMap;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Source of uniform randomness for round generation.
///
/// The engine never touches a global RNG; every draw goes through this trait
/// so a round can be replayed from a fixed sequence.
pub trait RandomSource {
    /// Uniform index in `0..upper` (`upper > 0`)
    fn next_index(&mut self, upper: usize) -> usize;

    /// Uniform real in `[0, upper)` (`upper > 0`)
    fn next_real(&mut self, upper: f64) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_index(&mut self, upper: usize) -> usize {
        (**self).next_index(upper)
    }

    fn next_real(&mut self, upper: f64) -> f64 {
        (**self).next_real(upper)
    }
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng = ChaCha8Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible source for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }

    fn next_real(&mut self, upper: f64) -> f64 {
        self.rng.random::<f64>() * upper
    }
}

/// Replays a fixed cycle of unit fractions.
///
/// Each fraction `f` in `[0, 1)` becomes `floor(f * upper)` for an index draw
/// and `f * upper` for a real draw. An empty script always yields zero.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    fractions: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(fractions: impl Into<Vec<f64>>) -> Self {
        let fractions = fractions
            .into()
            .into_iter()
            .map(|f| if f.is_finite() { f.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        Self {
            fractions,
            cursor: 0,
        }
    }

    fn next_fraction(&mut self) -> f64 {
        if self.fractions.is_empty() {
            return 0.0;
        }
        let f = self.fractions[self.cursor % self.fractions.len()];
        self.cursor += 1;
        f
    }
}

impl RandomSource for ScriptedSource {
    fn next_index(&mut self, upper: usize) -> usize {
        let idx = (self.next_fraction() * upper as f64) as usize;
        idx.min(upper.saturating_sub(1))
    }

    fn next_real(&mut self, upper: f64) -> f64 {
        self.next_fraction() * upper
    }
}

/// Total weight of a table
pub fn total_weight(weights: &IndexMap<String, u32>) -> u64 {
    weights.values().map(|&w| u64::from(w)).sum()
}

/// Draw one symbol from a weight table.
///
/// Entries are walked in table order; the first whose running total reaches
/// the draw wins. Zero-weight entries are never picked. Returns `None` for an
/// empty or all-zero table.
pub fn weighted_pick<'a, S: RandomSource + ?Sized>(
    weights: &'a IndexMap<String, u32>,
    source: &mut S,
) -> Option<&'a str> {
    let total = total_weight(weights);
    if total == 0 {
        return None;
    }

    let draw = source.next_real(total as f64);
    let mut cumulative = 0u64;
    let mut last = None;
    for (symbol, &weight) in weights {
        if weight == 0 {
            continue;
        }
        cumulative += u64::from(weight);
        last = Some(symbol.as_str());
        if cumulative as f64 >= draw {
            return last;
        }
    }
    // Rounding at the top of the range
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u32)]) -> IndexMap<String, u32> {
        entries.iter().map(|&(s, w)| (s.to_string(), w)).collect()
    }

    #[test]
    fn test_empty_and_zero_tables() {
        let mut source = ScriptedSource::new(vec![0.5]);
        assert_eq!(weighted_pick(&IndexMap::new(), &mut source), None);
        assert_eq!(weighted_pick(&table(&[("A", 0), ("B", 0)]), &mut source), None);
    }

    #[test]
    fn test_pick_walks_in_order() {
        let weights = table(&[("A", 1), ("B", 2), ("C", 1)]);
        // total 4: A covers [0,1], B (1,3], C (3,4)
        let mut source = ScriptedSource::new(vec![0.0, 0.2, 0.5, 0.74, 0.9]);
        assert_eq!(weighted_pick(&weights, &mut source), Some("A"));
        assert_eq!(weighted_pick(&weights, &mut source), Some("A"));
        assert_eq!(weighted_pick(&weights, &mut source), Some("B"));
        assert_eq!(weighted_pick(&weights, &mut source), Some("B"));
        assert_eq!(weighted_pick(&weights, &mut source), Some("C"));
    }

    #[test]
    fn test_zero_weight_never_picked() {
        let weights = table(&[("ZERO", 0), ("A", 1)]);
        let mut source = ScriptedSource::new(vec![0.0]);
        assert_eq!(weighted_pick(&weights, &mut source), Some("A"));
    }

    #[test]
    fn test_weighted_frequencies_converge() {
        let weights = table(&[("A", 1), ("B", 2), ("C", 3), ("D", 4)]);
        let mut source = RngSource::seeded(42);
        let draws = 200_000;
        let mut counts: IndexMap<&str, u32> = IndexMap::new();
        for _ in 0..draws {
            let symbol = weighted_pick(&weights, &mut source).unwrap();
            *counts.entry(symbol).or_default() += 1;
        }

        for (symbol, &weight) in &weights {
            let expected = weight as f64 / 10.0;
            let observed = counts[symbol.as_str()] as f64 / draws as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "{symbol}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut source = ScriptedSource::new(vec![0.0, 0.5, 0.99]);
        assert_eq!(source.next_index(3), 0);
        assert_eq!(source.next_index(3), 1);
        assert_eq!(source.next_index(3), 2);
        assert_eq!(source.next_index(3), 0);
        assert_eq!(source.next_real(10.0), 5.0);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = RngSource::seeded(7);
        let mut b = RngSource::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.next_index(9), b.next_index(9));
            assert_eq!(a.next_real(100.0), b.next_real(100.0));
        }
    }
}
