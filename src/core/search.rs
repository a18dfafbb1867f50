//! Parallel minimum search over seed intervals
//!
//! Every seed interval is split into a fixed number of contiguous
//! sub-ranges. Each sub-range is scanned on a rayon worker, and the
//! per-sub-range minima are reduced to a per-seed minimum. Per-seed minima
//! are then reduced to the global minimum.
//!
//! Workers only read the stage chain and return their own local minimum,
//! so no locking is needed. Both reductions are `min`, which makes the
//! result independent of scheduling order and of the fan-out.

use crate::core::error::SearchResult;
use crate::core::stage::StageChain;
use log::{debug, info, warn};
use rayon::prelude::*;

/// Minimum of an empty search; never wins a reduction
pub const NO_CANDIDATE: u64 = u64::MAX;

/// Default number of sub-ranges per seed interval
pub const DEFAULT_FAN_OUT: usize = 4;

/// A half-open range of starting values `[begin, begin + length)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedInterval {
    pub begin: u64,
    pub length: u64,
}

impl SeedInterval {
    pub fn new(begin: u64, length: u64) -> Self {
        Self { begin, length }
    }

    /// A single seed value
    pub fn point(value: u64) -> Self {
        Self {
            begin: value,
            length: 1,
        }
    }

    /// Exclusive end
    ///
    /// Clamped to `u64::MAX` when `begin + length` overflows, so the
    /// values past the top of the range are never evaluated.
    pub fn end(&self) -> u64 {
        self.begin.saturating_add(self.length)
    }

    /// Whether `begin + length` overflows and [`end`](Self::end) is clamped
    pub fn is_clamped(&self) -> bool {
        self.begin.checked_add(self.length).is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Partition into `parts` contiguous sub-ranges
    ///
    /// Each sub-range holds `length / parts` values and the last one also
    /// absorbs the remainder. When `length < parts` the leading sub-ranges
    /// are empty. `parts == 0` is treated as 1.
    ///
    /// # Examples
    /// ```
    /// use seed_remap::core::SeedInterval;
    ///
    /// let parts = SeedInterval::new(10, 9).split(4);
    /// assert_eq!(parts[0], SeedInterval::new(10, 2));
    /// assert_eq!(parts[3], SeedInterval::new(16, 3));
    /// ```
    pub fn split(&self, parts: usize) -> Vec<SeedInterval> {
        let parts = parts.max(1) as u64;
        let step = self.length / parts;
        let end = self.end();

        (0..parts)
            .map(|i| {
                let start = self.begin.saturating_add(i * step);
                let stop = if i + 1 == parts {
                    end
                } else {
                    start.saturating_add(step)
                };
                SeedInterval::new(start, stop - start)
            })
            .collect()
    }
}

/// Search tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Sub-ranges per seed interval
    pub fan_out: usize,
    /// Worker threads (0 = rayon default)
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fan_out: DEFAULT_FAN_OUT,
            threads: 0,
        }
    }
}

/// Result of a full search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Smallest final value, `None` if no value was evaluated
    pub minimum: Option<u64>,
    /// Number of seed values passed through the chain
    pub evaluated: u64,
    /// Number of seed intervals searched
    pub seeds: usize,
}

/// Sequential scan of one interval
///
/// Returns [`NO_CANDIDATE`] for an empty interval.
pub fn scan_minimum(chain: &StageChain, seed: SeedInterval) -> u64 {
    (seed.begin..seed.end())
        .map(|value| chain.evaluate(value))
        .min()
        .unwrap_or(NO_CANDIDATE)
}

/// Reduce local minima to one value
///
/// Order does not matter; an empty input yields [`NO_CANDIDATE`].
pub fn reduce_minimum<I: IntoIterator<Item = u64>>(minima: I) -> u64 {
    minima.into_iter().fold(NO_CANDIDATE, u64::min)
}

/// Runs the fan-out/fan-in search over a stage chain
pub struct RangeRemapper<'a> {
    chain: &'a StageChain,
    config: SearchConfig,
    pool: rayon::ThreadPool,
}

impl<'a> RangeRemapper<'a> {
    /// Create a remapper with its own worker pool
    pub fn new(chain: &'a StageChain, config: SearchConfig) -> SearchResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;

        Ok(Self {
            chain,
            config,
            pool,
        })
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Minimum final value over one seed interval
    pub fn seed_minimum(&self, seed: SeedInterval) -> u64 {
        self.pool.install(|| self.fan_out(seed))
    }

    /// Global minimum over all seed intervals
    ///
    /// Returns [`NO_CANDIDATE`] when `seeds` is empty or only holds empty
    /// intervals.
    pub fn minimum(&self, seeds: &[SeedInterval]) -> u64 {
        self.pool.install(|| {
            seeds
                .par_iter()
                .map(|&seed| {
                    let local = self.fan_out(seed);
                    debug!(
                        "Seed [{}, {}) minimum: {}",
                        seed.begin,
                        seed.end(),
                        local
                    );
                    local
                })
                .reduce(|| NO_CANDIDATE, u64::min)
        })
    }

    /// Global minimum plus search statistics
    pub fn search(&self, seeds: &[SeedInterval]) -> SearchOutcome {
        for seed in seeds.iter().filter(|s| s.is_clamped()) {
            warn!(
                "Seed range {} + {} overflows; searching only [{}, {})",
                seed.begin,
                seed.length,
                seed.begin,
                seed.end()
            );
        }

        let evaluated = seeds
            .iter()
            .fold(0u64, |acc, seed| acc.saturating_add(seed.end() - seed.begin));

        info!(
            "Searching {} seed intervals ({} values, fan-out {}, {} threads)",
            seeds.len(),
            evaluated,
            self.config.fan_out,
            self.pool.current_num_threads()
        );

        let minimum = self.minimum(seeds);

        SearchOutcome {
            minimum: (evaluated > 0).then_some(minimum),
            evaluated,
            seeds: seeds.len(),
        }
    }

    /// Scan each sub-range on its own worker, then join and reduce
    fn fan_out(&self, seed: SeedInterval) -> u64 {
        seed.split(self.config.fan_out)
            .into_par_iter()
            .map(|part| scan_minimum(self.chain, part))
            .reduce(|| NO_CANDIDATE, u64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::IntervalMapping;
    use crate::core::stage::StageKind;

    fn example_chain() -> StageChain {
        StageChain::identity()
            .with_stage(StageKind::SeedToSoil, vec![IntervalMapping::new(50, 98, 2)])
    }

    #[test]
    fn test_split_even() {
        let parts = SeedInterval::new(10, 8).split(4);
        assert_eq!(
            parts,
            vec![
                SeedInterval::new(10, 2),
                SeedInterval::new(12, 2),
                SeedInterval::new(14, 2),
                SeedInterval::new(16, 2),
            ]
        );
    }

    #[test]
    fn test_split_remainder_goes_last() {
        let parts = SeedInterval::new(0, 10).split(4);
        let lengths: Vec<u64> = parts.iter().map(|p| p.length).collect();
        assert_eq!(lengths, vec![2, 2, 2, 4]);
        assert_eq!(parts[3].end(), 10);
    }

    #[test]
    fn test_split_shorter_than_fan_out() {
        let parts = SeedInterval::new(5, 1).split(4);
        assert_eq!(parts.len(), 4);
        assert!(parts[..3].iter().all(|p| p.is_empty()));
        assert_eq!(parts[3], SeedInterval::new(5, 1));
    }

    #[test]
    fn test_split_zero_parts() {
        let parts = SeedInterval::new(3, 7).split(0);
        assert_eq!(parts, vec![SeedInterval::new(3, 7)]);
    }

    #[test]
    fn test_scan_empty_is_sentinel() {
        let chain = StageChain::identity();
        assert_eq!(scan_minimum(&chain, SeedInterval::new(42, 0)), NO_CANDIDATE);
    }

    #[test]
    fn test_reduce_minimum() {
        assert_eq!(reduce_minimum(vec![]), NO_CANDIDATE);
        assert_eq!(reduce_minimum(vec![7, 3, NO_CANDIDATE, 9]), 3);
    }

    #[test]
    fn test_seed_minimum_outside_mapping() {
        let chain = example_chain();
        let remapper = RangeRemapper::new(&chain, SearchConfig::default()).unwrap();
        assert_eq!(remapper.seed_minimum(SeedInterval::new(79, 14)), 79);
    }

    #[test]
    fn test_seed_minimum_hits_mapping() {
        let chain = example_chain();
        let remapper = RangeRemapper::new(&chain, SearchConfig::default()).unwrap();
        // 98 -> 50 wins over everything in [90, 98)
        assert_eq!(remapper.seed_minimum(SeedInterval::new(90, 10)), 50);
    }

    #[test]
    fn test_single_point_more_workers_than_values() {
        let chain = example_chain();
        let config = SearchConfig { fan_out: 8, threads: 2 };
        let remapper = RangeRemapper::new(&chain, config).unwrap();
        assert_eq!(remapper.seed_minimum(SeedInterval::point(99)), 51);
    }

    #[test]
    fn test_search_outcome() {
        let chain = example_chain();
        let remapper = RangeRemapper::new(&chain, SearchConfig::default()).unwrap();
        let seeds = [SeedInterval::new(79, 14), SeedInterval::new(98, 1)];

        let outcome = remapper.search(&seeds);
        assert_eq!(outcome.minimum, Some(50));
        assert_eq!(outcome.evaluated, 15);
        assert_eq!(outcome.seeds, 2);
    }

    #[test]
    fn test_overflowing_seed_is_clamped() {
        let chain = StageChain::identity();
        let remapper = RangeRemapper::new(&chain, SearchConfig::default()).unwrap();
        let seed = SeedInterval::new(u64::MAX - 3, 10);

        assert!(seed.is_clamped());
        assert!(!SeedInterval::new(u64::MAX - 3, 3).is_clamped());
        assert_eq!(seed.end(), u64::MAX);

        let outcome = remapper.search(&[seed]);
        assert_eq!(outcome.minimum, Some(u64::MAX - 3));
        assert_eq!(outcome.evaluated, 3);
    }

    #[test]
    fn test_search_nothing_to_evaluate() {
        let chain = example_chain();
        let remapper = RangeRemapper::new(&chain, SearchConfig::default()).unwrap();

        assert_eq!(remapper.search(&[]).minimum, None);
        assert_eq!(remapper.search(&[SeedInterval::new(4, 0)]).minimum, None);
        assert_eq!(remapper.minimum(&[]), NO_CANDIDATE);
    }
}
