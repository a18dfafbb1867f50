//! Stage definitions and chain evaluation
//!
//! An almanac defines seven stages that are always applied in the same
//! order. Each stage's output is the next stage's input.

use crate::core::index::{IntervalMapping, StageTable};

/// Number of stages in a chain
pub const STAGE_COUNT: usize = 7;

/// Named position of a stage in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    SeedToSoil,
    SoilToFertilizer,
    FertilizerToWater,
    WaterToLight,
    LightToTemperature,
    TemperatureToHumidity,
    HumidityToLocation,
}

impl StageKind {
    /// All stages in application order
    pub const ALL: [StageKind; STAGE_COUNT] = [
        StageKind::SeedToSoil,
        StageKind::SoilToFertilizer,
        StageKind::FertilizerToWater,
        StageKind::WaterToLight,
        StageKind::LightToTemperature,
        StageKind::TemperatureToHumidity,
        StageKind::HumidityToLocation,
    ];

    /// Stage at a 0-based position in the chain
    ///
    /// # Examples
    /// ```
    /// use seed_remap::core::StageKind;
    /// assert_eq!(StageKind::from_position(0), Some(StageKind::SeedToSoil));
    /// assert_eq!(StageKind::from_position(6), Some(StageKind::HumidityToLocation));
    /// assert_eq!(StageKind::from_position(7), None);
    /// ```
    pub fn from_position(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    /// 0-based position in the chain
    pub fn position(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            StageKind::SeedToSoil => "seed-to-soil",
            StageKind::SoilToFertilizer => "soil-to-fertilizer",
            StageKind::FertilizerToWater => "fertilizer-to-water",
            StageKind::WaterToLight => "water-to-light",
            StageKind::LightToTemperature => "light-to-temperature",
            StageKind::TemperatureToHumidity => "temperature-to-humidity",
            StageKind::HumidityToLocation => "humidity-to-location",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One transformation step
#[derive(Debug, Clone)]
pub struct Stage {
    pub kind: StageKind,
    pub table: StageTable,
}

impl Stage {
    pub fn new(kind: StageKind, mappings: Vec<IntervalMapping>) -> Self {
        Self {
            kind,
            table: StageTable::new(mappings),
        }
    }

    pub fn identity(kind: StageKind) -> Self {
        Self {
            kind,
            table: StageTable::identity(),
        }
    }

    pub fn lookup(&self, key: u64) -> u64 {
        self.table.lookup(key)
    }
}

/// The seven stages in application order
///
/// Built once before any search starts and shared read-only by every
/// worker.
#[derive(Debug, Clone)]
pub struct StageChain {
    stages: [Stage; STAGE_COUNT],
}

impl StageChain {
    /// Build a chain from one mapping list per stage, in chain order
    pub fn from_tables(tables: [Vec<IntervalMapping>; STAGE_COUNT]) -> Self {
        let mut position = 0;
        let stages = tables.map(|mappings| {
            let kind = StageKind::ALL[position];
            position += 1;
            Stage::new(kind, mappings)
        });
        Self { stages }
    }

    /// A chain where every stage passes values through unchanged
    pub fn identity() -> Self {
        Self {
            stages: StageKind::ALL.map(Stage::identity),
        }
    }

    /// Replace one stage's mappings
    pub fn with_stage(mut self, kind: StageKind, mappings: Vec<IntervalMapping>) -> Self {
        self.stages[kind.position()] = Stage::new(kind, mappings);
        self
    }

    /// Pass `value` through all seven stages in order
    pub fn evaluate(&self, value: u64) -> u64 {
        self.stages
            .iter()
            .fold(value, |current, stage| stage.lookup(current))
    }

    /// Value after each stage, in chain order
    pub fn trace(&self, value: u64) -> [u64; STAGE_COUNT] {
        let mut current = value;
        self.stages.each_ref().map(|stage| {
            current = stage.lookup(current);
            current
        })
    }

    pub fn stage(&self, kind: StageKind) -> &Stage {
        &self.stages[kind.position()]
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Total number of mappings across all stages
    pub fn total_mappings(&self) -> usize {
        self.stages.iter().map(|s| s.table.len()).sum()
    }
}

impl Default for StageChain {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        for (i, kind) in StageKind::ALL.iter().enumerate() {
            assert_eq!(kind.position(), i);
            assert_eq!(StageKind::from_position(i), Some(*kind));
        }
        assert_eq!(StageKind::SeedToSoil.to_string(), "seed-to-soil");
    }

    #[test]
    fn test_identity_chain() {
        let chain = StageChain::identity();
        assert_eq!(chain.evaluate(0), 0);
        assert_eq!(chain.evaluate(79), 79);
        assert_eq!(chain.total_mappings(), 0);
    }

    #[test]
    fn test_chain_applies_stages_in_order() {
        // 10 -> 20 in stage 1, then 20 -> 30 in stage 2
        let chain = StageChain::identity()
            .with_stage(StageKind::SeedToSoil, vec![IntervalMapping::new(20, 10, 1)])
            .with_stage(StageKind::SoilToFertilizer, vec![IntervalMapping::new(30, 20, 1)]);

        assert_eq!(chain.evaluate(10), 30);
        assert_eq!(chain.evaluate(20), 30);
        assert_eq!(chain.evaluate(11), 11);
    }

    #[test]
    fn test_trace_matches_evaluate() {
        let chain = StageChain::identity()
            .with_stage(StageKind::SeedToSoil, vec![IntervalMapping::new(50, 98, 2)])
            .with_stage(StageKind::HumidityToLocation, vec![IntervalMapping::new(0, 50, 10)]);

        let trace = chain.trace(99);
        assert_eq!(trace[0], 51);
        assert_eq!(trace[5], 51);
        assert_eq!(trace[6], 1);
        assert_eq!(trace[STAGE_COUNT - 1], chain.evaluate(99));
    }

    #[test]
    fn test_from_tables_assigns_kinds() {
        let tables: [Vec<IntervalMapping>; STAGE_COUNT] = Default::default();
        let chain = StageChain::from_tables(tables);
        let kinds: Vec<StageKind> = chain.stages().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, StageKind::ALL.to_vec());
    }
}
