//! seed-remap - interval remapping with parallel seed range search
//!
//! Passes seed values through a chain of seven interval-mapping stages and
//! finds the smallest final value.
//!
//! # Features
//!
//! - Binary-search stage lookups backed by rust-lapper
//! - Seed values as single points or as `begin length` ranges
//! - Fan-out/fan-in minimum search with rayon
//! - Support for compressed input files (gzip, bzip2)
//!
//! # Example
//!
//! ```ignore
//! use seed_remap::{parse_almanac_file, RangeRemapper, SearchConfig, SeedMode};
//!
//! let almanac = parse_almanac_file("input/example")?;
//! let seeds = almanac.seed_intervals(SeedMode::Ranges)?;
//!
//! let remapper = RangeRemapper::new(&almanac.chain, SearchConfig::default())?;
//! let outcome = remapper.search(&seeds);
//! ```

pub mod core;

// Re-export commonly used types
pub use core::{
    parse_almanac_file, parse_almanac_str, Almanac, AlmanacError, IntervalMapping,
    RangeRemapper, SearchConfig, SearchError, SearchOutcome, SeedInterval, SeedMode,
    SeedRemapError, StageChain, StageKind, StageTable, NO_CANDIDATE,
};
