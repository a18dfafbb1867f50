//! Core remapping functionality
//!
//! This module contains the almanac parser, the per-stage interval
//! index, stage chain evaluation, and the parallel minimum search.

mod almanac;
mod error;
mod index;
pub mod io;
mod search;
mod stage;

pub use almanac::{parse_almanac_reader, parse_almanac_str, Almanac, SeedMode, SEEDS_LABEL};
pub use error::{
    AlmanacError, AlmanacResult, Result, SearchError, SearchResult, SeedRemapError,
};
pub use index::{IntervalMapping, StageInterval, StageTable};
pub use io::{detect_compression, open_input, parse_almanac_file, CompressionFormat};
pub use search::{
    reduce_minimum, scan_minimum, RangeRemapper, SearchConfig, SearchOutcome, SeedInterval,
    DEFAULT_FAN_OUT, NO_CANDIDATE,
};
pub use stage::{Stage, StageChain, StageKind, STAGE_COUNT};
