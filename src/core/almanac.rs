//! Almanac parsing
//!
//! # Almanac Format
//!
//! ```text
//! seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//!
//! soil-to-fertilizer map:
//! ...
//! ```
//!
//! - The seeds line starts with the `seeds:` label
//! - A line ending in `:` starts the next stage; stages are bound by
//!   position, the label text itself is only informational
//! - Mapping lines contain: destination start, source start, length
//! - Blank lines separate sections and are ignored

use crate::core::error::{AlmanacError, AlmanacResult};
use crate::core::index::IntervalMapping;
use crate::core::search::SeedInterval;
use crate::core::stage::{StageChain, StageKind, STAGE_COUNT};
use log::{debug, warn};
use std::io::{BufRead, BufReader};

/// Label token that opens the seeds line
pub const SEEDS_LABEL: &str = "seeds";

/// How the numbers on the seeds line are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Every number is one seed
    #[default]
    Points,
    /// Numbers are `begin length` pairs
    Ranges,
}

/// Parsed almanac: raw seed numbers plus the stage chain
#[derive(Debug, Clone)]
pub struct Almanac {
    /// Numbers from the seeds line, in input order
    pub seeds: Vec<u64>,
    /// Seven stages, tables already sorted
    pub chain: StageChain,
}

impl Almanac {
    /// Interpret the seed numbers according to `mode`
    ///
    /// # Examples
    /// ```
    /// use seed_remap::core::{parse_almanac_str, SeedInterval, SeedMode};
    ///
    /// let text = "seeds: 79 14\n\na:\nb:\nc:\nd:\ne:\nf:\ng:\n";
    /// let almanac = parse_almanac_str(text).unwrap();
    ///
    /// let points = almanac.seed_intervals(SeedMode::Points).unwrap();
    /// assert_eq!(points, vec![SeedInterval::point(79), SeedInterval::point(14)]);
    ///
    /// let ranges = almanac.seed_intervals(SeedMode::Ranges).unwrap();
    /// assert_eq!(ranges, vec![SeedInterval::new(79, 14)]);
    /// ```
    pub fn seed_intervals(&self, mode: SeedMode) -> AlmanacResult<Vec<SeedInterval>> {
        match mode {
            SeedMode::Points => Ok(self.seeds.iter().copied().map(SeedInterval::point).collect()),
            SeedMode::Ranges => {
                if self.seeds.len() % 2 != 0 {
                    return Err(AlmanacError::UnpairedSeed {
                        count: self.seeds.len(),
                    });
                }
                Ok(self
                    .seeds
                    .chunks_exact(2)
                    .map(|pair| SeedInterval::new(pair[0], pair[1]))
                    .collect())
            }
        }
    }
}

/// Kind of a non-blank almanac line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// `seeds: ...`, holding the text after the label
    Seeds(&'a str),
    /// `xxx map:`, holding the label
    StageMarker(&'a str),
    /// `dest src len`
    Mapping,
}

impl<'a> LineKind<'a> {
    fn classify(line: &'a str) -> Self {
        if let Some((label, rest)) = line.split_once(':') {
            if label.trim() == SEEDS_LABEL {
                return LineKind::Seeds(rest);
            }
        }
        match line.strip_suffix(':') {
            Some(label) => LineKind::StageMarker(label.trim()),
            None => LineKind::Mapping,
        }
    }
}

fn parse_number(token: &str, line_number: usize) -> AlmanacResult<u64> {
    token.parse::<u64>().map_err(|_| AlmanacError::InvalidNumber {
        line: line_number,
        value: token.to_string(),
    })
}

/// Parse a `dest src len` line
fn parse_mapping(line: &str, line_number: usize) -> AlmanacResult<IntervalMapping> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(AlmanacError::InvalidMapping {
            line: line_number,
            fields: fields.len(),
        });
    }

    let destination_start = parse_number(fields[0], line_number)?;
    let source_start = parse_number(fields[1], line_number)?;
    let length = parse_number(fields[2], line_number)?;

    Ok(IntervalMapping::new(destination_start, source_start, length))
}

/// Parse an almanac from a reader
///
/// Fails on the first malformed line; nothing is returned on error.
pub fn parse_almanac_reader<R: BufRead>(reader: R) -> AlmanacResult<Almanac> {
    let mut seeds: Option<Vec<u64>> = None;
    let mut tables: [Vec<IntervalMapping>; STAGE_COUNT] = Default::default();
    let mut stages_seen: usize = 0;
    let mut line_number: usize = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        match LineKind::classify(trimmed) {
            LineKind::Seeds(rest) => {
                if seeds.is_some() {
                    return Err(AlmanacError::DuplicateSeeds { line: line_number });
                }
                let numbers = rest
                    .split_whitespace()
                    .map(|token| parse_number(token, line_number))
                    .collect::<AlmanacResult<Vec<u64>>>()?;
                seeds = Some(numbers);
            }
            LineKind::StageMarker(label) => {
                let Some(kind) = StageKind::from_position(stages_seen) else {
                    return Err(AlmanacError::TooManyStages {
                        line: line_number,
                        max: STAGE_COUNT,
                    });
                };
                debug!("Line {}: stage '{}' bound to {}", line_number, label, kind);
                stages_seen += 1;
            }
            LineKind::Mapping => {
                if stages_seen == 0 {
                    return Err(AlmanacError::MappingOutsideStage { line: line_number });
                }
                let mapping = parse_mapping(trimmed, line_number)?;
                if mapping.length == 0 {
                    warn!("Line {}: zero-length mapping covers no values", line_number);
                }
                tables[stages_seen - 1].push(mapping);
            }
        }
    }

    let seeds = seeds.ok_or(AlmanacError::MissingSeeds)?;
    if stages_seen < STAGE_COUNT {
        return Err(AlmanacError::MissingStages {
            expected: STAGE_COUNT,
            found: stages_seen,
        });
    }

    for (kind, table) in StageKind::ALL.iter().zip(tables.iter()) {
        debug!("Stage {}: {} mappings", kind, table.len());
    }

    Ok(Almanac {
        seeds,
        chain: StageChain::from_tables(tables),
    })
}

/// Parse an almanac held in memory
pub fn parse_almanac_str(text: &str) -> AlmanacResult<Almanac> {
    parse_almanac_reader(BufReader::new(text.as_bytes()))
}
