//! Input file handling
//!
//! Opens almanac files, transparently decompressing gzip and bzip2.

use crate::core::almanac::{parse_almanac_reader, Almanac};
use crate::core::error::{AlmanacError, AlmanacResult};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format for input files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression from extension, then from magic bytes
///
/// - .gz extension or gzip magic bytes (1f 8b)
/// - .bz2 extension or bzip2 magic bytes (42 5a 68)
/// - Plain text otherwise
pub fn detect_compression(path: &Path) -> AlmanacResult<CompressionFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => return Ok(CompressionFormat::Gzip),
        Some("bz2") => return Ok(CompressionFormat::Bzip2),
        _ => {}
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    Ok(compression_from_magic(&magic[..bytes_read]))
}

fn compression_from_magic(magic: &[u8]) -> CompressionFormat {
    match magic {
        [0x1f, 0x8b, ..] => CompressionFormat::Gzip,
        // "BZh"
        [0x42, 0x5a, 0x68, ..] => CompressionFormat::Bzip2,
        _ => CompressionFormat::Plain,
    }
}

/// Open an input file as a buffered line source
pub fn open_input(path: &Path) -> AlmanacResult<Box<dyn BufRead>> {
    if !path.exists() {
        return Err(AlmanacError::FileNotFound(path.to_path_buf()));
    }

    let format = detect_compression(path)?;
    let file = File::open(path)?;

    let reader: Box<dyn BufRead> = match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::GzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    };

    Ok(reader)
}

/// Read and parse an almanac file
pub fn parse_almanac_file<P: AsRef<Path>>(path: P) -> AlmanacResult<Almanac> {
    let path = path.as_ref();
    let start = Instant::now();

    let almanac = parse_almanac_reader(open_input(path)?)?;

    info!(
        "Loaded almanac {:?}: {} seed numbers, {} mappings in {:.3}s",
        path,
        almanac.seeds.len(),
        almanac.chain.total_mappings(),
        start.elapsed().as_secs_f64()
    );

    Ok(almanac)
}
