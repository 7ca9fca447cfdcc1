//! Byte-order codec for headerless f32 sample streams.

use crate::{Error, Result};
use std::path::Path;

/// Byte order of an f32 stream on disk.
///
/// Raw streams carry no magic bytes, so the order is a convention the
/// operator supplies (`f32le` / `f32be`); it cannot be detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least-significant byte first (`f32le`).
    #[default]
    Little,
    /// Most-significant byte first (`f32be`).
    Big,
}

impl ByteOrder {
    /// The format name this order parses from.
    pub fn name(self) -> &'static str {
        match self {
            ByteOrder::Little => "f32le",
            ByteOrder::Big => "f32be",
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ByteOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "f32le" => Ok(ByteOrder::Little),
            "f32be" => Ok(ByteOrder::Big),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Decode a byte stream into f32 samples.
///
/// Bytes are consumed four at a time and reinterpreted as IEEE-754
/// floats in the given order. A trailing group shorter than four bytes
/// is dropped, not an error. Sample values are not validated: NaN and
/// infinity decode like any other bit pattern.
pub fn decode(bytes: &[u8], order: ByteOrder) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|quad| {
            let quad = [quad[0], quad[1], quad[2], quad[3]];
            match order {
                ByteOrder::Little => f32::from_le_bytes(quad),
                ByteOrder::Big => f32::from_be_bytes(quad),
            }
        })
        .collect()
}

/// Encode f32 samples into a byte stream. Exact inverse of [`decode`].
pub fn encode(samples: &[f32], order: ByteOrder) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 4);
    for &sample in samples {
        let quad = match order {
            ByteOrder::Little => sample.to_le_bytes(),
            ByteOrder::Big => sample.to_be_bytes(),
        };
        bytes.extend_from_slice(&quad);
    }
    bytes
}

/// Read an entire f32 stream from disk in one bulk read.
pub fn read_samples<P: AsRef<Path>>(path: P, order: ByteOrder) -> Result<Vec<f32>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let samples = decode(&bytes, order);
    tracing::debug!(
        path = %path.display(),
        samples = samples.len(),
        %order,
        "read raw stream"
    );
    Ok(samples)
}

/// Write an f32 stream to disk, overwriting any existing file.
pub fn write_samples<P: AsRef<Path>>(path: P, samples: &[f32], order: ByteOrder) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, encode(samples, order)).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        samples = samples.len(),
        %order,
        "wrote raw stream"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn roundtrip_little_endian() {
        let samples = vec![0.0f32, 1.0, -1.0, 0.5, f32::MIN_POSITIVE];
        let decoded = decode(&encode(&samples, ByteOrder::Little), ByteOrder::Little);
        assert_eq!(decoded, samples);
    }

    #[test]
    fn roundtrip_big_endian() {
        let samples = vec![0.25f32, -3.5, 1e-20, 1e20];
        let decoded = decode(&encode(&samples, ByteOrder::Big), ByteOrder::Big);
        assert_eq!(decoded, samples);
    }

    #[test]
    fn byte_orders_disagree_on_asymmetric_patterns() {
        let bytes = [0x00, 0x00, 0x80, 0x3f]; // 1.0f32 little-endian
        assert_eq!(decode(&bytes, ByteOrder::Little), vec![1.0]);
        assert_ne!(decode(&bytes, ByteOrder::Big), vec![1.0]);
    }

    #[test]
    fn trailing_partial_quartet_is_dropped() {
        let mut bytes = encode(&[1.0f32, 2.0], ByteOrder::Little);
        bytes.extend_from_slice(&[0xde, 0xad]);
        assert_eq!(decode(&bytes, ByteOrder::Little), vec![1.0, 2.0]);
    }

    #[test]
    fn nan_bits_survive_the_roundtrip() {
        let nan = f32::from_bits(0x7fc0_1234);
        let decoded = decode(&encode(&[nan], ByteOrder::Little), ByteOrder::Little);
        assert_eq!(decoded[0].to_bits(), nan.to_bits());
    }

    #[test]
    fn file_roundtrip() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let file = NamedTempFile::new().unwrap();

        write_samples(file.path(), &samples, ByteOrder::Big).unwrap();
        let loaded = read_samples(file.path(), ByteOrder::Big).unwrap();
        assert_eq!(loaded, samples);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_samples("/no/such/stream.f32", ByteOrder::Little).unwrap_err();
        assert!(err.to_string().contains("/no/such/stream.f32"));
    }

    #[test]
    fn format_names_parse_and_print() {
        assert_eq!("f32le".parse::<ByteOrder>().unwrap(), ByteOrder::Little);
        assert_eq!("f32be".parse::<ByteOrder>().unwrap(), ByteOrder::Big);
        assert_eq!(ByteOrder::Big.to_string(), "f32be");
        assert!("wav".parse::<ByteOrder>().is_err());
    }
}
