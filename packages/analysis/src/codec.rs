//! Wire codec for T8 sample payloads
//!
//! Waveforms and spectra travel as standard (padded) base64 text wrapping a
//! zlib stream. The inflated bytes are tightly packed little-endian `i16`
//! samples with no header or footer. Decoding never applies the scale
//! factor; call [`scale`] (or [`decode_scaled`]) for physical units.

use std::io::Write;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::{DecodeError, DecodeResult};

/// Width of one encoded sample in bytes (little-endian `i16`)
pub const SAMPLE_WIDTH: usize = 2;

/// Minimum output buffer growth while inflating
const INFLATE_CHUNK: usize = 4096;

/// Decode a wire payload into unscaled samples
///
/// # Errors
/// - `DecodeError::Base64` if `raw` is not valid base64
/// - `DecodeError::Inflate` / `DecodeError::TruncatedStream` if the bytes are
///   not a complete zlib stream
/// - `DecodeError::SampleAlignment` if the inflated length is zero or not a
///   multiple of [`SAMPLE_WIDTH`]
pub fn decode(raw: &str) -> DecodeResult<Vec<f64>> {
    let compressed = BASE64.decode(raw)?;
    let inflated = inflate(&compressed)?;
    samples_from_le_bytes(&inflated)
}

/// Multiply every sample by `factor`
pub fn scale(mut samples: Vec<f64>, factor: f64) -> Vec<f64> {
    for sample in &mut samples {
        *sample *= factor;
    }
    samples
}

/// Decode a wire payload and apply its scale factor
pub fn decode_scaled(raw: &str, factor: f64) -> DecodeResult<Vec<f64>> {
    decode(raw).map(|samples| scale(samples, factor))
}

/// Encode raw integer samples into the wire format
pub fn encode(samples: &[i16]) -> std::io::Result<String> {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(bytes.len()), Compression::default());
    encoder.write_all(&bytes)?;
    let compressed = encoder.finish()?;

    Ok(BASE64.encode(compressed))
}

/// Inflate a complete zlib stream, rejecting streams without an end marker
fn inflate(compressed: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut inflated = Vec::with_capacity(compressed.len().saturating_mul(4).max(INFLATE_CHUNK));

    loop {
        if inflated.len() == inflated.capacity() {
            inflated.reserve(inflated.capacity().max(INFLATE_CHUNK));
        }

        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        // total_in never exceeds the input we handed over
        let remaining = &compressed[in_before as usize..];

        match inflater.decompress_vec(remaining, &mut inflated, FlushDecompress::None)? {
            Status::StreamEnd => return Ok(inflated),
            Status::Ok | Status::BufError => {
                let stalled =
                    inflater.total_in() == in_before && inflater.total_out() == out_before;
                if stalled && inflated.len() < inflated.capacity() {
                    return Err(DecodeError::TruncatedStream);
                }
            }
        }
    }
}

fn samples_from_le_bytes(bytes: &[u8]) -> DecodeResult<Vec<f64>> {
    if bytes.is_empty() || bytes.len() % SAMPLE_WIDTH != 0 {
        return Err(DecodeError::SampleAlignment {
            len: bytes.len(),
            width: SAMPLE_WIDTH,
        });
    }

    Ok(bytes
        .chunks_exact(SAMPLE_WIDTH)
        .map(|pair| f64::from(i16::from_le_bytes([pair[0], pair[1]])))
        .collect())
}
