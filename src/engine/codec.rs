//! Sample codec
//!
//! Converts between raw little-endian PCM bytes and signed 16-bit samples.

use crate::error::{PcmError, Result};

/// Bit depth of every buffer the codec accepts
pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per encoded sample
pub const BYTES_PER_SAMPLE: usize = (BITS_PER_SAMPLE / 8) as usize;

/// Decode little-endian PCM bytes into signed samples
///
/// Each byte pair `(lo, hi)` becomes `(hi << 8) | (lo & 0xFF)` read as
/// two's-complement.
///
/// # Errors
/// * `UnsupportedFormat` - if `bits_per_sample` is not 16
/// * `MalformedBuffer` - if the byte length is not a multiple of 2
pub fn decode(bytes: &[u8], bits_per_sample: u16) -> Result<Vec<i16>> {
    if bits_per_sample != BITS_PER_SAMPLE {
        return Err(PcmError::UnsupportedFormat {
            format: format!("{}-bit PCM (only 16-bit supported)", bits_per_sample),
        });
    }

    if bytes.len() % BYTES_PER_SAMPLE != 0 {
        return Err(PcmError::MalformedBuffer {
            len: bytes.len(),
            sample_width: BYTES_PER_SAMPLE,
        });
    }

    Ok(bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Encode samples as little-endian PCM bytes, low byte first
pub fn encode(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
    for sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}

/// Round and clamp a computed sample to the 16-bit range
///
/// NaN maps to silence.
#[inline]
pub fn saturate(value: f64) -> i16 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}
