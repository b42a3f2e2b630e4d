//! Audio Buffer
//!
//! The canonical in-memory representation: a format descriptor, interleaved
//! signed 16-bit samples and a deferred gain. Buffers are immutable once
//! built; transforms return new buffers.

use std::borrow::Cow;

use sha2::{Digest, Sha256};

use crate::engine::codec::{self, BITS_PER_SAMPLE};
use crate::engine::format::Format;
use crate::error::{PcmError, Result};

/// Full-scale reference for dBFS metrics
const FULL_SCALE: f64 = 32768.0;

/// Convert linear amplitude (1.0 = full scale) to decibels
///
/// Returns -f64::INFINITY for zero input.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// PCM sample buffer
///
/// # Example
/// ```
/// use pcmedit::engine::{AudioBuffer, Format};
///
/// // One second of stereo silence at 8 kHz
/// let buffer = AudioBuffer::silence(Format::stereo(8000), 8000);
/// assert_eq!(buffer.frames(), 8000);
/// assert_eq!(buffer.samples().len(), 16000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    format: Format,
    /// Interleaved samples (L, R, L, R, ... for stereo)
    samples: Vec<i16>,
    /// Deferred gain, consumed by mix and by rendering
    gain: f64,
}

impl AudioBuffer {
    /// Create a buffer from interleaved samples at unity gain
    ///
    /// # Errors
    /// * `InvalidArgument` - if the sample rate is zero
    /// * `UnsupportedFormat` - if the format is not 16-bit mono or stereo
    /// * `MalformedBuffer` - if the sample count is not a whole number of frames
    pub fn new(format: Format, samples: Vec<i16>) -> Result<Self> {
        format.validate()?;
        if format.bits_per_sample != BITS_PER_SAMPLE {
            return Err(PcmError::UnsupportedFormat {
                format: format!(
                    "{}-bit PCM (only 16-bit supported)",
                    format.bits_per_sample
                ),
            });
        }

        let channels = format.channels as usize;
        if samples.len() % channels != 0 {
            return Err(PcmError::MalformedBuffer {
                len: samples.len() * codec::BYTES_PER_SAMPLE,
                sample_width: codec::BYTES_PER_SAMPLE * channels,
            });
        }

        Ok(Self::from_parts(format, samples, 1.0))
    }

    /// Create an all-zero buffer of `frames` frames
    pub fn silence(format: Format, frames: usize) -> Self {
        let samples = vec![0_i16; frames * format.channels as usize];
        Self::from_parts(format, samples, 1.0)
    }

    /// Decode a raw PCM byte stream reported by a decoder
    ///
    /// # Arguments
    /// * `bytes` - Little-endian interleaved PCM data
    /// * `sample_rate` - Sample rate in Hz
    /// * `channels` - Channel count (1 or 2)
    /// * `bits_per_sample` - Bit depth (must be 16)
    pub fn from_pcm_bytes(
        bytes: &[u8],
        sample_rate: u32,
        channels: u16,
        bits_per_sample: u16,
    ) -> Result<Self> {
        let frame_size = channels.saturating_mul(bits_per_sample) / 8;
        let format =
            Format::with_frame_size(sample_rate, channels, bits_per_sample, Some(frame_size))?;
        let samples = codec::decode(bytes, bits_per_sample)?;
        Self::new(format, samples)
    }

    /// Assemble a buffer whose invariants the caller has already checked
    pub(crate) fn from_parts(format: Format, samples: Vec<i16>, gain: f64) -> Self {
        debug_assert_eq!(samples.len() % format.channels.max(1) as usize, 0);
        Self {
            format,
            samples,
            gain,
        }
    }

    /// Format descriptor
    #[inline]
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// Raw interleaved samples, before the deferred gain
    #[inline]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consume the buffer, returning its raw samples
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Deferred gain
    #[inline]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Number of channels
    #[inline]
    pub fn channels(&self) -> u16 {
        self.format.channels
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate
    }

    /// Number of frames (samples per channel)
    #[inline]
    pub fn frames(&self) -> usize {
        self.samples.len() / self.format.channels.max(1) as usize
    }

    /// Check if the buffer holds no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / self.format.sample_rate as f64
    }

    /// Samples of frame `index`, one per channel
    pub fn frame(&self, index: usize) -> Option<&[i16]> {
        let channels = self.format.channels as usize;
        let start = index.checked_mul(channels)?;
        self.samples.get(start..start + channels)
    }

    /// Copy of this buffer with a new deferred gain; samples are untouched
    pub fn with_gain(&self, gain: f64) -> Self {
        Self {
            gain,
            ..self.clone()
        }
    }

    /// Samples with the deferred gain applied, saturating to 16 bits
    pub fn rendered_samples(&self) -> Cow<'_, [i16]> {
        if self.gain == 1.0 {
            Cow::Borrowed(&self.samples)
        } else {
            Cow::Owned(
                self.samples
                    .iter()
                    .map(|&s| codec::saturate(s as f64 * self.gain))
                    .collect(),
            )
        }
    }

    /// Bake the deferred gain into the samples, returning a unity-gain buffer
    pub fn render(&self) -> Self {
        Self::from_parts(self.format, self.rendered_samples().into_owned(), 1.0)
    }

    /// Encode the rendered samples as little-endian PCM bytes
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        codec::encode(&self.rendered_samples())
    }

    /// Human-readable format summary
    pub fn describe(&self) -> String {
        format!(
            "{}, {} frames ({:.3}s), gain {:.2}",
            self.format,
            self.frames(),
            self.duration_secs(),
            self.gain
        )
    }

    /// Peak level of the rendered audio in dBFS
    ///
    /// Returns -f64::INFINITY for empty or silent buffers.
    pub fn peak_dbfs(&self) -> f64 {
        let peak = self
            .rendered_samples()
            .iter()
            .map(|&s| (s as i32).unsigned_abs())
            .max()
            .unwrap_or(0);

        linear_to_db(peak as f64 / FULL_SCALE)
    }

    /// RMS level of the rendered audio in dBFS
    ///
    /// Returns -f64::INFINITY for empty or silent buffers.
    pub fn rms_dbfs(&self) -> f64 {
        let rendered = self.rendered_samples();
        if rendered.is_empty() {
            return f64::NEG_INFINITY;
        }

        let sum_squares: f64 = rendered
            .iter()
            .map(|&s| {
                let v = s as f64 / FULL_SCALE;
                v * v
            })
            .sum();

        linear_to_db((sum_squares / rendered.len() as f64).sqrt())
    }

    /// SHA-256 of the rendered PCM bytes, hex encoded
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_pcm_bytes());
        format!("{:x}", hasher.finalize())
    }
}

// ============================================================================
// Tests
// ============================================================================
