//! PCM format descriptor

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::codec::{BITS_PER_SAMPLE, BYTES_PER_SAMPLE};
use crate::error::{PcmError, Result};

/// Largest data chunk a WAV file can describe
const MAX_DATA_BYTES: u64 = u32::MAX as u64;

/// Audio channel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single channel (mono)
    Mono,
    /// Two interleaved channels (left, right)
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    pub fn num_channels(&self) -> u16 {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    /// Create a ChannelLayout from a channel count
    pub fn from_count(count: u16) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

/// Format of a PCM buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Bytes per frame, never less than 1
    pub frame_size_bytes: u16,
}

impl Format {
    /// Create a validated 16-bit format
    ///
    /// # Errors
    /// * `InvalidArgument` - if the sample rate is zero
    /// * `UnsupportedFormat` - if the channel count is not 1 or 2
    pub fn new(sample_rate: u32, channels: u16) -> Result<Self> {
        let frame_size = channels.saturating_mul(BITS_PER_SAMPLE) / 8;
        Self::with_frame_size(sample_rate, channels, BITS_PER_SAMPLE, Some(frame_size))
    }

    /// Create a format from collaborator-reported metadata
    ///
    /// An unspecified (`None` or zero) frame size defaults to one byte.
    pub fn with_frame_size(
        sample_rate: u32,
        channels: u16,
        bits_per_sample: u16,
        frame_size_bytes: Option<u16>,
    ) -> Result<Self> {
        let format = Self {
            sample_rate,
            channels,
            bits_per_sample,
            frame_size_bytes: frame_size_bytes.filter(|&size| size > 0).unwrap_or(1),
        };
        format.validate()?;
        Ok(format)
    }

    /// Check the rate and channel count
    ///
    /// # Errors
    /// * `InvalidArgument` - if the sample rate is zero
    /// * `UnsupportedFormat` - if the channel count is not 1 or 2
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(PcmError::invalid_argument("sample rate must be positive"));
        }
        if ChannelLayout::from_count(self.channels).is_none() {
            return Err(PcmError::UnsupportedFormat {
                format: format!(
                    "{}-channel audio (only mono/stereo supported)",
                    self.channels
                ),
            });
        }
        Ok(())
    }

    /// Mono 16-bit format at the given rate
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: BITS_PER_SAMPLE,
            frame_size_bytes: 2,
        }
    }

    /// Stereo 16-bit format at the given rate
    pub fn stereo(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 2,
            bits_per_sample: BITS_PER_SAMPLE,
            frame_size_bytes: 4,
        }
    }

    /// Same format with a different channel count; frame size scales along
    pub(crate) fn with_channels(&self, channels: u16) -> Self {
        let per_channel = (self.frame_size_bytes / self.channels.max(1)).max(1);
        Self {
            channels,
            frame_size_bytes: per_channel * channels,
            ..*self
        }
    }

    /// Channel layout of this format
    pub fn layout(&self) -> Option<ChannelLayout> {
        ChannelLayout::from_count(self.channels)
    }

    /// Whole frames covered by `secs` seconds
    ///
    /// A tiny epsilon absorbs float error so that a duration computed as
    /// `frames / rate` maps back to exactly `frames`.
    ///
    /// # Errors
    /// * `InvalidArgument` - if the duration is not finite, or holds more
    ///   audio than a WAV data chunk can address
    pub fn frames_for(&self, secs: f64) -> Result<usize> {
        if secs.is_nan() || secs.is_infinite() {
            return Err(PcmError::invalid_argument(format!(
                "duration must be a finite number of seconds, got {}",
                secs
            )));
        }
        if secs <= 0.0 {
            return Ok(0);
        }

        let bytes_per_frame = self.channels.max(1) as u64 * BYTES_PER_SAMPLE as u64;
        let max_frames = MAX_DATA_BYTES / bytes_per_frame;
        let frames = (secs * self.sample_rate as f64 + 1e-6).floor();
        if frames > max_frames as f64 {
            return Err(PcmError::invalid_argument(format!(
                "{}s at {} Hz exceeds the maximum of {} frames",
                secs, self.sample_rate, max_frames
            )));
        }
        Ok(frames as usize)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = match self.layout() {
            Some(ChannelLayout::Mono) => "mono",
            Some(ChannelLayout::Stereo) => "stereo",
            None => "multichannel",
        };
        write!(
            f,
            "PCM_SIGNED {} Hz, {} bit, {}, {} bytes/frame, little-endian",
            self.sample_rate, self.bits_per_sample, layout, self.frame_size_bytes
        )
    }
}
