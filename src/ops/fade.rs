//! Fade - linear fade-in/fade-out envelopes

use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::codec::saturate;
use crate::engine::validate::{require_loaded, require_non_negative};
use crate::engine::AudioBuffer;
use crate::error::{PcmError, Result};

/// Which end of the audio a single-sided fade applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeDirection {
    In,
    Out,
}

impl FromStr for FadeDirection {
    type Err = PcmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "in" => Ok(FadeDirection::In),
            "out" => Ok(FadeDirection::Out),
            _ => Err(PcmError::invalid_argument(format!(
                "invalid fade direction '{}' (expected 'in' or 'out')",
                s
            ))),
        }
    }
}

/// Linear interpolation of `s` from `[a1, a2]` onto `[b1, b2]`
///
/// A zero-width source range maps everything to `b2`.
#[inline]
pub fn linear_map(a1: f64, a2: f64, b1: f64, b2: f64, s: f64) -> f64 {
    if a1 == a2 {
        return b2;
    }
    b1 + (s - a1) * (b2 - b1) / (a2 - a1)
}

/// Apply a linear fade-in over the first `fade_in_secs` and a linear
/// fade-out over the last `fade_out_secs`
///
/// The deferred gain carries over untouched, so the effective envelope is
/// the fade curve times the gain.
///
/// # Errors
/// * `NotLoaded` - if the buffer holds no audio
/// * `InvalidArgument` - if either duration is negative
pub fn fade(a: &AudioBuffer, fade_in_secs: f64, fade_out_secs: f64) -> Result<AudioBuffer> {
    require_loaded(a)?;
    require_non_negative("fade-in", fade_in_secs)?;
    require_non_negative("fade-out", fade_out_secs)?;

    let format = a.format();
    let frames = a.frames() as f64;
    let fade_in_end = format.frames_for(fade_in_secs)? as f64;
    let fade_out_start = frames - format.frames_for(fade_out_secs)? as f64;

    debug!(
        "fade: {} frames, in until {}, out from {}",
        frames, fade_in_end, fade_out_start
    );

    let channels = a.channels() as usize;
    let mut samples = Vec::with_capacity(a.samples().len());

    for (frame, values) in a.samples().chunks_exact(channels).enumerate() {
        let position = frame as f64;
        let mut dampener = 1.0;
        if position < fade_in_end {
            dampener *= linear_map(0.0, fade_in_end, 0.0, 1.0, position);
        }
        if position > fade_out_start {
            dampener *= linear_map(fade_out_start, frames, 1.0, 0.0, position);
        }

        if dampener == 1.0 {
            samples.extend_from_slice(values);
        } else {
            samples.extend(values.iter().map(|&s| saturate(s as f64 * dampener)));
        }
    }

    Ok(AudioBuffer::from_parts(*format, samples, a.gain()))
}

/// Single-sided fade
pub fn fade_edge(a: &AudioBuffer, direction: FadeDirection, secs: f64) -> Result<AudioBuffer> {
    match direction {
        FadeDirection::In => fade(a, secs, 0.0),
        FadeDirection::Out => fade(a, 0.0, secs),
    }
}
