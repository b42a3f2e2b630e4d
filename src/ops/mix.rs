//! Mix - additive combination of two tracks
//!
//! Samples are summed at each buffer's own gain and saturated to the 16-bit
//! range. The result always has the length of the base track: a shorter
//! second track is padded with silence, a longer one is cut off.

use log::{debug, warn};

use crate::engine::codec::saturate;
use crate::engine::validate::{
    compatible_for, require_loaded, require_non_negative, FormatMismatchWarning, MergeKind,
};
use crate::engine::AudioBuffer;
use crate::error::Result;
use crate::ops::fade::linear_map;

/// Result of a mix, with any non-fatal format warning
#[derive(Debug, Clone)]
pub struct MixOutput {
    pub buffer: AudioBuffer,
    pub warning: Option<FormatMismatchWarning>,
}

/// Mix `b` into `a`
///
/// # Arguments
/// * `a` - Base track; sets the output length and format
/// * `b` - Track mixed on top
/// * `fade_out_secs` - Optional trailing window over which both gains ramp to zero
///
/// # Errors
/// * `NotLoaded` - if either buffer holds no audio
/// * `FormatMismatch` - if the channel counts differ
/// * `InvalidArgument` - if the fade window is negative
pub fn mix(a: &AudioBuffer, b: &AudioBuffer, fade_out_secs: Option<f64>) -> Result<MixOutput> {
    require_loaded(a)?;
    require_loaded(b)?;
    if let Some(secs) = fade_out_secs {
        require_non_negative("mix fade-out", secs)?;
    }
    let warning = compatible_for(MergeKind::Mix, a, b)?;
    if let Some(w) = &warning {
        warn!("mix: {}", w);
    }

    let channels = a.channels() as usize;
    let frames = a.frames();
    let fade_frames = match fade_out_secs {
        Some(secs) => a.format().frames_for(secs)?,
        None => 0,
    };
    let fade_start = frames as f64 - fade_frames as f64;

    debug!(
        "mix: {} frames over {} frames, fade-out {} frames",
        b.frames(),
        frames,
        fade_frames
    );

    let (gain_a, gain_b) = (a.gain(), b.gain());
    let other = b.samples();
    let mut samples = Vec::with_capacity(a.samples().len());

    for (frame, base) in a.samples().chunks_exact(channels).enumerate() {
        let position = frame as f64;
        let (ga, gb) = if fade_frames > 0 && position > fade_start {
            (
                linear_map(fade_start, frames as f64, gain_a, 0.0, position),
                linear_map(fade_start, frames as f64, gain_b, 0.0, position),
            )
        } else {
            (gain_a, gain_b)
        };

        for (ch, &s) in base.iter().enumerate() {
            let t = other.get(frame * channels + ch).copied().unwrap_or(0);
            samples.push(saturate(s as f64 * ga + t as f64 * gb));
        }
    }

    Ok(MixOutput {
        buffer: AudioBuffer::from_parts(*a.format(), samples, 1.0),
        warning,
    })
}
