//! Append - frame concatenation

use std::borrow::Cow;

use log::debug;

use crate::engine::validate::{compatible_for, require_loaded, MergeKind};
use crate::engine::AudioBuffer;
use crate::error::Result;

/// Concatenate `b` after `a`
///
/// If `a` holds no audio, `b` is returned unchanged. Buffers with differing
/// deferred gains are rendered before joining and the result has unity gain.
///
/// # Errors
/// * `NotLoaded` - if `b` holds no audio while `a` does
/// * `FormatMismatch` - if sample rate, channels or bit depth differ
pub fn append(a: &AudioBuffer, b: &AudioBuffer) -> Result<AudioBuffer> {
    if a.is_empty() {
        return Ok(b.clone());
    }
    require_loaded(b)?;
    compatible_for(MergeKind::Append, a, b)?;

    debug!("append: {} + {} frames", a.frames(), b.frames());
    Ok(concat(a, b))
}

/// Join two buffers already known to share a format
pub(crate) fn concat(a: &AudioBuffer, b: &AudioBuffer) -> AudioBuffer {
    let (left, right, gain) = if a.gain() == b.gain() {
        (Cow::Borrowed(a.samples()), Cow::Borrowed(b.samples()), a.gain())
    } else {
        (a.rendered_samples(), b.rendered_samples(), 1.0)
    };

    let mut samples = Vec::with_capacity(left.len() + right.len());
    samples.extend_from_slice(&left);
    samples.extend_from_slice(&right);

    AudioBuffer::from_parts(*a.format(), samples, gain)
}
