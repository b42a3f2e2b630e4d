//! Channel conversion between mono and stereo

use log::debug;

use crate::engine::validate::{require_channels, require_loaded};
use crate::engine::AudioBuffer;
use crate::error::Result;

/// Spread a mono buffer across two channels
///
/// A side that is not included carries silence.
///
/// # Errors
/// * `NotLoaded` - if the buffer holds no audio
/// * `FormatMismatch` - if the buffer is not mono
pub fn mono_to_stereo(
    a: &AudioBuffer,
    include_left: bool,
    include_right: bool,
) -> Result<AudioBuffer> {
    require_loaded(a)?;
    require_channels("convert mono to stereo", a, 1)?;

    debug!(
        "mono_to_stereo: {} frames (left: {}, right: {})",
        a.frames(),
        include_left,
        include_right
    );

    let mut samples = Vec::with_capacity(a.samples().len() * 2);
    for &s in a.samples() {
        samples.push(if include_left { s } else { 0 });
        samples.push(if include_right { s } else { 0 });
    }

    Ok(AudioBuffer::from_parts(
        a.format().with_channels(2),
        samples,
        a.gain(),
    ))
}

/// Average the two channels of a stereo buffer
///
/// The sum is taken in 32 bits and halved with truncation toward zero,
/// so no input can overflow.
///
/// # Errors
/// * `NotLoaded` - if the buffer holds no audio
/// * `FormatMismatch` - if the buffer is not stereo
pub fn stereo_to_mono(a: &AudioBuffer) -> Result<AudioBuffer> {
    require_loaded(a)?;
    require_channels("convert stereo to mono", a, 2)?;

    debug!("stereo_to_mono: {} frames", a.frames());

    let samples = a
        .samples()
        .chunks_exact(2)
        .map(|frame| ((frame[0] as i32 + frame[1] as i32) / 2) as i16)
        .collect();

    Ok(AudioBuffer::from_parts(
        a.format().with_channels(1),
        samples,
        a.gain(),
    ))
}
