//! Volume - linear gain baked into the samples

use log::debug;

use crate::engine::codec::saturate;
use crate::engine::validate::require_loaded;
use crate::engine::AudioBuffer;
use crate::error::{PcmError, Result};

/// Scale every sample by `percent / 100`, saturating to 16 bits
///
/// 100% returns the samples bit-exact. Negative percentages invert polarity.
/// The deferred gain of `a` carries over unchanged.
///
/// # Errors
/// * `NotLoaded` - if the buffer holds no audio
/// * `InvalidArgument` - if `percent` is not a finite number
pub fn set_volume(a: &AudioBuffer, percent: f64) -> Result<AudioBuffer> {
    require_loaded(a)?;
    if !percent.is_finite() {
        return Err(PcmError::invalid_argument(format!(
            "volume must be a finite percentage, got {}",
            percent
        )));
    }

    let gain = percent / 100.0;
    debug!("volume: {}% over {} frames", percent, a.frames());

    // Unity gain optimization
    if gain == 1.0 {
        return Ok(a.clone());
    }

    let samples = a
        .samples()
        .iter()
        .map(|&s| saturate(s as f64 * gain))
        .collect();

    Ok(AudioBuffer::from_parts(*a.format(), samples, a.gain()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Format;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn mono(samples: Vec<i16>) -> AudioBuffer {
        AudioBuffer::new(Format::mono(8000), samples).unwrap()
    }

    #[test]
    fn test_unity_is_identity() {
        let a = mono(vec![i16::MIN, -3, 0, 7, i16::MAX]);
        assert_eq!(set_volume(&a, 100.0).unwrap(), a);
    }

    #[test_case(50.0, &[50, -50, 1] ; "half rounds away from zero")]
    #[test_case(0.0, &[0, 0, 0] ; "mute")]
    #[test_case(-100.0, &[-100, 100, -1] ; "invert")]
    fn test_scaling(percent: f64, expected: &[i16]) {
        let out = set_volume(&mono(vec![100, -100, 1]), percent).unwrap();
        assert_eq!(out.samples(), expected);
    }

    #[test]
    fn test_boost_saturates() {
        let out = set_volume(&mono(vec![20000, -20000]), 200.0).unwrap();
        assert_eq!(out.samples(), &[i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_inverting_min_saturates() {
        let out = set_volume(&mono(vec![i16::MIN]), -100.0).unwrap();
        assert_eq!(out.samples(), &[i16::MAX]);
    }

    #[test]
    fn test_keeps_deferred_gain() {
        let out = set_volume(&mono(vec![10]).with_gain(0.5), 200.0).unwrap();
        assert_eq!(out.samples(), &[20]);
        assert_eq!(out.gain(), 0.5);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            set_volume(&mono(vec![1]), f64::NAN),
            Err(PcmError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_not_loaded() {
        let empty = AudioBuffer::silence(Format::mono(8000), 0);
        assert!(matches!(set_volume(&empty, 50.0), Err(PcmError::NotLoaded)));
    }
}
