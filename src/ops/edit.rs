//! Pad and Trim - silence padding and head/tail removal

use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::validate::{require_loaded, require_non_negative};
use crate::engine::AudioBuffer;
use crate::error::{PcmError, Result};
use crate::ops::append::concat;

/// End of the audio a single-sided pad or trim applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Front,
    Back,
}

impl FromStr for Edge {
    type Err = PcmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "front" => Ok(Edge::Front),
            "back" => Ok(Edge::Back),
            _ => Err(PcmError::invalid_argument(format!(
                "invalid edge '{}' (expected 'front' or 'back')",
                s
            ))),
        }
    }
}

impl Edge {
    /// Split a single duration into `(front, back)`
    fn split(self, secs: f64) -> (f64, f64) {
        match self {
            Edge::Front => (secs, 0.0),
            Edge::Back => (0.0, secs),
        }
    }
}

/// Surround the audio with silence
///
/// # Errors
/// * `NotLoaded` - if the buffer holds no audio
/// * `InvalidArgument` - if either duration is negative
pub fn pad(a: &AudioBuffer, front_secs: f64, back_secs: f64) -> Result<AudioBuffer> {
    require_loaded(a)?;
    require_non_negative("front pause", front_secs)?;
    require_non_negative("back pause", back_secs)?;

    let format = *a.format();
    let front = AudioBuffer::silence(format, format.frames_for(front_secs)?).with_gain(a.gain());
    let back = AudioBuffer::silence(format, format.frames_for(back_secs)?).with_gain(a.gain());

    debug!(
        "pad: {} + {} + {} frames",
        front.frames(),
        a.frames(),
        back.frames()
    );

    Ok(concat(&concat(&front, a), &back))
}

/// Single-sided pad
pub fn pad_edge(a: &AudioBuffer, edge: Edge, secs: f64) -> Result<AudioBuffer> {
    let (front, back) = edge.split(secs);
    pad(a, front, back)
}

/// Remove `front_secs` from the start and `back_secs` from the end
///
/// Offsets are whole frames, so stereo channels never shift.
///
/// # Errors
/// * `NotLoaded` - if the buffer holds no audio
/// * `InvalidArgument` - if either duration is negative
/// * `OverTrim` - if the trims add up to more than the audio length
pub fn trim(a: &AudioBuffer, front_secs: f64, back_secs: f64) -> Result<AudioBuffer> {
    require_loaded(a)?;
    require_non_negative("front trim", front_secs)?;
    require_non_negative("back trim", back_secs)?;

    let available_secs = a.duration_secs();
    if front_secs + back_secs > available_secs {
        return Err(PcmError::OverTrim {
            requested_secs: front_secs + back_secs,
            available_secs,
        });
    }

    let format = a.format();
    let frames = a.frames();
    let start = format.frames_for(front_secs)?.min(frames);
    let end = frames.saturating_sub(format.frames_for(back_secs)?).max(start);

    debug!("trim: keeping frames {}..{} of {}", start, end, frames);

    let channels = a.channels() as usize;
    let samples = a.samples()[start * channels..end * channels].to_vec();
    Ok(AudioBuffer::from_parts(*format, samples, a.gain()))
}

/// Single-sided trim
pub fn trim_edge(a: &AudioBuffer, edge: Edge, secs: f64) -> Result<AudioBuffer> {
    let (front, back) = edge.split(secs);
    trim(a, front, back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Format;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn ramp(format: Format, frames: usize) -> AudioBuffer {
        let samples = (0..frames * format.channels as usize)
            .map(|i| i as i16 + 1)
            .collect();
        AudioBuffer::new(format, samples).unwrap()
    }

    #[test_case("front", Edge::Front)]
    #[test_case("BACK", Edge::Back)]
    #[test_case("Front", Edge::Front)]
    fn test_edge_parse(text: &str, expected: Edge) {
        assert_eq!(text.parse::<Edge>().unwrap(), expected);
    }

    #[test]
    fn test_edge_parse_rejects_unknown() {
        assert!(matches!(
            "middle".parse::<Edge>(),
            Err(PcmError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_pad_front_one_second() {
        let a = ramp(Format::mono(8000), 10);
        let out = pad(&a, 1.0, 0.0).unwrap();
        assert_eq!(out.frames(), 8010);
        assert!(out.samples()[..8000].iter().all(|&s| s == 0));
        assert_eq!(&out.samples()[8000..], a.samples());
    }

    #[test]
    fn test_pad_both_sides_stereo() {
        let a = ramp(Format::stereo(4), 2);
        let out = pad(&a, 0.5, 0.25).unwrap();
        assert_eq!(out.samples(), &[0, 0, 0, 0, 1, 2, 3, 4, 0, 0]);
        assert_eq!(out.format(), a.format());
    }

    #[test]
    fn test_pad_keeps_gain() {
        let a = ramp(Format::mono(4), 2).with_gain(2.0);
        let out = pad(&a, 0.5, 0.0).unwrap();
        assert_eq!(out.gain(), 2.0);
        assert_eq!(out.samples(), &[0, 0, 1, 2]);
    }

    #[test]
    fn test_pad_edge() {
        let a = ramp(Format::mono(4), 2);
        assert_eq!(pad_edge(&a, Edge::Back, 0.5).unwrap().samples(), &[1, 2, 0, 0]);
    }

    #[test]
    fn test_pad_rejects_negative() {
        let a = ramp(Format::mono(4), 2);
        assert!(matches!(
            pad(&a, 0.0, -0.5),
            Err(PcmError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_trim_middle_slice() {
        let a = ramp(Format::mono(4), 8);
        let out = trim(&a, 0.5, 0.25).unwrap();
        assert_eq!(out.samples(), &[3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_trim_stereo_stays_frame_aligned() {
        let a = ramp(Format::stereo(4), 4);
        let out = trim(&a, 0.25, 0.25).unwrap();
        assert_eq!(out.samples(), &[3, 4, 5, 6]);
    }

    #[test]
    fn test_trim_length() {
        let a = ramp(Format::mono(1000), 3000);
        let out = trim(&a, 0.4, 1.1).unwrap();
        assert_relative_eq!(out.duration_secs(), 1.5, epsilon = 1.0 / 1000.0);
    }

    #[test]
    fn test_trim_everything_leaves_empty() {
        let a = ramp(Format::mono(4), 8);
        let out = trim(&a, 1.0, 1.0).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_over_trim() {
        let a = ramp(Format::mono(4), 8);
        match trim(&a, 1.5, 1.0) {
            Err(PcmError::OverTrim {
                requested_secs,
                available_secs,
            }) => {
                assert_relative_eq!(requested_secs, 2.5);
                assert_relative_eq!(available_secs, 2.0);
            }
            other => panic!("Expected OverTrim, got {:?}", other),
        }
    }

    #[test]
    fn test_trim_negative_checked_first() {
        let a = ramp(Format::mono(4), 8);
        assert!(matches!(
            trim(&a, -1.0, 100.0),
            Err(PcmError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_trim_edge() {
        let a = ramp(Format::mono(4), 4);
        assert_eq!(trim_edge(&a, Edge::Front, 0.5).unwrap().samples(), &[3, 4]);
        assert_eq!(trim_edge(&a, Edge::Back, 0.5).unwrap().samples(), &[1, 2]);
    }

    #[test]
    fn test_pad_rejects_oversized_pause() {
        let a = ramp(Format::mono(8000), 4);
        assert!(matches!(
            pad(&a, 1e20, 0.0),
            Err(PcmError::InvalidArgument { .. })
        ));
        assert!(matches!(
            pad_edge(&a, Edge::Back, 1e20),
            Err(PcmError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_trim_huge_duration_is_over_trim() {
        let a = ramp(Format::mono(8000), 4);
        assert!(matches!(
            trim(&a, 1e20, 0.0),
            Err(PcmError::OverTrim { .. })
        ));
    }
}
