//! Edit scripts
//!
//! A JSON document naming an input file, an optional output file and an
//! ordered list of edits:
//!
//! ```json
//! {
//!   "input": "voice.wav",
//!   "output": "episode.wav",
//!   "steps": [
//!     { "op": "pad", "front": 1.0 },
//!     { "op": "mix", "path": "music.wav", "gain": 0.3, "fade_out": 2.0 },
//!     { "op": "fade", "fade_in": 0.5, "fade_out": 0.5 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{PcmError, Result};
use crate::track::Track;

/// One edit in a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    Append {
        path: PathBuf,
    },
    Mix {
        path: PathBuf,
        /// Deferred gain applied to the mixed-in track
        #[serde(default)]
        gain: Option<f64>,
        #[serde(default)]
        fade_out: Option<f64>,
    },
    Volume {
        percent: f64,
    },
    Gain {
        gain: f64,
    },
    Fade {
        #[serde(default)]
        fade_in: f64,
        #[serde(default)]
        fade_out: f64,
    },
    Pad {
        #[serde(default)]
        front: f64,
        #[serde(default)]
        back: f64,
    },
    Trim {
        #[serde(default)]
        front: f64,
        #[serde(default)]
        back: f64,
    },
    MonoToStereo {
        #[serde(default = "default_true")]
        left: bool,
        #[serde(default = "default_true")]
        right: bool,
    },
    StereoToMono,
}

fn default_true() -> bool {
    true
}

impl EditStep {
    /// Apply this step to a track
    ///
    /// Relative paths resolve against `base_dir`.
    pub fn apply(&self, track: &mut Track, base_dir: &Path) -> Result<()> {
        match self {
            EditStep::Append { path } => track.append_file(&base_dir.join(path)),
            EditStep::Mix {
                path,
                gain,
                fade_out,
            } => {
                let mut other = Track::open(&base_dir.join(path))?;
                if let Some(gain) = gain {
                    other.set_gain(*gain)?;
                }
                track.mix(&other, *fade_out)?;
                Ok(())
            }
            EditStep::Volume { percent } => track.set_volume(*percent),
            EditStep::Gain { gain } => track.set_gain(*gain),
            EditStep::Fade { fade_in, fade_out } => track.fade(*fade_in, *fade_out),
            EditStep::Pad { front, back } => track.add_pause(*front, *back),
            EditStep::Trim { front, back } => track.trim(*front, *back),
            EditStep::MonoToStereo { left, right } => track.mono_to_stereo(*left, *right),
            EditStep::StereoToMono => track.stereo_to_mono(),
        }
    }
}

/// Sequence of edits from an input file to an output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditScript {
    pub input: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub steps: Vec<EditStep>,
    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl EditScript {
    /// Parse a script; relative paths resolve against the working directory
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a script file; relative paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PcmError::FileNotFound {
                path: path.display().to_string(),
                source: Some(e),
            },
            _ => PcmError::Io(e),
        })?;

        let mut script = Self::from_json(&text)?;
        script.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(script)
    }

    /// Load the input, apply every step in order and save the output
    ///
    /// Stops at the first failing step.
    pub fn run(&self) -> Result<Track> {
        let mut track = Track::open(&self.base_dir.join(&self.input))?;

        for (index, step) in self.steps.iter().enumerate() {
            info!("Step {}: {:?}", index + 1, step);
            if let Err(e) = step.apply(&mut track, &self.base_dir) {
                warn!("Step {} failed: {}", index + 1, e);
                return Err(e);
            }
        }

        if let Some(output) = &self.output {
            track.save(&self.base_dir.join(output))?;
        }

        Ok(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{AudioBuffer, Format};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_steps() {
        let script = EditScript::from_json(
            r#"{
                "input": "in.wav",
                "steps": [
                    { "op": "pad", "front": 1.5 },
                    { "op": "mono_to_stereo", "right": false },
                    { "op": "stereo_to_mono" },
                    { "op": "mix", "path": "bed.wav", "gain": 0.25 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.input, PathBuf::from("in.wav"));
        assert_eq!(script.output, None);
        assert_eq!(
            script.steps,
            vec![
                EditStep::Pad {
                    front: 1.5,
                    back: 0.0
                },
                EditStep::MonoToStereo {
                    left: true,
                    right: false
                },
                EditStep::StereoToMono,
                EditStep::Mix {
                    path: PathBuf::from("bed.wav"),
                    gain: Some(0.25),
                    fade_out: None
                },
            ]
        );
    }

    #[test]
    fn test_parse_unknown_op() {
        let result = EditScript::from_json(r#"{ "input": "a.wav", "steps": [{ "op": "reverb" }] }"#);
        assert!(matches!(result, Err(PcmError::Serialization(_))));
    }

    #[test]
    fn test_load_missing_script() {
        let result = EditScript::load(Path::new("/nonexistent/script.json"));
        assert!(matches!(result, Err(PcmError::FileNotFound { .. })));
    }

    #[test]
    fn test_run_script() {
        let dir = tempdir().unwrap();
        let voice = AudioBuffer::new(Format::mono(4), vec![100; 4]).unwrap();
        let bed = AudioBuffer::new(Format::mono(4), vec![1000; 8]).unwrap();
        crate::engine::write_wav(&voice, &dir.path().join("voice.wav")).unwrap();
        crate::engine::write_wav(&bed, &dir.path().join("bed.wav")).unwrap();

        let script_path = dir.path().join("script.json");
        fs::write(
            &script_path,
            r#"{
                "input": "voice.wav",
                "output": "out.wav",
                "steps": [
                    { "op": "pad", "back": 0.5 },
                    { "op": "mix", "path": "bed.wav", "gain": 0.1 },
                    { "op": "volume", "percent": 200 }
                ]
            }"#,
        )
        .unwrap();

        let track = EditScript::load(&script_path).unwrap().run().unwrap();
        let expected = vec![400, 400, 400, 400, 200, 200];
        assert_eq!(track.buffer().unwrap().samples(), expected.as_slice());

        let saved = crate::engine::read_wav(&dir.path().join("out.wav")).unwrap();
        assert_eq!(saved.samples(), expected.as_slice());
    }

    #[test]
    fn test_run_stops_at_failing_step() {
        let dir = tempdir().unwrap();
        let voice = AudioBuffer::new(Format::mono(4), vec![100; 4]).unwrap();
        crate::engine::write_wav(&voice, &dir.path().join("voice.wav")).unwrap();

        let mut script = EditScript::from_json(
            r#"{
                "input": "voice.wav",
                "output": "out.wav",
                "steps": [{ "op": "trim", "front": 5.0 }]
            }"#,
        )
        .unwrap();
        script.base_dir = dir.path().to_path_buf();

        assert!(matches!(script.run(), Err(PcmError::OverTrim { .. })));
        assert!(!dir.path().join("out.wav").exists());
    }

    #[test]
    fn test_mix_step_with_rate_mismatch_still_applies() {
        let dir = tempdir().unwrap();
        let voice = AudioBuffer::new(Format::mono(8), vec![100; 4]).unwrap();
        let bed = AudioBuffer::new(Format::mono(16), vec![10; 4]).unwrap();
        crate::engine::write_wav(&voice, &dir.path().join("voice.wav")).unwrap();
        crate::engine::write_wav(&bed, &dir.path().join("bed.wav")).unwrap();

        let mut script = EditScript::from_json(
            r#"{
                "input": "voice.wav",
                "steps": [{ "op": "mix", "path": "bed.wav" }]
            }"#,
        )
        .unwrap();
        script.base_dir = dir.path().to_path_buf();

        let track = script.run().unwrap();
        let buffer = track.buffer().unwrap();
        assert_eq!(buffer.samples(), &[110, 110, 110, 110]);
        assert_eq!(buffer.sample_rate(), 8);
    }
}
