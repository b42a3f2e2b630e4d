//! Track - an editing session over one audio buffer
//!
//! A track either holds a buffer or is unloaded. Each edit runs a transform
//! against the current buffer and swaps in the result only if it succeeds,
//! so a failed edit leaves the track as it was.

use std::path::Path;

use crate::engine::validate::FormatMismatchWarning;
use crate::engine::{io, AudioBuffer};
use crate::error::{PcmError, Result};
use crate::ops::{self, Edge, FadeDirection};

/// Editable audio track
#[derive(Debug, Clone, Default)]
pub struct Track {
    buffer: Option<AudioBuffer>,
}

impl Track {
    /// Create an unloaded track
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a track from a WAV file
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::from_buffer(io::read_wav(path)?))
    }

    /// Create a track holding `buffer`
    pub fn from_buffer(buffer: AudioBuffer) -> Self {
        Self {
            buffer: Some(buffer),
        }
    }

    /// Replace the track contents with a WAV file
    ///
    /// On failure the previous contents are kept.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.buffer = Some(io::read_wav(path)?);
        Ok(())
    }

    /// Write the track to a WAV file
    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_wav(self.current()?, path)
    }

    /// Check whether the track holds a buffer
    pub fn is_loaded(&self) -> bool {
        self.buffer.is_some()
    }

    /// Current buffer, if loaded
    pub fn buffer(&self) -> Option<&AudioBuffer> {
        self.buffer.as_ref()
    }

    /// Consume the track, returning its buffer
    pub fn into_buffer(self) -> Option<AudioBuffer> {
        self.buffer
    }

    /// Append another track's audio
    ///
    /// An unloaded track adopts the other track's audio.
    pub fn append(&mut self, other: &Track) -> Result<()> {
        let other = other.current()?;
        match &self.buffer {
            None => {
                self.buffer = Some(other.clone());
                Ok(())
            }
            Some(_) => self.apply(|a| ops::append(a, other)),
        }
    }

    /// Append the audio of a WAV file
    pub fn append_file(&mut self, path: &Path) -> Result<()> {
        self.append(&Track::open(path)?)
    }

    /// Mix another track on top of this one
    ///
    /// Returns the sample-rate warning, if any.
    pub fn mix(
        &mut self,
        other: &Track,
        fade_out_secs: Option<f64>,
    ) -> Result<Option<FormatMismatchWarning>> {
        let output = ops::mix(self.current()?, other.current()?, fade_out_secs)?;
        self.buffer = Some(output.buffer);
        Ok(output.warning)
    }

    /// Mix the audio of a WAV file on top of this track
    pub fn mix_file(
        &mut self,
        path: &Path,
        fade_out_secs: Option<f64>,
    ) -> Result<Option<FormatMismatchWarning>> {
        self.mix(&Track::open(path)?, fade_out_secs)
    }

    /// Fade in and/or out, in seconds
    pub fn fade(&mut self, fade_in_secs: f64, fade_out_secs: f64) -> Result<()> {
        self.apply(|a| ops::fade(a, fade_in_secs, fade_out_secs))
    }

    pub fn fade_edge(&mut self, direction: FadeDirection, secs: f64) -> Result<()> {
        self.apply(|a| ops::fade_edge(a, direction, secs))
    }

    /// Add silence before and after, in seconds
    pub fn add_pause(&mut self, front_secs: f64, back_secs: f64) -> Result<()> {
        self.apply(|a| ops::pad(a, front_secs, back_secs))
    }

    pub fn add_pause_edge(&mut self, edge: Edge, secs: f64) -> Result<()> {
        self.apply(|a| ops::pad_edge(a, edge, secs))
    }

    /// Cut audio from the front and back, in seconds
    pub fn trim(&mut self, front_secs: f64, back_secs: f64) -> Result<()> {
        self.apply(|a| ops::trim(a, front_secs, back_secs))
    }

    pub fn trim_edge(&mut self, edge: Edge, secs: f64) -> Result<()> {
        self.apply(|a| ops::trim_edge(a, edge, secs))
    }

    /// Rescale the samples; 100 is unchanged
    pub fn set_volume(&mut self, percent: f64) -> Result<()> {
        self.apply(|a| ops::set_volume(a, percent))
    }

    /// Set the deferred gain used by mix and export
    pub fn set_gain(&mut self, gain: f64) -> Result<()> {
        if !gain.is_finite() {
            return Err(PcmError::invalid_argument(format!(
                "gain must be a finite number, got {}",
                gain
            )));
        }
        self.apply(|a| Ok(a.with_gain(gain)))
    }

    pub fn mono_to_stereo(&mut self, include_left: bool, include_right: bool) -> Result<()> {
        self.apply(|a| ops::mono_to_stereo(a, include_left, include_right))
    }

    pub fn stereo_to_mono(&mut self) -> Result<()> {
        self.apply(ops::stereo_to_mono)
    }

    /// Rendered PCM bytes
    pub fn bytes(&self) -> Result<Vec<u8>> {
        Ok(self.current()?.to_pcm_bytes())
    }

    /// Format summary
    pub fn info(&self) -> Result<String> {
        Ok(self.current()?.describe())
    }

    /// Length in seconds
    pub fn length_secs(&self) -> Result<f64> {
        Ok(self.current()?.duration_secs())
    }

    fn current(&self) -> Result<&AudioBuffer> {
        self.buffer.as_ref().ok_or(PcmError::NotLoaded)
    }

    fn apply<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&AudioBuffer) -> Result<AudioBuffer>,
    {
        let next = edit(self.current()?)?;
        self.buffer = Some(next);
        Ok(())
    }
}
