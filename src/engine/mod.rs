//! Audio Engine Module
//!
//! Core sample-buffer types:
//! - PCM byte codec
//! - Format descriptor and audio buffer
//! - Shared validation
//! - WAV file I/O

pub mod buffer;
pub mod codec;
pub mod format;
pub mod io;
pub mod validate;

pub use buffer::AudioBuffer;
pub use format::{ChannelLayout, Format};
pub use io::{generate_test_tone, read_wav, read_wav_from, write_wav, write_wav_to};
pub use validate::{compatible_for, FormatMismatchWarning, MergeKind};
