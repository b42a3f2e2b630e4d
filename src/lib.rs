//! pcmedit - PCM Sample-Buffer Editing
//!
//! pcmedit edits uncompressed 16-bit PCM audio held in memory:
//! concatenation, two-track mixing, volume, linear fades, silence padding,
//! trimming and mono/stereo conversion.
//!
//! # Architecture
//!
//! - `engine`: sample codec, format descriptor, audio buffer, validation, WAV I/O
//! - `ops`: pure transforms from buffers to new buffers
//! - `track`: an editing session that holds one buffer
//! - `script`: JSON edit scripts applied to a track
//!
//! # Example
//! ```
//! use pcmedit::engine::{AudioBuffer, Format};
//! use pcmedit::ops;
//!
//! let voice = AudioBuffer::new(Format::mono(8000), vec![1000; 8000]).unwrap();
//! let padded = ops::pad(&voice, 1.0, 0.0).unwrap();
//! let faded = ops::fade(&padded, 0.0, 0.5).unwrap();
//! assert_eq!(faded.frames(), 16000);
//! ```

pub mod cli;
pub mod engine;
pub mod error;
pub mod ops;
pub mod script;
pub mod track;

pub use engine::{AudioBuffer, Format};
pub use error::{PcmError, Result};
pub use track::Track;
