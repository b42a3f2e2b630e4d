//! Transform Operations
//!
//! Pure functions from one or two [`AudioBuffer`](crate::engine::AudioBuffer)s
//! plus parameters to a new buffer. Inputs are never modified; every
//! precondition is checked before any sample is computed.

mod append;
mod channels;
mod edit;
mod fade;
mod mix;
mod volume;

pub use append::append;
pub use channels::{mono_to_stereo, stereo_to_mono};
pub use edit::{pad, pad_edge, trim, trim_edge, Edge};
pub use fade::{fade, fade_edge, linear_map, FadeDirection};
pub use mix::{mix, MixOutput};
pub use volume::set_volume;
