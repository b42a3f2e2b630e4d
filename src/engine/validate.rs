//! Shared precondition checks for transform operations

use std::fmt;

use crate::engine::buffer::AudioBuffer;
use crate::error::{PcmError, Result};

/// Kind of two-operand merge being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    /// Concatenation: formats must be identical
    Append,
    /// Additive mix: channel counts must match, sample rates should
    Mix,
}

impl MergeKind {
    fn operation(&self) -> &'static str {
        match self {
            MergeKind::Append => "append",
            MergeKind::Mix => "mix",
        }
    }
}

/// Non-fatal sample-rate mismatch found while mixing
///
/// No resampling is performed, so the second track plays back faster or
/// slower than intended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatMismatchWarning {
    pub base_rate: u32,
    pub other_rate: u32,
}

impl fmt::Display for FormatMismatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sample rates do not match ({} Hz vs {} Hz); the mixed-in track will sound faster or slower",
            self.base_rate, self.other_rate
        )
    }
}

/// Check that `a` and `b` can be merged
///
/// # Returns
/// * `Ok(None)` - formats are compatible
/// * `Ok(Some(warning))` - mix may proceed despite differing sample rates
/// * `Err(FormatMismatch)` - the merge must be rejected
pub fn compatible_for(
    kind: MergeKind,
    a: &AudioBuffer,
    b: &AudioBuffer,
) -> Result<Option<FormatMismatchWarning>> {
    let (fa, fb) = (a.format(), b.format());

    match kind {
        MergeKind::Append => {
            if fa.sample_rate != fb.sample_rate
                || fa.channels != fb.channels
                || fa.bits_per_sample != fb.bits_per_sample
            {
                return Err(PcmError::FormatMismatch {
                    operation: kind.operation(),
                    expected: fa.to_string(),
                    actual: fb.to_string(),
                });
            }
            Ok(None)
        }
        MergeKind::Mix => {
            if fa.channels != fb.channels {
                return Err(PcmError::FormatMismatch {
                    operation: kind.operation(),
                    expected: format!("{} channel(s)", fa.channels),
                    actual: format!("{} channel(s)", fb.channels),
                });
            }
            if fa.sample_rate != fb.sample_rate {
                return Ok(Some(FormatMismatchWarning {
                    base_rate: fa.sample_rate,
                    other_rate: fb.sample_rate,
                }));
            }
            Ok(None)
        }
    }
}

/// Check that a duration or similar parameter is a finite, non-negative number
pub fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PcmError::invalid_argument(format!(
            "{} must be a non-negative number of seconds, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Check that a buffer holds audio
pub fn require_loaded(buffer: &AudioBuffer) -> Result<()> {
    if buffer.is_empty() {
        return Err(PcmError::NotLoaded);
    }
    Ok(())
}

/// Check that a buffer has the expected channel count
pub(crate) fn require_channels(
    operation: &'static str,
    buffer: &AudioBuffer,
    channels: u16,
) -> Result<()> {
    if buffer.channels() != channels {
        return Err(PcmError::FormatMismatch {
            operation,
            expected: format!("{} channel(s)", channels),
            actual: format!("{} channel(s)", buffer.channels()),
        });
    }
    Ok(())
}
