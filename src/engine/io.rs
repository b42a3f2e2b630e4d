//! WAV file I/O
//!
//! Decodes WAV containers into [`AudioBuffer`]s and encodes them back.
//! Only uncompressed 16-bit integer PCM in mono or stereo is accepted;
//! the deferred gain is rendered on export.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info};

use crate::engine::buffer::AudioBuffer;
use crate::engine::codec::BITS_PER_SAMPLE;
use crate::engine::format::Format;
use crate::error::{PcmError, Result};

/// Import a WAV file
///
/// # Errors
/// * `FileNotFound` - if the file does not exist
/// * `UnsupportedFormat` - for compressed containers, float samples,
///   bit depths other than 16, or more than 2 channels
/// * `InvalidAudio` - if the file is not a readable WAV file
pub fn read_wav(path: &Path) -> Result<AudioBuffer> {
    let is_mp3 = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"));
    if is_mp3 {
        return Err(PcmError::UnsupportedFormat {
            format: "MP3 (convert the file to WAV first)".to_string(),
        });
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PcmError::FileNotFound {
            path: path.display().to_string(),
            source: Some(e),
        },
        _ => PcmError::Io(e),
    })?;

    let buffer = read_wav_from(BufReader::new(file))?;
    info!("Loaded {}: {}", path.display(), buffer.describe());
    Ok(buffer)
}

/// Import WAV data from any reader
pub fn read_wav_from<R: Read>(reader: R) -> Result<AudioBuffer> {
    let mut reader = WavReader::new(reader).map_err(wav_error)?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(PcmError::UnsupportedFormat {
            format: format!(
                "{}-bit {:?} samples (only 16-bit integer PCM supported)",
                spec.bits_per_sample, spec.sample_format
            ),
        });
    }

    let format = Format::new(spec.sample_rate, spec.channels)?;
    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<i16>, _>>()
        .map_err(wav_error)?;

    debug!(
        "Decoded {} samples at {} Hz, {} channel(s)",
        samples.len(),
        spec.sample_rate,
        spec.channels
    );

    AudioBuffer::new(format, samples)
}

/// Export a buffer to a 16-bit PCM WAV file
pub fn write_wav(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_wav_to(buffer, BufWriter::new(file))?;
    info!("Saved {}: {}", path.display(), buffer.describe());
    Ok(())
}

/// Export a buffer as WAV data to any seekable writer
pub fn write_wav_to<W: Write + Seek>(buffer: &AudioBuffer, writer: W) -> Result<()> {
    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::new(writer, spec).map_err(wav_error)?;
    for &sample in buffer.rendered_samples().iter() {
        writer.write_sample(sample).map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)?;

    Ok(())
}

/// Generate a mono 16-bit sine tone
///
/// # Arguments
/// * `frequency` - Frequency of the sine wave in Hz
/// * `duration_secs` - Duration of the tone in seconds
/// * `sample_rate` - Sample rate in Hz
/// * `amplitude` - Peak level, 0.0 to 1.0 of full scale
///
/// # Errors
/// * `InvalidArgument` - if the sample rate is zero or the duration is too long
pub fn generate_test_tone(
    frequency: f64,
    duration_secs: f64,
    sample_rate: u32,
    amplitude: f64,
) -> Result<AudioBuffer> {
    let format = Format::new(sample_rate, 1)?;
    let num_frames = format.frames_for(duration_secs)?;
    let angular_freq = 2.0 * std::f64::consts::PI * frequency / sample_rate as f64;
    let peak = amplitude.clamp(0.0, 1.0) * i16::MAX as f64;

    let samples = (0..num_frames)
        .map(|i| (peak * (angular_freq * i as f64).sin()).round() as i16)
        .collect();

    Ok(AudioBuffer::from_parts(format, samples, 1.0))
}

fn wav_error(e: hound::Error) -> PcmError {
    match e {
        hound::Error::IoError(io) => PcmError::Io(io),
        hound::Error::Unsupported => PcmError::UnsupportedFormat {
            format: "compressed or non-PCM WAV".to_string(),
        },
        other => PcmError::InvalidAudio {
            reason: format!("Failed to decode WAV data: {}", other),
            source: Some(Box::new(other)),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_generate_test_tone() {
        let buffer = generate_test_tone(440.0, 1.0, 8000, 0.5).unwrap();
        assert_eq!(buffer.frames(), 8000);
        assert_eq!(buffer.channels(), 1);
        assert_eq!(buffer.samples()[0], 0);

        let peak = buffer.samples().iter().map(|s| s.abs()).max().unwrap();
        assert!((16000..=16384).contains(&peak), "peak {}", peak);
    }

    #[test]
    fn test_round_trip_stereo_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let original =
            AudioBuffer::new(Format::stereo(22050), vec![1, -1, 300, -300, i16::MAX, i16::MIN])
                .unwrap();

        write_wav(&original, &path).unwrap();
        let imported = read_wav(&path).unwrap();

        assert_eq!(imported, original);
    }

    #[test]
    fn test_export_renders_gain() {
        let original = AudioBuffer::new(Format::mono(8000), vec![100, 20000]).unwrap();
        let mut cursor = Cursor::new(Vec::new());
        write_wav_to(&original.with_gain(2.0), &mut cursor).unwrap();

        cursor.set_position(0);
        let imported = read_wav_from(cursor).unwrap();
        assert_eq!(imported.samples(), &[200, i16::MAX]);
        assert_eq!(imported.gain(), 1.0);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = read_wav(Path::new("/nonexistent/path/audio.wav"));
        match result.unwrap_err() {
            PcmError::FileNotFound { path, .. } => assert!(path.contains("nonexistent")),
            other => panic!("Expected FileNotFound error, got: {:?}", other),
        }
    }

    #[test]
    fn test_import_mp3_rejected() {
        let result = read_wav(Path::new("song.MP3"));
        assert!(matches!(result, Err(PcmError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_import_float_wav_rejected() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            writer.write_sample(0.5_f32).unwrap();
            writer.finalize().unwrap();
        }

        cursor.set_position(0);
        let result = read_wav_from(cursor);
        assert!(matches!(result, Err(PcmError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_import_garbage() {
        let result = read_wav_from(Cursor::new(b"definitely not a wav file".to_vec()));
        assert!(matches!(result, Err(PcmError::InvalidAudio { .. })));
    }
}
