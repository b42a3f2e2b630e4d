//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;

use crate::cli::Commands;
use crate::error::Result;
use crate::script::EditScript;
use crate::track::Track;

/// Dispatch a parsed command
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Info { input } => show_info(&input),
        Commands::Append {
            first,
            second,
            output,
        } => append(&first, &second, &output),
        Commands::Mix {
            base,
            other,
            output,
            fade_out,
            gain_a,
            gain_b,
        } => mix(&base, &other, &output, fade_out, gain_a, gain_b),
        Commands::Volume {
            input,
            percent,
            output,
        } => edit(&input, &output, |t| t.set_volume(percent)),
        Commands::Fade {
            input,
            fade_in,
            fade_out,
            output,
        } => edit(&input, &output, |t| t.fade(fade_in, fade_out)),
        Commands::Pad {
            input,
            front,
            back,
            output,
        } => edit(&input, &output, |t| t.add_pause(front, back)),
        Commands::Trim {
            input,
            front,
            back,
            output,
        } => edit(&input, &output, |t| t.trim(front, back)),
        Commands::ToStereo {
            input,
            mute_left,
            mute_right,
            output,
        } => edit(&input, &output, |t| t.mono_to_stereo(!mute_left, !mute_right)),
        Commands::ToMono { input, output } => edit(&input, &output, Track::stereo_to_mono),
        Commands::Run { script } => run_script(&script),
    }
}

/// Print format, length and levels of a WAV file.
pub fn show_info(path: &Path) -> Result<()> {
    let track = Track::open(path)?;
    let Some(buffer) = track.buffer() else {
        return Ok(());
    };

    println!("File:     {}", path.display());
    println!("Format:   {}", buffer.format());
    println!("Frames:   {}", buffer.frames());
    println!("Length:   {:.3}s", buffer.duration_secs());
    println!("Peak:     {:.1} dBFS", buffer.peak_dbfs());
    println!("RMS:      {:.1} dBFS", buffer.rms_dbfs());
    println!("SHA-256:  {}", buffer.checksum());

    Ok(())
}

/// Append `second` to `first`.
pub fn append(first: &Path, second: &Path, output: &Path) -> Result<()> {
    info!("Appending {} to {}", second.display(), first.display());

    let mut track = Track::open(first)?;
    track.append_file(second)?;
    track.save(output)?;

    println!("Wrote {} ({:.3}s)", output.display(), track.length_secs()?);
    Ok(())
}

/// Mix `other` on top of `base`.
pub fn mix(
    base: &Path,
    other: &Path,
    output: &Path,
    fade_out: Option<f64>,
    gain_a: f64,
    gain_b: f64,
) -> Result<()> {
    info!("Mixing {} into {}", other.display(), base.display());

    let mut track = Track::open(base)?;
    track.set_gain(gain_a)?;
    let mut bed = Track::open(other)?;
    bed.set_gain(gain_b)?;

    if let Some(warning) = track.mix(&bed, fade_out)? {
        println!("Warning: {}", warning);
    }
    track.save(output)?;

    println!("Wrote {} ({:.3}s)", output.display(), track.length_secs()?);
    Ok(())
}

/// Run an edit script.
pub fn run_script(path: &Path) -> Result<()> {
    info!("Running script: {}", path.display());

    let script = EditScript::load(path)?;
    let track = script.run()?;

    match &script.output {
        Some(output) => println!(
            "Applied {} step(s), wrote {}",
            script.steps.len(),
            output.display()
        ),
        None => println!("Applied {} step(s): {}", script.steps.len(), track.info()?),
    }
    Ok(())
}

/// Load `input`, apply a single edit and save to `output`.
fn edit<F>(input: &Path, output: &Path, apply: F) -> Result<()>
where
    F: FnOnce(&mut Track) -> Result<()>,
{
    info!("Editing {} -> {}", input.display(), output.display());

    let mut track = Track::open(input)?;
    apply(&mut track)?;
    track.save(output)?;

    println!("Wrote {}: {}", output.display(), track.info()?);
    Ok(())
}
