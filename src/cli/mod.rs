//! CLI Module
//!
//! Command-line interface for pcmedit.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pcmedit - edit uncompressed PCM WAV files
#[derive(Parser, Debug)]
#[command(name = "pcmedit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show format, length and levels of a WAV file
    #[command(name = "info")]
    Info {
        /// WAV file to inspect
        input: PathBuf,
    },

    /// Play one file after another
    #[command(name = "append")]
    Append {
        first: PathBuf,
        second: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Mix a second file on top of the first
    #[command(name = "mix")]
    Mix {
        /// Base track; sets the output length
        base: PathBuf,
        /// Track mixed on top
        other: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Fade both tracks out over the last N seconds
        #[arg(long)]
        fade_out: Option<f64>,

        /// Linear gain of the base track
        #[arg(long, default_value_t = 1.0)]
        gain_a: f64,

        /// Linear gain of the mixed-in track
        #[arg(long, default_value_t = 1.0)]
        gain_b: f64,
    },

    /// Scale volume by a percentage (100 = unchanged)
    #[command(name = "volume")]
    Volume {
        input: PathBuf,
        #[arg(allow_negative_numbers = true)]
        percent: f64,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Apply linear fades
    #[command(name = "fade")]
    Fade {
        input: PathBuf,

        /// Fade-in length in seconds
        #[arg(long = "in", default_value_t = 0.0)]
        fade_in: f64,

        /// Fade-out length in seconds
        #[arg(long = "out", default_value_t = 0.0)]
        fade_out: f64,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Add silence before and/or after
    #[command(name = "pad")]
    Pad {
        input: PathBuf,

        #[arg(long, default_value_t = 0.0)]
        front: f64,

        #[arg(long, default_value_t = 0.0)]
        back: f64,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Cut seconds from the front and/or back
    #[command(name = "trim")]
    Trim {
        input: PathBuf,

        #[arg(long, default_value_t = 0.0)]
        front: f64,

        #[arg(long, default_value_t = 0.0)]
        back: f64,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert mono to stereo
    #[command(name = "to-stereo")]
    ToStereo {
        input: PathBuf,

        /// Leave the left channel silent
        #[arg(long)]
        mute_left: bool,

        /// Leave the right channel silent
        #[arg(long)]
        mute_right: bool,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert stereo to mono by averaging the channels
    #[command(name = "to-mono")]
    ToMono {
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run a JSON edit script
    #[command(name = "run")]
    Run {
        /// Path to the script
        script: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mix() {
        let cli = Cli::parse_from([
            "pcmedit", "mix", "a.wav", "b.wav", "-o", "out.wav", "--fade-out", "2.5", "--gain-b",
            "0.3",
        ]);
        match cli.command {
            Commands::Mix {
                fade_out, gain_a, gain_b, ..
            } => {
                assert_eq!(fade_out, Some(2.5));
                assert_eq!(gain_a, 1.0);
                assert_eq!(gain_b, 0.3);
            }
            other => panic!("Expected Mix, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fade_flags() {
        let cli = Cli::parse_from(["pcmedit", "-v", "fade", "in.wav", "--in", "0.5", "-o", "x.wav"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Fade {
                fade_in, fade_out, ..
            } => {
                assert_eq!(fade_in, 0.5);
                assert_eq!(fade_out, 0.0);
            }
            other => panic!("Expected Fade, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_volume() {
        let cli = Cli::parse_from(["pcmedit", "volume", "in.wav", "-50", "-o", "x.wav"]);
        assert!(matches!(cli.command, Commands::Volume { percent, .. } if percent == -50.0));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
