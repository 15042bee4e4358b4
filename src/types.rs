//! Option and report types.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable naming the SoundTouch shared library to load.
pub const LIBRARY_ENV: &str = "SOUNDTOUCH_LIBRARY";

/// Highest channel count the native library accepts.
pub const MAX_CHANNELS: u16 = 16;

/// Accepted range for tempo and rate changes, in percent.
pub const CHANGE_PERCENT_RANGE: (f32, f32) = (-50.0, 100.0);

/// Accepted range for pitch shifts, in semitones.
pub const PITCH_SEMITONE_RANGE: (f32, f32) = (-60.0, 60.0);

/// Where to load the native library from.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Explicit library path. `None` loads by name through the platform
    /// search path (`libSoundTouchDll.so`, `SoundTouchDll.dll`, ...).
    pub path: Option<PathBuf>,
}

impl LoaderOptions {
    /// Options from the environment: `SOUNDTOUCH_LIBRARY` if set and non-empty.
    pub fn from_env() -> Self {
        let path = env::var_os(LIBRARY_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self { path }
    }
}

/// Pitch, tempo and rate adjustments applied to a processor.
///
/// The default changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StretchOptions {
    /// Tempo change in percent; `25.0` plays 25% faster at the same pitch.
    pub tempo_change: f32,
    /// Pitch shift in semitones; tempo is kept.
    pub pitch_semitones: f32,
    /// Playback rate change in percent; changes tempo and pitch together.
    pub rate_change: f32,
}

impl StretchOptions {
    /// Check every value is finite and within the accepted range.
    pub fn validate(&self) -> Result<()> {
        check_range("tempo_change", self.tempo_change, CHANGE_PERCENT_RANGE)?;
        check_range("pitch_semitones", self.pitch_semitones, PITCH_SEMITONE_RANGE)?;
        check_range("rate_change", self.rate_change, CHANGE_PERCENT_RANGE)
    }

    /// Check if these options leave the audio unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

fn check_range(name: &str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::InvalidArgument(format!(
            "{} must be within [{}, {}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

/// Sample layout of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Frames per second.
    pub sample_rate: u32,
    /// Interleaved channels per frame.
    pub channels: u16,
}

/// Summary of a file processed by [`process_file`](crate::process_file).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    /// Format of both the input and the output file.
    pub format: AudioFormat,
    /// Frames read from the input.
    pub frames_in: u64,
    /// Frames written to the output.
    pub frames_out: u64,
}
