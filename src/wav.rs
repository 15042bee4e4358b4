//! 16-bit PCM WAV reading and writing.
//!
//! Samples are exchanged as interleaved `f32`. Reading scales by `1/32768`,
//! writing clamps to `[-1.0, 1.0]` and scales by `32767`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use hound::{SampleFormat, WavSpec};

use crate::error::{Error, Result};
use crate::types::AudioFormat;

/// Reader for 16-bit integer PCM WAV files.
pub struct WavReader {
    reader: hound::WavReader<BufReader<File>>,
    format: AudioFormat,
}

impl WavReader {
    /// Open a WAV file. Anything other than 16-bit integer PCM is rejected.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let reader = hound::WavReader::open(path.as_ref())?;
        let spec = reader.spec();

        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(Error::UnsupportedFormat(format!(
                "{}: expected 16-bit PCM, found {}-bit {:?}",
                path.as_ref().display(),
                spec.bits_per_sample,
                spec.sample_format
            )));
        }

        Ok(Self {
            format: AudioFormat {
                sample_rate: spec.sample_rate,
                channels: spec.channels,
            },
            reader,
        })
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Total frames in the file.
    pub fn frames(&self) -> u64 {
        u64::from(self.reader.duration())
    }

    /// Read up to `buffer.len()` samples. Returns the number read; 0 at end of data.
    pub fn read_samples(&mut self, buffer: &mut [f32]) -> Result<usize> {
        let mut read = 0;
        for (slot, sample) in buffer.iter_mut().zip(self.reader.samples::<i16>()) {
            *slot = f32::from(sample?) / 32768.0;
            read += 1;
        }
        Ok(read)
    }
}

/// Writer for 16-bit integer PCM WAV files.
///
/// The header sizes are written by [`finalize`](Self::finalize), or on drop
/// if it is never called.
pub struct WavWriter {
    writer: hound::WavWriter<BufWriter<File>>,
    samples_written: u64,
}

impl WavWriter {
    pub fn create(path: impl AsRef<Path>, format: AudioFormat) -> Result<Self> {
        if format.channels == 0 || format.sample_rate == 0 {
            return Err(Error::InvalidArgument(format!(
                "cannot write {} channels at {} Hz",
                format.channels, format.sample_rate
            )));
        }

        let spec = WavSpec {
            channels: format.channels,
            sample_rate: format.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        Ok(Self {
            writer: hound::WavWriter::create(path, spec)?,
            samples_written: 0,
        })
    }

    pub fn write_samples(&mut self, samples: &[f32]) -> Result<()> {
        for &sample in samples {
            self.writer.write_sample(to_i16(sample))?;
        }
        self.samples_written += samples.len() as u64;
        Ok(())
    }

    /// Samples (not frames) written so far.
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Patch the header and close the file.
    pub fn finalize(self) -> Result<()> {
        self.writer.finalize()?;
        Ok(())
    }
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}
