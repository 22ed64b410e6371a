//! Audio clip input and WAV decoding.
//!
//! Clips arrive as encoded bytes and are decoded in memory from a cursor;
//! nothing is staged through the filesystem. Stereo is averaged down to
//! mono and integer formats are normalized to `[-1, 1]` floats at the
//! clip's native sample rate.

pub mod dsp;
pub mod noise;
pub mod voice;

use std::io::Cursor;

use hound::{SampleFormat, WavReader};
use ndarray::Array1;
use thiserror::Error;

use crate::error::AnalysisError;

/// An encoded audio clip as received from the caller.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>) -> Result<Self, AnalysisError> {
        let clip = Self { bytes };
        clip.validate()?;
        Ok(clip)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.bytes.is_empty() {
            return Err(AnalysisError::EmptyAudio);
        }
        Ok(())
    }
}

/// Decoded mono waveform at its native sample rate.
#[derive(Debug, Clone)]
pub struct Waveform {
    pub samples: Array1<f32>,
    pub sample_rate: u32,
}

impl Waveform {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode failures. Absorbed into degradations by the engine.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("wav parse failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("no audio samples")]
    Empty,

    #[error("unsupported channel count: {0}")]
    Channels(u16),
}

/// Decode a WAV payload to a mono waveform.
pub fn decode_wav(bytes: &[u8]) -> Result<Waveform, DecodeError> {
    let mut reader = WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(DecodeError::Channels(spec.channels));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };
    if interleaved.is_empty() {
        return Err(DecodeError::Empty);
    }

    let samples: Vec<f32> = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect()
    };

    Ok(Waveform {
        samples: Array1::from_vec(samples),
        sample_rate: spec.sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_i16(spec: hound::WavSpec, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_mono_i16() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_i16(spec, &[0, 16384, -16384, 32767]);
        let wave = decode_wav(&bytes).unwrap();
        assert_eq!(wave.sample_rate, 16_000);
        assert_eq!(wave.samples.len(), 4);
        assert!((wave.samples[1] - 0.5).abs() < 1e-4);
        assert!((wave.samples[2] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn downmixes_stereo_by_averaging() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        // L = 0.5, R = -0.5 cancels out
        let bytes = wav_i16(spec, &[16384, -16384, 16384, -16384]);
        let wave = decode_wav(&bytes).unwrap();
        assert_eq!(wave.samples.len(), 2);
        assert!(wave.samples[0].abs() < 1e-4);
    }

    #[test]
    fn decodes_float_format() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in &[0.25f32, -0.75, 1.0] {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        let wave = decode_wav(&cursor.into_inner()).unwrap();
        assert!((wave.samples[1] + 0.75).abs() < 1e-6);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(decode_wav(&[0x13, 0x37, 0x00, 0xff]).is_err());
    }

    #[test]
    fn empty_clip_is_rejected() {
        let err = AudioClip::new(Vec::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyAudio));
    }

    #[test]
    fn duration_uses_native_rate() {
        let wave = Waveform {
            samples: Array1::zeros(8_000),
            sample_rate: 16_000,
        };
        assert!((wave.duration_secs() - 0.5).abs() < 1e-9);
    }
}
