//! Audio decoding using Symphonia
//!
//! Decodes any container/codec Symphonia supports into mono `f32` samples at
//! the file's native rate. No resampling is performed; callers must feed
//! ingestion and queries at a consistent rate.

use crate::error::FingerprintError;
use crate::preprocessing::channel_mixer::{downmix, ChannelMixMode};
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded mono audio
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Mono samples
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source before downmixing
    pub source_channels: usize,
}

impl DecodedAudio {
    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// Decode an audio file to mono PCM samples
///
/// # Arguments
///
/// * `path` - Path to audio file; its extension is used as a format hint
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened and `Decoding` if the format is
/// unsupported or the stream is corrupt.
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodedAudio, FingerprintError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let file = std::fs::File::open(path)?;
    let extension = path.extension().and_then(|e| e.to_str());
    decode_source(Box::new(file), extension)
}

/// Decode in-memory encoded audio to mono PCM samples
///
/// `extension` (e.g. `"mp3"`) speeds up format probing when known.
pub fn decode_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<DecodedAudio, FingerprintError> {
    log::debug!("Decoding {} bytes of audio", bytes.len());
    decode_source(Box::new(Cursor::new(bytes)), extension)
}

fn decode_source(
    source: Box<dyn MediaSource>,
    extension: Option<&str>,
) -> Result<DecodedAudio, FingerprintError> {
    let stream = MediaSourceStream::new(source, Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(decoding_error)?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| FingerprintError::Decoding("No decodable audio track".to_string()))?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| FingerprintError::Decoding("Track has no sample rate".to_string()))?;
    let mut channels = codec_params.channels.map(|c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(decoding_error)?;

    let mut interleaved: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(decoding_error(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                channels.get_or_insert(spec.channels.count());
                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping undecodable packet: {}", msg);
            }
            Err(e) => return Err(decoding_error(e)),
        }
    }

    let source_channels = channels.unwrap_or(1);
    let samples = downmix(&interleaved, source_channels, ChannelMixMode::Average)?;

    log::debug!(
        "Decoded {} samples at {} Hz from {} channel(s)",
        samples.len(),
        sample_rate,
        source_channels
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        source_channels,
    })
}

fn decoding_error(e: SymphoniaError) -> FingerprintError {
    FingerprintError::Decoding(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            decode_file("/no/such/file.wav"),
            Err(FingerprintError::Io(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let result = decode_bytes(vec![0x42; 512], None);
        assert!(matches!(result, Err(FingerprintError::Decoding(_))));
    }
}
