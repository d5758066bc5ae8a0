//! Channel mixing (interleaved multi-channel to mono)

use crate::error::FingerprintError;

/// Channel mixing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelMixMode {
    /// Mean of all channels
    #[default]
    Average,
    /// First channel only
    First,
}

/// Convert interleaved samples to mono
///
/// A trailing partial frame is dropped.
///
/// # Arguments
///
/// * `interleaved` - Samples ordered frame by frame (`L R L R ...`)
/// * `channels` - Number of interleaved channels
/// * `mode` - Mixing mode
///
/// # Example
///
/// ```
/// use stratum_fingerprint::preprocessing::channel_mixer::{downmix, ChannelMixMode};
///
/// let mono = downmix(&[1.0, 0.0, 0.5, 0.5], 2, ChannelMixMode::Average)?;
/// assert_eq!(mono, vec![0.5, 0.5]);
/// # Ok::<(), stratum_fingerprint::FingerprintError>(())
/// ```
pub fn downmix(
    interleaved: &[f32],
    channels: usize,
    mode: ChannelMixMode,
) -> Result<Vec<f32>, FingerprintError> {
    if channels == 0 {
        return Err(FingerprintError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }
    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    log::debug!(
        "Downmixing {} frames of {} channels using {:?}",
        interleaved.len() / channels,
        channels,
        mode
    );

    let mono = interleaved
        .chunks_exact(channels)
        .map(|frame| match mode {
            ChannelMixMode::Average => frame.iter().sum::<f32>() / channels as f32,
            ChannelMixMode::First => frame[0],
        })
        .collect();
    Ok(mono)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_stereo() {
        let mono = downmix(&[1.0, -1.0, 0.4, 0.2, 0.0, 1.0], 2, ChannelMixMode::Average).unwrap();
        assert_eq!(mono.len(), 3);
        assert!((mono[0]).abs() < 1e-6);
        assert!((mono[1] - 0.3).abs() < 1e-6);
        assert!((mono[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_first_channel_and_partial_frame() {
        let mono = downmix(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7], 3, ChannelMixMode::First).unwrap();
        assert_eq!(mono, vec![0.1, 0.4]);
    }

    #[test]
    fn test_mono_passthrough_and_zero_channels() {
        assert_eq!(downmix(&[0.5, 0.25], 1, ChannelMixMode::Average).unwrap(), vec![0.5, 0.25]);
        assert!(downmix(&[0.5], 0, ChannelMixMode::Average).is_err());
    }
}
