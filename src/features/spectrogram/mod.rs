//! Spectrogram generation
//!
//! Turns a mono amplitude sequence into a time-frequency magnitude grid:
//! overlapping frames are windowed, transformed with an FFT, and the
//! one-sided magnitudes are stacked along the time axis.

pub mod stft;
pub mod window;

pub use stft::generate_spectrogram;

/// Time-frequency magnitude grid
///
/// Indexed by (frame, bin). Storage is frame-major so each frame's bins are
/// contiguous. Produced once per clip and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    data: Vec<f32>,
    num_frames: usize,
    num_bins: usize,
    sample_rate: u32,
    window_size: usize,
    hop_size: usize,
}

impl Spectrogram {
    /// Build a spectrogram from frame-major magnitudes
    ///
    /// `data.len()` must equal `num_frames * num_bins`.
    pub(crate) fn from_parts(
        data: Vec<f32>,
        num_frames: usize,
        num_bins: usize,
        sample_rate: u32,
        window_size: usize,
        hop_size: usize,
    ) -> Self {
        debug_assert_eq!(data.len(), num_frames * num_bins);
        Self {
            data,
            num_frames,
            num_bins,
            sample_rate,
            window_size,
            hop_size,
        }
    }

    /// Build a spectrogram from explicit per-frame magnitude rows
    ///
    /// Mostly useful for tests and for feeding externally computed grids to
    /// the peak extractor.
    ///
    /// # Panics
    ///
    /// Panics if the rows differ in length.
    pub fn from_frames(frames: &[Vec<f32>], sample_rate: u32, hop_size: usize) -> Self {
        let num_frames = frames.len();
        let num_bins = frames.first().map_or(0, Vec::len);
        assert!(
            frames.iter().all(|f| f.len() == num_bins),
            "all frames must have the same number of bins"
        );
        let data = frames.iter().flatten().copied().collect();
        Self::from_parts(
            data,
            num_frames,
            num_bins,
            sample_rate,
            num_bins.saturating_sub(1) * 2,
            hop_size,
        )
    }

    /// Number of time frames
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Number of frequency bins per frame
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// True when the grid holds no values
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Magnitude at (frame, bin)
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, frame: usize, bin: usize) -> f32 {
        assert!(bin < self.num_bins, "bin {} out of range", bin);
        self.data[frame * self.num_bins + bin]
    }

    /// All bins of one frame
    pub fn frame(&self, frame: usize) -> &[f32] {
        let start = frame * self.num_bins;
        &self.data[start..start + self.num_bins]
    }

    /// Flat frame-major view of every magnitude
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Sample rate of the source clip in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Transform window size in samples
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Hop size in samples
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Start time of `frame` in seconds
    pub fn frame_to_seconds(&self, frame: usize) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (frame * self.hop_size) as f32 / self.sample_rate as f32
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_to_hz(&self, bin: usize) -> f32 {
        if self.window_size == 0 {
            return 0.0;
        }
        bin as f32 * self.sample_rate as f32 / self.window_size as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frames_layout() {
        let spec = Spectrogram::from_frames(
            &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
            8000,
            2,
        );
        assert_eq!(spec.num_frames(), 2);
        assert_eq!(spec.num_bins(), 3);
        assert_eq!(spec.get(1, 0), 4.0);
        assert_eq!(spec.frame(0), &[1.0, 2.0, 3.0]);
        assert_eq!(spec.window_size(), 4);
    }

    #[test]
    fn test_geometry() {
        let spec = Spectrogram::from_parts(vec![0.0; 513 * 4], 4, 513, 8000, 1024, 512);
        assert!((spec.frame_to_seconds(2) - 0.128).abs() < 1e-6);
        assert!((spec.bin_to_hz(128) - 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty() {
        let spec = Spectrogram::from_frames(&[], 8000, 512);
        assert!(spec.is_empty());
        assert_eq!(spec.num_bins(), 0);
    }
}
