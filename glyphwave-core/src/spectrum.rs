/// Anything that can hand out a byte magnitude spectrum on demand.
///
/// In the browser this is an `AnalyserNode`; natively it is
/// [`crate::analyser::SoftwareAnalyser`].
pub trait SpectrumSource {
    fn bin_count(&self) -> usize;

    /// Overwrite `out` with the current magnitudes (0 = silence, 255 = max).
    fn fill_bytes(&mut self, out: &mut [u8]);
}

/// Normalized energy of the lower and upper halves of a spectrum.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergy {
    pub bass: f64,
    pub treble: f64,
}

impl BandEnergy {
    pub fn from_bins(bins: &[u8]) -> Self {
        Self {
            bass: bass(bins),
            treble: treble(bins),
        }
    }
}

/// Mean of `bins` divided by 255. Empty input is silence.
fn normalized_mean(bins: &[u8]) -> f64 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u64 = bins.iter().map(|&b| b as u64).sum();
    sum as f64 / bins.len() as f64 / u8::MAX as f64
}

/// Normalized mean of the first half of the bins.
pub fn bass(bins: &[u8]) -> f64 {
    normalized_mean(&bins[..bins.len() / 2])
}

/// Normalized mean of the remaining bins (the upper half, plus the middle bin
/// when the count is odd).
pub fn treble(bins: &[u8]) -> f64 {
    normalized_mean(&bins[bins.len() / 2..])
}

/// Fixed-length spectrum buffer, refreshed in place every frame.
#[derive(Clone, Debug)]
pub struct FrequencyBuffer {
    bins: Box<[u8]>,
}

impl FrequencyBuffer {
    pub fn new(bin_count: usize) -> Self {
        Self {
            bins: vec![0u8; bin_count].into_boxed_slice(),
        }
    }

    pub fn for_source(source: &impl SpectrumSource) -> Self {
        Self::new(source.bin_count())
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bins
    }

    /// Pull the latest magnitudes from `source`. The buffer keeps its length
    /// even if the source reports a different bin count.
    pub fn refresh(&mut self, source: &mut impl SpectrumSource) -> &[u8] {
        source.fill_bytes(&mut self.bins);
        &self.bins
    }

    pub fn bands(&self) -> BandEnergy {
        BandEnergy::from_bins(&self.bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(usize, u8);

    impl SpectrumSource for Constant {
        fn bin_count(&self) -> usize {
            self.0
        }
        fn fill_bytes(&mut self, out: &mut [u8]) {
            out.fill(self.1);
        }
    }

    #[test]
    fn test_silence_is_zero() {
        let bins = [0u8; 128];
        assert_eq!(bass(&bins), 0.0);
        assert_eq!(treble(&bins), 0.0);
    }

    #[test]
    fn test_full_scale_is_one() {
        let bins = [255u8; 128];
        assert_eq!(bass(&bins), 1.0);
        assert_eq!(treble(&bins), 1.0);
    }

    #[test]
    fn test_constant_mid_value() {
        let bins = [128u8; 128];
        let bands = BandEnergy::from_bins(&bins);
        assert!((bands.bass - 128.0 / 255.0).abs() < 1e-12);
        assert!((bands.treble - 0.502).abs() < 1e-3);
        assert_eq!(bands.bass, bands.treble);
    }

    #[test]
    fn test_halves_are_independent() {
        let mut bins = [0u8; 128];
        bins[..64].fill(255);
        let bands = BandEnergy::from_bins(&bins);
        assert_eq!(bands.bass, 1.0);
        assert_eq!(bands.treble, 0.0);
    }

    #[test]
    fn test_bands_stay_in_unit_range() {
        // Pseudo-random bytes covering the whole range
        let mut x: u32 = 12345;
        for _ in 0..200 {
            let bins: Vec<u8> = (0..128)
                .map(|_| {
                    x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                    (x >> 16) as u8
                })
                .collect();
            let b = BandEnergy::from_bins(&bins);
            assert!((0.0..=1.0).contains(&b.bass));
            assert!((0.0..=1.0).contains(&b.treble));
        }
    }

    #[test]
    fn test_empty_and_single_bin() {
        assert_eq!(bass(&[]), 0.0);
        assert_eq!(treble(&[]), 0.0);
        // One bin: it belongs to the upper half
        assert_eq!(bass(&[200]), 0.0);
        assert!((treble(&[200]) - 200.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_buffer_never_resizes() {
        let mut buf = FrequencyBuffer::new(128);
        let mut src = Constant(64, 255);
        buf.refresh(&mut src);
        assert_eq!(buf.len(), 128);
        assert_eq!(buf.as_slice().iter().filter(|&&b| b == 255).count(), 128);
        assert_eq!(buf.bands().bass, 1.0);
    }

    #[test]
    fn test_buffer_from_source() {
        let src = Constant(128, 7);
        let buf = FrequencyBuffer::for_source(&src);
        assert_eq!(buf.len(), 128);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }
}
