//! `[f32]` level measurement extensions.

use micromath::F32Ext;

/// Level measurements on sample buffers.
pub trait LevelExt {
    /// Returns the maximum absolute sample value.
    fn peak_level(&self) -> f32;
    /// Returns the maximum absolute sample value in dB relative to 1,
    /// i.e 0 dB corresponds to a level of 1.
    fn peak_level_db(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level.
    fn rms_level(&self) -> f32;
    /// Returns the [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level in dB relative to 1, i.e 0 dB corresponds to a level of 1.
    fn rms_level_db(&self) -> f32;
}

impl LevelExt for [f32] {
    fn peak_level(&self) -> f32 {
        self.iter().fold(0.0, |max, sample| {
            let value = F32Ext::abs(*sample);
            if value > max {
                value
            } else {
                max
            }
        })
    }

    fn peak_level_db(&self) -> f32 {
        20.0 * F32Ext::log10(self.peak_level())
    }

    fn rms_level(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let mut sum: f32 = 0.0;
        for sample in self.iter() {
            sum += sample * sample;
        }
        F32Ext::sqrt(sum / (self.len() as f32))
    }

    fn rms_level_db(&self) -> f32 {
        20.0 * F32Ext::log10(self.rms_level())
    }
}

#[cfg(test)]
mod tests {
    use super::LevelExt;

    #[test]
    fn test_empty_buffer() {
        let buffer: [f32; 0] = [];
        assert!(buffer.peak_level() == 0.0);
        assert!(buffer.rms_level() == 0.0);
    }

    #[test]
    fn test_known_levels() {
        // The rms relies on the approximate square root of the micromath
        // crate, so compare with a tolerance rather than exactly.
        let buffer: [f32; 4] = [0.5, -1.0, 0.25, 0.0];
        assert!((buffer.peak_level() - 1.0).abs() <= f32::EPSILON);
        let expected_rms = ((0.25 + 1.0 + 0.0625) / 4.0_f32).sqrt();
        assert!((buffer.rms_level() - expected_rms).abs() <= 1e-2 * expected_rms);
    }

    #[test]
    fn test_full_scale_db() {
        let buffer: [f32; 3] = [1.0, -1.0, 1.0];
        // Full scale corresponds to 0 dB
        assert!(buffer.peak_level_db().abs() <= 0.1);
        assert!(buffer.rms_level_db().abs() <= 0.1);
    }
}
