//! A rust implementation of the YIN [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29)
//! estimation algorithm, described in the paper
//! [YIN, a fundamental frequency estimator for speech and music](http://audition.ens.fr/adc/pdf/2002_JASA_YIN.pdf)
//! by Alain de Cheveigné and Hideki Kawahara. The algorithm is used for estimating
//! the fundamental frequency of monophonic, primarily musical, sounds. It cannot
//! be used to detect multiple pitches at once, like in a musical chord.
//!
//! The estimation is a pure single pass computation over one frame:
//! a lag domain difference function, cumulative mean normalization,
//! absolute thresholding and parabolic refinement of the selected dip.
//! There is no state across calls, so independent frames may be analyzed
//! concurrently without synchronization.
//!
//! # Examples
//! ## One-shot API
//! Analyzes a single frame and returns the estimated frequency in Hz, or 0.0
//! if the frame has no periodicity dip below the threshold.
//! ```
//! use micro_yin::yin;
//!
//! // A pure tone at 220 Hz.
//! let sample_rate = 44100.0;
//! let mut window = vec![0.0_f32; 1000];
//! for (i, sample) in window.iter_mut().enumerate() {
//!     *sample = (2.0 * core::f32::consts::PI * 220.0 * (i as f32) / sample_rate).sin();
//! }
//!
//! let frequency = yin::estimate(&window, sample_rate);
//! assert!((frequency - 220.0).abs() <= 0.01 * 220.0);
//!
//! // A silent frame has no pitch.
//! assert_eq!(yin::estimate(&[0.0; 1000], sample_rate), 0.0);
//! ```
//! ## Reusable API
//! Preallocates every working buffer once, so that analyzing a frame does not
//! allocate. Also exposes the normalized difference curve, the selected dip
//! and a clarity value.
//! ```
//! use micro_yin::yin::YinPitchResult;
//!
//! let sample_rate = 44100.0;
//! let window_size = 1024;
//! let lag_count = 441; // lowest detectable frequency just above 100 Hz
//! let mut result = YinPitchResult::new(window_size, lag_count);
//! for (i, sample) in result.window.iter_mut().enumerate() {
//!     *sample = (2.0 * core::f32::consts::PI * 440.0 * (i as f32) / sample_rate).sin();
//! }
//!
//! result.compute(sample_rate);
//! assert!(result.is_tone());
//! assert!((result.frequency - 440.0).abs() <= 0.01 * 440.0);
//! assert!(result.clarity > 0.9);
//! ```

mod dip;
mod result;

pub use dip::Dip;
pub use result::{YinPitchResult, DEFAULT_MIN_FREQUENCY, DEFAULT_THRESHOLD};

/// Estimates the fundamental frequency of `window` in Hz using the default
/// threshold ([`DEFAULT_THRESHOLD`]) and minimum frequency
/// ([`DEFAULT_MIN_FREQUENCY`]).
///
/// Returns 0.0 if the frame has no periodicity dip below the threshold.
/// 0.0 is reserved for this purpose and is never returned as a genuine
/// estimate.
///
/// # Panics
///
/// See [`estimate_with_options`].
pub fn estimate(window: &[f32], sample_rate: f32) -> f32 {
    estimate_with_options(window, sample_rate, DEFAULT_THRESHOLD, DEFAULT_MIN_FREQUENCY)
}

/// Estimates the fundamental frequency of `window` in Hz.
///
/// `threshold` is the absolute threshold under which a normalized difference
/// value counts as a periodicity dip. `min_frequency` is the lowest
/// frequency to consider, which determines the number of candidate lags,
/// `sample_rate / min_frequency`. The lag range is clamped to the window
/// length, which bounds the lowest detectable frequency for short frames.
///
/// Returns 0.0 if the frame has no periodicity dip below the threshold.
///
/// # Panics
///
/// Panics if `window` has fewer than 2 samples, if `sample_rate`,
/// `threshold` or `min_frequency` is not finite and greater than 0, or if
/// `min_frequency` exceeds half the sample rate.
pub fn estimate_with_options(
    window: &[f32],
    sample_rate: f32,
    threshold: f32,
    min_frequency: f32,
) -> f32 {
    if !(sample_rate > 0.0 && sample_rate.is_finite()) {
        panic!("Sample rate must be finite and greater than 0");
    }
    if !(min_frequency > 0.0 && min_frequency.is_finite()) {
        panic!("Minimum frequency must be finite and greater than 0");
    }
    let max_lag = (sample_rate / min_frequency) as usize;
    if max_lag < 2 {
        panic!("Minimum frequency must not exceed half the sample rate");
    }
    let lag_count = core::cmp::min(max_lag, window.len());
    if lag_count < 2 {
        panic!("Window must contain at least 2 samples");
    }

    let mut result = YinPitchResult::from_options(window.len(), lag_count, threshold);
    result.window.copy_from_slice(window);
    result.compute(sample_rate);
    result.frequency
}
