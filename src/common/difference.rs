//! Computation of the difference function `d(τ)`, the sum of squared
//! differences between a window and its `τ`-shifted copy over their overlap:
//!
//! `d(τ) = Σ (x_i - x_{i+τ})², 0 <= i < window_size - τ`
//!
//! Low values of `d(τ)` indicate periodicity at lag `τ`.

use core::convert::TryInto;

/// The largest FFT size supported by [`difference_fft`].
pub const MAX_FFT_SIZE: usize = 4096;

fn validate_window_size_lag_count(window_size: usize, lag_count: usize) {
    if lag_count > window_size {
        panic!("Lag count must not be greater than the window size");
    }
}

/// Computes the length of the FFT needed to compute the difference function
/// for a given window size and lag count. The transform must cover
/// `window_size + lag_count - 1` samples to avoid circular convolution effects.
pub fn difference_fft_size(window_size: usize, lag_count: usize) -> usize {
    validate_window_size_lag_count(window_size, lag_count);

    let min_length = window_size + lag_count - 1;
    let mut result: usize = 8; // Smallest real FFT kernel
    while result < min_length {
        result = result << 1;
    }
    result
}

/// Performs an in-place real-only FFT on a given buffer. The coefficient at
/// the Nyquist frequency is packed into the imaginary part of the first bin.
fn real_fft_in_place(buffer: &mut [f32]) -> &mut [microfft::Complex32] {
    let fft_size = buffer.len();
    match fft_size {
        8 => microfft::real::rfft_8(buffer.try_into().unwrap()),
        16 => microfft::real::rfft_16(buffer.try_into().unwrap()),
        32 => microfft::real::rfft_32(buffer.try_into().unwrap()),
        64 => microfft::real::rfft_64(buffer.try_into().unwrap()),
        128 => microfft::real::rfft_128(buffer.try_into().unwrap()),
        256 => microfft::real::rfft_256(buffer.try_into().unwrap()),
        512 => microfft::real::rfft_512(buffer.try_into().unwrap()),
        1024 => microfft::real::rfft_1024(buffer.try_into().unwrap()),
        2048 => microfft::real::rfft_2048(buffer.try_into().unwrap()),
        4096 => microfft::real::rfft_4096(buffer.try_into().unwrap()),
        _ => panic!("Unsupported fft size {}", fft_size),
    }
}

/// Computes the difference function using FFT accelerated autocorrelation.
///
/// Writing `r(τ)` for the autocorrelation and `m(τ)` for the sum of
/// `x_i² + x_{i+τ}²`, both over the same overlap region as `d(τ)`, the
/// difference function expands to `d(τ) = m(τ) - 2 r(τ)`. The
/// autocorrelation is computed with two zero padded real-only FFTs and
/// `m(τ)` by incremental subtraction from `m(0) = 2 r(0)`.
///
/// # Arguments
///
/// * `window` - Input window.
/// * `result` - A buffer to write the difference function to, one value per lag.
/// * `fft_buffer` - A working buffer of length [`difference_fft_size`].
/// * `scratch_buffer` - A second working buffer of the same length.
pub fn difference_fft(
    window: &[f32],
    result: &mut [f32],
    fft_buffer: &mut [f32],
    scratch_buffer: &mut [f32],
) {
    let window_size = window.len();
    let lag_count = result.len();
    validate_window_size_lag_count(window_size, lag_count);

    // Sanity checks
    let fft_size = difference_fft_size(window_size, lag_count);
    if fft_buffer.len() != fft_size {
        panic!(
            "Got fft buffer of length {}, expected {}.",
            fft_buffer.len(),
            fft_size
        );
    }
    if scratch_buffer.len() != fft_size {
        panic!(
            "Got scratch buffer of length {}, expected {}.",
            scratch_buffer.len(),
            fft_size
        );
    }

    // Build the zero padded FFT input signal
    fft_buffer[..window_size].copy_from_slice(window);
    for value in fft_buffer.iter_mut().skip(window_size) {
        *value = 0.0;
    }

    let spectrum = real_fft_in_place(fft_buffer);

    // Expand the power spectral density into a full length even sequence.
    scratch_buffer[0] = spectrum[0].re * spectrum[0].re;
    scratch_buffer[fft_size / 2] = spectrum[0].im * spectrum[0].im;
    for (bin_index, bin) in spectrum.iter().enumerate().skip(1) {
        let power = bin.norm_sqr();
        scratch_buffer[bin_index] = power;
        scratch_buffer[fft_size - bin_index] = power;
    }

    // The power spectral density is real and even, so a second forward FFT
    // equals the inverse FFT up to a factor 1 / fft_size, yielding the
    // autocorrelation.
    let transformed = real_fft_in_place(scratch_buffer);
    let scale = 1.0 / (fft_size as f32);

    let mut m = 2.0 * scale * transformed[0].re;
    result[0] = 0.0;
    for (tau, value) in result.iter_mut().enumerate().skip(1) {
        let head = window[tau - 1];
        let tail = window[window_size - tau];
        m -= head * head + tail * tail;
        *value = m - 2.0 * scale * transformed[tau].re;
    }
}

/// Computes the difference function by direct time domain summation.
/// Used as a reference and as the fallback for windows too long for the
/// fixed size FFT kernels.
pub fn difference_direct(window: &[f32], result: &mut [f32]) {
    let window_size = window.len();
    let lag_count = result.len();
    validate_window_size_lag_count(window_size, lag_count);

    for (tau, value) in result.iter_mut().enumerate() {
        let mut sum: f32 = 0.0;
        for i in 0..(window_size - tau) {
            let delta = window[i] - window[i + tau];
            sum += delta * delta;
        }
        *value = sum;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{difference_direct, difference_fft, difference_fft_size};

    #[test]
    fn test_fft_size() {
        // window + lag - 1 = 7, rounded up to the smallest kernel
        assert_eq!(difference_fft_size(4, 4), 8);
        assert_eq!(difference_fft_size(12, 6), 32);
        assert_eq!(difference_fft_size(1000, 441), 2048);
        assert_eq!(difference_fft_size(2048, 441), 4096);
    }

    #[test]
    #[should_panic]
    fn test_lag_count_exceeding_window_size() {
        let window = [0.0; 4];
        let mut result = [0.0; 5];
        difference_direct(&window, &mut result);
    }

    #[test]
    fn test_direct_against_closed_form() {
        // For a ramp, consecutive samples differ by 1, so
        // d(τ) = τ² (window_size - τ).
        let window: Vec<f32> = (1..=12).map(|i| i as f32).collect();
        let mut result = vec![0.0; 6];
        difference_direct(&window, &mut result);
        for (tau, value) in result.iter().enumerate() {
            let expected = (tau * tau * (window.len() - tau)) as f32;
            assert!((value - expected).abs() <= f32::EPSILON * expected.max(1.0));
        }
    }

    #[test]
    fn test_fft_against_direct_ramp() {
        let window: Vec<f32> = (1..=12).map(|i| i as f32).collect();
        let lag_count = 6;

        let mut reference = vec![0.0; lag_count];
        difference_direct(&window, &mut reference);

        let fft_size = difference_fft_size(window.len(), lag_count);
        let mut fft_result = vec![0.0; lag_count];
        let mut fft_buffer = vec![0.0; fft_size];
        let mut scratch_buffer = vec![0.0; fft_size];
        difference_fft(&window, &mut fft_result, &mut fft_buffer, &mut scratch_buffer);

        for (reference, fft_value) in reference.iter().zip(fft_result.iter()) {
            assert!((reference - fft_value).abs() <= 5e-2);
        }
    }

    #[test]
    fn test_fft_against_direct_sine() {
        let window_size = 256;
        let lag_count = 128;
        let sample_rate = 44100.0;
        let frequency = 1234.0;
        let window: Vec<f32> = (0..window_size)
            .map(|i| (2.0 * std::f32::consts::PI * frequency * (i as f32) / sample_rate).sin())
            .collect();

        let mut reference = vec![0.0; lag_count];
        difference_direct(&window, &mut reference);

        let fft_size = difference_fft_size(window_size, lag_count);
        let mut fft_result = vec![0.0; lag_count];
        let mut fft_buffer = vec![0.0; fft_size];
        let mut scratch_buffer = vec![0.0; fft_size];
        difference_fft(&window, &mut fft_result, &mut fft_buffer, &mut scratch_buffer);

        // Absolute tolerance proportional to the curve peak. Differences of
        // large intermediate sums make errors at the curve minima absolute,
        // not relative.
        let peak = reference.iter().fold(0.0_f32, |max, v| max.max(v.abs()));
        for (reference, fft_value) in reference.iter().zip(fft_result.iter()) {
            assert!((reference - fft_value).abs() <= 1e-4 * peak + 1e-3);
        }
    }

    #[test]
    fn test_fft_silence_is_exactly_zero() {
        let window = vec![0.0; 64];
        let lag_count = 32;
        let fft_size = difference_fft_size(window.len(), lag_count);
        let mut result = vec![1.0; lag_count];
        let mut fft_buffer = vec![0.0; fft_size];
        let mut scratch_buffer = vec![0.0; fft_size];
        difference_fft(&window, &mut result, &mut fft_buffer, &mut scratch_buffer);
        for value in result.iter() {
            assert_eq!(*value, 0.0);
        }
    }
}
