use alloc::vec;
use alloc::vec::Vec;

use crate::common::{
    difference_direct, difference_fft, difference_fft_size, freq_to_midi_note, LevelExt,
    MAX_FFT_SIZE,
};
use crate::yin::dip::Dip;

/// The default absolute threshold under which a normalized difference value
/// is considered a genuine periodicity dip rather than noise.
pub const DEFAULT_THRESHOLD: f32 = 0.15;

/// The default lowest detectable frequency in Hz, used by
/// [`estimate`](crate::yin::estimate) to derive the lag count.
pub const DEFAULT_MIN_FREQUENCY: f32 = 100.0;

/// A pitch estimation result with preallocated working buffers.
///
/// Fill [`window`](YinPitchResult::window) with the frame to analyze, call
/// [`compute`](YinPitchResult::compute) and inspect the result fields.
/// `compute` does not allocate and resets all derived state, so a result
/// instance can be reused for any number of frames and identical frames
/// yield bit-identical results.
pub struct YinPitchResult {
    /// The estimated fundamental frequency in Hz, or 0.0 if the frame has no
    /// periodicity dip below the threshold. Use
    /// [`is_tone`](YinPitchResult::is_tone) to tell a genuine 0.0 apart from
    /// a (structurally impossible) detected 0 Hz.
    pub frequency: f32,
    /// The depth of the selected dip, between 0 and 1 (inclusive). Values
    /// close to 1 indicate clean periodicity, values close to 0 a dip that
    /// barely crossed the threshold. 0 if no dip was found.
    pub clarity: f32,
    /// The [MIDI note number](https://newt.phys.unsw.edu.au/jw/notes.html)
    /// (with a fractional part) corresponding to the estimated frequency.
    pub note_number: f32,
    /// The estimated pitch period in samples, refined using parabolic
    /// interpolation. 0 if no dip was found.
    pub pitch_period: f32,
    /// The frame to analyze.
    pub window: Vec<f32>,
    /// The cumulative mean normalized difference function, one value per
    /// candidate lag.
    pub cmndf: Vec<f32>,
    /// The selected periodicity dip, or `None` if no normalized difference
    /// value crossed the threshold.
    pub dip: Option<Dip>,
    threshold: f32,
    fft_buffer: Vec<f32>,
    scratch_buffer: Vec<f32>,
}

impl YinPitchResult {
    /// Creates a result for analyzing frames of `window_size` samples over
    /// `lag_count` candidate lags, using the default threshold.
    pub fn new(window_size: usize, lag_count: usize) -> YinPitchResult {
        YinPitchResult::from_options(window_size, lag_count, DEFAULT_THRESHOLD)
    }

    /// Creates a result for analyzing frames of `window_size` samples over
    /// `lag_count` candidate lags. Lag `τ` corresponds to the frequency
    /// `sample_rate / τ`, so the lowest detectable frequency is
    /// `sample_rate / (lag_count - 1)`.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is 0, if `lag_count` is less than 2 or
    /// greater than `window_size`, or if `threshold` is not finite and
    /// greater than 0.
    pub fn from_options(window_size: usize, lag_count: usize, threshold: f32) -> YinPitchResult {
        if window_size == 0 {
            panic!("Window size must be greater than 0");
        }
        if lag_count < 2 {
            panic!("Lag count must be at least 2");
        }
        if lag_count > window_size {
            panic!("Lag count must not be greater than the window size");
        }
        if !(threshold > 0.0 && threshold.is_finite()) {
            panic!("Threshold must be finite and greater than 0");
        }

        // Frames too long for the fixed size FFT kernels get zero length FFT
        // buffers and use the time domain difference path instead.
        let fft_size = difference_fft_size(window_size, lag_count);
        let fft_buffer_size = if fft_size <= MAX_FFT_SIZE { fft_size } else { 0 };

        YinPitchResult {
            frequency: 0.0,
            clarity: 0.0,
            note_number: 0.0,
            pitch_period: 0.0,
            window: vec![0.0; window_size],
            cmndf: vec![0.0; lag_count],
            dip: None,
            threshold,
            fft_buffer: vec![0.0; fft_buffer_size],
            scratch_buffer: vec![0.0; fft_buffer_size],
        }
    }

    /// Performs pitch estimation on the current contents of `window`.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate` is not finite and greater than 0.
    pub fn compute(&mut self, sample_rate: f32) {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            panic!("Sample rate must be finite and greater than 0");
        }
        self.reset();
        self.compute_cmndf();
        self.find_dip();
        self.compute_pitch(sample_rate);
    }

    /// Indicates if the analyzed frame had a periodicity dip below the
    /// threshold, i.e if `frequency` holds a genuine estimate.
    pub fn is_tone(&self) -> bool {
        self.dip.is_some()
    }

    /// The absolute threshold this result was created with.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// The maximum absolute value of the input window.
    pub fn window_peak(&self) -> f32 {
        self.window.peak_level()
    }

    /// The [root mean square](https://en.wikipedia.org/wiki/Root_mean_square)
    /// level of the input window.
    pub fn window_rms(&self) -> f32 {
        self.window.rms_level()
    }

    fn reset(&mut self) {
        self.frequency = 0.0;
        self.clarity = 0.0;
        self.note_number = 0.0;
        self.pitch_period = 0.0;
        self.dip = None;
    }

    /// Computes the cumulative mean normalized difference function from the
    /// current contents of `window`.
    fn compute_cmndf(&mut self) {
        if self.fft_buffer.is_empty() {
            difference_direct(&self.window, &mut self.cmndf);
        } else {
            difference_fft(
                &self.window,
                &mut self.cmndf,
                &mut self.fft_buffer,
                &mut self.scratch_buffer,
            );
        }

        // Normalize in place. The value at lag 0 is 1 by convention and
        // never selected. A running sum of 0 means every difference so far
        // is zero, i.e a silent frame, in which case the normalized value is
        // defined as 1 so that no threshold can be crossed.
        self.cmndf[0] = 1.0;
        let mut running_sum: f32 = 0.0;
        for tau in 1..self.cmndf.len() {
            running_sum += self.cmndf[tau];
            self.cmndf[tau] = if running_sum > 0.0 {
                self.cmndf[tau] * (tau as f32) / running_sum
            } else {
                1.0
            };
        }
    }

    /// Scans for the first lag where the normalized difference crosses the
    /// threshold, then walks forward to the trough of that dip so that the
    /// leading edge of the dip is not mistaken for its bottom.
    fn find_dip(&mut self) {
        let cmndf = &self.cmndf[..];
        let lag_count = cmndf.len();
        for tau in 1..lag_count {
            if cmndf[tau] < self.threshold {
                let mut trough = tau;
                while trough + 1 < lag_count && cmndf[trough + 1] < cmndf[trough] {
                    trough += 1;
                }
                self.dip = Some(Dip::new(cmndf, trough));
                return;
            }
        }
    }

    /// Computes pitch parameters from the selected dip.
    fn compute_pitch(&mut self, sample_rate: f32) {
        if let Some(dip) = self.dip {
            self.pitch_period = dip.lag;
            self.clarity = (1.0 - dip.value_at_lag_index).clamp(0.0, 1.0);
            self.frequency = sample_rate / dip.lag;
            self.note_number = freq_to_midi_note(self.frequency);
        }
    }
}
