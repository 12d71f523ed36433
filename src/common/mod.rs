//! Common algorithms and utilities.

mod difference;
mod levels;
mod midi;

pub use difference::{difference_direct, difference_fft, difference_fft_size, MAX_FFT_SIZE};
pub use levels::LevelExt;
pub use midi::freq_to_midi_note;
