//! A rust implementation of the YIN [pitch](https://en.wikipedia.org/wiki/Pitch_%28music%29) estimation algorithm.
//! The algorithm is used for estimating the fundamental frequency of monophonic, primarily musical,
//! sounds. It cannot be used to detect multiple pitches at once, like in a musical chord.
//! The algorithm is described in the paper
//! [YIN, a fundamental frequency estimator for speech and music](http://audition.ens.fr/adc/pdf/2002_JASA_YIN.pdf)
//! by Alain de Cheveigné and Hideki Kawahara.
//!
//! Features
//! * The difference function is computed using real-only FFT whenever the frame
//! fits the fixed size FFT kernels, with a time domain fallback for longer frames.
//! * No allocations after construction when using the reusable [`YinPitchResult`](yin::YinPitchResult)
//! API, suitable for real time audio use.
//! * `no_std` compatible.
//!
//! See the [`yin`] module for examples.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod common;
pub mod yin;
