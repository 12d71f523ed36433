use micromath::F32Ext;

// log2(440), the frequency of A4, which is MIDI note 69.
const LOG2_A4_FREQ: f32 = 8.78135971;

/// Converts a frequency in Hz to a [MIDI](https://en.wikipedia.org/wiki/MIDI)
/// note number (with a fractional part).
pub fn freq_to_midi_note(freq: f32) -> f32 {
    69.0 + 12.0 * (F32Ext::log2(freq) - LOG2_A4_FREQ)
}
