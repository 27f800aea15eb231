//! SK9822 / APA102 frame encoding.
//!
//! Clocked two-wire LEDs expect, per strip update:
//!
//! ```text
//! start frame   4 x 0x00
//! LED frame     0b111x_xxxx (5-bit global brightness), blue, green, red
//! ...           one LED frame per LED
//! end frame     ceil(n / 16) x 0x00
//! ```
//!
//! Each LED delays the data by half a clock, so the end frame has to supply
//! at least `n / 2` extra clock edges for the last LED to latch.

use crate::color::Rgb;

/// Size of the all-zero start frame.
pub const START_FRAME_LEN: usize = 4;

/// Bytes per LED frame.
pub const LED_FRAME_LEN: usize = 4;

/// LEDs latched per end-frame byte (8 clock edges, half a clock per LED).
const LEDS_PER_END_BYTE: usize = 16;

/// Top three bits of every LED frame.
const LED_FRAME_MARKER: u8 = 0b1110_0000;

/// Largest value of the 5-bit global brightness field.
pub const MAX_GLOBAL_BRIGHTNESS: u8 = 0b0001_1111;

/// End frame length for `led_count` LEDs.
pub const fn end_frame_len(led_count: usize) -> usize {
    led_count.div_ceil(LEDS_PER_END_BYTE)
}

/// Total encoded frame length for `led_count` LEDs.
///
/// Depends on the LED count only, never on color values.
pub const fn frame_len(led_count: usize) -> usize {
    START_FRAME_LEN + LED_FRAME_LEN * led_count + end_frame_len(led_count)
}

/// Map a brightness scalar to the 5-bit global brightness field.
///
/// Out of range values are clamped; NaN is treated as dark.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn global_brightness(brightness: f32) -> u8 {
    let brightness = if brightness.is_nan() {
        0.0
    } else {
        brightness.clamp(0.0, 1.0)
    };
    (brightness * f32::from(MAX_GLOBAL_BRIGHTNESS)).round() as u8
}

/// Stream the bytes of one frame.
pub fn frame_bytes(colors: &[Rgb], brightness: f32) -> impl Iterator<Item = u8> {
    let header = LED_FRAME_MARKER | global_brightness(brightness);
    let end_len = end_frame_len(colors.len());

    core::iter::repeat_n(0u8, START_FRAME_LEN)
        .chain(
            colors
                .iter()
                .flat_map(move |color| [header, color.b, color.g, color.r]),
        )
        .chain(core::iter::repeat_n(0u8, end_len))
}

/// Encode one channel's colors into a device frame.
pub fn encode_frame(colors: &[Rgb], brightness: f32) -> Vec<u8> {
    let mut frame = Vec::with_capacity(frame_len(colors.len()));
    frame.extend(frame_bytes(colors, brightness));
    frame
}
