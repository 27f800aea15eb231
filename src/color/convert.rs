pub use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, Rgb};

/// Hue steps per sixth of the color circle, doubled to stay integral.
const DOUBLE_SECTOR: i32 = 85;

/// Convert RGB to HSV (all channels are 0-255).
///
/// Hue is represented on a 0-255 circle with red, green and blue at 0, 85
/// and 170, the sector boundaries of [`hsv2rgb`]. Primaries and grays
/// convert back exactly; any other color comes back within 4 steps per
/// component, the precision of [`hsv2rgb`] itself.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let Rgb { r, g, b } = rgb;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = i32::from(max - min);

    let sat = if max == 0 {
        0
    } else {
        div_round(255 * delta, i32::from(max)) as u8
    };

    let hue = if delta == 0 {
        0
    } else {
        let (offset, a, b) = if max == r {
            (0, g, b)
        } else if max == g {
            (85, b, r)
        } else {
            (170, r, g)
        };
        let h = offset + div_round(DOUBLE_SECTOR * (i32::from(a) - i32::from(b)), 2 * delta);
        // Just below red wraps to the top of the circle
        if h < 0 { h + 255 } else { h }
    };

    Hsv {
        hue: hue as u8,
        sat,
        val: max,
    }
}

/// `num / den` rounded half up; `den` is positive.
const fn div_round(num: i32, den: i32) -> i32 {
    (2 * num + den).div_euclid(2 * den)
}
