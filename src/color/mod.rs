mod convert;
mod describe;

pub use convert::{hsv2rgb, rgb2hsv};
pub use describe::{Described, describe, describe_all};
use smart_leds::{RGB8, hsv::Hsv as HSV};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Colors of one channel, in strip order.
pub type ColorSequence = Vec<Rgb>;
