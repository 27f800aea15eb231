//! Procedural rainbow generators.
//!
//! Both stages write the context's scratch colors; a fan-out stage decides
//! which channels show them.

use super::Stage;
use crate::color::{Hsv, hsv2rgb};
use crate::config::DEFAULT_LED_COUNT;
use crate::context::RenderContext;

/// Dim by default, strips are bright.
const DEFAULT_VALUE: u8 = 25;
const DEFAULT_SATURATION: u8 = 255;
const DEFAULT_HUE_STEP: u8 = 4;

/// Every LED shows one color; the hue advances one step per frame.
#[derive(Debug, Clone)]
pub struct SingleRainbow {
    hue: u8,
    saturation: u8,
    value: u8,
    led_count: usize,
}

impl Default for SingleRainbow {
    fn default() -> Self {
        Self {
            hue: 0,
            saturation: DEFAULT_SATURATION,
            value: DEFAULT_VALUE,
            led_count: DEFAULT_LED_COUNT,
        }
    }
}

impl SingleRainbow {
    pub fn new(led_count: usize) -> Self {
        Self {
            led_count,
            ..Self::default()
        }
    }

    /// Set the starting hue.
    #[must_use]
    pub fn with_hue(mut self, hue: u8) -> Self {
        self.hue = hue;
        self
    }

    #[must_use]
    pub fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = saturation;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }

    /// Hue shown by the most recent frame.
    pub const fn hue(&self) -> u8 {
        self.hue
    }
}

impl Stage for SingleRainbow {
    fn apply(&mut self, ctx: &mut RenderContext) {
        self.hue = self.hue.wrapping_add(1);
        let color = hsv2rgb(Hsv {
            hue: self.hue,
            sat: self.saturation,
            val: self.value,
        });
        ctx.colors.clear();
        ctx.colors.resize(self.led_count, color);
    }
}

/// Hue offset per LED, scrolling one step per frame.
#[derive(Debug, Clone)]
pub struct RainbowFlow {
    hue: u8,
    hue_step: u8,
    saturation: u8,
    value: u8,
    led_count: usize,
}

impl Default for RainbowFlow {
    fn default() -> Self {
        Self {
            hue: 0,
            hue_step: DEFAULT_HUE_STEP,
            saturation: DEFAULT_SATURATION,
            value: DEFAULT_VALUE,
            led_count: DEFAULT_LED_COUNT,
        }
    }
}

impl RainbowFlow {
    pub fn new(led_count: usize) -> Self {
        Self {
            led_count,
            ..Self::default()
        }
    }

    /// Hue difference between neighbouring LEDs.
    #[must_use]
    pub fn with_hue_step(mut self, hue_step: u8) -> Self {
        self.hue_step = hue_step;
        self
    }

    #[must_use]
    pub fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = saturation;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }
}

impl Stage for RainbowFlow {
    #[allow(clippy::cast_possible_truncation)]
    fn apply(&mut self, ctx: &mut RenderContext) {
        self.hue = self.hue.wrapping_add(1);
        let base = self.hue;
        let step = self.hue_step;
        let (sat, val) = (self.saturation, self.value);

        ctx.colors.clear();
        ctx.colors.extend((0..self.led_count).map(|index| {
            // Hue wraps every 256 steps, truncation is the intent
            let offset = (index as u8).wrapping_mul(step);
            hsv2rgb(Hsv {
                hue: base.wrapping_add(offset),
                sat,
                val,
            })
        }));
    }
}
