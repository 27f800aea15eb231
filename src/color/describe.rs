use core::fmt::{self, Display, Formatter, Write};

use crate::color::Rgb;

/// Displays a color as `{R:010 G:020 B:030}`.
#[derive(Debug, Clone, Copy)]
pub struct Described(Rgb);

impl Display for Described {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.0;
        write!(f, "{{R:{r:03} G:{g:03} B:{b:03}}}")
    }
}

/// Wrap a color for log output.
pub const fn describe(color: Rgb) -> Described {
    Described(color)
}

/// One line per LED, prefixed with its zero-padded index.
pub fn describe_all(colors: &[Rgb]) -> String {
    let width = colors.len().saturating_sub(1).to_string().len();
    let mut out = String::with_capacity(colors.len() * (width + 24));
    for (index, color) in colors.iter().enumerate() {
        let _ = writeln!(out, "{index:0width$} | {}", describe(*color));
    }
    out
}
