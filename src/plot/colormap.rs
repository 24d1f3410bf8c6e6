// "Blues" sequential colormap: white-ish at 0.0, deep navy at 1.0.
//
// Anchor colors are the nine-class ColorBrewer Blues palette, the same one
// matplotlib's `Blues` interpolates. Values between anchors are linearly
// blended per channel.

use plotters::style::RGBColor;

const BLUES: [(u8, u8, u8); 9] = [
    (0xf7, 0xfb, 0xff),
    (0xde, 0xeb, 0xf7),
    (0xc6, 0xdb, 0xef),
    (0x9e, 0xca, 0xe1),
    (0x6b, 0xae, 0xd6),
    (0x42, 0x92, 0xc6),
    (0x21, 0x71, 0xb5),
    (0x08, 0x51, 0x9c),
    (0x08, 0x30, 0x6b),
];

/// Map `t` in [0, 1] to a Blues color. Out-of-range and NaN inputs clamp.
pub fn blues(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (BLUES.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(BLUES.len() - 1);
    let frac = scaled - lo as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r0, g0, b0) = BLUES[lo];
    let (r1, g1, b1) = BLUES[hi];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Scale `v` into [0, 1] relative to `lo..hi`.
pub fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span <= f64::EPSILON {
        0.5
    } else {
        ((v - lo) / span).clamp(0.0, 1.0)
    }
}
