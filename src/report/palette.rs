//! Sequential and diverging color palettes for chart bars

use ratatui::style::Color;

/// Named palettes, sampled the way matplotlib colormaps are for categorical bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Coolwarm,
    Magma,
    Viridis,
}

const COOLWARM: &[(u8, u8, u8)] = &[(59, 76, 192), (221, 221, 221), (180, 4, 38)];
const MAGMA: &[(u8, u8, u8)] = &[
    (0, 0, 4),
    (81, 18, 124),
    (183, 55, 121),
    (252, 137, 97),
    (252, 253, 191),
];
const VIRIDIS: &[(u8, u8, u8)] = &[
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

impl Palette {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            Palette::Coolwarm => COOLWARM,
            Palette::Magma => MAGMA,
            Palette::Viridis => VIRIDIS,
        }
    }

    /// Color at position `t` in [0, 1], linearly interpolated between stops
    pub fn sample(self, t: f64) -> Color {
        let stops = self.stops();
        let t = t.clamp(0.0, 1.0);
        let scaled = t * (stops.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - idx as f64;

        let (r0, g0, b0) = stops[idx];
        let (r1, g1, b1) = stops[idx + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

        Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }

    /// `n` evenly spaced colors, skipping both ends of the map
    pub fn colors(self, n: usize) -> Vec<Color> {
        (1..=n)
            .map(|i| self.sample(i as f64 / (n + 1) as f64))
            .collect()
    }
}
