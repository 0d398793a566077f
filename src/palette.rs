//! Colour palettes assigned to each plantation sector.
//!
//! Every sector page draws its headers, tiles and charts from one [`Palette`] so the report keeps
//! a consistent look per crop.  The categorical colours are used for pie slices and wrap around
//! when a breakdown has more entries than the palette has colours.

use std::fmt;

use genpdf::style::Color;

/// An opaque 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a colour from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Blends the colour towards white, keeping `alpha` (0.0 – 1.0) of the original.
    pub fn tint(self, alpha: f64) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |channel: u8| -> u8 {
            (channel as f64 * alpha + 255.0 * (1.0 - alpha))
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self(mix(self.0), mix(self.1), mix(self.2))
    }

    /// Returns the colour as an `image` pixel.
    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.0, self.1, self.2])
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(rgb: Rgb) -> Self {
        rgb.to_pixel()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Neutral greys and the light container tints shared by every page.
pub mod neutral {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::hex(0xffffff);
    pub const GRAY_100: Rgb = Rgb::hex(0xf3f4f6);
    pub const GRAY_200: Rgb = Rgb::hex(0xe5e7eb);
    pub const GRAY_400: Rgb = Rgb::hex(0x9ca3af);
    pub const GRAY_500: Rgb = Rgb::hex(0x6b7280);
    pub const GRAY_600: Rgb = Rgb::hex(0x4b5563);
    pub const GRAY_700: Rgb = Rgb::hex(0x374151);
    pub const GRAY_800: Rgb = Rgb::hex(0x1f2937);
    pub const GRAY_900: Rgb = Rgb::hex(0x111827);
    pub const SLATE_50: Rgb = Rgb::hex(0xf8fafc);
    pub const SLATE_200: Rgb = Rgb::hex(0xe2e8f0);
    pub const SLATE_300: Rgb = Rgb::hex(0xcbd5e1);
    pub const SLATE_500: Rgb = Rgb::hex(0x64748b);
    pub const SLATE_800: Rgb = Rgb::hex(0x1e293b);
    pub const EMERALD_700: Rgb = Rgb::hex(0x047857);
    pub const EMERALD_800: Rgb = Rgb::hex(0x065f46);
    pub const GREEN_50: Rgb = Rgb::hex(0xf0fdf4);
    pub const GREEN_200: Rgb = Rgb::hex(0xbbf7d0);
    pub const GREEN_400: Rgb = Rgb::hex(0x4ade80);
    pub const GREEN_600: Rgb = Rgb::hex(0x16a34a);
    pub const GREEN_700: Rgb = Rgb::hex(0x15803d);
    pub const GREEN_800: Rgb = Rgb::hex(0x166534);
    pub const BLUE_50: Rgb = Rgb::hex(0xeff6ff);
    pub const BLUE_200: Rgb = Rgb::hex(0xbfdbfe);
    pub const BLUE_800: Rgb = Rgb::hex(0x1e40af);
    pub const PURPLE_50: Rgb = Rgb::hex(0xfaf5ff);
    pub const PURPLE_200: Rgb = Rgb::hex(0xe9d5ff);
    pub const ORANGE_500: Rgb = Rgb::hex(0xf97316);
    pub const ORANGE_800: Rgb = Rgb::hex(0x9a3412);
}

/// The plantation sectors covered by the report, in page order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sector {
    Tea,
    Coconut,
    Rubber,
    Sugarcane,
    Cashew,
}

impl Sector {
    /// All sectors in the order their pages appear.
    pub const ALL: [Sector; 5] = [
        Sector::Tea,
        Sector::Coconut,
        Sector::Rubber,
        Sector::Sugarcane,
        Sector::Cashew,
    ];

    /// Human readable sector name.
    pub fn name(self) -> &'static str {
        match self {
            Sector::Tea => "Tea",
            Sector::Coconut => "Coconut",
            Sector::Rubber => "Rubber",
            Sector::Sugarcane => "Sugarcane",
            Sector::Cashew => "Cashew",
        }
    }

    /// Returns the palette registered for the sector.
    pub fn palette(self) -> &'static Palette {
        match self {
            Sector::Tea => &TEA,
            Sector::Coconut => &COCONUT,
            Sector::Rubber => &RUBBER,
            Sector::Sugarcane => &SUGAR,
            Sector::Cashew => &CASHEW,
        }
    }
}

/// Fixed colour set for one sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub background: Rgb,
    pub categorical: &'static [Rgb],
    pub bar: Rgb,
}

impl Palette {
    /// Colour for the `index`-th entry of a breakdown, wrapping around the categorical palette.
    pub fn categorical_color(&self, index: usize) -> Rgb {
        cycle_color(self.categorical, index).unwrap_or(self.primary)
    }
}

/// Picks `colors[index % len]`, returning `None` only for an empty slice.
pub fn cycle_color(colors: &[Rgb], index: usize) -> Option<Rgb> {
    if colors.is_empty() {
        None
    } else {
        Some(colors[index % colors.len()])
    }
}

/// Bar colour shared by every trend chart (`#5767cfff`, alpha dropped).
pub const CHART_BAR: Rgb = Rgb::hex(0x5767cf);

const PRIMARY: Rgb = Rgb::hex(0x166534);
const INDIGO_VIOLET: Rgb = Rgb::hex(0x1901a0);

const MATERIAL_PIE: [Rgb; 5] = [
    Rgb::hex(0x5c6bc0),
    Rgb::hex(0x26c6da),
    Rgb::hex(0xef5350),
    Rgb::hex(0xffca28),
    Rgb::hex(0x66bb6a),
];

const TEA_PIE: [Rgb; 8] = [
    Rgb::hex(0x5c6bc0),
    Rgb::hex(0x26c6da),
    Rgb::hex(0xef5350),
    Rgb::hex(0xffca28),
    Rgb::hex(0x66bb6a),
    Rgb::hex(0xab47bc),
    Rgb::hex(0xffa726),
    Rgb::hex(0x9e9e9e),
];

const RUBBER_PIE: [Rgb; 6] = [
    Rgb::hex(0x0ea5e9),
    Rgb::hex(0x10b981),
    Rgb::hex(0xf43f5e),
    Rgb::hex(0xf59e0b),
    Rgb::hex(0x8b5cf6),
    Rgb::hex(0x6366f1),
];

pub static TEA: Palette = Palette {
    primary: PRIMARY,
    secondary: Rgb::hex(0x86efac),
    background: Rgb::hex(0xf0fdf4),
    categorical: &TEA_PIE,
    bar: CHART_BAR,
};

pub static COCONUT: Palette = Palette {
    primary: PRIMARY,
    secondary: Rgb::hex(0x86efac),
    background: Rgb::hex(0xf0fdf4),
    categorical: &MATERIAL_PIE,
    bar: CHART_BAR,
};

pub static RUBBER: Palette = Palette {
    primary: PRIMARY,
    secondary: Rgb::hex(0xcbd5e1),
    background: Rgb::hex(0xf8fafc),
    categorical: &RUBBER_PIE,
    bar: CHART_BAR,
};

pub static SUGAR: Palette = Palette {
    primary: PRIMARY,
    secondary: INDIGO_VIOLET,
    background: Rgb::hex(0xfaf5ff),
    categorical: &MATERIAL_PIE,
    bar: CHART_BAR,
};

pub static CASHEW: Palette = Palette {
    primary: PRIMARY,
    secondary: INDIGO_VIOLET,
    background: Rgb::hex(0xfff7ed),
    categorical: &MATERIAL_PIE,
    bar: CHART_BAR,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_splits_channels() {
        assert_eq!(Rgb::hex(0x5767cf), Rgb(0x57, 0x67, 0xcf));
        assert_eq!(Rgb::hex(0x1901a0).to_string(), "#1901a0");
    }

    #[test]
    fn categorical_color_wraps_for_long_series() {
        let palette = Sector::Coconut.palette();
        assert_eq!(palette.categorical.len(), 5);
        assert_eq!(palette.categorical_color(5), palette.categorical_color(0));
        assert_eq!(palette.categorical_color(12), palette.categorical[2]);
    }

    #[test]
    fn tea_palette_covers_every_key_market() {
        let palette = Sector::Tea.palette();
        assert_eq!(palette.categorical.len(), 8);
        assert_eq!(palette.categorical_color(7), Rgb::hex(0x9e9e9e));
    }

    #[test]
    fn cycle_color_handles_empty_palette() {
        assert_eq!(cycle_color(&[], 3), None);
    }

    #[test]
    fn tint_blends_towards_white() {
        assert_eq!(Rgb(0, 0, 0).tint(0.0), neutral::WHITE);
        assert_eq!(Rgb(10, 20, 30).tint(1.0), Rgb(10, 20, 30));
        assert_eq!(Rgb(0, 0, 0).tint(0.5), Rgb(128, 128, 128));
    }
}
