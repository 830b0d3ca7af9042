//! Colors and weighted palettes.
//!
//! Palettes are ordered lists sampled uniformly; repeating an entry raises its
//! frequency, which is how the green and gold palettes split into thirds.

use rand::Rng;
use smallvec::SmallVec;

/// Linear-ish RGB triple in \[0, 1\] as consumed by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }
}

// Greens
pub const GREEN_LIGHT: u32 = 0x047857;
pub const GREEN_MEDIUM: u32 = 0x15803d;
pub const GREEN_DEEP: u32 = 0x14532d;

// Golds
pub const GOLD_LIGHT: u32 = 0xFFD700;
pub const GOLD_MEDIUM: u32 = 0xEAB308;
pub const GOLD_DEEP: u32 = 0xA16207;

// Reds
pub const RED_LIGHT: u32 = 0x991B1B;
pub const RED_MEDIUM: u32 = 0x7F1D1D;
pub const RED_DEEP: u32 = 0x450a0a;

// Accents
pub const WHITE_PURE: u32 = 0xFFFFFF;
pub const ORANGE_VIVID: u32 = 0xF97316;
pub const CYAN_BRIGHT: u32 = 0x22d3ee;
pub const MAGENTA_BRIGHT: u32 = 0xe879f9;
pub const LIGHT_WARM: u32 = 0xFFFBEB;
pub const BACKGROUND: u32 = 0x000201;

pub const PALETTE_GREEN: &[u32] = &[
    GREEN_LIGHT,
    GREEN_LIGHT,
    GREEN_MEDIUM,
    GREEN_MEDIUM,
    GREEN_DEEP,
    GREEN_DEEP,
];

pub const PALETTE_DECOR_BOXES: &[u32] = &[
    GOLD_LIGHT,
    GOLD_LIGHT,
    GOLD_MEDIUM,
    GOLD_MEDIUM,
    GOLD_DEEP,
    GOLD_DEEP,
];

pub const PALETTE_DECOR_SPHERES: &[u32] = &[
    GOLD_LIGHT,
    GOLD_MEDIUM,
    GOLD_DEEP,
    RED_LIGHT,
    RED_MEDIUM,
    RED_DEEP,
    WHITE_PURE,
    ORANGE_VIVID,
];

pub const PALETTE_SPARKLE: &[u32] = &[WHITE_PURE, CYAN_BRIGHT, MAGENTA_BRIGHT, GOLD_LIGHT, GREEN_LIGHT];

/// Ordered color list sampled uniformly per particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    entries: SmallVec<[Rgb; 8]>,
}

impl Palette {
    pub fn from_hex(hexes: &[u32]) -> Self {
        Self {
            entries: hexes.iter().map(|&h| Rgb::from_hex(h)).collect(),
        }
    }

    pub fn single(color: Rgb) -> Self {
        let mut entries = SmallVec::new();
        entries.push(color);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }

    /// Uniform pick; an empty palette yields white.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        if self.entries.is_empty() {
            return Rgb::from_hex(WHITE_PURE);
        }
        self.entries[rng.gen_range(0..self.entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn hex_channels_unpack_in_order() {
        let c = Rgb::from_hex(0xFF8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn repeated_entries_bias_frequency() {
        let palette = Palette::from_hex(&[0x000000, 0x000000, 0x000000, 0xFFFFFF]);
        let mut rng = StdRng::seed_from_u64(7);
        let whites = (0..4000)
            .filter(|_| palette.pick(&mut rng).r > 0.5)
            .count();
        // Expect roughly a quarter
        assert!((800..1200).contains(&whites), "whites={whites}");
    }

    #[test]
    fn empty_palette_falls_back_to_white() {
        let palette = Palette::from_hex(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(palette.pick(&mut rng), Rgb::new(1.0, 1.0, 1.0));
    }
}
