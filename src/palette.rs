use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn to_color(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

// Heat ramp: near-black -> deep red -> orange -> yellow -> white.
// The index into this table is the fire intensity level.
const HEAT_RAMP: [Rgb; 45] = [
    Rgb { r: 0x07, g: 0x07, b: 0x07 },
    Rgb { r: 0x1f, g: 0x07, b: 0x07 },
    Rgb { r: 0x2f, g: 0x0f, b: 0x07 },
    Rgb { r: 0x47, g: 0x0f, b: 0x07 },
    Rgb { r: 0x57, g: 0x17, b: 0x07 },
    Rgb { r: 0x67, g: 0x1f, b: 0x07 },
    Rgb { r: 0x77, g: 0x1f, b: 0x07 },
    Rgb { r: 0x8f, g: 0x27, b: 0x07 },
    Rgb { r: 0x9f, g: 0x2f, b: 0x07 },
    Rgb { r: 0xaf, g: 0x3f, b: 0x07 },
    Rgb { r: 0xbf, g: 0x47, b: 0x07 },
    Rgb { r: 0xc7, g: 0x47, b: 0x07 },
    Rgb { r: 0xdf, g: 0x4f, b: 0x07 },
    Rgb { r: 0xdf, g: 0x57, b: 0x07 },
    Rgb { r: 0xdf, g: 0x57, b: 0x07 },
    Rgb { r: 0xd7, g: 0x5f, b: 0x07 },
    Rgb { r: 0xd7, g: 0x67, b: 0x0f },
    Rgb { r: 0xcf, g: 0x6f, b: 0x0f },
    Rgb { r: 0xcf, g: 0x77, b: 0x0f },
    Rgb { r: 0xcf, g: 0x7f, b: 0x0f },
    Rgb { r: 0xcf, g: 0x87, b: 0x17 },
    Rgb { r: 0xc7, g: 0x87, b: 0x17 },
    Rgb { r: 0xc7, g: 0x8f, b: 0x17 },
    Rgb { r: 0xc7, g: 0x97, b: 0x1f },
    Rgb { r: 0xbf, g: 0x9f, b: 0x1f },
    Rgb { r: 0xbf, g: 0x9f, b: 0x1f },
    Rgb { r: 0xbf, g: 0xa7, b: 0x27 },
    Rgb { r: 0xbf, g: 0xa7, b: 0x27 },
    Rgb { r: 0xbf, g: 0xa7, b: 0x27 },
    Rgb { r: 0xc7, g: 0xaf, b: 0x2f },
    Rgb { r: 0xc7, g: 0xaf, b: 0x2f },
    Rgb { r: 0xc7, g: 0xb7, b: 0x2f },
    Rgb { r: 0xc7, g: 0xb7, b: 0x37 },
    Rgb { r: 0xcf, g: 0xbf, b: 0x37 },
    Rgb { r: 0xcf, g: 0xbf, b: 0x37 },
    Rgb { r: 0xcf, g: 0xbf, b: 0x37 },
    Rgb { r: 0xd7, g: 0xc7, b: 0x47 },
    Rgb { r: 0xd7, g: 0xc7, b: 0x47 },
    Rgb { r: 0xd7, g: 0xcf, b: 0x4f },
    Rgb { r: 0xd7, g: 0xcf, b: 0x4f },
    Rgb { r: 0xdf, g: 0xd7, b: 0x5f },
    Rgb { r: 0xdf, g: 0xd7, b: 0x5f },
    Rgb { r: 0xdf, g: 0xdf, b: 0x6f },
    Rgb { r: 0xef, g: 0xef, b: 0x9f },
    Rgb { r: 0xff, g: 0xff, b: 0xff },
];

/// Ordered color ramp indexed by intensity level. Immutable after construction.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn heat_ramp() -> Self {
        Self::new(HEAT_RAMP.to_vec())
    }

    pub fn new(colors: Vec<Rgb>) -> Self {
        assert!(!colors.is_empty(), "palette needs at least one color");
        assert!(colors.len() <= 256, "intensity levels are stored as u8");
        Self { colors }
    }

    /// Highest valid intensity level (palette size minus one).
    pub fn max_level(&self) -> u8 {
        (self.colors.len() - 1) as u8
    }

    pub fn color(&self, level: u8) -> Rgb {
        self.colors[usize::from(level)]
    }
}
