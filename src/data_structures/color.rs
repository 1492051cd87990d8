/// Linear RGB colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Interpret `0xRRGGBB` as sRGB and convert it to linear space.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn scaled(self, factor: f32) -> [f32; 3] {
        [self.r * factor, self.g * factor, self.b * factor]
    }
}

impl From<Color> for [f32; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}
