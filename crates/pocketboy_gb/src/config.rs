use typed_builder::TypedBuilder;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new_rgb(0, 0, 0);
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::new_rgb(0xAA, 0xAA, 0xAA);
    pub const DARK_GRAY: Color = Color::new_rgb(0x55, 0x55, 0x55);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The four DMG shades, from colour index 0 (lightest) to 3 (darkest).
pub const DMG_GRAYSCALE: [Color; 4] = [
    Color::WHITE,
    Color::LIGHT_GRAY,
    Color::DARK_GRAY,
    Color::BLACK,
];

/// Session-wide settings fixed at construction time.
///
/// ```
/// use pocketboy_gb::GameBoyConfig;
///
/// let config = GameBoyConfig::builder().sample_rate(48_000).build();
/// assert_eq!(config.sample_rate, 48_000);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    /// Output rate of the stereo sample stream, in frames per second.
    #[builder(default = 44_100)]
    pub sample_rate: u32,
    /// Host colours for the shades 0..=3 produced by BGP/OBP0/OBP1.
    #[builder(default = DMG_GRAYSCALE)]
    pub palette: [Color; 4],
    /// Upper bound on interleaved samples kept between two reads of the
    /// audio buffer. Older samples are dropped once the cap is reached.
    #[builder(default = 4096)]
    pub max_audio_samples: usize,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
