/// Straight (non-premultiplied) RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0x00, 0x00, 0x00, 0xff);
    pub const WHITE: Self = Self::rgba(0xff, 0xff, 0xff, 0xff);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Get the same color with alpha forced to fully opaque.
    /// # Example
    /// ```
    /// use qrdot_core::Color;
    /// assert_eq!(Color::rgba(1, 2, 3, 0x40).opaque(), Color::rgba(1, 2, 3, 0xff));
    /// ```
    pub const fn opaque(self) -> Self {
        Self { a: 0xff, ..self }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string, with alpha opaque when omitted. Returns `None` for any malformed
    /// input, including a missing `#`.
    /// # Example
    /// ```
    /// use qrdot_core::Color;
    /// assert_eq!(Color::parse_hex("#FF0000A1"), Some(Color::rgba(0xff, 0, 0, 0xa1)));
    /// assert_eq!(Color::parse_hex("#00ff00"), Some(Color::rgba(0, 0xff, 0, 0xff)));
    /// assert_eq!(Color::parse_hex("00ff00"), None);
    /// assert_eq!(Color::parse_hex("#ZZZ"), None);
    /// ```
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |k: usize| u8::from_str_radix(&digits[2 * k..2 * k + 2], 16).ok();
        match digits.len() {
            6 => Some(Self::rgba(channel(0)?, channel(1)?, channel(2)?, 0xff)),
            8 => Some(Self::rgba(channel(0)?, channel(1)?, channel(2)?, channel(3)?)),
            _ => None,
        }
    }

    /// Get the channels as an `[r, g, b, a]` array.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}
