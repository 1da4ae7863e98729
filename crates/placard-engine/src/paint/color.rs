use std::fmt;

/// Straight-alpha sRGB color, 8 bits per channel.
///
/// Stored exactly as written in theme files (`#RRGGBB`); no color-space
/// conversion happens anywhere between parsing and the encoded PNG.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error returned by [`Color::from_hex`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color literal: {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl Color {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix alone would accept a sign, as in "+1"
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| err())
        };

        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }

    /// `#RRGGBB` for opaque colors, `#RRGGBBAA` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_rgba(px: [u8; 4]) -> Self {
        Self::rgba(px[0], px[1], px[2], px[3])
    }

    /// Per-channel `start + (end - start) * t`, truncated, fully opaque.
    pub fn lerp(self, end: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |s: u8, e: u8| (s as f32 + (e as f32 - s as f32) * t) as u8;
        Self::rgb(ch(self.r, end.r), ch(self.g, end.g), ch(self.b, end.b))
    }

    /// Source-over blend of `self` (with extra `coverage` in 0..=255) onto `dst`.
    pub fn blend_over(self, dst: Color, coverage: u8) -> Color {
        let sa = self.a as u32 * coverage as u32 / 255;
        if sa == 0 {
            return dst;
        }
        if sa == 255 {
            return Color::rgb(self.r, self.g, self.b);
        }
        let inv = 255 - sa;
        let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv + 127) / 255) as u8;
        let out_a = (sa + dst.a as u32 * inv / 255).min(255) as u8;
        Color::rgba(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), out_a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── from_hex ──────────────────────────────────────────────────────────

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Color::from_hex("#D4AF37").unwrap(), Color::rgb(0xD4, 0xAF, 0x37));
        assert_eq!(Color::from_hex("1a1a1a").unwrap(), Color::rgb(0x1a, 0x1a, 0x1a));
    }

    #[test]
    fn parses_short_and_alpha_forms() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::white());
        assert_eq!(Color::from_hex("#00000080").unwrap(), Color::rgba(0, 0, 0, 0x80));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn rejects_signed_digits() {
        assert!(Color::from_hex("#+1+2+3").is_err());
        assert!(Color::from_hex("#-1").is_err());
        assert!(Color::from_hex("+f+f+f+f").is_err());
    }

    #[test]
    fn to_hex_uppercases_and_drops_opaque_alpha() {
        assert_eq!(Color::from_hex("#0f0f0f").unwrap().to_hex(), "#0F0F0F");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    // ── lerp ──────────────────────────────────────────────────────────────

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Color::rgb(10, 200, 30);
        let b = Color::rgb(250, 0, 90);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_truncates() {
        // 0 + 255 * 0.5 = 127.5 -> 127
        assert_eq!(Color::black().lerp(Color::white(), 0.5), Color::rgb(127, 127, 127));
    }

    // ── blend_over ────────────────────────────────────────────────────────

    #[test]
    fn blend_full_coverage_replaces() {
        let dst = Color::rgb(0, 0, 0);
        assert_eq!(Color::rgb(200, 100, 50).blend_over(dst, 255), Color::rgb(200, 100, 50));
    }

    #[test]
    fn blend_zero_coverage_keeps_destination() {
        let dst = Color::rgb(9, 9, 9);
        assert_eq!(Color::white().blend_over(dst, 0), dst);
    }
}
