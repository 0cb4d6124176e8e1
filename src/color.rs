// Simple color struct, created from an unsigned 32 representing RRGGBBAA

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const NEON_MAGENTA: Color = Color::from_u32(0xff00ff80);
    pub const NEON_CYAN: Color = Color::from_u32(0x00ffff80);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Eight digit hex form accepted by canvas fillStyle, e.g. "#ff00ff80"
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

pub const DEFAULT_PALETTE: [Color; 2] = [Color::NEON_MAGENTA, Color::NEON_CYAN];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x12345678);
        assert_eq!(c, Color { r: 0x12, g: 0x34, b: 0x56, a: 0x78 });
    }

    #[test]
    fn palette_is_half_transparent_neon() {
        assert_eq!(Color::NEON_MAGENTA.to_css(), "#ff00ff80");
        assert_eq!(Color::NEON_CYAN.to_css(), "#00ffff80");
    }
}
