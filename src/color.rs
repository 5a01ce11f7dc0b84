// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// Particles and links share one color and only vary their alpha per draw call.

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // The color's own alpha scales the per-draw alpha, so 0x..ff leaves it untouched
    pub fn effective_alpha(&self, alpha: f64) -> f64 {
        alpha * (self.a as f64 / 255.0)
    }

    pub fn to_css_rgba(&self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.effective_alpha(alpha)
        )
    }
}
