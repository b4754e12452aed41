//! Overlay colors

use tiny_skia::Color;

/// Black dimming over the whole frame in region mode
pub const REGION_DIM_ALPHA: u8 = 100;
/// Black dimming once a measure-then-region measurement is frozen
pub const MEASURED_DIM_ALPHA: u8 = 80;
/// Fixed plate behind banners and the selection size label
pub const PLATE_ALPHA: u8 = 200;
/// Upper bound for the measurement label plates
pub const MAX_ELEMENT_PLATE_ALPHA: u8 = 220;

/// Colors derived from the configured element opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    alpha: u8,
}

impl Palette {
    /// `opacity` is clamped to 0..=1
    pub fn new(opacity: f32) -> Self {
        let opacity = if opacity.is_nan() {
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        Self {
            alpha: (opacity * 255.0).round() as u8,
        }
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn line(&self) -> Color {
        Color::from_rgba8(255, 0, 0, self.alpha)
    }

    pub fn point(&self) -> Color {
        Color::from_rgba8(255, 255, 0, self.alpha)
    }

    pub fn guide(&self) -> Color {
        Color::from_rgba8(0, 255, 255, self.alpha)
    }

    pub fn text(&self) -> Color {
        Color::from_rgba8(255, 255, 255, self.alpha)
    }

    pub fn selection(&self) -> Color {
        Color::from_rgba8(0, 255, 0, self.alpha)
    }

    /// Plate behind measurement labels
    pub fn plate(&self) -> Color {
        black(self.alpha.min(MAX_ELEMENT_PLATE_ALPHA))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(1.0)
    }
}

pub fn black(alpha: u8) -> Color {
    Color::from_rgba8(0, 0, 0, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_from_opacity() {
        assert_eq!(Palette::new(1.0).alpha(), 255);
        assert_eq!(Palette::new(0.0).alpha(), 0);
        assert_eq!(Palette::new(7.0).alpha(), 255);
        assert_eq!(Palette::new(f32::NAN).alpha(), 255);
        assert_eq!(Palette::new(0.5).alpha(), 128);
    }

    #[test]
    fn plate_alpha_is_capped() {
        assert_eq!(Palette::new(1.0).plate(), black(220));
        assert_eq!(Palette::new(0.5).plate(), black(128));
    }
}
