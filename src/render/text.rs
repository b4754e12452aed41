//! Label text drawn with the 8x8 bitmap font

use font8x8::{BASIC_FONTS, UnicodeFonts};
use tiny_skia::Color;

use super::canvas::Canvas;

const GLYPH: u32 = 8;

/// Pixel size of `text` at `scale`
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let chars = text.chars().count() as u32;
    (chars * GLYPH * scale, GLYPH * scale)
}

/// Draw `text` with its top-left corner at `(x, y)`. Unknown characters
/// fall back to `?`.
pub fn draw_text(canvas: &mut Canvas, text: &str, x: i32, y: i32, scale: u32, color: Color) {
    let step = (GLYPH * scale) as i32;
    let px = scale as f32;

    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let origin_x = x + i as i32 * step;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                canvas.fill_rect(
                    (origin_x + (col * scale) as i32) as f32,
                    (y + row as i32 * scale as i32) as f32,
                    px,
                    px,
                    color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn size_scales_with_length() {
        assert_eq!(text_size("W: 5 px", 1), (56, 8));
        assert_eq!(text_size("1.0", 2), (48, 16));
        assert_eq!(text_size("", 1), (0, 8));
    }

    #[test]
    fn draws_inside_its_box_only() {
        let background = Rgba([0, 0, 0, 255]);
        let image = RgbaImage::from_pixel(40, 20, background);
        let mut canvas = Canvas::from_image(&image).unwrap();
        draw_text(&mut canvas, "H", 4, 4, 1, Color::WHITE);
        let out = canvas.into_image().unwrap();

        let mut lit = 0;
        for (x, y, pixel) in out.enumerate_pixels() {
            if *pixel != background {
                assert!((4..12).contains(&x) && (4..12).contains(&y), "{x},{y}");
                lit += 1;
            }
        }
        assert!(lit > 0);
    }
}
