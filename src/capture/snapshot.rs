//! Immutable virtual-screen snapshot owned by an overlay session

use image::RgbaImage;

use super::screen::ScreenSource;
use crate::domain::{Point, Rect};
use crate::error::CaptureError;

/// The whole virtual screen as captured at session start.
///
/// Rendering and export read from this buffer instead of the live screen,
/// so the backdrop stays stable while windows underneath change. The
/// buffer is never mutated after construction; cropping returns a copy.
#[derive(Debug)]
pub struct ScreenSnapshot {
    image: RgbaImage,
    /// Top-left of the captured area in screen coordinates
    origin: Point,
}

impl ScreenSnapshot {
    /// Wrap an already captured image. Pixels are forced opaque; renderers
    /// hand the bytes to tiny-skia as premultiplied color.
    pub fn new(mut image: RgbaImage, origin: Point) -> Self {
        for pixel in image.pixels_mut() {
            pixel[3] = 255;
        }
        Self { image, origin }
    }

    /// Capture every pixel of the source's virtual screen, exactly once
    pub fn capture(source: &dyn ScreenSource) -> Result<Self, CaptureError> {
        let bounds = source.virtual_bounds()?;
        if bounds.is_degenerate() {
            return Err(CaptureError::NoDisplays);
        }

        let image = source.capture(bounds)?;
        if image.width() != bounds.width || image.height() != bounds.height {
            return Err(CaptureError::SizeMismatch {
                width: bounds.width,
                height: bounds.height,
                actual_width: image.width(),
                actual_height: image.height(),
            });
        }

        log::debug!(
            "Screen snapshot captured: {}x{} pixels at ({}, {})",
            bounds.width,
            bounds.height,
            bounds.x,
            bounds.y
        );
        Ok(Self::new(image, Point::new(bounds.x, bounds.y)))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Screen position of the snapshot's (0, 0) pixel
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The snapshot area in session-local coordinates
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// The captured area in screen coordinates
    pub fn bounds_on_screen(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width(), self.height())
    }

    /// Clip `rect` to the snapshot, `None` if nothing of it is inside
    pub fn clip(&self, rect: &Rect) -> Option<Rect> {
        self.bounds().intersect(rect)
    }

    /// Copy the pixels under `rect`, clipped to the snapshot
    pub fn crop(&self, rect: &Rect) -> Option<RgbaImage> {
        let clipped = self.clip(rect)?;
        Some(
            image::imageops::crop_imm(
                &self.image,
                clipped.x as u32,
                clipped.y as u32,
                clipped.width,
                clipped.height,
            )
            .to_image(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    struct FakeScreen {
        bounds: Rect,
        image_size: (u32, u32),
    }

    impl ScreenSource for FakeScreen {
        fn virtual_bounds(&self) -> Result<Rect, CaptureError> {
            Ok(self.bounds)
        }

        fn capture(&self, _bounds: Rect) -> Result<RgbaImage, CaptureError> {
            Ok(RgbaImage::from_fn(self.image_size.0, self.image_size.1, |x, y| {
                Rgba([x as u8, y as u8, 0, 0])
            }))
        }
    }

    #[test]
    fn capture_keeps_origin_and_forces_opaque() {
        let screen = FakeScreen {
            bounds: Rect::new(-1920, 0, 40, 30),
            image_size: (40, 30),
        };
        let snapshot = ScreenSnapshot::capture(&screen).unwrap();
        assert_eq!(snapshot.origin(), Point::new(-1920, 0));
        assert_eq!(snapshot.bounds_on_screen(), Rect::new(-1920, 0, 40, 30));
        assert!(snapshot.image().pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn capture_rejects_wrong_size() {
        let screen = FakeScreen {
            bounds: Rect::new(0, 0, 40, 30),
            image_size: (20, 30),
        };
        assert!(matches!(
            ScreenSnapshot::capture(&screen),
            Err(CaptureError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn capture_rejects_empty_screen() {
        let screen = FakeScreen {
            bounds: Rect::new(0, 0, 0, 0),
            image_size: (0, 0),
        };
        assert!(matches!(
            ScreenSnapshot::capture(&screen),
            Err(CaptureError::NoDisplays)
        ));
    }

    #[test]
    fn crop_clips_and_leaves_buffer_untouched() {
        let image = RgbaImage::from_fn(50, 40, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let snapshot = ScreenSnapshot::new(image.clone(), Point::default());

        let crop = snapshot.crop(&Rect::new(40, 30, 20, 20)).unwrap();
        assert_eq!(crop.dimensions(), (10, 10));
        assert_eq!(crop.get_pixel(0, 0), &Rgba([40, 30, 7, 255]));

        assert!(snapshot.crop(&Rect::new(60, 60, 5, 5)).is_none());
        assert_eq!(snapshot.image(), &image);
    }
}
