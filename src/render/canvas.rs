//! tiny-skia drawing surface over an `RgbaImage`
//!
//! The backdrop is always an opaque screen capture, so the image bytes are
//! valid premultiplied pixels and can be handed to tiny-skia as-is. Every
//! fill composites source-over onto an opaque pixel, so the result stays
//! opaque and converts straight back.

use image::RgbaImage;
use tiny_skia::{
    Color, FillRule, IntSize, Mask, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash,
    Transform,
};

use crate::domain::Rect;

pub struct Canvas {
    pixmap: Pixmap,
    transform: Transform,
    mask: Option<Mask>,
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

fn pixmap_from(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    Pixmap::from_vec(image.as_raw().clone(), size)
}

fn sk_rect(x: f32, y: f32, w: f32, h: f32) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(x, y, w, h)
}

impl Canvas {
    /// Start drawing on a copy of `image`. `None` for an empty image.
    pub fn from_image(image: &RgbaImage) -> Option<Self> {
        Some(Self {
            pixmap: pixmap_from(image)?,
            transform: Transform::identity(),
            mask: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Shift everything drawn afterwards by `(dx, dy)`
    pub fn set_translation(&mut self, dx: f32, dy: f32) {
        self.transform = Transform::from_translate(dx, dy);
    }

    /// Restrict drawing to `rect` (canvas pixels), or lift the restriction
    pub fn set_clip(&mut self, rect: Option<&Rect>) {
        self.mask = rect.and_then(|rect| {
            let mut mask = Mask::new(self.width(), self.height())?;
            let path = PathBuilder::from_rect(sk_rect(
                rect.x as f32,
                rect.y as f32,
                rect.width as f32,
                rect.height as f32,
            )?);
            mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
            Some(mask)
        });
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if let Some(rect) = sk_rect(x, y, w, h) {
            self.pixmap
                .fill_rect(rect, &paint(color), self.transform, self.mask.as_ref());
        }
    }

    /// Outline a rectangle, the stroke centered on its edges
    pub fn stroke_rect(&mut self, rect: &Rect, width: f32, color: Color, dash: Option<&[f32]>) {
        let Some(rect) = sk_rect(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        self.pixmap.stroke_path(
            &path,
            &paint(color),
            &stroke(width, dash),
            self.transform,
            self.mask.as_ref(),
        );
    }

    pub fn stroke_line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
        dash: Option<&[f32]>,
    ) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0, from.1);
        pb.line_to(to.0, to.1);
        let Some(path) = pb.finish() else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &paint(color),
            &stroke(width, dash),
            self.transform,
            self.mask.as_ref(),
        );
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                self.transform,
                self.mask.as_ref(),
            );
        }
    }

    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.0, first.1);
        for p in rest {
            pb.line_to(p.0, p.1);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &paint(color),
                FillRule::Winding,
                self.transform,
                self.mask.as_ref(),
            );
        }
    }

    /// Copy the pixels of `source` under `rect` onto the same place of the
    /// canvas. Ignores translation and clip.
    pub fn blit(&mut self, source: &RgbaImage, rect: &Rect) {
        let bounds = Rect::new(0, 0, source.width(), source.height());
        let Some(rect) = bounds.intersect(rect) else {
            return;
        };
        let patch = image::imageops::crop_imm(
            source,
            rect.x as u32,
            rect.y as u32,
            rect.width,
            rect.height,
        )
        .to_image();
        if let Some(patch) = pixmap_from(&patch) {
            self.pixmap.draw_pixmap(
                rect.x,
                rect.y,
                patch.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }

    pub fn into_image(self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width(), self.height(), self.pixmap.data().to_vec())
    }
}

fn stroke(width: f32, dash: Option<&[f32]>) -> Stroke {
    Stroke {
        width,
        dash: dash.and_then(|pattern| StrokeDash::new(pattern.to_vec(), 0.0)),
        ..Default::default()
    }
}
