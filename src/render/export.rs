//! Export rasters built from the session snapshot

use image::RgbaImage;

use crate::capture::ScreenSnapshot;
use crate::domain::ExportKind;

use super::canvas::Canvas;
use super::measurement::draw_measurement;
use super::style::Palette;

/// Build the raster for `kind`.
///
/// Returns `None` when there is nothing to export: a region smaller than
/// 1x1 or one lying entirely outside the snapshot.
pub fn render_export(
    snapshot: &ScreenSnapshot,
    kind: &ExportKind,
    palette: &Palette,
) -> Option<RgbaImage> {
    match kind {
        ExportKind::Region { rect } => {
            if rect.is_degenerate() {
                log::debug!("Skipping region export: {}x{}", rect.width, rect.height);
                return None;
            }
            snapshot.crop(rect)
        }
        ExportKind::RegionWithMeasurement { rect, measure } => {
            if rect.is_degenerate() {
                log::debug!("Skipping region export: {}x{}", rect.width, rect.height);
                return None;
            }
            let clipped = snapshot.clip(rect)?;
            let crop = snapshot.crop(&clipped)?;
            let mut canvas = Canvas::from_image(&crop)?;
            canvas.set_translation(-clipped.x as f32, -clipped.y as f32);
            draw_measurement(&mut canvas, measure, snapshot.origin(), palette);
            canvas.into_image()
        }
        ExportKind::FullScreen { measure } => {
            let mut canvas = Canvas::from_image(snapshot.image())?;
            draw_measurement(&mut canvas, measure, snapshot.origin(), palette);
            canvas.into_image()
        }
    }
}
