//! Platform screen access

use image::RgbaImage;
use xcap::Monitor;

use crate::domain::Rect;
use crate::error::CaptureError;

/// Something that can report and capture the virtual screen
pub trait ScreenSource {
    /// Union of all display areas, in screen coordinates
    fn virtual_bounds(&self) -> Result<Rect, CaptureError>;

    /// Capture every pixel inside `bounds` into one buffer of the same size
    fn capture(&self, bounds: Rect) -> Result<RgbaImage, CaptureError>;
}

/// Screen source backed by xcap, one capture per monitor composited
/// into a single virtual-screen buffer
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapScreen;

struct MonitorArea {
    monitor: Monitor,
    rect: Rect,
}

fn platform(err: xcap::XCapError) -> CaptureError {
    CaptureError::Platform(err.to_string())
}

impl XcapScreen {
    fn monitors() -> Result<Vec<MonitorArea>, CaptureError> {
        let monitors = Monitor::all().map_err(platform)?;
        let mut areas = Vec::with_capacity(monitors.len());
        for monitor in monitors {
            let rect = Rect::new(
                monitor.x().map_err(platform)?,
                monitor.y().map_err(platform)?,
                monitor.width().map_err(platform)?,
                monitor.height().map_err(platform)?,
            );
            areas.push(MonitorArea { monitor, rect });
        }
        if areas.is_empty() {
            return Err(CaptureError::NoDisplays);
        }
        Ok(areas)
    }
}

/// Smallest rectangle covering all `rects`
fn union(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    rects.into_iter().fold(None, |acc, r| {
        Some(match acc {
            None => r,
            Some(acc) => {
                let left = acc.x.min(r.x);
                let top = acc.y.min(r.y);
                let right = acc.right().max(r.right());
                let bottom = acc.bottom().max(r.bottom());
                Rect::new(left, top, (right - left) as u32, (bottom - top) as u32)
            }
        })
    })
}

impl ScreenSource for XcapScreen {
    fn virtual_bounds(&self) -> Result<Rect, CaptureError> {
        let areas = Self::monitors()?;
        union(areas.iter().map(|a| a.rect)).ok_or(CaptureError::NoDisplays)
    }

    fn capture(&self, bounds: Rect) -> Result<RgbaImage, CaptureError> {
        let mut canvas = RgbaImage::new(bounds.width, bounds.height);

        for area in Self::monitors()? {
            let shot = area.monitor.capture_image().map_err(platform)?;
            let (width, height) = (shot.width(), shot.height());
            let Some(shot) = RgbaImage::from_raw(width, height, shot.into_raw()) else {
                return Err(CaptureError::Platform(
                    "monitor capture returned a malformed buffer".to_string(),
                ));
            };
            log::debug!(
                "Captured monitor at ({}, {}): {}x{}",
                area.rect.x,
                area.rect.y,
                width,
                height
            );
            image::imageops::replace(
                &mut canvas,
                &shot,
                i64::from(area.rect.x - bounds.x),
                i64::from(area.rect.y - bounds.y),
            );
        }

        Ok(canvas)
    }
}
