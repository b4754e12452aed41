//! Measurement annotation: line, markers, guides and labels

use crate::domain::{Point, Rect, Segment};

use super::canvas::Canvas;
use super::geometry::{dash, font, label, line};
use super::style::Palette;
use super::text::{draw_text, text_size};

/// Text shown next to a measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementLabels {
    /// Euclidean length, one decimal
    pub distance: String,
    pub width: String,
    pub height: String,
    /// Start point in screen coordinates
    pub start: String,
    /// End point in screen coordinates
    pub end: String,
}

impl MeasurementLabels {
    /// `origin` is the screen position of the session's (0, 0), so the
    /// coordinate labels report true screen positions.
    pub fn new(segment: &Segment, origin: Point) -> Self {
        let start = segment.start.offset(origin.x, origin.y);
        let end = segment.end.offset(origin.x, origin.y);
        Self {
            distance: format!("{:.1} px", segment.distance()),
            width: format!("W: {} px", segment.width()),
            height: format!("H: {} px", segment.height()),
            start: format!("({}, {})", start.x, start.y),
            end: format!("({}, {})", end.x, end.y),
        }
    }
}

fn center(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// Draw `segment` (session-local coordinates) onto the canvas. The canvas
/// transform decides where it lands; labels always use `origin` for text.
pub fn draw_measurement(canvas: &mut Canvas, segment: &Segment, origin: Point, palette: &Palette) {
    let (start, end) = (segment.start, segment.end);
    let labels = MeasurementLabels::new(segment, origin);

    if !segment.is_zero_length() {
        canvas.stroke_line(center(start), center(end), line::THICKNESS, palette.line(), None);
        for (tip, from) in [(end, start), (start, end)] {
            if let Some(cap) = line::cap_points(center(tip), center(from)) {
                canvas.fill_polygon(&cap, palette.line());
            }
        }
    }

    for p in [start, end] {
        let (cx, cy) = center(p);
        canvas.fill_circle(cx, cy, line::MARKER_RADIUS, palette.point());
    }

    let corner = (end.x as f32, start.y as f32);
    let guide = Some(&dash::GUIDE[..]);
    canvas.stroke_line(center(start), corner, dash::GUIDE_THICKNESS, palette.guide(), guide);
    canvas.stroke_line(corner, center(end), dash::GUIDE_THICKNESS, palette.guide(), guide);

    // Distance, centered on the midpoint with a bordered plate
    let mid = segment.midpoint();
    let (w, h) = text_size(&labels.distance, font::LARGE);
    let (w, h) = (w as i32, h as i32);
    let (tx, ty) = (mid.x - w / 2, mid.y - h / 2);
    let pad = label::DISTANCE_PADDING;
    let plate = Rect::new(tx - pad, ty - pad, (w + 2 * pad) as u32, (h + 2 * pad) as u32);
    fill_plate(canvas, &plate, palette);
    canvas.stroke_rect(&plate, 1.0, palette.line(), None);
    draw_text(canvas, &labels.distance, tx, ty, font::LARGE, palette.text());

    // Width above the start row, height right of the end point
    let (w, h) = small_size(&labels.width);
    let x = (start.x + end.x) / 2 - w / 2;
    let y = start.y - h - label::WIDTH_GAP;
    fill_plate(canvas, &Rect::new(x - 3, y - 2, (w + 6) as u32, (h + 4) as u32), palette);
    draw_text(canvas, &labels.width, x, y, font::SMALL, palette.guide());

    let (w, h) = small_size(&labels.height);
    let x = end.x + label::HEIGHT_GAP;
    let y = (start.y + end.y) / 2 - h / 2;
    fill_plate(canvas, &Rect::new(x - 3, y - 2, (w + 6) as u32, (h + 4) as u32), palette);
    draw_text(canvas, &labels.height, x, y, font::SMALL, palette.guide());

    for (p, text) in [(start, &labels.start), (end, &labels.end)] {
        let (w, h) = small_size(text);
        let x = p.x - w / 2;
        let y = p.y + label::COORD_OFFSET;
        fill_plate(canvas, &Rect::new(x - 2, y, (w + 4) as u32, (h + 2) as u32), palette);
        draw_text(canvas, text, x, y, font::SMALL, palette.point());
    }
}

fn small_size(text: &str) -> (i32, i32) {
    let (w, h) = text_size(text, font::SMALL);
    (w as i32, h as i32)
}

fn fill_plate(canvas: &mut Canvas, rect: &Rect, palette: &Palette) {
    canvas.fill_rect(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
        palette.plate(),
    );
}
