//! Live overlay frame
//!
//! Everything is drawn from the session snapshot; the live screen is never
//! read again after capture.

use image::RgbaImage;

use crate::capture::ScreenSnapshot;
use crate::domain::{Rect, SessionMode};
use crate::session::state::{Phase, StateMachine};

use super::canvas::Canvas;
use super::geometry::{dash, font, label};
use super::measurement::draw_measurement;
use super::style::{self, Palette};
use super::text::{draw_text, text_size};

const MEASURE_START: &str = "Click and drag to measure | Right-click or ESC to cancel";
const MEASURE_DRAGGING: &str = "Release to finish | Right-click or ESC to cancel";
const MEASURE_DONE: &str = "Right-click or ESC to close";
const REGION_START: &str = "Click and drag to select region | Right-click or ESC to cancel";
const REGION_DRAGGING: &str = "Release to capture | Right-click or ESC to cancel";
const REGION_DONE: &str = "Ctrl+C to copy | Ctrl+S to save | Right-click or ESC to close";
const MEASUREMENT_DRAGGING: &str = "Release to set measurement | Right-click or ESC to cancel";
const MEASUREMENT_DONE: &str = "Now drag to select screenshot region | Right-click or ESC to cancel";

/// One-line hint for the current mode and phase
pub fn instruction(machine: &StateMachine) -> &'static str {
    let phase = machine.phase();
    match machine.mode() {
        SessionMode::Measure => match phase {
            Phase::DraggingMeasure { .. } => MEASURE_DRAGGING,
            Phase::Measured { .. } => MEASURE_DONE,
            _ => MEASURE_START,
        },
        SessionMode::Region => region_instruction(phase, REGION_START),
        SessionMode::MeasureThenRegion if machine.measurement_complete() => {
            region_instruction(phase, MEASUREMENT_DONE)
        }
        SessionMode::MeasureThenRegion => match phase {
            Phase::DraggingMeasure { .. } => MEASUREMENT_DRAGGING,
            _ => MEASURE_START,
        },
    }
}

fn region_instruction(phase: &Phase, idle: &'static str) -> &'static str {
    match phase {
        Phase::DraggingRegion { .. } => REGION_DRAGGING,
        Phase::RegionSelected { .. } => REGION_DONE,
        _ => idle,
    }
}

/// Compose the frame shown by the overlay window
pub fn render_frame(snapshot: &ScreenSnapshot, machine: &StateMachine, palette: &Palette) -> RgbaImage {
    let Some(mut canvas) = Canvas::from_image(snapshot.image()) else {
        return snapshot.image().clone();
    };
    let origin = snapshot.origin();
    let measurement = machine.measurement();
    let region = machine.region().map(|r| r.rect());

    match machine.mode() {
        SessionMode::Measure => {
            if let Some(m) = &measurement {
                draw_measurement(&mut canvas, m, origin, palette);
                draw_banner(&mut canvas, instruction(machine), palette.plate(), palette.text());
            } else {
                draw_banner(&mut canvas, instruction(machine), banner_plate(), banner_text());
            }
        }
        SessionMode::Region => {
            dim(&mut canvas, style::REGION_DIM_ALPHA);
            if let Some(rect) = &region {
                reveal(&mut canvas, snapshot, rect);
                draw_selection(&mut canvas, rect, palette);
            }
            draw_banner(&mut canvas, instruction(machine), banner_plate(), banner_text());
        }
        SessionMode::MeasureThenRegion => {
            if let Some(m) = &measurement {
                draw_measurement(&mut canvas, m, origin, palette);
            }
            if machine.measurement_complete() {
                dim(&mut canvas, style::MEASURED_DIM_ALPHA);
                if let Some(m) = &measurement {
                    draw_measurement(&mut canvas, m, origin, palette);
                }
                if let Some(rect) = &region {
                    if !rect.is_degenerate() {
                        reveal(&mut canvas, snapshot, rect);
                        if let Some(m) = &measurement {
                            canvas.set_clip(Some(rect));
                            draw_measurement(&mut canvas, m, origin, palette);
                            canvas.set_clip(None);
                        }
                    }
                    draw_selection(&mut canvas, rect, palette);
                }
            }
            draw_banner(&mut canvas, instruction(machine), banner_plate(), banner_text());
        }
    }

    canvas
        .into_image()
        .unwrap_or_else(|| snapshot.image().clone())
}

fn banner_plate() -> tiny_skia::Color {
    style::black(style::PLATE_ALPHA)
}

fn banner_text() -> tiny_skia::Color {
    tiny_skia::Color::WHITE
}

fn dim(canvas: &mut Canvas, alpha: u8) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    canvas.fill_rect(0.0, 0.0, w, h, style::black(alpha));
}

/// Show the undimmed snapshot inside the selection
fn reveal(canvas: &mut Canvas, snapshot: &ScreenSnapshot, rect: &Rect) {
    if !rect.is_degenerate() {
        canvas.blit(snapshot.image(), rect);
    }
}

fn draw_selection(canvas: &mut Canvas, rect: &Rect, palette: &Palette) {
    canvas.stroke_rect(
        rect,
        dash::SELECTION_THICKNESS,
        palette.selection(),
        Some(&dash::SELECTION[..]),
    );

    let text = format!("{} x {}", rect.width, rect.height);
    let (w, h) = text_size(&text, font::SMALL);
    let x = rect.x + rect.width as i32 / 2 - w as i32 / 2;
    let y = rect.bottom() + label::SIZE_GAP;
    canvas.fill_rect(
        (x - 5) as f32,
        y as f32,
        (w + 10) as f32,
        (h + 4) as f32,
        style::black(style::PLATE_ALPHA),
    );
    draw_text(canvas, &text, x, y + 2, font::SMALL, tiny_skia::Color::WHITE);
}

fn draw_banner(canvas: &mut Canvas, text: &str, plate: tiny_skia::Color, color: tiny_skia::Color) {
    let (w, h) = text_size(text, font::SMALL);
    canvas.fill_rect(
        (label::BANNER_X - 5) as f32,
        (label::BANNER_Y - 3) as f32,
        (w + 10) as f32,
        (h + 6) as f32,
        plate,
    );
    draw_text(canvas, text, label::BANNER_X, label::BANNER_Y, font::SMALL, color);
}
