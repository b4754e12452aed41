//! eframe window hosting one overlay session

use eframe::egui;
use image::RgbaImage;

use crate::domain::{Point, Rect};
use crate::export::ExportSink;
use crate::session::{InputEvent, Key, Modifiers, PointerButton, SessionController};

const TEXTURE_NAME: &str = "measuring-stick-frame";

/// Window position and size in points for `bounds` given in pixels
pub fn window_geometry(bounds: &Rect, native_pixels_per_point: f32) -> (egui::Pos2, egui::Vec2) {
    let scale = if native_pixels_per_point > 0.0 {
        native_pixels_per_point
    } else {
        1.0
    };
    (
        egui::pos2(bounds.x as f32 / scale, bounds.y as f32 / scale),
        egui::vec2(bounds.width as f32 / scale, bounds.height as f32 / scale),
    )
}

/// Viewport covering `bounds`, borderless and above other windows.
/// Sized for a scale factor of 1; the app refits it once the native
/// scale is known.
pub fn viewport(bounds: &Rect) -> egui::ViewportBuilder {
    let (position, size) = window_geometry(bounds, 1.0);
    egui::ViewportBuilder::default()
        .with_title("MeasuringStick")
        .with_decorations(false)
        .with_always_on_top()
        .with_resizable(false)
        .with_position(position)
        .with_inner_size(size)
}

/// Maps window points onto the pixels of the frame painted over `area`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapping {
    area: egui::Rect,
    scale: egui::Vec2,
}

impl PointerMapping {
    pub fn new(area: egui::Rect, frame_size: [usize; 2]) -> Self {
        let scale = if area.width() > 0.0 && area.height() > 0.0 {
            egui::vec2(
                frame_size[0] as f32 / area.width(),
                frame_size[1] as f32 / area.height(),
            )
        } else {
            egui::Vec2::splat(1.0)
        };
        Self { area, scale }
    }

    pub fn area(&self) -> egui::Rect {
        self.area
    }

    pub fn pixel_at(&self, pos: egui::Pos2) -> Point {
        let local = pos - self.area.min;
        Point::new(
            (local.x * self.scale.x).floor() as i32,
            (local.y * self.scale.y).floor() as i32,
        )
    }
}

/// Convert one egui event into a session event, positions mapped onto
/// frame pixels
pub fn translate_event(event: &egui::Event, mapping: &PointerMapping) -> Option<InputEvent> {
    match event {
        egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove {
            position: mapping.pixel_at(*pos),
        }),
        egui::Event::PointerButton {
            pos,
            button,
            pressed,
            ..
        } => {
            let button = match button {
                egui::PointerButton::Primary => PointerButton::Primary,
                egui::PointerButton::Secondary => PointerButton::Secondary,
                _ => return None,
            };
            let position = mapping.pixel_at(*pos);
            Some(if *pressed {
                InputEvent::PointerDown { button, position }
            } else {
                InputEvent::PointerUp { button, position }
            })
        }
        egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            modifiers,
            ..
        } => {
            let modifiers = Modifiers {
                control: modifiers.ctrl || modifiers.command,
            };
            let key = match key {
                egui::Key::Escape => Key::Escape,
                egui::Key::S => Key::Character('s'),
                _ => Key::Other,
            };
            Some(InputEvent::KeyDown { key, modifiers })
        }
        // egui reports Ctrl+C as a copy command rather than a key press
        egui::Event::Copy => Some(InputEvent::ctrl('c')),
        _ => None,
    }
}

fn color_image(frame: &RgbaImage) -> egui::ColorImage {
    egui::ColorImage::from_rgba_unmultiplied(
        [frame.width() as usize, frame.height() as usize],
        frame.as_raw(),
    )
}

/// Overlay window. Closes itself when the session ends.
pub struct OverlayApp<K: ExportSink> {
    controller: SessionController<K>,
    texture: Option<egui::TextureHandle>,
    dirty: bool,
    /// Snapshot area in screen pixels
    bounds: Rect,
    fitted: bool,
}

impl<K: ExportSink> OverlayApp<K> {
    /// `controller` must already hold an active session
    pub fn new(controller: SessionController<K>) -> Self {
        let bounds = controller
            .active()
            .map(|session| session.snapshot().bounds_on_screen())
            .unwrap_or_default();
        Self {
            controller,
            texture: None,
            dirty: true,
            bounds,
            fitted: false,
        }
    }

    fn frame_size(&self) -> [usize; 2] {
        [self.bounds.width as usize, self.bounds.height as usize]
    }

    /// Shrink the window to the snapshot's size in points on scaled displays
    fn fit_window(&mut self, ctx: &egui::Context) {
        if self.fitted {
            return;
        }
        let Some(native) = ctx.input(|i| i.viewport().native_pixels_per_point) else {
            return;
        };
        self.fitted = true;
        if (native - 1.0).abs() > f32::EPSILON {
            let (position, size) = window_geometry(&self.bounds, native);
            log::debug!("Refitting overlay window for scale factor {native}");
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(position));
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
        }
    }

    fn close(&mut self, ctx: &egui::Context) {
        self.texture = None;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }

    fn upload_frame(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.controller.render_frame() else {
            return;
        };
        let image = color_image(&frame);
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture(TEXTURE_NAME, image, egui::TextureOptions::NEAREST));
            }
        }
        self.dirty = false;
    }
}

impl<K: ExportSink> eframe::App for OverlayApp<K> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.fit_window(ctx);

        let mapping = PointerMapping::new(ctx.screen_rect(), self.frame_size());
        let events: Vec<InputEvent> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| translate_event(e, &mapping))
                .collect()
        });

        for event in events {
            match self.controller.handle(event) {
                Some(update) => {
                    self.dirty |= update.redraw;
                    if update.closed {
                        self.close(ctx);
                        return;
                    }
                }
                None => {
                    self.close(ctx);
                    return;
                }
            }
        }

        if !self.controller.is_active() {
            self.close(ctx);
            return;
        }

        if self.dirty || self.texture.is_none() {
            self.upload_frame(ctx);
        }

        ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if let Some(texture) = &self.texture {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter()
                        .image(texture.id(), mapping.area(), uv, egui::Color32::WHITE);
                }
            });
    }
}
