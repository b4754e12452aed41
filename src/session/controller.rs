//! Entry point that owns at most one overlay session

use image::RgbaImage;

use crate::capture::ScreenSource;
use crate::config::AppConfig;
use crate::domain::SessionMode;
use crate::error::CaptureError;
use crate::export::ExportSink;

use super::events::InputEvent;
use super::overlay::{OverlaySession, SessionUpdate};

/// Starts overlay sessions and routes input to the active one.
///
/// Starting a session while another is open replaces it; a closed
/// session is released immediately, snapshot included.
pub struct SessionController<K: ExportSink> {
    source: Box<dyn ScreenSource>,
    sink: K,
    config: AppConfig,
    active: Option<OverlaySession>,
}

impl<K: ExportSink> SessionController<K> {
    pub fn new(source: Box<dyn ScreenSource>, sink: K, config: AppConfig) -> Self {
        Self {
            source,
            sink,
            config,
            active: None,
        }
    }

    /// Capture the screen and open a session in `mode`. On failure no
    /// session is active afterwards.
    pub fn start(&mut self, mode: SessionMode) -> Result<&mut OverlaySession, CaptureError> {
        if self.active.take().is_some() {
            log::debug!("Replacing active session");
        }
        let session = OverlaySession::start(mode, self.source.as_ref(), self.config.clone())
            .inspect_err(|err| log::error!("Failed to start {mode} session: {err}"))?;
        Ok(self.active.insert(session))
    }

    pub fn active(&self) -> Option<&OverlaySession> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Route `event` to the active session. `None` when no session is open.
    pub fn handle(&mut self, event: InputEvent) -> Option<SessionUpdate> {
        let session = self.active.as_mut()?;
        let update = session.handle(event, &mut self.sink);
        if update.closed {
            self.active = None;
        }
        Some(update)
    }

    /// Live frame of the active session
    pub fn render_frame(&self) -> Option<RgbaImage> {
        self.active.as_ref().map(OverlaySession::render_frame)
    }
}
