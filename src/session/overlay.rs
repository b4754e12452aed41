//! One overlay session: snapshot, state machine and export dispatch

use image::RgbaImage;

use crate::capture::{ScreenSnapshot, ScreenSource};
use crate::config::AppConfig;
use crate::domain::{ExportJob, SessionMode};
use crate::error::CaptureError;
use crate::export::{ExportSink, PublishOptions};
use crate::render::{Palette, render_export, render_frame};

use super::events::InputEvent;
use super::state::StateMachine;

/// What the host does after handing the session an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionUpdate {
    /// Re-render and present the live frame
    pub redraw: bool,
    /// Tear the overlay down
    pub closed: bool,
}

/// A running overlay: the frozen snapshot, a config clone and the
/// mode/phase state. Dropping it releases the snapshot.
pub struct OverlaySession {
    machine: StateMachine,
    snapshot: ScreenSnapshot,
    config: AppConfig,
    palette: Palette,
}

impl OverlaySession {
    /// Capture the screen and start a session over it
    pub fn start(
        mode: SessionMode,
        source: &dyn ScreenSource,
        config: AppConfig,
    ) -> Result<Self, CaptureError> {
        let snapshot = ScreenSnapshot::capture(source)?;
        Ok(Self::with_snapshot(mode, snapshot, config))
    }

    pub fn with_snapshot(mode: SessionMode, snapshot: ScreenSnapshot, config: AppConfig) -> Self {
        log::info!(
            "Starting {mode} session over {}x{} at ({}, {})",
            snapshot.width(),
            snapshot.height(),
            snapshot.origin().x,
            snapshot.origin().y
        );
        let palette = Palette::new(config.opacity());
        Self {
            machine: StateMachine::new(mode),
            snapshot,
            config,
            palette,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.machine.mode()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn snapshot(&self) -> &ScreenSnapshot {
        &self.snapshot
    }

    pub fn is_closed(&self) -> bool {
        self.machine.is_closed()
    }

    /// Feed one input event. Any export it triggers is rendered and handed
    /// to `sink` before this returns.
    pub fn handle(&mut self, event: InputEvent, sink: &mut dyn ExportSink) -> SessionUpdate {
        let response = self.machine.handle(event);
        if let Some(job) = response.export {
            self.export(&job, sink);
        }
        if response.close {
            log::debug!("{} session closed", self.mode());
        }
        SessionUpdate {
            redraw: response.redraw,
            closed: response.close,
        }
    }

    /// Compose the live frame for the current phase
    pub fn render_frame(&self) -> RgbaImage {
        render_frame(&self.snapshot, &self.machine, &self.palette)
    }

    fn export(&self, job: &ExportJob, sink: &mut dyn ExportSink) {
        let options = PublishOptions::for_job(job, &self.config);
        if !options.has_destination() {
            log::debug!("Export {:?} has no destination enabled, skipping", job.kind);
            return;
        }
        let Some(raster) = render_export(&self.snapshot, &job.kind, &self.palette) else {
            return;
        };

        let report = sink.publish(&raster, &options);
        for err in &report.failures {
            log::error!("Failed to publish export: {err}");
        }
        log::debug!("Export published: copied={} saved={:?}", report.copied, report.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, Rect};
    use crate::error::PersistenceError;
    use crate::export::PublishReport;
    use image::Rgba;

    #[derive(Default)]
    struct RecordingSink {
        published: Vec<(RgbaImage, PublishOptions)>,
        fail: bool,
    }

    impl ExportSink for RecordingSink {
        fn publish(&mut self, raster: &RgbaImage, options: &PublishOptions) -> PublishReport {
            self.published.push((raster.clone(), options.clone()));
            if self.fail {
                return PublishReport {
                    failures: vec![PersistenceError::Clipboard("busy".to_string())],
                    ..PublishReport::default()
                };
            }
            PublishReport {
                copied: options.to_clipboard,
                ..PublishReport::default()
            }
        }
    }

    fn session(mode: SessionMode, config: AppConfig) -> OverlaySession {
        let image = RgbaImage::from_fn(200, 120, |x, y| Rgba([x as u8, y as u8, 77, 255]));
        OverlaySession::with_snapshot(mode, ScreenSnapshot::new(image, Point::default()), config)
    }

    fn run(
        session: &mut OverlaySession,
        sink: &mut RecordingSink,
        events: &[InputEvent],
    ) -> SessionUpdate {
        let mut last = SessionUpdate::default();
        for event in events {
            last = session.handle(*event, sink);
        }
        last
    }

    #[test]
    fn measure_drag_stays_open_and_publishes_nothing() {
        let mut session = session(SessionMode::Measure, AppConfig::default());
        let mut sink = RecordingSink::default();
        let update = run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(100, 100),
                InputEvent::drag_to(400, 100),
                InputEvent::release(400, 100),
            ],
        );
        assert!(update.redraw);
        assert!(!update.closed);
        assert!(sink.published.is_empty());
        assert_eq!(session.machine().measurement().unwrap().distance(), 300.0);
    }

    #[test]
    fn region_release_publishes_crop_and_closes() {
        let mut session = session(SessionMode::Region, AppConfig::default());
        let mut sink = RecordingSink::default();
        let update = run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(90, 40),
                InputEvent::drag_to(10, 10),
                InputEvent::release(10, 10),
            ],
        );
        assert!(update.closed);
        assert_eq!(sink.published.len(), 1);
        let (raster, options) = &sink.published[0];
        assert_eq!(raster.dimensions(), (80, 30));
        assert_eq!(raster.get_pixel(0, 0), &Rgba([10, 10, 77, 255]));
        assert!(options.to_clipboard && options.to_file);
    }

    #[test]
    fn degenerate_region_closes_without_publish() {
        let mut session = session(SessionMode::Region, AppConfig::default());
        let mut sink = RecordingSink::default();
        let update = run(
            &mut session,
            &mut sink,
            &[InputEvent::press(50, 50), InputEvent::release(50, 50)],
        );
        assert!(update.closed);
        assert!(sink.published.is_empty());
    }

    #[test]
    fn measure_then_region_publishes_annotated_crop() {
        let mut session = session(SessionMode::MeasureThenRegion, AppConfig::default());
        let mut sink = RecordingSink::default();
        let first = run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(0, 0),
                InputEvent::drag_to(150, 75),
                InputEvent::release(150, 75),
            ],
        );
        assert!(!first.closed);
        assert!(sink.published.is_empty());

        let second = run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(10, 10),
                InputEvent::drag_to(90, 40),
                InputEvent::release(90, 40),
            ],
        );
        assert!(second.closed);
        assert_eq!(sink.published.len(), 1);

        let (raster, _) = &sink.published[0];
        let plain = session.snapshot().crop(&Rect::new(10, 10, 80, 30)).unwrap();
        assert_eq!(raster.dimensions(), (80, 30));
        assert_ne!(raster, &plain);
    }

    #[test]
    fn horizontal_measurement_above_region_is_clipped_into_crop() {
        let mut session = session(SessionMode::MeasureThenRegion, AppConfig::default());
        let mut sink = RecordingSink::default();
        run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(0, 0),
                InputEvent::drag_to(100, 0),
                InputEvent::release(100, 0),
                InputEvent::press(10, 10),
                InputEvent::drag_to(90, 40),
                InputEvent::release(90, 40),
            ],
        );
        let (raster, options) = &sink.published[0];
        assert_eq!(raster.dimensions(), (80, 30));
        assert_eq!(options.prefix, crate::domain::FilePrefix::Plain);
        // Distance label plate hangs into the top rows of the crop
        let plain = session.snapshot().crop(&Rect::new(10, 10, 80, 30)).unwrap();
        assert_ne!(raster.get_pixel(40, 1), plain.get_pixel(40, 1));
    }

    #[test]
    fn explicit_copy_ignores_clipboard_preference() {
        let config = AppConfig {
            copy_to_clipboard: false,
            ..AppConfig::default()
        };
        let mut session = session(SessionMode::Region, config);
        let mut sink = RecordingSink::default();
        let update = run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(10, 10),
                InputEvent::drag_to(60, 50),
                InputEvent::ctrl('c'),
            ],
        );
        assert!(!update.closed);
        let (raster, options) = &sink.published[0];
        assert_eq!(raster.dimensions(), (50, 40));
        assert!(options.to_clipboard);
        assert!(!options.to_file);
    }

    #[test]
    fn explicit_save_is_repeatable() {
        let mut session = session(SessionMode::Measure, AppConfig::default());
        let mut sink = RecordingSink::default();
        run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(5, 5),
                InputEvent::drag_to(60, 60),
                InputEvent::release(60, 60),
                InputEvent::ctrl('s'),
                InputEvent::ctrl('S'),
            ],
        );
        assert_eq!(sink.published.len(), 2);
        assert_eq!(sink.published[0].0.dimensions(), (200, 120));
        assert!(!session.is_closed());
    }

    #[test]
    fn nothing_published_without_destination() {
        let config = AppConfig {
            copy_to_clipboard: false,
            auto_save_on_complete: false,
            ..AppConfig::default()
        };
        let mut session = session(SessionMode::Region, config);
        let mut sink = RecordingSink::default();
        let update = run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(10, 10),
                InputEvent::drag_to(60, 50),
                InputEvent::release(60, 50),
            ],
        );
        assert!(update.closed);
        assert!(sink.published.is_empty());
    }

    #[test]
    fn publish_failure_still_closes() {
        let mut session = session(SessionMode::Region, AppConfig::default());
        let mut sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let update = run(
            &mut session,
            &mut sink,
            &[
                InputEvent::press(10, 10),
                InputEvent::drag_to(60, 50),
                InputEvent::release(60, 50),
            ],
        );
        assert!(update.closed);
        assert_eq!(sink.published.len(), 1);
    }

    #[test]
    fn cancel_never_publishes() {
        for mode in [
            SessionMode::Measure,
            SessionMode::MeasureThenRegion,
            SessionMode::Region,
        ] {
            for cancel in [InputEvent::escape(), InputEvent::right_click(3, 3)] {
                let mut session = session(mode, AppConfig::default());
                let mut sink = RecordingSink::default();
                let update = run(
                    &mut session,
                    &mut sink,
                    &[InputEvent::press(10, 10), InputEvent::drag_to(60, 50), cancel],
                );
                assert!(update.closed);
                assert!(sink.published.is_empty(), "{mode}");
            }
        }
    }

    #[test]
    fn live_frame_matches_snapshot_size() {
        let session = session(SessionMode::Region, AppConfig::default());
        assert_eq!(session.render_frame().dimensions(), (200, 120));
    }
}
