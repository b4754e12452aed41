//! Overlay session state machine
//!
//! The session is keyed by `(SessionMode, Phase)`. The mode is fixed when the
//! session starts; the phase carries the geometry collected so far, so a
//! phase can never hold geometry its mode does not use.
//!
//! | Mode              | Phases                                                    |
//! |-------------------|-----------------------------------------------------------|
//! | Measure           | Idle -> DraggingMeasure -> Measured (re-drag restarts)     |
//! | Region            | Idle -> DraggingRegion -> RegionSelected (export, close)  |
//! | MeasureThenRegion | Idle -> DraggingMeasure -> Measured -> DraggingRegion -> RegionSelected (export, close) |
//!
//! Secondary-button release and Escape close from any phase. Events whose
//! preconditions are not met are ignored.

use crate::domain::{ExportJob, ExportKind, ExportTarget, Point, Segment, SessionMode};
use crate::session::events::{InputEvent, PointerButton};
use crate::session::shortcuts::{Shortcut, handle_key_event};

/// Where a session is in its lifecycle, with the geometry collected so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No geometry yet
    #[default]
    Idle,
    /// Measurement line follows the pointer
    DraggingMeasure { measure: Segment },
    /// Measurement finished. In `MeasureThenRegion` this is the point where
    /// the measurement is frozen and the next drag selects the region.
    Measured { measure: Segment },
    /// Region rectangle follows the pointer. `measure` is only present in
    /// `MeasureThenRegion`.
    DraggingRegion {
        measure: Option<Segment>,
        region: Segment,
    },
    /// Region released and handed off for export. Terminal like `Closed`.
    RegionSelected {
        measure: Option<Segment>,
        region: Segment,
    },
    /// Session is over; every further event is ignored
    Closed,
}

/// What the host has to do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// The live frame changed
    pub redraw: bool,
    /// Build and publish this export
    pub export: Option<ExportJob>,
    /// The session ended; tear the overlay down after running `export`
    pub close: bool,
}

impl Response {
    fn ignored() -> Self {
        Self::default()
    }

    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    fn close() -> Self {
        Self {
            close: true,
            ..Self::default()
        }
    }

    fn export(job: ExportJob, close: bool) -> Self {
        Self {
            redraw: true,
            export: Some(job),
            close,
        }
    }
}

/// Mode and phase of one overlay session
#[derive(Debug, Clone)]
pub struct StateMachine {
    mode: SessionMode,
    phase: Phase,
}

impl StateMachine {
    pub fn new(mode: SessionMode) -> Self {
        Self {
            mode,
            phase: Phase::Idle,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether the session has ended, by cancel or by a completed region
    pub fn is_closed(&self) -> bool {
        matches!(self.phase, Phase::Closed | Phase::RegionSelected { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.phase,
            Phase::DraggingMeasure { .. } | Phase::DraggingRegion { .. }
        )
    }

    /// Measurement line, finished or in progress
    pub fn measurement(&self) -> Option<Segment> {
        match self.phase {
            Phase::DraggingMeasure { measure } | Phase::Measured { measure } => Some(measure),
            Phase::DraggingRegion { measure, .. } | Phase::RegionSelected { measure, .. } => {
                measure
            }
            Phase::Idle | Phase::Closed => None,
        }
    }

    /// Region selection corners, finished or in progress
    pub fn region(&self) -> Option<Segment> {
        match self.phase {
            Phase::DraggingRegion { region, .. } | Phase::RegionSelected { region, .. } => {
                Some(region)
            }
            _ => None,
        }
    }

    /// In `MeasureThenRegion`, whether the measurement has been frozen and
    /// the session now selects the region. Always false in other modes.
    pub fn measurement_complete(&self) -> bool {
        self.mode == SessionMode::MeasureThenRegion
            && matches!(
                self.phase,
                Phase::Measured { .. }
                    | Phase::DraggingRegion { .. }
                    | Phase::RegionSelected { .. }
            )
    }

    /// Consume one input event
    pub fn handle(&mut self, event: InputEvent) -> Response {
        if self.is_closed() {
            return Response::ignored();
        }

        match event {
            InputEvent::PointerDown {
                button: PointerButton::Primary,
                position,
            } => self.pointer_down(position),
            InputEvent::PointerDown { .. } => Response::ignored(),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => self.pointer_up(),
            InputEvent::PointerUp {
                button: PointerButton::Secondary,
                ..
            } => self.cancel(),
            InputEvent::KeyDown { key, modifiers } => match handle_key_event(key, modifiers) {
                Some(Shortcut::Cancel) => self.cancel(),
                Some(Shortcut::Save) => self.explicit_export(ExportTarget::Preferences),
                Some(Shortcut::Copy) => self.explicit_export(ExportTarget::ClipboardOnly),
                None => Response::ignored(),
            },
        }
    }

    fn pointer_down(&mut self, at: Point) -> Response {
        let next = match (self.mode, self.phase) {
            (_, Phase::DraggingMeasure { .. } | Phase::DraggingRegion { .. }) => {
                return Response::ignored();
            }
            (SessionMode::Region, _) => Phase::DraggingRegion {
                measure: None,
                region: Segment::at(at),
            },
            (SessionMode::MeasureThenRegion, Phase::Measured { measure }) => Phase::DraggingRegion {
                measure: Some(measure),
                region: Segment::at(at),
            },
            (SessionMode::Measure | SessionMode::MeasureThenRegion, _) => {
                Phase::DraggingMeasure {
                    measure: Segment::at(at),
                }
            }
        };
        self.phase = next;
        Response::redraw()
    }

    fn pointer_move(&mut self, to: Point) -> Response {
        match &mut self.phase {
            Phase::DraggingMeasure { measure } => measure.end = to,
            Phase::DraggingRegion { region, .. } => region.end = to,
            _ => return Response::ignored(),
        }
        Response::redraw()
    }

    fn pointer_up(&mut self) -> Response {
        match (self.mode, self.phase) {
            (_, Phase::DraggingMeasure { measure }) => {
                self.phase = Phase::Measured { measure };
                Response::redraw()
            }
            (mode, Phase::DraggingRegion { measure, region }) => {
                self.phase = Phase::RegionSelected { measure, region };
                let kind = match (mode, measure) {
                    (SessionMode::MeasureThenRegion, Some(measure)) => {
                        ExportKind::RegionWithMeasurement {
                            rect: region.rect(),
                            measure,
                        }
                    }
                    _ => ExportKind::Region {
                        rect: region.rect(),
                    },
                };
                Response::export(
                    ExportJob {
                        kind,
                        target: ExportTarget::Preferences,
                    },
                    true,
                )
            }
            _ => Response::ignored(),
        }
    }

    fn cancel(&mut self) -> Response {
        self.phase = Phase::Closed;
        Response::close()
    }

    /// Export picked by Ctrl+S / Ctrl+C from whatever geometry exists.
    ///
    /// A region wins in `Region` mode, and in `MeasureThenRegion` once the
    /// measurement is frozen; otherwise any measurement exports the whole
    /// screen with the line drawn on it.
    fn explicit_export(&self, target: ExportTarget) -> Response {
        let rect = self.region().map(|r| r.rect());
        let kind = match (self.mode, rect, self.measurement()) {
            (SessionMode::Region, Some(rect), _) => ExportKind::Region { rect },
            (SessionMode::MeasureThenRegion, Some(rect), Some(measure))
                if self.measurement_complete() =>
            {
                ExportKind::RegionWithMeasurement { rect, measure }
            }
            (_, _, Some(measure)) => ExportKind::FullScreen { measure },
            _ => return Response::ignored(),
        };
        Response::export(ExportJob { kind, target }, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rect;

    fn drag(machine: &mut StateMachine, from: (i32, i32), to: (i32, i32)) -> Response {
        machine.handle(InputEvent::press(from.0, from.1));
        machine.handle(InputEvent::drag_to(to.0, to.1));
        machine.handle(InputEvent::release(to.0, to.1))
    }

    #[test]
    fn measure_mode_stays_open_after_drag() {
        let mut machine = StateMachine::new(SessionMode::Measure);
        let response = drag(&mut machine, (100, 100), (400, 100));
        assert!(!response.close);
        assert!(response.export.is_none());
        assert_eq!(
            machine.phase(),
            &Phase::Measured {
                measure: Segment::new(Point::new(100, 100), Point::new(400, 100))
            }
        );

        // A new drag replaces the measurement
        machine.handle(InputEvent::press(5, 5));
        assert_eq!(
            machine.measurement(),
            Some(Segment::at(Point::new(5, 5)))
        );
        assert!(machine.is_dragging());
    }

    #[test]
    fn region_mode_exports_and_closes_on_release() {
        let mut machine = StateMachine::new(SessionMode::Region);
        machine.handle(InputEvent::press(90, 40));
        assert_eq!(machine.region(), Some(Segment::at(Point::new(90, 40))));
        let response = {
            machine.handle(InputEvent::drag_to(10, 10));
            machine.handle(InputEvent::release(10, 10))
        };
        assert!(response.close);
        assert_eq!(
            response.export,
            Some(ExportJob {
                kind: ExportKind::Region {
                    rect: Rect::new(10, 10, 80, 30)
                },
                target: ExportTarget::Preferences,
            })
        );
        assert!(machine.is_closed());
    }

    #[test]
    fn measure_then_region_two_phases() {
        let mut machine = StateMachine::new(SessionMode::MeasureThenRegion);
        let first = drag(&mut machine, (0, 0), (100, 0));
        assert!(!first.close);
        assert!(first.export.is_none());
        assert!(machine.measurement_complete());

        let second = drag(&mut machine, (10, 10), (90, 40));
        assert!(second.close);
        assert_eq!(
            second.export.map(|job| job.kind),
            Some(ExportKind::RegionWithMeasurement {
                rect: Rect::new(10, 10, 80, 30),
                measure: Segment::new(Point::new(0, 0), Point::new(100, 0)),
            })
        );
    }

    #[test]
    fn release_before_measurement_complete_never_exports() {
        let mut machine = StateMachine::new(SessionMode::MeasureThenRegion);
        machine.handle(InputEvent::press(3, 3));
        assert!(!machine.measurement_complete());
        let response = machine.handle(InputEvent::release(3, 3));
        assert!(response.export.is_none());
        assert!(!response.close);
        assert!(machine.measurement_complete());
    }

    #[test]
    fn cancel_from_every_phase_closes_without_export() {
        let scripts: Vec<Vec<InputEvent>> = vec![
            vec![],
            vec![InputEvent::press(1, 1)],
            vec![InputEvent::press(1, 1), InputEvent::release(9, 9)],
            vec![
                InputEvent::press(1, 1),
                InputEvent::release(9, 9),
                InputEvent::press(2, 2),
                InputEvent::drag_to(20, 20),
            ],
        ];
        for mode in [
            SessionMode::Measure,
            SessionMode::MeasureThenRegion,
            SessionMode::Region,
        ] {
            for script in &scripts {
                for cancel in [InputEvent::escape(), InputEvent::right_click(0, 0)] {
                    let mut machine = StateMachine::new(mode);
                    for event in script {
                        machine.handle(*event);
                    }
                    if machine.is_closed() {
                        continue;
                    }
                    let response = machine.handle(cancel);
                    assert!(response.close, "{mode} {script:?}");
                    assert!(response.export.is_none());
                    assert!(machine.is_closed());
                }
            }
        }
    }

    #[test]
    fn out_of_order_input_is_ignored() {
        let mut machine = StateMachine::new(SessionMode::Region);
        assert_eq!(machine.handle(InputEvent::drag_to(5, 5)), Response::default());
        assert_eq!(machine.handle(InputEvent::release(5, 5)), Response::default());
        assert_eq!(machine.handle(InputEvent::ctrl('s')), Response::default());
        assert_eq!(
            machine.handle(InputEvent::PointerDown {
                button: PointerButton::Secondary,
                position: Point::new(1, 1)
            }),
            Response::default()
        );
        assert_eq!(machine.phase(), &Phase::Idle);

        machine.handle(InputEvent::escape());
        assert_eq!(machine.handle(InputEvent::press(1, 1)), Response::default());
        assert!(machine.is_closed());
    }

    #[test]
    fn explicit_save_resolves_by_mode_and_keeps_session_open() {
        let mut measure = StateMachine::new(SessionMode::Measure);
        drag(&mut measure, (0, 0), (30, 40));
        let response = measure.handle(InputEvent::ctrl('s'));
        assert!(!response.close);
        assert_eq!(
            response.export,
            Some(ExportJob {
                kind: ExportKind::FullScreen {
                    measure: Segment::new(Point::new(0, 0), Point::new(30, 40))
                },
                target: ExportTarget::Preferences,
            })
        );
        // repeatable
        assert!(measure.handle(InputEvent::ctrl('s')).export.is_some());
        assert!(!measure.is_closed());

        // Measure-then-region before a region is dragged saves the full screen
        let mut mtr = StateMachine::new(SessionMode::MeasureThenRegion);
        drag(&mut mtr, (0, 0), (30, 40));
        assert!(matches!(
            mtr.handle(InputEvent::ctrl('s')).export.map(|j| j.kind),
            Some(ExportKind::FullScreen { .. })
        ));

        // ... and the region with the measurement while one is being dragged
        mtr.handle(InputEvent::press(5, 5));
        mtr.handle(InputEvent::drag_to(25, 15));
        assert_eq!(
            mtr.handle(InputEvent::ctrl('s')).export.map(|j| j.kind),
            Some(ExportKind::RegionWithMeasurement {
                rect: Rect::new(5, 5, 20, 10),
                measure: Segment::new(Point::new(0, 0), Point::new(30, 40)),
            })
        );
        assert!(mtr.is_dragging());
    }

    #[test]
    fn explicit_copy_targets_clipboard() {
        let mut machine = StateMachine::new(SessionMode::Region);
        machine.handle(InputEvent::press(10, 10));
        machine.handle(InputEvent::drag_to(60, 30));
        let response = machine.handle(InputEvent::ctrl('c'));
        assert!(!response.close);
        assert_eq!(
            response.export,
            Some(ExportJob {
                kind: ExportKind::Region {
                    rect: Rect::new(10, 10, 50, 20)
                },
                target: ExportTarget::ClipboardOnly,
            })
        );
    }

    #[test]
    fn zero_length_drag_is_still_a_measurement() {
        let mut machine = StateMachine::new(SessionMode::Measure);
        drag(&mut machine, (7, 7), (7, 7));
        let measure = machine.measurement().unwrap();
        assert_eq!(measure.distance(), 0.0);
        assert!(machine.handle(InputEvent::ctrl('s')).export.is_some());
    }
}
