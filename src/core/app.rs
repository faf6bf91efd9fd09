//! Sky map application state machine
//!
//! Owns the store, the selection gesture, the interaction mode and the
//! drawing surface. [`App::update`] is the single entry point for input:
//! it routes pointer events by mode, mutates the store, repaints the whole
//! surface after any change and hands scans back to the host as commands.

use crate::config::SkyMapConfig;
use crate::domain::{InteractionMode, PointerEvent, ScreenPoint, SelectionRect, Size, View};
use crate::hit_test::hit_test;
use crate::render::{RenderInput, SkySurface, draw_sky_map};
use crate::session::{Command, Msg, SkyMapState};
use crate::widget::tooltip::{self, MonospaceMeasure, TooltipMeasure};
use crate::widget::SelectionController;

pub struct App {
    config: SkyMapConfig,
    state: SkyMapState,
    selection: SelectionController,
    mode: InteractionMode,
    surface: SkySurface,
    /// Top-left of the drawing surface within the viewport
    surface_origin: ScreenPoint,
    viewport: Size,
    measure: Box<dyn TooltipMeasure + Send>,
    frames: u64,
}

impl App {
    pub fn new(config: SkyMapConfig) -> Self {
        let surface = SkySurface::new(config.surface_size.into());
        let mut app = Self {
            state: SkyMapState::new(config.initial_view),
            selection: SelectionController::new(),
            mode: InteractionMode::default(),
            surface,
            surface_origin: ScreenPoint::default(),
            viewport: config.viewport_size.into(),
            measure: Box::new(MonospaceMeasure::default()),
            frames: 0,
            config,
        };
        app.redraw();
        app
    }

    /// Replace the tooltip size measurement
    pub fn with_measure(mut self, measure: impl TooltipMeasure + Send + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn state(&self) -> &SkyMapState {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn surface(&self) -> &SkySurface {
        &self.surface
    }

    pub fn config(&self) -> &SkyMapConfig {
        &self.config
    }

    /// Rectangle of the selection gesture in progress
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.selection.rect()
    }

    /// Number of full repaints so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn update(&mut self, msg: Msg) -> Command {
        let (changed, command) = match msg {
            Msg::Pointer(PointerEvent::Up(_)) => self.handle_release(),
            Msg::Pointer(event) => (self.handle_pointer(event), Command::None),
            Msg::SetMode(mode) => (self.set_mode(mode), Command::None),
            Msg::SubmitView(view) => (true, self.start_scan(view)),
            Msg::SurfaceResized { origin, size } => {
                self.surface_origin = origin;
                self.surface.resize(size);
                (true, Command::None)
            }
            Msg::ViewportResized(size) => {
                self.viewport = size;
                (false, Command::None)
            }
            Msg::HighlightAnomaly(id) => (self.state.highlight(id), Command::None),
            Msg::ScanFinished { seq, outcome } => {
                (self.state.finish_scan(seq, outcome), Command::None)
            }
        };

        if changed {
            self.redraw();
        }
        command
    }

    fn to_local(&self, client: ScreenPoint) -> ScreenPoint {
        client.translate(-self.surface_origin.x, -self.surface_origin.y)
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down(client) => {
                let started = self.selection.press(
                    self.to_local(client),
                    self.mode.is_selecting(),
                    self.state.scan_in_flight(),
                );
                if started {
                    log::debug!("Selection started at {:?}", client);
                    self.state.clear_tooltip();
                }
                started
            }
            PointerEvent::Move(client) => {
                if self.selection.is_dragging() {
                    self.selection.drag(self.to_local(client));
                    return true;
                }
                match self.mode {
                    InteractionMode::Hover => self.update_hover(client),
                    InteractionMode::Select => false,
                }
            }
            PointerEvent::Leave => {
                let aborted = self.selection.leave();
                if aborted {
                    log::debug!("Selection aborted: pointer left the surface");
                }
                let hidden = self.state.clear_tooltip();
                aborted || hidden
            }
            PointerEvent::Up(_) => false,
        }
    }

    fn update_hover(&mut self, client: ScreenPoint) -> bool {
        let hit = hit_test(
            self.to_local(client),
            self.state.view(),
            self.surface.size(),
            self.state.result(),
        );
        match hit {
            Some(object) => {
                let content = object.tooltip_text();
                let size = self.measure.measure(&content);
                let at = tooltip::place(client, size, self.viewport);
                self.state.show_tooltip(content, at);
                true
            }
            None => self.state.clear_tooltip(),
        }
    }

    fn handle_release(&mut self) -> (bool, Command) {
        if !self.selection.is_dragging() {
            return (false, Command::None);
        }
        match self.selection.release(self.state.view(), self.surface.size()) {
            Some(view) => {
                log::debug!(
                    "Selection committed: ra={} dec={} radius={}",
                    view.center_ra(),
                    view.center_dec(),
                    view.radius_deg()
                );
                (true, self.start_scan(view))
            }
            None => (true, Command::None),
        }
    }

    fn set_mode(&mut self, mode: InteractionMode) -> bool {
        if mode == self.mode {
            return false;
        }
        self.mode = mode;
        self.selection.leave();
        self.state.clear_tooltip();
        true
    }

    fn start_scan(&mut self, view: View) -> Command {
        let ticket = self.state.begin_scan(view, self.config.scan_limit);
        log::debug!("Issuing scan #{}: {:?}", ticket.seq, ticket.request);
        self.set_mode(InteractionMode::Hover);
        Command::Scan(ticket)
    }

    fn redraw(&mut self) {
        let input = RenderInput {
            view: self.state.view(),
            result: self.state.result(),
            selection: self.selection.rect(),
            highlighted: self.state.highlighted(),
            theme: &self.config.theme,
        };
        draw_sky_map(&mut self.surface, &input);
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dimensions;
    use crate::core::scan::ScanError;
    use crate::domain::{Anomaly, FieldStar, ObjectId, ScanResult};
    use crate::session::ScanStatus;

    fn config() -> SkyMapConfig {
        SkyMapConfig {
            surface_size: Dimensions {
                width: 400,
                height: 400,
            },
            viewport_size: Dimensions {
                width: 1000,
                height: 800,
            },
            ..Default::default()
        }
    }

    /// App whose surface sits at (100, 50) in the viewport
    fn app() -> App {
        let mut app = App::new(config());
        app.update(Msg::SurfaceResized {
            origin: ScreenPoint::new(100.0, 50.0),
            size: Size::new(400.0, 400.0),
        });
        app
    }

    fn client(x: f64, y: f64) -> ScreenPoint {
        ScreenPoint::new(x + 100.0, y + 50.0)
    }

    fn result() -> ScanResult {
        ScanResult {
            field_stars: vec![FieldStar {
                id: ObjectId::Number(100),
                ra: 83.82,
                dec: -5.39,
                mag: 5.0,
            }],
            anomalies: vec![Anomaly {
                id: ObjectId::Number(7),
                name: "Odd one".to_string(),
                ra: 83.82,
                dec: -5.39,
                kind: "G".to_string(),
                anomaly_score: 0.987,
            }],
            message: "Analysis complete. Found 2 objects.".to_string(),
        }
    }

    fn scanned_app() -> App {
        let mut app = app();
        let Command::Scan(ticket) = app.update(Msg::SubmitView(View::default())) else {
            panic!("submit should issue a scan");
        };
        app.update(Msg::ScanFinished {
            seq: ticket.seq,
            outcome: Ok(result()),
        });
        app
    }

    #[test]
    fn test_submit_issues_scan_for_view() {
        let mut app = app();
        let view = View::new(10.0, 20.0, 0.3).unwrap();
        let command = app.update(Msg::SubmitView(view));
        let Command::Scan(ticket) = command else {
            panic!("expected a scan command");
        };
        assert_eq!(ticket.request.ra, 10.0);
        assert_eq!(ticket.request.limit, 10);
        assert_eq!(app.state().view(), &view);
        assert!(app.state().status().is_loading());
    }

    #[test]
    fn test_hover_shows_tooltip_for_anomaly() {
        let mut app = scanned_app();
        app.update(Msg::Pointer(PointerEvent::Move(client(200.0, 200.0))));
        let tip = app.state().tooltip();
        assert!(tip.visible);
        assert_eq!(tip.content, "ANOMALY\nName: Odd one\nScore: 0.99");
        assert_eq!((tip.x, tip.y), (315.0, 265.0));

        app.update(Msg::Pointer(PointerEvent::Move(client(20.0, 20.0))));
        assert!(!app.state().tooltip().visible);
    }

    #[test]
    fn test_select_mode_suppresses_hover() {
        let mut app = scanned_app();
        app.update(Msg::SetMode(InteractionMode::Select));
        app.update(Msg::Pointer(PointerEvent::Move(client(200.0, 200.0))));
        assert!(!app.state().tooltip().visible);
    }

    #[test]
    fn test_drag_commit_issues_scan_and_returns_to_hover() {
        let mut app = scanned_app();
        app.update(Msg::SetMode(InteractionMode::Select));
        app.update(Msg::Pointer(PointerEvent::Down(client(250.0, 250.0))));
        app.update(Msg::Pointer(PointerEvent::Move(client(150.0, 150.0))));
        assert_eq!(
            app.selection_rect(),
            Some(SelectionRect {
                x: 150.0,
                y: 150.0,
                width: 100.0,
                height: 100.0
            })
        );

        let command = app.update(Msg::Pointer(PointerEvent::Up(client(150.0, 150.0))));
        let Command::Scan(ticket) = command else {
            panic!("commit should issue a scan");
        };
        assert_eq!(ticket.seq, 2);
        assert!((ticket.request.ra - 83.82).abs() < 1e-6);
        assert!((ticket.request.dec - (-5.39)).abs() < 1e-6);
        assert_eq!(ticket.request.radius, 0.1375);
        assert_eq!(app.selection_rect(), None);
        assert_eq!(app.mode(), InteractionMode::Hover);
    }

    #[test]
    fn test_press_ignored_while_scan_in_flight() {
        let mut app = app();
        app.update(Msg::SubmitView(View::default()));
        app.update(Msg::SetMode(InteractionMode::Select));
        app.update(Msg::Pointer(PointerEvent::Down(client(10.0, 10.0))));
        assert_eq!(app.selection_rect(), None);
        let command = app.update(Msg::Pointer(PointerEvent::Up(client(50.0, 50.0))));
        assert_eq!(command, Command::None);
    }

    #[test]
    fn test_leave_aborts_drag_and_hides_tooltip() {
        let mut app = scanned_app();
        app.update(Msg::SetMode(InteractionMode::Select));
        app.update(Msg::Pointer(PointerEvent::Down(client(10.0, 10.0))));
        app.update(Msg::Pointer(PointerEvent::Move(client(60.0, 90.0))));
        app.update(Msg::Pointer(PointerEvent::Leave));
        assert_eq!(app.selection_rect(), None);
        let command = app.update(Msg::Pointer(PointerEvent::Up(client(60.0, 90.0))));
        assert_eq!(command, Command::None);
        assert!(!app.state().scan_in_flight());
    }

    #[test]
    fn test_drag_start_clears_tooltip() {
        let mut app = scanned_app();
        app.update(Msg::Pointer(PointerEvent::Move(client(200.0, 200.0))));
        assert!(app.state().tooltip().visible);
        app.update(Msg::SetMode(InteractionMode::Select));
        assert!(!app.state().tooltip().visible);
        app.update(Msg::Pointer(PointerEvent::Down(client(200.0, 200.0))));
        assert!(!app.state().tooltip().visible);
        assert!(app.selection_rect().is_some());
    }

    #[test]
    fn test_failed_scan_keeps_result_and_reports_status() {
        let mut app = scanned_app();
        let Command::Scan(ticket) = app.update(Msg::SubmitView(View::new(84.0, -5.0, 0.2).unwrap()))
        else {
            panic!("expected a scan command");
        };
        app.update(Msg::ScanFinished {
            seq: ticket.seq,
            outcome: Err(ScanError::Transport("connection refused".to_string())),
        });
        assert_eq!(app.state().status(), &ScanStatus::Failed);
        assert_eq!(app.state().result(), Some(&result()));
        assert_eq!(app.state().view(), &View::default());
    }

    #[test]
    fn test_highlight_and_replace() {
        let mut app = scanned_app();
        app.update(Msg::HighlightAnomaly(Some(ObjectId::Number(7))));
        assert_eq!(app.state().highlighted(), Some(&ObjectId::Number(7)));

        let Command::Scan(ticket) = app.update(Msg::SubmitView(View::default())) else {
            panic!("expected a scan command");
        };
        app.update(Msg::ScanFinished {
            seq: ticket.seq,
            outcome: Ok(ScanResult::default()),
        });
        assert_eq!(app.state().highlighted(), None);
    }

    #[test]
    fn test_every_change_repaints() {
        let mut app = app();
        let before = app.frames();
        app.update(Msg::SetMode(InteractionMode::Select));
        app.update(Msg::Pointer(PointerEvent::Down(client(10.0, 10.0))));
        app.update(Msg::Pointer(PointerEvent::Move(client(20.0, 20.0))));
        assert_eq!(app.frames(), before + 3);

        // Nothing changes: no repaint
        app.update(Msg::SetMode(InteractionMode::Select));
        assert_eq!(app.frames(), before + 3);
    }

    #[test]
    fn test_each_redraw_trigger_repaints_once() {
        let mut app = app();

        let before = app.frames();
        app.update(Msg::SurfaceResized {
            origin: ScreenPoint::new(0.0, 0.0),
            size: Size::new(300.0, 200.0),
        });
        assert_eq!(app.frames(), before + 1);

        let Command::Scan(first) = app.update(Msg::SubmitView(View::default())) else {
            panic!("expected a scan command");
        };
        let Command::Scan(second) = app.update(Msg::SubmitView(View::default())) else {
            panic!("expected a scan command");
        };

        // Superseded response changes nothing
        let before = app.frames();
        app.update(Msg::ScanFinished {
            seq: first.seq,
            outcome: Ok(result()),
        });
        assert_eq!(app.frames(), before);
        assert!(app.state().result().is_none());

        let before = app.frames();
        app.update(Msg::ScanFinished {
            seq: second.seq,
            outcome: Ok(result()),
        });
        assert_eq!(app.frames(), before + 1);

        let before = app.frames();
        app.update(Msg::HighlightAnomaly(Some(ObjectId::Number(7))));
        assert_eq!(app.frames(), before + 1);

        // Same highlight again, and the viewport only moves tooltips
        app.update(Msg::HighlightAnomaly(Some(ObjectId::Number(7))));
        app.update(Msg::ViewportResized(Size::new(640.0, 480.0)));
        assert_eq!(app.frames(), before + 1);

        app.update(Msg::HighlightAnomaly(None));
        assert_eq!(app.frames(), before + 2);
    }

    #[test]
    fn test_resize_is_requeried_for_hit_testing() {
        let mut app = scanned_app();
        app.update(Msg::SurfaceResized {
            origin: ScreenPoint::new(0.0, 0.0),
            size: Size::new(800.0, 600.0),
        });
        assert_eq!(app.surface().size(), Size::new(800.0, 600.0));
        app.update(Msg::Pointer(PointerEvent::Move(ScreenPoint::new(400.0, 300.0))));
        assert!(app.state().tooltip().visible);
    }
}
