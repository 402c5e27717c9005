//! TUI rendering and terminal management (impure shell)

mod canvas;
pub mod constants;
mod drag;
mod styles;

pub use canvas::TerminalCanvas;
pub use drag::DragTracker;
pub use styles::{CellPaint, ColorConfig, GuideStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, Clock, GuideData, GuideLoadError, SystemClock};
use crate::source::FsImageLoader;
use crate::state::{
    EpgWidget, FrameOutcome, Gesture, GuideClick, KeyOutcome, Widget, handle_key_action,
};
use crate::view_state::{TimeLabels, ViewportSize};
use constants::{FRAME_INTERVAL, IDLE_TICK, STATUS_BAR_HEIGHT};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
};
use std::io::{self, Stdout};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Guide could not be loaded
    #[error("Guide error: {0}")]
    Guide(#[from] GuideLoadError),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(err) => AppError::Terminal(err),
            TuiError::Guide(err) => AppError::Guide(err),
        }
    }
}

const HINTS: &str = "drag/hjkl: scroll  click: select  n: now  esc: clear  q: quit";

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B, C = SystemClock>
where
    B: Backend,
    C: Clock,
{
    terminal: Terminal<B>,
    widget: EpgWidget<C>,
    key_bindings: KeyBindings,
    styles: GuideStyles,
    drag: DragTracker,
    /// Widget area from the last layout, in terminal coordinates.
    guide_area: Rect,
    status: String,
    animating: bool,
    last_frame: Instant,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(data: GuideData, config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let mut widget = EpgWidget::new(config.params, SystemClock, Box::new(FsImageLoader::new()));
        widget.set_data(Box::new(data));
        let styles = GuideStyles::with_color_config(ColorConfig::from_env_and_args(config.no_color));

        TuiApp::with_parts(terminal, widget, styles)
    }
}

impl<B, C> TuiApp<B, C>
where
    B: Backend,
    C: Clock,
{
    /// Assemble an app around an existing terminal and widget, and lay the
    /// widget out for the terminal's current size.
    ///
    /// Status text is formatted with the widget's labels.
    pub fn with_parts(
        terminal: Terminal<B>,
        widget: EpgWidget<C>,
        styles: GuideStyles,
    ) -> Result<Self, TuiError> {
        let mut app = Self {
            terminal,
            widget,
            key_bindings: KeyBindings::default(),
            styles,
            drag: DragTracker::new(),
            guide_area: Rect::default(),
            status: HINTS.to_string(),
            animating: false,
            last_frame: Instant::now(),
        };
        let size = app.terminal.size()?;
        app.handle_resize(size.width, size.height);
        Ok(app)
    }

    pub fn widget(&self) -> &EpgWidget<C> {
        &self.widget
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Frames tick while the widget
    /// animates or thumbnails are loading; otherwise the loop waits on input.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let busy = self.animating || self.widget.image_cache().has_pending();
            let timeout = if busy { FRAME_INTERVAL } else { IDLE_TICK };

            // A timeout is a tick: the next animation frame, or the idle
            // refresh that moves the now-line.
            let ticked = !event::poll(timeout)?;
            if !ticked {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) == KeyOutcome::Quit {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            if ticked || self.widget.needs_redraw() {
                self.draw()?;
            }
        }
    }

    /// Handle a single keyboard event
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Continue;
        }
        let Some(action) = self.key_bindings.get(KeyEvent::new(key.code, key.modifiers)) else {
            return KeyOutcome::Continue;
        };
        debug!(?action, "Key action");
        handle_key_action(&mut self.widget, action)
    }

    /// Handle a single mouse event
    ///
    /// Left button press/drag/release become gestures; the wheel nudges.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let x = i32::from(mouse.column) - i32::from(self.guide_area.x);
        let y = i32::from(mouse.row) - i32::from(self.guide_area.y);
        let now = Instant::now();

        let gesture = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.in_guide(mouse) {
                    return;
                }
                Some(self.drag.press(x, y, now))
            }
            MouseEventKind::Drag(MouseButton::Left) => self.drag.drag(x, y, now),
            MouseEventKind::Up(MouseButton::Left) => self.drag.release(x, y, now),
            MouseEventKind::ScrollUp => {
                self.widget.move_up();
                None
            }
            MouseEventKind::ScrollDown => {
                self.widget.move_down();
                None
            }
            MouseEventKind::ScrollLeft => {
                self.widget.move_left();
                None
            }
            MouseEventKind::ScrollRight => {
                self.widget.move_right();
                None
            }
            _ => None,
        };

        if let Some(gesture) = gesture {
            self.apply_gesture(gesture);
        }
    }

    fn in_guide(&self, mouse: MouseEvent) -> bool {
        mouse.column >= self.guide_area.x
            && mouse.column < self.guide_area.right()
            && mouse.row >= self.guide_area.y
            && mouse.row < self.guide_area.bottom()
    }

    fn apply_gesture(&mut self, gesture: Gesture) {
        let Some(click) = self.widget.on_gesture(gesture) else {
            return;
        };
        if click == GuideClick::ResetButton {
            self.widget.recalculate_and_redraw(true);
        }
        self.status = describe_click(&click, self.widget.labels());
        info!(status = %self.status, "Guide click");
    }

    /// Handle a terminal resize event
    ///
    /// The bottom line is the status bar; the guide gets the rest.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let [guide_area, _] = split_screen(Rect::new(0, 0, width, height));
        self.guide_area = guide_area;
        self.widget.on_size_changed(ViewportSize::new(
            i32::from(guide_area.width),
            i32::from(guide_area.height),
        ));
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let widget = &mut self.widget;
        let styles = &self.styles;
        let status = self.status.as_str();
        let mut outcome = FrameOutcome::default();

        self.terminal.draw(|frame| {
            let [guide_area, status_area] = split_screen(frame.area());
            let mut canvas = TerminalCanvas::new(frame.buffer_mut(), guide_area, styles);
            outcome = widget.on_frame(elapsed, &mut canvas);
            frame.render_widget(Paragraph::new(status).style(styles.status()), status_area);
        })?;

        self.animating = outcome.animating;
        Ok(())
    }
}

fn split_screen(area: Rect) -> [Rect; 2] {
    Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)]).areas(area)
}

/// Status-line text for a click.
pub fn describe_click(click: &GuideClick, labels: &dyn TimeLabels) -> String {
    match click {
        GuideClick::Channel { channel, .. } => {
            format!("{} ({})", channel.display_name(), channel.id())
        }
        GuideClick::Event { event, .. } => format!(
            "{}  {}-{}",
            event.title(),
            labels.short_time(event.start_millis()),
            labels.short_time(event.end_millis())
        ),
        GuideClick::ResetButton => "Back to now".to_string(),
    }
}

/// Initialize and run the TUI for a loaded guide
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_guide(data: GuideData, config: &ResolvedConfig) -> Result<(), TuiError> {
    let result = TuiApp::new(data, config).and_then(|mut app| app.run());

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
