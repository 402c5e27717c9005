//! Tests for the terminal host, rendered through ratatui's TestBackend.

use super::*;
use crate::model::{
    Channel, ChannelId, Event as GuideEvent, EpgDataSource, FixedClock, ImageKey, ImageLoadError,
};
use crate::view_state::time_labels::UtcLabels;
use crate::view_state::{GuideParams, ImageLoader, LoadCompletion, ZonedLabels};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::backend::TestBackend;

// 2023-11-14T22:13:20Z
const NOW: i64 = 1_700_000_000_000;
const HALF_HOUR: i64 = 30 * 60 * 1000;

struct FailingLoader;

impl ImageLoader for FailingLoader {
    fn load(&self, key: &ImageKey, _width: u32, _height: u32, completion: LoadCompletion) {
        completion(Err(ImageLoadError::EmptyImage {
            key: key.to_string(),
        }));
    }
}

fn guide(channels: usize) -> GuideData {
    let rows = (0..channels)
        .map(|n| {
            let channel = Channel::new(
                ChannelId::new(format!("c{n}")).unwrap(),
                format!("Channel {n}"),
                ImageKey::new(format!("c{n}.png")).unwrap(),
            );
            (channel, vec![GuideEvent::new(NOW - HALF_HOUR, NOW + HALF_HOUR, "Live")])
        })
        .collect();
    GuideData::new(rows)
}

/// 80x25 terminal: the guide gets 80x24, the status bar the last line.
fn app() -> TuiApp<TestBackend, FixedClock> {
    let utc: UtcLabels = ZonedLabels(chrono::Utc);
    app_with_labels(Box::new(utc))
}

fn app_with_labels(labels: Box<dyn TimeLabels>) -> TuiApp<TestBackend, FixedClock> {
    let terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
    let mut widget =
        EpgWidget::new(GuideParams::default(), FixedClock::new(NOW), Box::new(FailingLoader))
            .with_labels(labels);
    widget.set_data(Box::new(guide(30)));
    TuiApp::with_parts(
        terminal,
        widget,
        GuideStyles::with_color_config(ColorConfig::fixed(false)),
    )
    .unwrap()
}

fn screen(app: &TuiApp<TestBackend, FixedClock>) -> Vec<String> {
    let buffer = app.terminal().backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect()
        })
        .collect()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn click(app: &mut TuiApp<TestBackend, FixedClock>, column: u16, row: u16) {
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), column, row));
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn tui_error_maps_into_app_error() {
    let app_err: AppError = TuiError::Io(io::Error::other("gone")).into();
    assert!(matches!(app_err, AppError::Terminal(_)));

    let guide_err = GuideLoadError::FileNotFound {
        path: "g.json".into(),
    };
    let app_err: AppError = TuiError::Guide(guide_err).into();
    assert!(matches!(app_err, AppError::Guide(_)));
}

// ===== Layout and drawing =====

#[test]
fn widget_is_laid_out_above_status_bar() {
    let app = app();
    assert_eq!(app.widget().size(), ViewportSize::new(80, 24));
}

#[test]
fn draw_renders_channel_names_events_and_status() {
    let mut app = app();
    app.draw().unwrap();
    let lines = screen(&app);

    assert!(lines.iter().any(|l| l.contains("Channel 0")));
    assert!(lines.iter().any(|l| l.contains("Live")));
    assert!(lines[24].contains("q: quit"), "status line: {:?}", lines[24]);
}

#[test]
fn draw_shows_time_bar_ticks() {
    let mut app = app();
    app.draw().unwrap();
    let lines = screen(&app);
    // Viewport spans 21:13..23:13 UTC.
    assert!(lines[0].contains("22:00"), "time bar: {:?}", lines[0]);
}

#[test]
fn resize_relays_out_widget() {
    let mut app = app();
    app.handle_resize(100, 30);
    assert_eq!(app.widget().size(), ViewportSize::new(100, 29));
}

// ===== Keys =====

#[test]
fn q_and_ctrl_c_quit() {
    let mut app = app();
    assert_eq!(app.handle_key(key(KeyCode::Char('q'))), KeyOutcome::Quit);
    assert_eq!(
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        KeyOutcome::Quit
    );
}

#[test]
fn unbound_key_is_ignored() {
    let mut app = app();
    let before = app.widget().scroll_offset();
    assert_eq!(app.handle_key(key(KeyCode::Char('z'))), KeyOutcome::Continue);
    assert_eq!(app.widget().scroll_offset(), before);
}

#[test]
fn j_nudges_down() {
    let mut app = app();
    let before = app.widget().scroll_offset();
    app.handle_key(key(KeyCode::Char('j')));
    assert_eq!(app.widget().scroll_offset().y, before.y + 10);
}

#[test]
fn key_release_events_are_ignored() {
    let mut app = app();
    let before = app.widget().scroll_offset();
    let mut release = key(KeyCode::Char('j'));
    release.kind = KeyEventKind::Release;
    app.handle_key(release);
    assert_eq!(app.widget().scroll_offset(), before);
}

#[test]
fn n_animates_back_to_now() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('l')));
    app.handle_key(key(KeyCode::Char('n')));
    assert!(app.widget().is_animating());
}

// ===== Mouse =====

#[test]
fn drag_pans_the_guide() {
    let mut app = app();
    let before = app.widget().scroll_offset();
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 40, 10));
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 10));
    assert_eq!(app.widget().scroll_offset().x, before.x + 10);
}

#[test]
fn wheel_nudges_vertically() {
    let mut app = app();
    let before = app.widget().scroll_offset();
    app.handle_mouse(mouse(MouseEventKind::ScrollDown, 40, 10));
    assert!(app.widget().scroll_offset().y > before.y);
}

#[test]
fn clicking_an_event_selects_it_and_reports_times() {
    let mut app = app();
    // "Live" spans viewport x 20..59 on row 0 (y 2..5).
    click(&mut app, 30, 3);

    assert_eq!(app.status(), "Live  21:43-22:43");
    let data = app.widget().data().unwrap();
    assert!(data.event_at(0, 0).unwrap().is_selected());
}

#[test]
fn status_and_time_bar_share_the_widget_labels() {
    let cet = chrono::FixedOffset::east_opt(3600).unwrap();
    let mut app = app_with_labels(Box::new(ZonedLabels(cet)));
    app.draw().unwrap();
    let lines = screen(&app);
    assert!(lines[0].contains("23:00"), "time bar: {:?}", lines[0]);

    click(&mut app, 30, 3);
    assert_eq!(app.status(), "Live  22:43-23:43");
}

#[test]
fn clicking_a_channel_reports_it() {
    let mut app = app();
    click(&mut app, 5, 7);
    assert_eq!(app.status(), "Channel 1 (c1)");
}

#[test]
fn clicking_the_status_bar_does_nothing() {
    let mut app = app();
    click(&mut app, 30, 24);
    assert_eq!(app.status(), HINTS);
}

#[test]
fn describe_reset_click() {
    let labels: UtcLabels = ZonedLabels(chrono::Utc);
    assert_eq!(describe_click(&GuideClick::ResetButton, &labels), "Back to now");
}
