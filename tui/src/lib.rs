//! TUI rendering for spindle using ratatui.

mod input;
mod wheel;

pub use input::{UiAction, poll_action};
pub use wheel::draw_wheel;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use spindle_engine::{SessionPhase, SpinSession};

/// Everything one frame needs: the session plus transient display state
/// owned by the binary.
#[derive(Debug)]
pub struct SpinView<'a> {
    pub session: &'a SpinSession,
    /// Digits typed so far for the next winning slice.
    pub slice_entry: &'a str,
    /// Outcome line from the most recent completed spin.
    pub status: &'a str,
}

/// Main draw function.
pub fn draw(frame: &mut Frame, view: &SpinView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(9),    // Wheel
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Status
            Constraint::Length(2), // Controls (rule + key row)
        ])
        .split(frame.area());

    draw_wheel(frame, chunks[0], view.session);
    draw_progress(frame, chunks[1], view.session);
    draw_status(frame, chunks[2], view);
    draw_controls(frame, chunks[3], view.session);
}

fn draw_progress(frame: &mut Frame, area: Rect, session: &SpinSession) {
    let ratio = session.progress().clamp(0.0, 1.0);
    let label = match session.phase() {
        SessionPhase::Playing => format!("{:>3.0}%", ratio * 100.0),
        SessionPhase::Idle => "ready".to_string(),
    };
    let gauge = Gauge::default().ratio(ratio).label(label);
    frame.render_widget(gauge, area);
}

fn draw_status(frame: &mut Frame, area: Rect, view: &SpinView) {
    let mut spans = vec![Span::raw("slice: ")];
    if view.slice_entry.is_empty() {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::DIM)));
    } else {
        spans.push(Span::styled(
            view.slice_entry.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    if !view.status.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::raw(view.status.to_string()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_controls(frame: &mut Frame, area: Rect, session: &SpinSession) {
    let controls = session.controls();
    let key = |label: &str, enabled: bool| {
        if enabled {
            Span::raw(label.to_string()).bold()
        } else {
            Span::raw(label.to_string()).dim()
        }
    };
    let line = Line::from(vec![
        key("[Enter] Spin", controls.spin_enabled),
        Span::raw("  "),
        key("[r] Rapid 2x", controls.rapid_enabled),
        Span::raw("  "),
        key("[i] Instant", controls.skip_enabled),
        Span::raw("  "),
        Span::raw("[q] Quit"),
    ]);
    let block = Block::default().borders(Borders::TOP);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
