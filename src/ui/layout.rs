//! Layout components (header, status bar)

use crate::app::App;
use crate::state::{StudentTab, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PORTAL_TITLE: &str = " Sairam Group of Institutions · Admissions ";

/// Split the screen into header, content and status bar rows
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the header with the portal title and who is signed in
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        PORTAL_TITLE,
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    let who = match app.state.current_view {
        View::AdminDashboard => app.state.session.admin.as_ref().map(|a| {
            match a.institution_name.as_deref() {
                Some(institution) => format!("{} · {}", a.name, institution),
                None => format!("{} · Group Management", a.name),
            }
        }),
        View::StudentDashboard | View::Payment => app
            .state
            .session
            .student
            .as_ref()
            .map(|s| s.full_name.clone().unwrap_or_else(|| s.email.clone())),
        _ => None,
    };
    if let Some(who) = who {
        spans.push(Span::styled(
            format!("  {}", who),
            Style::default().fg(Color::Gray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    if let Some(msg) = &app.copy_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    let state = &app.state;
    match state.current_view {
        View::Landing => "j/k:nav  Enter:select  q:quit".to_string(),
        View::Wizard if state.wizard.store.is_submitted() => {
            "n:new application  y:copy ref  Esc:done".to_string()
        }
        View::Wizard if state.wizard.store.current_step == 0 => {
            "↑↓:choose  Enter:next  r:reload  Esc:back".to_string()
        }
        View::Wizard if state.wizard.store.step().is_final() => {
            "Tab/↑↓:field  Enter:submit  Esc:prev".to_string()
        }
        View::Wizard => {
            "Tab/↑↓:field  ←→:choose  Space:toggle  Enter:next  Esc:prev".to_string()
        }
        View::AdminLogin | View::StudentLogin => "Tab:field  Enter:login  Esc:back".to_string(),
        View::AdminDashboard if state.admin.ai_input_active => {
            "Enter:ask  Esc:close".to_string()
        }
        View::AdminDashboard
            if state
                .session
                .admin
                .as_ref()
                .is_some_and(|a| a.is_group_level()) =>
        {
            "←→:category  Enter:expand  ?:ask AI  r:refresh  l:logout  Esc:back".to_string()
        }
        View::AdminDashboard => {
            "j/k:nav  a:accept  w:waitlist  d:decline  ?:ask AI  r:refresh  l:logout".to_string()
        }
        View::StudentDashboard if state.student.edit.is_some() => {
            "Tab:field  Enter:save  Esc:cancel".to_string()
        }
        View::StudentDashboard if state.student.tab == StudentTab::Application => {
            "a:accept  d:decline  p:pay  e:edit  y:copy  Esc:home".to_string()
        }
        View::StudentDashboard => "j/k:nav  Enter:open  r:refresh  l:logout  Esc:back".to_string(),
        View::Payment => "Enter:pay  Esc:back".to_string(),
    }
}
