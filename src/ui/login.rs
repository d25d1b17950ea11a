//! Staff and applicant login forms

use super::components::{draw_field, FieldStyle, FIELD_HEIGHT};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FORM_WIDTH: u16 = 50;

struct LoginLayout<'a> {
    title: &'a str,
    secret_label: &'a str,
    secret_style: FieldStyle,
    help: &'a str,
}

pub fn draw_admin(frame: &mut Frame, area: Rect, app: &App) {
    draw(
        frame,
        area,
        app,
        LoginLayout {
            title: " Staff Login ",
            secret_label: "Password",
            secret_style: FieldStyle::Masked,
            help: "Institution staff see their applicants. Group management sees the analytics overview.",
        },
    );
}

pub fn draw_student(frame: &mut Frame, area: Rect, app: &App) {
    draw(
        frame,
        area,
        app,
        LoginLayout {
            title: " Track My Application ",
            secret_label: "Date of Birth (YYYY-MM-DD)",
            secret_style: FieldStyle::Text,
            help: "Use the email and date of birth from your application.",
        },
    );
}

fn draw(frame: &mut Frame, area: Rect, app: &App, layout: LoginLayout) {
    let width = FORM_WIDTH.min(area.width);
    let height = (FIELD_HEIGHT * 2 + 5).min(area.height);
    let form_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(layout.title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.state.login;
    draw_field(
        frame,
        chunks[0],
        "Email",
        &form.email,
        form.active_field == 0,
        true,
        FieldStyle::Text,
    );
    draw_field(
        frame,
        chunks[1],
        layout.secret_label,
        &form.secret,
        form.active_field == 1,
        true,
        layout.secret_style,
    );

    let help = Paragraph::new(layout.help)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(help, chunks[2]);
}
