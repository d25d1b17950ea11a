//! Landing menu

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::LandingOption;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const MENU_WIDTH: u16 = 36;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Min(0), Constraint::Length(4)];
    constraints.extend(LandingOption::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Admissions Portal",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Engineering · Medical · Polytechnic · Schools",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    for (idx, option) in LandingOption::ALL.iter().enumerate() {
        let row = chunks[idx + 2];
        let width = MENU_WIDTH.min(row.width);
        let button_area = Rect {
            x: row.x + (row.width - width) / 2,
            width,
            ..row
        };
        render_button(
            frame,
            button_area,
            option.label(),
            *option == app.state.landing_option(),
        );
    }
}
