//! Applicant dashboard and fee payment

use super::components::{draw_field, FieldStyle, FIELD_HEIGHT};
use super::widgets::render_scrollable_list;
use super::{format_rupees, status_color};
use crate::app::App;
use crate::state::{
    admit_letter_link, Application, ApplicationStatus, ProfileEditForm, ProfileField,
    StudentDashboard, StudentTab,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let dashboard = &app.state.student;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    draw_tabs(frame, chunks[0], dashboard.tab);

    match (dashboard.tab, dashboard.selected_application()) {
        (StudentTab::Application, Some(application)) => {
            draw_application(frame, chunks[1], app, application);
        }
        _ => draw_home(frame, chunks[1], dashboard),
    }

    if let Some(form) = &dashboard.edit {
        draw_edit_form(frame, area, form);
    }
}

fn draw_tabs(frame: &mut Frame, area: Rect, tab: StudentTab) {
    let style = |active: bool| {
        if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let tabs = Line::from(vec![
        Span::raw(" "),
        Span::styled("Home", style(tab == StudentTab::Home)),
        Span::raw("   "),
        Span::styled("My Application", style(tab == StudentTab::Application)),
    ]);
    frame.render_widget(Paragraph::new(tabs), area);
}

fn draw_home(frame: &mut Frame, area: Rect, dashboard: &StudentDashboard) {
    let block = Block::default()
        .title(" My Applications ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if dashboard.applications.is_empty() {
        let empty = Paragraph::new("No applications found for this email.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = dashboard
        .applications
        .iter()
        .enumerate()
        .map(|(idx, application)| {
            let is_selected = idx == dashboard.selected;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(application.reference(), Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled(
                    application
                        .institution_name
                        .clone()
                        .unwrap_or_else(|| "Institution".to_string()),
                    style,
                ),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", application.application_status.student_label()),
                    Style::default().fg(status_color(&application.application_status)),
                ),
            ]))
        })
        .collect();

    render_scrollable_list(frame, area, List::new(items).block(block), dashboard.selected);
}

fn detail(label: &'static str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<18}", label), Style::default().fg(Color::Gray)),
        Span::raw(value.into()),
    ])
}

/// What the applicant can do next, by status
fn next_step(application: &Application) -> Line<'static> {
    let (text, color) = match application.application_status {
        ApplicationStatus::Accepted => (
            "Congratulations! You have an offer. Press 'a' to accept or 'd' to decline.",
            Color::Green,
        ),
        ApplicationStatus::OfferAccepted => (
            "Offer accepted. Press 'p' to pay the admission fee and confirm your seat.",
            Color::Blue,
        ),
        ApplicationStatus::AdmissionConfirmed => (
            "Admission confirmed. Welcome aboard!",
            Color::Magenta,
        ),
        ApplicationStatus::Waitlisted => (
            "You are on the waitlist. We will update you if a seat opens.",
            Color::Yellow,
        ),
        ApplicationStatus::Declined => ("This application was not successful.", Color::Red),
        _ => ("Your application is under review.", Color::Gray),
    };
    Line::from(Span::styled(text, Style::default().fg(color)))
}

fn draw_application(frame: &mut Frame, area: Rect, app: &App, application: &Application) {
    let status = &application.application_status;
    let mut lines = vec![
        detail("Application ID", application.reference()),
        detail("Name", application.full_name.clone()),
        detail(
            "Institution",
            application.institution_name.clone().unwrap_or_default(),
        ),
        detail("Course", application.course().to_string()),
        Line::from(vec![
            Span::styled(format!("{:<18}", "Status"), Style::default().fg(Color::Gray)),
            Span::styled(
                status.student_label().to_string(),
                Style::default()
                    .fg(status_color(status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        detail("Mobile", application.mobile.clone().unwrap_or_default()),
        detail("Email", application.email.clone()),
        detail("City", application.address_city.clone().unwrap_or_default()),
        detail("State", application.address_state.clone().unwrap_or_default()),
        Line::from(""),
        next_step(application),
    ];

    if let Some(letter) = application.admit_letter_url.as_deref().filter(|l| !l.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Admit letter: ", Style::default().fg(Color::Gray)),
            Span::styled(
                admit_letter_link(&app.api_base_url, letter),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" My Application ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_edit_form(frame: &mut Frame, area: Rect, form: &ProfileEditForm) {
    let width = 50u16.min(area.width);
    let height = (FIELD_HEIGHT * ProfileField::ALL.len() as u16 + 2).min(area.height);
    let form_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, form_area);

    let block = Block::default()
        .title(" Edit Contact Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    for (idx, field) in ProfileField::ALL.iter().enumerate() {
        let field_area = Rect {
            y: inner.y + idx as u16 * FIELD_HEIGHT,
            height: FIELD_HEIGHT,
            ..inner
        };
        if field_area.y + field_area.height > inner.y + inner.height {
            break;
        }
        draw_field(
            frame,
            field_area,
            field.label(),
            form.value(*field),
            form.active() == *field,
            false,
            FieldStyle::Text,
        );
    }
}

pub fn draw_payment(frame: &mut Frame, area: Rect, app: &App) {
    let Some(payment) = app.state.payment.as_ref() else {
        return;
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            payment.institution_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Application {}", payment.reference),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Admission fee: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_rupees(u64::from(payment.amount)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    lines.push(if payment.paid {
        Line::from(Span::styled(
            "Payment received. Your admission is confirmed.",
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(Span::styled(
            "Press Enter to pay securely and confirm your seat.",
            Style::default().fg(Color::Cyan),
        ))
    });

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Fee Payment ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(paragraph, area);
}
