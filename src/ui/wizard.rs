//! Application wizard views

use super::components::{draw_field, FieldStyle, FIELD_HEIGHT};
use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::wizard::{rows_for, FormRow, RowKind, WizardStep};
use crate::state::{FinalStatus, WizardView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = &app.state.wizard;

    if wizard.store.is_submitted() {
        draw_result(frame, area, wizard);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    draw_progress(frame, chunks[0], wizard);

    match wizard.store.step() {
        WizardStep::InstitutionSelect => draw_institutions(frame, chunks[1], wizard),
        WizardStep::CourseSelection => {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);
            draw_rows(frame, cols[0], wizard);
            draw_courses(frame, cols[1], wizard);
        }
        WizardStep::AcademicDetails => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(chunks[1]);
            draw_score(frame, rows[0], wizard);
            draw_rows(frame, rows[1], wizard);
        }
        _ => draw_rows(frame, chunks[1], wizard),
    }
}

/// Step titles with the current one highlighted
fn draw_progress(frame: &mut Frame, area: Rect, wizard: &WizardView) {
    let current = wizard.store.step().index();
    let mut spans = Vec::new();
    for step in WizardStep::ALL {
        let idx = step.index();
        let style = if idx == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if idx < current {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if idx > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("{} {}", idx + 1, step.title()), style));
    }

    let title = if wizard.store.draft.institution_name.is_empty() {
        " Apply ".to_string()
    } else {
        format!(" Apply · {} ", wizard.store.draft.institution_name)
    };
    let progress = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(progress, area);
}

fn draw_institutions(frame: &mut Frame, area: Rect, wizard: &WizardView) {
    let block = Block::default()
        .title(" Select Institution ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if wizard.institutions.is_empty() {
        let message = Paragraph::new("No institutions available.\nPress 'r' to reload.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = wizard
        .institutions
        .iter()
        .enumerate()
        .map(|(idx, institution)| {
            let is_selected = idx == wizard.institution_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(&institution.name, style),
                Span::raw(" "),
                Span::styled(
                    format!("[{}]", institution.institution_type),
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();

    render_scrollable_list(frame, area, List::new(items).block(block), wizard.institution_index);
}

fn row_value(wizard: &WizardView, row: &FormRow) -> String {
    let draft = &wizard.store.draft;
    match row.kind {
        RowKind::Flag if draft.is_filled(row.field) => "Yes".to_string(),
        RowKind::Flag => String::new(),
        _ => draft.text(row.field).to_string(),
    }
}

fn row_style(kind: RowKind) -> FieldStyle {
    match kind {
        RowKind::Text => FieldStyle::Text,
        RowKind::Choice(_) | RowKind::Preference(_) => FieldStyle::Choice,
        RowKind::Flag => FieldStyle::Flag,
    }
}

/// Form rows of the current step, scrolled to keep the focused row visible
fn draw_rows(frame: &mut Frame, area: Rect, wizard: &WizardView) {
    let step = wizard.store.step();
    let rows = rows_for(step, wizard.store.draft.institution_type);

    let block = Block::default()
        .title(format!(" {} ", step.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if rows.is_empty() {
        return;
    }

    let active = wizard.active_row.min(rows.len() - 1);
    let visible = (inner.height / FIELD_HEIGHT).max(1) as usize;
    let first = (active + 1).saturating_sub(visible);

    for (slot, (idx, row)) in rows.iter().enumerate().skip(first).take(visible).enumerate() {
        let field_area = Rect {
            y: inner.y + slot as u16 * FIELD_HEIGHT,
            height: FIELD_HEIGHT,
            ..inner
        };
        draw_field(
            frame,
            field_area,
            row.label(),
            &row_value(wizard, row),
            idx == active,
            row.required,
            row_style(row.kind),
        );
    }
}

/// Course options for the focused preference row
fn draw_courses(frame: &mut Frame, area: Rect, wizard: &WizardView) {
    let rows = rows_for(WizardStep::CourseSelection, wizard.store.draft.institution_type);
    let slot = match rows.get(wizard.active_row).map(|r| r.kind) {
        Some(RowKind::Preference(slot)) => slot,
        _ => 0,
    };
    let chosen = rows
        .get(slot)
        .map(|r| wizard.store.draft.text(r.field))
        .unwrap_or("");

    let block = Block::default()
        .title(format!(" Courses · Preference {} ", slot + 1))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if wizard.courses.is_empty() {
        let message = Paragraph::new("No courses listed for this institution.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(message, area);
        return;
    }

    let items: Vec<ListItem> = wizard
        .store
        .preference_options(slot, &wizard.courses)
        .into_iter()
        .map(|option| {
            let (marker, style) = if option.name == chosen {
                ("● ", Style::default().fg(Color::Cyan))
            } else if option.disabled {
                ("  ", Style::default().fg(Color::DarkGray))
            } else {
                ("  ", Style::default())
            };
            let suffix = if option.disabled { " (taken)" } else { "" };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}{}", marker, option.name, suffix),
                style,
            )))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Live derived score on the academic step
fn draw_score(frame: &mut Frame, area: Rect, wizard: &WizardView) {
    let (label, value) = match (wizard.store.draft.institution_type, wizard.store.derived_score()) {
        (Some(kind), Some(score)) => (format!("{} score", kind.label()), score.to_string()),
        _ => ("Score".to_string(), "-".to_string()),
    };
    let line = Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Gray)),
        Span::styled(
            value,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_result(frame: &mut Frame, area: Rect, wizard: &WizardView) {
    let Some(outcome) = wizard.store.outcome.as_ref() else {
        return;
    };

    let status_color = if outcome.final_status.is_positive() {
        Color::Green
    } else if outcome.final_status == FinalStatus::ManagementReview {
        Color::Yellow
    } else {
        Color::Red
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            outcome
                .message
                .clone()
                .unwrap_or_else(|| "Application Submitted".to_string()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::styled(
                outcome.final_status.to_string(),
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if let Some(reference) = &outcome.application_ref_id {
        lines.push(Line::from(vec![
            Span::styled("Application ID: ", Style::default().fg(Color::Gray)),
            Span::styled(reference, Style::default().fg(Color::Cyan)),
        ]));
    }
    if let Some(probability) = outcome.ai_probability {
        lines.push(Line::from(vec![
            Span::styled("Admission likelihood: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{:.1}%", probability)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Track your application from the landing page with your email and date of birth.",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Application Submitted ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(status_color)),
        );
    frame.render_widget(paragraph, area);
}
