//! Staff dashboard: group analytics or an institution's applicants

use super::widgets::render_scrollable_table;
use super::{format_rupees, status_color};
use crate::app::App;
use crate::state::{institutions_in, AdminDashboard, AdminIdentity, Category};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
    Frame,
};

const AI_PANEL_HEIGHT: u16 = 6;
const CARD_HEIGHT: u16 = 8;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(admin) = app.state.session.admin.as_ref() else {
        return;
    };
    let dashboard = &app.state.admin;

    let show_ai = dashboard.ai_input_active || dashboard.ai_answer.is_some();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(if show_ai { AI_PANEL_HEIGHT } else { 0 }),
        ])
        .split(area);

    if admin.is_group_level() {
        draw_group_overview(frame, chunks[0], dashboard);
    } else {
        draw_institution(frame, chunks[0], admin, dashboard);
    }

    if show_ai {
        draw_ai_panel(frame, chunks[1], dashboard);
    }
}

fn draw_group_overview(frame: &mut Frame, area: Rect, dashboard: &AdminDashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let Some(overview) = dashboard.overview.as_ref() else {
        let loading = Paragraph::new("No analytics loaded. Press 'r' to refresh.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, chunks[0]);
        return;
    };

    let totals = Line::from(vec![
        Span::styled(" Total applications: ", Style::default().fg(Color::Gray)),
        Span::styled(
            overview.overall.total_apps.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Revenue collected: ", Style::default().fg(Color::Gray)),
        Span::styled(
            format_rupees(overview.overall.total_revenue.max(0.0).round() as u64),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(totals), chunks[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(Category::ALL.map(|_| Constraint::Ratio(1, Category::ALL.len() as u32)))
        .split(chunks[1]);
    for (idx, category) in Category::ALL.iter().enumerate() {
        draw_category_card(
            frame,
            cards[idx],
            dashboard,
            *category,
            idx == dashboard.category_index,
        );
    }

    if let Some(category) = dashboard.expanded {
        let institutions = institutions_in(&overview.breakdown, category);
        let rows: Vec<Row> = institutions
            .iter()
            .map(|inst| {
                Row::new(vec![
                    inst.name.clone(),
                    inst.institution_type.clone(),
                    inst.stats.total.to_string(),
                    inst.stats.accepted.to_string(),
                    inst.stats.waitlisted.to_string(),
                    inst.stats.pending.to_string(),
                    format_rupees(inst.stats.revenue.max(0.0).round() as u64),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Min(24),
                Constraint::Length(12),
                Constraint::Length(7),
                Constraint::Length(9),
                Constraint::Length(11),
                Constraint::Length(8),
                Constraint::Length(14),
            ],
        )
        .header(
            Row::new(vec![
                "Institution",
                "Type",
                "Total",
                "Accepted",
                "Waitlisted",
                "Pending",
                "Revenue",
            ])
            .style(Style::default().fg(Color::Yellow)),
        )
        .block(
            Block::default()
                .title(format!(" {} ", category.label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(table, chunks[2]);
    }
}

fn draw_category_card(
    frame: &mut Frame,
    area: Rect,
    dashboard: &AdminDashboard,
    category: Category,
    is_focused: bool,
) {
    let stats = dashboard.stats_for(category);
    let border_style = if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let marker = if dashboard.expanded == Some(category) {
        "▾"
    } else {
        "▸"
    };

    let stat = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<11}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color)),
        ])
    };
    let lines = vec![
        stat("Total", stats.total.to_string(), Color::White),
        stat("Accepted", stats.accepted.to_string(), Color::Green),
        stat("Waitlisted", stats.waitlisted.to_string(), Color::Yellow),
        stat("Declined", stats.declined.to_string(), Color::Red),
        stat("Pending", stats.pending.to_string(), Color::Gray),
        stat(
            "Revenue",
            format_rupees(stats.revenue.max(0.0).round() as u64),
            Color::Green,
        ),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} {} ", marker, category.label()))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

fn draw_institution(frame: &mut Frame, area: Rect, admin: &AdminIdentity, dashboard: &AdminDashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let summary = dashboard.summary();
    let count = |label: &'static str, value: usize, color: Color| {
        vec![
            Span::styled(format!(" {}: ", label), Style::default().fg(Color::Gray)),
            Span::styled(value.to_string(), Style::default().fg(color)),
        ]
    };
    let mut spans = count("Total", summary.total, Color::White);
    spans.extend(count("Pending", summary.pending, Color::Gray));
    spans.extend(count("Waitlisted", summary.waitlisted, Color::Yellow));
    spans.extend(count("Accepted", summary.accepted, Color::Green));
    spans.extend(count("Management quota", summary.management_quota, Color::Magenta));
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let title = format!(
        " Applications · {} ",
        admin.institution_name.as_deref().unwrap_or("Institution")
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if dashboard.applications.is_empty() {
        let empty = Paragraph::new("No applications received yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let rows: Vec<Row> = dashboard
        .applications
        .iter()
        .map(|app| {
            let score = app
                .pcm_average
                .or(app.physics)
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string());
            let probability = app
                .ai_probability
                .map(|p| format!("{:.0}%", p))
                .unwrap_or_else(|| "-".to_string());
            let quota = if app.is_management_quota { "MQ" } else { "" };
            Row::new(vec![
                Span::styled(app.reference(), Style::default().fg(Color::Cyan)),
                Span::raw(app.full_name.clone()),
                Span::raw(app.course().to_string()),
                Span::raw(app.community.clone().unwrap_or_default()),
                Span::raw(score),
                Span::raw(probability),
                Span::styled(quota, Style::default().fg(Color::Magenta)),
                Span::styled(
                    app.application_status.to_string(),
                    Style::default().fg(status_color(&app.application_status)),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(15),
            Constraint::Min(18),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(20),
        ],
    )
    .header(
        Row::new(vec![
            "Ref", "Name", "Course", "Comm", "Score", "AI", "MQ", "Status",
        ])
        .style(Style::default().fg(Color::Yellow)),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▸ ")
    .block(block);

    render_scrollable_table(frame, chunks[1], table, Some(dashboard.selected));
}

fn draw_ai_panel(frame: &mut Frame, area: Rect, dashboard: &AdminDashboard) {
    let border_color = if dashboard.ai_input_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Q: ", Style::default().fg(Color::Yellow)),
        Span::raw(dashboard.ai_question.as_str()),
        Span::styled(
            if dashboard.ai_input_active { "▌" } else { "" },
            Style::default().fg(Color::Cyan),
        ),
    ])];
    if let Some(answer) = &dashboard.ai_answer {
        lines.push(Line::from(vec![
            Span::styled("A: ", Style::default().fg(Color::Green)),
            Span::raw(answer.as_str()),
        ]));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Ask AI ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(panel, area);
}
