//! Single-line form field rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one bordered field
pub const FIELD_HEIGHT: u16 = 3;

/// How a field's value is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// Typed text with a cursor
    Text,
    /// Typed text shown as bullets
    Masked,
    /// Cycled with Left/Right
    Choice,
    /// On/off toggle
    Flag,
}

fn display_value(value: &str, style: FieldStyle, is_active: bool) -> String {
    match style {
        FieldStyle::Flag => {
            let on = value == "Yes";
            format!("[{}] {}", if on { "x" } else { " " }, if on { "Yes" } else { "No" })
        }
        _ if value.is_empty() && !is_active => "(empty)".to_string(),
        FieldStyle::Masked => "•".repeat(value.chars().count()),
        FieldStyle::Choice if value.is_empty() => "◂ select ▸".to_string(),
        FieldStyle::Choice => format!("◂ {} ▸", value),
        FieldStyle::Text => value.to_string(),
    }
}

/// Draw a bordered field. Required fields carry a `*` after the label.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    required: bool,
    style: FieldStyle,
) {
    let color = if is_active { Color::Cyan } else { Color::DarkGray };
    let value_style = if is_active || !value.is_empty() {
        Style::default().fg(if is_active { Color::Cyan } else { Color::White })
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let typed = matches!(style, FieldStyle::Text | FieldStyle::Masked);
    let cursor = if is_active && typed { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value(value, style, is_active), value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let title = if required {
        format!(" {} * ", label)
    } else {
        format!(" {} ", label)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    frame.render_widget(content.block(block), area);
}
