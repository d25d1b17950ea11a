//! Confirmation dialog for offer responses and logout

use super::base::{key_span, render_dialog, DialogConfig};
use crate::state::PendingConfirm;
use ratatui::{
    style::{Color, Style},
    text::Span,
    Frame,
};

pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingConfirm) {
    let accent = match pending {
        PendingConfirm::AcceptOffer { .. } => Color::Green,
        PendingConfirm::DeclineOffer { .. } => Color::Red,
        PendingConfirm::Logout => Color::Yellow,
    };
    let message = pending.message();

    let hint = vec![
        key_span("y"),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        key_span("n"),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: pending.title(),
            title_color: accent,
            border_color: accent,
            message: &message,
            hint: Some(hint),
            max_width: 56,
        },
    );
}
