//! UI module for rendering the TUI

mod admin;
mod components;
mod landing;
mod layout;
mod login;
mod student;
mod widgets;
mod wizard;

use crate::app::App;
use crate::state::{ApplicationStatus, View};
use ratatui::{style::Color, Frame};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Landing => landing::draw(frame, main_area, app),
        View::Wizard => wizard::draw(frame, main_area, app),
        View::AdminLogin => login::draw_admin(frame, main_area, app),
        View::StudentLogin => login::draw_student(frame, main_area, app),
        View::AdminDashboard => admin::draw(frame, main_area, app),
        View::StudentDashboard => student::draw_dashboard(frame, main_area, app),
        View::Payment => student::draw_payment(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Modals on top, errors above confirmations
    if let Some(pending) = &app.state.confirm {
        components::render_confirm_dialog(frame, pending);
    }
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message, app.state.queued_errors());
    }
}

/// Terminal color for an application status
fn status_color(status: &ApplicationStatus) -> Color {
    status.color().parse().unwrap_or(Color::Gray)
}

/// Rupee amount with Indian digit grouping, e.g. `₹1,00,000`
fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, back) = rest.split_at(rest.len() - 2);
        groups.push(back);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("₹{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(0), "₹0");
        assert_eq!(format_rupees(999), "₹999");
        assert_eq!(format_rupees(25_000), "₹25,000");
        assert_eq!(format_rupees(100_000), "₹1,00,000");
        assert_eq!(format_rupees(12_345_678), "₹1,23,45,678");
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(&ApplicationStatus::Accepted), Color::Green);
        assert_eq!(status_color(&ApplicationStatus::Declined), Color::Red);
        assert_eq!(status_color(&ApplicationStatus::Pending), Color::Gray);
    }
}
