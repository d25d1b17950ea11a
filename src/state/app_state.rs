//! Application state definitions

use super::dashboard::{AdminDashboard, PaymentState, StudentDashboard};
use super::records::{Course, Institution};
use super::wizard::FormStore;
use crate::session::Session;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Wizard,
    AdminLogin,
    AdminDashboard,
    StudentLogin,
    StudentDashboard,
    Payment,
}

/// Entries on the landing menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOption {
    Apply,
    StudentLogin,
    AdminLogin,
    Quit,
}

impl LandingOption {
    pub const ALL: [LandingOption; 4] = [
        Self::Apply,
        Self::StudentLogin,
        Self::AdminLogin,
        Self::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Apply => "Apply for Admission",
            Self::StudentLogin => "Track My Application",
            Self::AdminLogin => "Staff Login",
            Self::Quit => "Quit",
        }
    }
}

/// Email plus password (staff) or date of birth (applicants)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub secret: String,
    pub active_field: usize,
}

impl LoginForm {
    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % 2;
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        if self.active_field == 0 {
            &mut self.email
        } else {
            &mut self.secret
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Wizard screen state around the form store
#[derive(Debug, Clone, Default)]
pub struct WizardView {
    pub store: FormStore,
    pub institutions: Vec<Institution>,
    pub institution_index: usize,
    pub courses: Vec<Course>,
    /// Focused row on form steps
    pub active_row: usize,
    /// Last email sent to the returning-applicant lookup
    pub looked_up_email: Option<String>,
}

/// Actions waiting on a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirm {
    AcceptOffer { reference: String, institution: String },
    DeclineOffer { reference: String },
    Logout,
}

impl PendingConfirm {
    pub fn title(&self) -> &'static str {
        match self {
            Self::AcceptOffer { .. } => "Accept Offer",
            Self::DeclineOffer { .. } => "Decline Offer",
            Self::Logout => "Logout",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::AcceptOffer { institution, .. } => format!(
                "Congratulations! To confirm your seat at {}, complete the admission fee payment.\n\nProceed to payment?",
                institution
            ),
            Self::DeclineOffer { .. } => {
                "Are you sure you want to decline this offer? This cannot be undone.".to_string()
            }
            Self::Logout => "Log out and clear the saved session?".to_string(),
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,
    pub landing_index: usize,

    // Who is logged in
    pub session: Session,

    // Per-view state
    pub login: LoginForm,
    pub wizard: WizardView,
    pub admin: AdminDashboard,
    pub student: StudentDashboard,
    pub payment: Option<PaymentState>,

    // Modals and feedback
    errors: VecDeque<String>,
    pub confirm: Option<PendingConfirm>,
    pub status_message: Option<String>,
}

impl AppState {
    /// Queue an error for the modal dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Number of errors waiting behind the current one
    pub fn queued_errors(&self) -> usize {
        self.errors.len().saturating_sub(1)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn landing_option(&self) -> LandingOption {
        LandingOption::ALL[self.landing_index % LandingOption::ALL.len()]
    }

    /// Move selection down
    pub fn move_landing_down(&mut self) {
        if self.landing_index + 1 < LandingOption::ALL.len() {
            self.landing_index += 1;
        }
    }

    /// Move selection up
    pub fn move_landing_up(&mut self) {
        self.landing_index = self.landing_index.saturating_sub(1);
    }
}
