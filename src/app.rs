//! Application state and core logic

mod admin;
mod student;
mod wizard;

use crate::api::AdmissionsApi;
use crate::session::SessionStore;
use crate::state::{AppState, LandingOption, PendingConfirm, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Admissions backend
    pub api: Box<dyn AdmissionsApi>,
    /// Where logins are persisted
    pub sessions: SessionStore,
    /// Backend origin, used to build admit letter links
    pub api_base_url: String,
    /// Whether the app should quit
    quit: bool,
    /// Copy feedback message
    pub copy_message: Option<String>,
}

impl App {
    /// Create a new App, restoring any saved sessions
    pub fn new(api: Box<dyn AdmissionsApi>, sessions: SessionStore, api_base_url: String) -> Self {
        let mut state = AppState::default();
        state.session = sessions.load();
        if state.session.admin.is_some() || state.session.student.is_some() {
            debug!("Restored saved session");
        }

        Self {
            state,
            api,
            sessions,
            api_base_url,
            quit: false,
            copy_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Handle confirm dialog (modal)
        if self.state.confirm.is_some() {
            self.handle_confirm_key(key).await?;
            return Ok(());
        }

        // Clear any status messages on key press
        self.copy_message = None;

        match self.state.current_view {
            View::Landing => self.handle_landing_key(key).await?,
            View::Wizard => self.handle_wizard_key(key).await?,
            View::AdminLogin => self.handle_admin_login_key(key).await?,
            View::AdminDashboard => self.handle_admin_dashboard_key(key).await?,
            View::StudentLogin => self.handle_student_login_key(key).await?,
            View::StudentDashboard => self.handle_student_dashboard_key(key).await?,
            View::Payment => self.handle_payment_key(key).await?,
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        debug!("Navigate {:?} -> {:?}", self.state.current_view, view);
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view, skipping login forms
    pub fn go_back(&mut self) {
        while let Some(view) = self.state.view_history.pop() {
            if matches!(view, View::AdminLogin | View::StudentLogin) {
                continue;
            }
            self.state.current_view = view;
            return;
        }
        self.state.current_view = View::Landing;
    }

    /// Drop history and show a view as the new root
    pub fn reset_to(&mut self, view: View) {
        self.state.view_history.clear();
        self.state.current_view = view;
    }

    async fn handle_landing_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit = true;
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_landing_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_landing_down(),
            KeyCode::Enter => match self.state.landing_option() {
                LandingOption::Apply => self.open_wizard().await,
                LandingOption::StudentLogin => self.open_student_portal().await,
                LandingOption::AdminLogin => self.open_admin_portal().await,
                LandingOption::Quit => self.quit = true,
            },
            _ => {}
        }
        Ok(())
    }

    async fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(pending) = self.state.confirm.take() {
                    self.run_confirmed(pending).await?;
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state.confirm = None;
            }
            _ => {}
        }
        Ok(())
    }

    async fn run_confirmed(&mut self, pending: PendingConfirm) -> Result<()> {
        match pending {
            PendingConfirm::AcceptOffer { reference, .. } => {
                self.accept_offer(&reference).await;
            }
            PendingConfirm::DeclineOffer { reference } => {
                self.decline_offer(&reference).await;
            }
            PendingConfirm::Logout => {
                self.logout()?;
            }
        }
        Ok(())
    }

    /// Clear whichever session belongs to the current view and return to the landing page
    pub fn logout(&mut self) -> Result<()> {
        match self.state.current_view {
            View::AdminDashboard | View::AdminLogin => {
                self.state.session.admin = None;
                self.state.admin = Default::default();
                self.sessions.clear_admin()?;
            }
            View::StudentDashboard | View::StudentLogin | View::Payment => {
                self.state.session.student = None;
                self.state.student = Default::default();
                self.state.payment = None;
                self.sessions.clear_student()?;
            }
            _ => {}
        }
        self.state.status_message = Some("Logged out".to_string());
        self.reset_to(View::Landing);
        Ok(())
    }

    /// Append a typed character to a text buffer
    fn edit_text(buffer: &mut String, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.push(c);
                true
            }
            KeyCode::Backspace => {
                buffer.pop();
                true
            }
            _ => false,
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }

    /// Copy text, reporting the outcome in the status bar
    pub fn copy_text(&mut self, label: &str, text: &str) {
        match self.copy_to_clipboard(text) {
            Ok(()) => self.copy_message = Some(format!("Copied {}", label)),
            Err(e) => {
                warn!("Clipboard unavailable: {}", e);
                self.copy_message = Some(format!("{}: {}", label, text));
            }
        }
    }
}
