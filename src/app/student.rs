//! Key handling for the applicant login, dashboard and fee payment

use super::App;
use crate::state::{
    admit_letter_link, OfferAction, PaymentState, PendingConfirm, StudentTab, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

impl App {
    /// Dashboard when an applicant session exists, login otherwise
    pub(super) async fn open_student_portal(&mut self) {
        if self.state.session.student.is_some() {
            self.navigate(View::StudentDashboard);
            self.load_student_applications().await;
        } else {
            self.state.login.clear();
            self.navigate(View::StudentLogin);
        }
    }

    pub(super) async fn handle_student_login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.state.login.next_field();
            }
            KeyCode::Enter => self.student_login().await,
            _ => {
                Self::edit_text(self.state.login.active_value_mut(), key);
            }
        }
        Ok(())
    }

    async fn student_login(&mut self) {
        let email = self.state.login.email.trim().to_string();
        let dob = self.state.login.secret.trim().to_string();
        if email.is_empty() || dob.is_empty() {
            self.push_error("Please enter your email and date of birth.");
            return;
        }

        match self.api.student_login(&email, &dob).await {
            Ok(student) => {
                info!("Applicant login: {}", student.email);
                if let Err(e) = self.sessions.save_student(&student) {
                    warn!("Could not persist applicant session: {}", e);
                }
                self.state.session.student = Some(student);
                self.state.login.clear();
                self.state.student = Default::default();
                self.navigate(View::StudentDashboard);
                self.load_student_applications().await;
            }
            Err(e) => {
                warn!("Applicant login failed: {}", e);
                self.push_error(match e.detail() {
                    Some(detail) => format!("Login failed: {}", detail),
                    None => format!("Login failed. {}", e),
                });
            }
        }
    }

    pub(super) async fn load_student_applications(&mut self) {
        let Some(email) = self.state.session.student.as_ref().map(|s| s.email.clone()) else {
            self.state.login.clear();
            self.state.current_view = View::StudentLogin;
            return;
        };
        match self.api.my_applications(&email).await {
            Ok(applications) => self.state.student.set_applications(applications),
            Err(e) => self.push_error(format!("Could not load your applications. {}", e)),
        }
    }

    pub(super) async fn handle_student_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.student.edit.is_some() {
            self.handle_profile_edit_key(key).await;
            return Ok(());
        }

        let on_detail = self.state.student.tab == StudentTab::Application;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc if on_detail => self.state.student.show_home(),
            KeyCode::Char('q') | KeyCode::Esc => self.go_back(),
            KeyCode::Up | KeyCode::Char('k') if !on_detail => self.state.student.select_prev(),
            KeyCode::Down | KeyCode::Char('j') if !on_detail => self.state.student.select_next(),
            KeyCode::Enter => {
                if !self.state.student.open_application() {
                    self.state.status_message = Some("No applications yet".to_string());
                }
            }
            KeyCode::Char('r') => self.load_student_applications().await,
            KeyCode::Char('l') => self.state.confirm = Some(PendingConfirm::Logout),
            KeyCode::Char('a') | KeyCode::Char('d') => {
                let Some(app) = self.state.student.selected_application() else {
                    return Ok(());
                };
                if !self.state.student.can_respond() {
                    self.state.status_message =
                        Some("This application has no offer to respond to".to_string());
                    return Ok(());
                }
                let reference = app.reference();
                self.state.confirm = Some(if key.code == KeyCode::Char('a') {
                    PendingConfirm::AcceptOffer {
                        reference,
                        institution: app.institution_name.clone().unwrap_or_default(),
                    }
                } else {
                    PendingConfirm::DeclineOffer { reference }
                });
            }
            KeyCode::Char('p') => {
                if let Some(app) = self
                    .state
                    .student
                    .selected_application()
                    .filter(|_| self.state.student.awaiting_payment())
                {
                    self.state.payment = Some(PaymentState::for_application(app));
                    self.navigate(View::Payment);
                }
            }
            KeyCode::Char('e') if on_detail => {
                self.state.student.start_edit();
            }
            KeyCode::Char('y') => self.copy_application_link(),
            _ => {}
        }
        Ok(())
    }

    /// Copy the admit letter link when there is one, otherwise the reference
    fn copy_application_link(&mut self) {
        let Some(app) = self.state.student.selected_application() else {
            return;
        };
        let (label, text) = match app.admit_letter_url.as_deref() {
            Some(letter) if !letter.is_empty() => {
                ("admit letter link", admit_letter_link(&self.api_base_url, letter))
            }
            _ => ("application reference", app.reference()),
        };
        self.copy_text(label, &text);
    }

    async fn handle_profile_edit_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.student.edit.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.student.edit = None,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Enter => self.save_profile().await,
            _ => {
                Self::edit_text(form.active_value_mut(), key);
            }
        }
    }

    async fn save_profile(&mut self) {
        let Some(reference) = self.state.student.selected_application().map(|a| a.reference()) else {
            return;
        };
        let Some(form) = self.state.student.edit.take() else {
            return;
        };

        match self.api.update_profile(&reference, &form.update).await {
            Ok(()) => {
                info!("Profile updated for {}", reference);
                self.state.status_message = Some("Profile updated".to_string());
                self.load_student_applications().await;
            }
            Err(e) => {
                self.state.student.edit = Some(form);
                self.push_error(format!("Could not update profile. {}", e));
            }
        }
    }

    /// Accept an offer, then continue to the fee payment
    pub(super) async fn accept_offer(&mut self, reference: &str) {
        match self.api.respond_offer(reference, OfferAction::Accept).await {
            Ok(message) => {
                info!("Offer {} accepted", reference);
                self.state.status_message = Some(message);
                self.load_student_applications().await;
                let payment = self
                    .state
                    .student
                    .applications
                    .iter()
                    .find(|a| a.reference() == reference)
                    .map(PaymentState::for_application);
                if let Some(payment) = payment {
                    self.state.payment = Some(payment);
                    self.navigate(View::Payment);
                }
            }
            Err(e) => self.push_error(format!("Could not accept the offer. {}", e)),
        }
    }

    pub(super) async fn decline_offer(&mut self, reference: &str) {
        match self.api.respond_offer(reference, OfferAction::Decline).await {
            Ok(message) => {
                info!("Offer {} declined", reference);
                self.state.status_message = Some(message);
                self.load_student_applications().await;
            }
            Err(e) => self.push_error(format!("Could not decline the offer. {}", e)),
        }
    }

    pub(super) async fn handle_payment_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(payment) = self.state.payment.clone() else {
            self.go_back();
            return Ok(());
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.state.payment = None;
                self.go_back();
            }
            KeyCode::Enter | KeyCode::Char('p') if !payment.paid => {
                match self.api.pay_fee(&payment.reference, f64::from(payment.amount)).await {
                    Ok(()) => {
                        info!("Fee paid for {}", payment.reference);
                        if let Some(payment) = self.state.payment.as_mut() {
                            payment.paid = true;
                        }
                        self.state.status_message =
                            Some("Payment successful! Your admission is confirmed.".to_string());
                        self.load_student_applications().await;
                        self.go_back();
                    }
                    Err(e) => self.push_error(format!("Payment failed. {}", e)),
                }
            }
            KeyCode::Enter => self.go_back(),
            _ => {}
        }
        Ok(())
    }
}
