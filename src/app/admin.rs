//! Key handling for the staff login and dashboard

use super::App;
use crate::state::{ApplicationStatus, PendingConfirm, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

impl App {
    /// Dashboard when a staff session exists, login otherwise
    pub(super) async fn open_admin_portal(&mut self) {
        if self.state.session.admin.is_some() {
            self.navigate(View::AdminDashboard);
            self.load_admin_data().await;
        } else {
            self.state.login.clear();
            self.navigate(View::AdminLogin);
        }
    }

    pub(super) async fn handle_admin_login_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.state.login.next_field();
            }
            KeyCode::Enter => self.admin_login().await,
            _ => {
                Self::edit_text(self.state.login.active_value_mut(), key);
            }
        }
        Ok(())
    }

    async fn admin_login(&mut self) {
        let email = self.state.login.email.trim().to_string();
        let password = self.state.login.secret.clone();
        if email.is_empty() || password.is_empty() {
            self.push_error("Please enter your email and password.");
            return;
        }

        match self.api.admin_login(&email, &password).await {
            Ok(admin) => {
                info!("Staff login: {}", admin.name);
                if let Err(e) = self.sessions.save_admin(&admin) {
                    warn!("Could not persist staff session: {}", e);
                }
                self.state.session.admin = Some(admin);
                self.state.login.clear();
                self.state.admin = Default::default();
                self.navigate(View::AdminDashboard);
                self.load_admin_data().await;
            }
            Err(e) => {
                warn!("Staff login failed: {}", e);
                self.push_error(match e.detail() {
                    Some(detail) => format!("Login failed: {}", detail),
                    None => format!("Login failed. {}", e),
                });
            }
        }
    }

    /// Fetch the overview or the institution's applications for the current session
    pub(super) async fn load_admin_data(&mut self) {
        let Some(admin) = self.state.session.admin.clone() else {
            self.state.login.clear();
            self.state.current_view = View::AdminLogin;
            return;
        };

        match admin.institution_id {
            None => match self.api.group_overview().await {
                Ok(overview) => self.state.admin.set_overview(overview),
                Err(e) => self.push_error(format!("Could not load analytics. {}", e)),
            },
            Some(institution_id) => match self.api.institution_applications(institution_id).await {
                Ok(applications) => self.state.admin.set_applications(applications),
                Err(e) => self.push_error(format!("Could not load applications. {}", e)),
            },
        }
    }

    pub(super) async fn handle_admin_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.admin.ai_input_active {
            match key.code {
                KeyCode::Esc => self.state.admin.ai_input_active = false,
                KeyCode::Enter => self.ask_ai().await,
                _ => {
                    Self::edit_text(&mut self.state.admin.ai_question, key);
                }
            }
            return Ok(());
        }

        let group_level = self
            .state
            .session
            .admin
            .as_ref()
            .is_some_and(|a| a.is_group_level());

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.go_back(),
            KeyCode::Char('l') => self.state.confirm = Some(PendingConfirm::Logout),
            KeyCode::Char('r') => self.load_admin_data().await,
            KeyCode::Char('?') => self.state.admin.ai_input_active = true,
            KeyCode::Left if group_level => self.state.admin.prev_category(),
            KeyCode::Right | KeyCode::Tab if group_level => self.state.admin.next_category(),
            KeyCode::Enter if group_level => self.state.admin.toggle_category(),
            KeyCode::Up | KeyCode::Char('k') => self.state.admin.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.state.admin.select_next(),
            KeyCode::Char('a') => self.decide(ApplicationStatus::Accepted).await,
            KeyCode::Char('w') => self.decide(ApplicationStatus::Waitlisted).await,
            KeyCode::Char('d') => self.decide(ApplicationStatus::Declined).await,
            _ => {}
        }
        Ok(())
    }

    /// Record a decision on the selected pending application
    async fn decide(&mut self, status: ApplicationStatus) {
        let Some(app) = self.state.admin.selected_application() else {
            return;
        };
        if app.application_status != ApplicationStatus::Pending {
            self.state.status_message =
                Some(format!("{} is already {}", app.full_name, app.application_status));
            return;
        }
        let (id, name) = (app.id, app.full_name.clone());

        match self.api.update_application_status(id, status.clone()).await {
            Ok(()) => {
                info!("Application {} marked {}", id, status);
                self.state.admin.apply_status(id, status.clone());
                self.state.status_message = Some(format!("{} marked {}", name, status));
            }
            Err(e) => {
                warn!("Status update for {} failed: {}", id, e);
                self.push_error(format!("Could not update status. {}", e));
            }
        }
    }

    async fn ask_ai(&mut self) {
        let question = self.state.admin.ai_question.trim().to_string();
        if question.is_empty() {
            return;
        }
        let institution_id = self
            .state
            .session
            .admin
            .as_ref()
            .and_then(|a| a.institution_id);

        match self.api.ask_ai(&question, institution_id).await {
            Ok(answer) => {
                self.state.admin.ai_answer = Some(answer);
                self.state.admin.ai_input_active = false;
            }
            Err(e) => self.push_error(format!("The assistant is unavailable. {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{ApiError, MockAdmissionsApi};
    use crate::app::tests::{app_with, key, type_text};
    use crate::state::{
        AdminIdentity, Application, ApplicationStatus, Category, GroupOverview,
        InstitutionBreakdown, OverallTotals, View,
    };
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    fn institution_admin() -> AdminIdentity {
        AdminIdentity {
            admin_id: Some(7),
            name: "Principal".to_string(),
            institution_id: Some(1),
            institution_name: Some("Sri Sairam Engineering College".to_string()),
            institution_type: Some("Engineering".to_string()),
        }
    }

    fn applications() -> Vec<Application> {
        vec![
            Application {
                id: 10,
                full_name: "First Applicant".to_string(),
                ..Default::default()
            },
            Application {
                id: 11,
                full_name: "Second Applicant".to_string(),
                ..Default::default()
            },
        ]
    }

    #[tokio::test]
    async fn test_login_then_accept_pending_application() {
        let mut api = MockAdmissionsApi::new();
        api.expect_admin_login()
            .withf(|email, password| email == "principal@sairam.in" && password == "pw")
            .times(1)
            .returning(|_, _| Ok(institution_admin()));
        api.expect_institution_applications()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(applications()));
        api.expect_update_application_status()
            .withf(|id, status| *id == 11 && *status == ApplicationStatus::Accepted)
            .times(1)
            .returning(|_, _| Ok(()));
        let mut app = app_with(api);

        app.open_admin_portal().await;
        assert_eq!(app.state.current_view, View::AdminLogin);
        type_text(&mut app, "principal@sairam.in").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "pw").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(app.state.current_view, View::AdminDashboard);
        assert_eq!(app.state.admin.applications.len(), 2);

        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Char('a'))).await.unwrap();

        assert_eq!(
            app.state.admin.applications[0].application_status,
            ApplicationStatus::Pending
        );
        assert_eq!(
            app.state.admin.applications[1].application_status,
            ApplicationStatus::Accepted
        );

        // Decided rows are not offered again
        app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
        assert_eq!(
            app.state.admin.applications[1].application_status,
            ApplicationStatus::Accepted
        );
    }

    #[tokio::test]
    async fn test_failed_status_update_leaves_list_unchanged() {
        let mut api = MockAdmissionsApi::new();
        api.expect_update_application_status()
            .times(1)
            .returning(|_, _| {
                Err(ApiError::Backend {
                    status: 500,
                    detail: None,
                })
            });
        let mut app = app_with(api);
        app.state.session.admin = Some(institution_admin());
        app.state.current_view = View::AdminDashboard;
        app.state.admin.set_applications(applications());

        app.handle_key(key(KeyCode::Char('w'))).await.unwrap();

        assert!(app.state.has_errors());
        assert_eq!(app.state.admin.applications, applications());
    }

    #[tokio::test]
    async fn test_group_level_overview_and_drill_down() {
        let mut api = MockAdmissionsApi::new();
        api.expect_group_overview().times(1).returning(|| {
            Ok(GroupOverview {
                overall: OverallTotals {
                    total_apps: 5,
                    total_revenue: 50_000.0,
                },
                breakdown: vec![InstitutionBreakdown {
                    id: 2,
                    name: "Sairam Medical College".to_string(),
                    institution_type: "Medical".to_string(),
                    stats: Default::default(),
                }],
            })
        });
        let mut app = app_with(api);
        app.state.session.admin = Some(AdminIdentity {
            name: "Chairman".to_string(),
            ..Default::default()
        });

        app.open_admin_portal().await;
        assert_eq!(app.state.current_view, View::AdminDashboard);
        assert!(app.state.admin.overview.is_some());

        app.handle_key(key(KeyCode::Right)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.admin.expanded, Some(Category::Medical));
    }

    #[tokio::test]
    async fn test_ask_ai_shows_answer() {
        let mut api = MockAdmissionsApi::new();
        api.expect_ask_ai()
            .withf(|question, institution| question == "How many seats left?" && *institution == Some(1))
            .times(1)
            .returning(|_, _| Ok("12 seats remain in CSE.".to_string()));
        let mut app = app_with(api);
        app.state.session.admin = Some(institution_admin());
        app.state.current_view = View::AdminDashboard;

        app.handle_key(key(KeyCode::Char('?'))).await.unwrap();
        type_text(&mut app, "How many seats left?").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(
            app.state.admin.ai_answer.as_deref(),
            Some("12 seats remain in CSE.")
        );
        assert!(!app.state.admin.ai_input_active);
    }

    #[tokio::test]
    async fn test_missing_session_redirects_to_login() {
        let mut app = app_with(MockAdmissionsApi::new());
        app.state.current_view = View::AdminDashboard;
        app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
        assert_eq!(app.state.current_view, View::AdminLogin);
    }

    #[tokio::test]
    async fn test_empty_login_is_rejected_locally() {
        let mut app = app_with(MockAdmissionsApi::new());
        app.state.current_view = View::AdminLogin;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.has_errors());
        assert_eq!(app.state.current_view, View::AdminLogin);
    }

    #[tokio::test]
    async fn test_invalid_credentials_show_backend_detail() {
        let mut api = MockAdmissionsApi::new();
        api.expect_admin_login().times(1).returning(|_, _| {
            Err(ApiError::Backend {
                status: 401,
                detail: Some("Invalid Credentials".to_string()),
            })
        });
        let mut app = app_with(api);
        app.state.current_view = View::AdminLogin;
        type_text(&mut app, "staff@sairam.in").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "wrong").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();

        assert_eq!(
            app.state.current_error(),
            Some("Login failed: Invalid Credentials")
        );
        assert_eq!(app.state.current_view, View::AdminLogin);
        assert!(app.state.session.admin.is_none());
    }
}
