//! Admin and student dashboard state

use super::records::{
    Application, ApplicationStatus, GroupOverview, InstitutionBreakdown, InstitutionType,
    ProfileUpdate,
};

/// Card grouping on the group-level overview.
/// Polytechnic institutions are counted under Engineering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Engineering,
    Medical,
    School,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Engineering, Self::Medical, Self::School];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Engineering => "Engineering & Polytechnic",
            Self::Medical => "Medical",
            Self::School => "Schools",
        }
    }

    pub fn includes(&self, institution_type: &str) -> bool {
        match InstitutionType::parse(institution_type) {
            Some(InstitutionType::Engineering | InstitutionType::Polytechnic) => {
                *self == Self::Engineering
            }
            Some(InstitutionType::Medical) => *self == Self::Medical,
            Some(InstitutionType::School) => *self == Self::School,
            None => false,
        }
    }
}

/// Rolled-up counters for one category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryStats {
    pub total: u32,
    pub accepted: u32,
    pub declined: u32,
    pub waitlisted: u32,
    pub pending: u32,
    pub revenue: f64,
}

pub fn institutions_in(breakdown: &[InstitutionBreakdown], category: Category) -> Vec<&InstitutionBreakdown> {
    breakdown
        .iter()
        .filter(|inst| category.includes(&inst.institution_type))
        .collect()
}

pub fn category_stats(breakdown: &[InstitutionBreakdown], category: Category) -> CategoryStats {
    institutions_in(breakdown, category)
        .into_iter()
        .fold(CategoryStats::default(), |mut acc, inst| {
            acc.total += inst.stats.total;
            acc.accepted += inst.stats.accepted;
            acc.declined += inst.stats.declined;
            acc.waitlisted += inst.stats.waitlisted;
            acc.pending += inst.stats.pending;
            acc.revenue += inst.stats.revenue;
            acc
        })
}

/// Counters derived locally from an institution's application list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationSummary {
    pub total: usize,
    pub pending: usize,
    pub waitlisted: usize,
    pub accepted: usize,
    pub management_quota: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    /// Group-level analytics (sessions without an institution)
    pub overview: Option<GroupOverview>,
    pub category_index: usize,
    pub expanded: Option<Category>,

    /// Institution-level application list
    pub applications: Vec<Application>,
    pub selected: usize,

    pub ai_question: String,
    pub ai_answer: Option<String>,
    pub ai_input_active: bool,
}

impl AdminDashboard {
    pub fn set_overview(&mut self, overview: GroupOverview) {
        self.overview = Some(overview);
    }

    pub fn set_applications(&mut self, applications: Vec<Application>) {
        self.applications = applications;
        if self.selected >= self.applications.len() {
            self.selected = self.applications.len().saturating_sub(1);
        }
    }

    pub fn focused_category(&self) -> Category {
        Category::ALL[self.category_index % Category::ALL.len()]
    }

    pub fn next_category(&mut self) {
        self.category_index = (self.category_index + 1) % Category::ALL.len();
    }

    pub fn prev_category(&mut self) {
        let len = Category::ALL.len();
        self.category_index = (self.category_index + len - 1) % len;
    }

    /// Show or hide the institution table for the focused card
    pub fn toggle_category(&mut self) {
        let focused = self.focused_category();
        self.expanded = if self.expanded == Some(focused) {
            None
        } else {
            Some(focused)
        };
    }

    pub fn stats_for(&self, category: Category) -> CategoryStats {
        self.overview
            .as_ref()
            .map(|o| category_stats(&o.breakdown, category))
            .unwrap_or_default()
    }

    pub fn select_next(&mut self) {
        if !self.applications.is_empty() {
            self.selected = (self.selected + 1).min(self.applications.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_application(&self) -> Option<&Application> {
        self.applications.get(self.selected)
    }

    /// Record a confirmed status change on one row. Returns false when the id is unknown.
    pub fn apply_status(&mut self, application_id: i64, status: ApplicationStatus) -> bool {
        match self.applications.iter_mut().find(|a| a.id == application_id) {
            Some(app) => {
                app.application_status = status;
                true
            }
            None => false,
        }
    }

    pub fn summary(&self) -> ApplicationSummary {
        let count = |status: ApplicationStatus| {
            self.applications
                .iter()
                .filter(|a| a.application_status == status)
                .count()
        };
        ApplicationSummary {
            total: self.applications.len(),
            pending: count(ApplicationStatus::Pending),
            waitlisted: count(ApplicationStatus::Waitlisted),
            accepted: count(ApplicationStatus::Accepted),
            management_quota: self
                .applications
                .iter()
                .filter(|a| a.is_management_quota)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudentTab {
    #[default]
    Home,
    Application,
}

/// Contact fields editable on the application tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Mobile,
    Email,
    City,
    State,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [Self::Mobile, Self::Email, Self::City, Self::State];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Email => "Email",
            Self::City => "City",
            Self::State => "State",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileEditForm {
    pub update: ProfileUpdate,
    pub active_field: usize,
}

impl ProfileEditForm {
    pub fn new(update: ProfileUpdate) -> Self {
        Self {
            update,
            active_field: 0,
        }
    }

    pub fn active(&self) -> ProfileField {
        ProfileField::ALL[self.active_field % ProfileField::ALL.len()]
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % ProfileField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        let len = ProfileField::ALL.len();
        self.active_field = (self.active_field + len - 1) % len;
    }

    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Mobile => &self.update.mobile,
            ProfileField::Email => &self.update.email,
            ProfileField::City => &self.update.address_city,
            ProfileField::State => &self.update.address_state,
        }
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        match self.active() {
            ProfileField::Mobile => &mut self.update.mobile,
            ProfileField::Email => &mut self.update.email,
            ProfileField::City => &mut self.update.address_city,
            ProfileField::State => &mut self.update.address_state,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StudentDashboard {
    pub applications: Vec<Application>,
    pub selected: usize,
    pub tab: StudentTab,
    pub edit: Option<ProfileEditForm>,
}

impl StudentDashboard {
    /// Replace the list, keeping the selected application when it is still present
    pub fn set_applications(&mut self, applications: Vec<Application>) {
        let keep = self.selected_application().map(|a| a.id);
        self.applications = applications;
        self.selected = keep
            .and_then(|id| self.applications.iter().position(|a| a.id == id))
            .unwrap_or(0);
        if self.applications.is_empty() {
            self.tab = StudentTab::Home;
        }
    }

    pub fn selected_application(&self) -> Option<&Application> {
        self.applications.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.applications.is_empty() {
            self.selected = (self.selected + 1).min(self.applications.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Switch to the detail tab; stays on Home when there is nothing to show
    pub fn open_application(&mut self) -> bool {
        if self.applications.is_empty() {
            return false;
        }
        self.tab = StudentTab::Application;
        true
    }

    pub fn show_home(&mut self) {
        self.tab = StudentTab::Home;
        self.edit = None;
    }

    pub fn start_edit(&mut self) -> bool {
        match self.selected_application() {
            Some(app) => {
                self.edit = Some(ProfileEditForm::new(ProfileUpdate::from_application(app)));
                true
            }
            None => false,
        }
    }

    /// An offer is waiting for the applicant's answer
    pub fn can_respond(&self) -> bool {
        self.selected_application()
            .is_some_and(|a| a.application_status == ApplicationStatus::Accepted)
    }

    /// Offer accepted, fee not yet paid
    pub fn awaiting_payment(&self) -> bool {
        self.selected_application()
            .is_some_and(|a| a.application_status == ApplicationStatus::OfferAccepted)
    }
}

/// Fee payment for one accepted offer
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentState {
    pub reference: String,
    pub institution_name: String,
    pub institution_type: Option<InstitutionType>,
    pub amount: u32,
    pub paid: bool,
}

/// Fee charged for an institution type; unknown types pay the school fee
pub fn admission_fee(kind: Option<InstitutionType>) -> u32 {
    kind.unwrap_or(InstitutionType::School).admission_fee()
}

impl PaymentState {
    pub fn for_application(app: &Application) -> Self {
        let kind = app.institution_kind();
        Self {
            reference: app.reference(),
            institution_name: app.institution_name.clone().unwrap_or_default(),
            institution_type: kind,
            amount: admission_fee(kind),
            paid: false,
        }
    }
}

/// Link to an admit letter; relative paths are served from the backend's `/files/`
pub fn admit_letter_link(base_url: &str, letter: &str) -> String {
    if letter.starts_with("http://") || letter.starts_with("https://") {
        letter.to_string()
    } else {
        format!(
            "{}/files/{}",
            base_url.trim_end_matches('/'),
            letter.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::records::InstitutionStats;
    use pretty_assertions::assert_eq;

    fn breakdown(id: i64, kind: &str, total: u32, revenue: f64) -> InstitutionBreakdown {
        InstitutionBreakdown {
            id,
            name: format!("Institution {}", id),
            institution_type: kind.to_string(),
            stats: InstitutionStats {
                total,
                accepted: 1,
                declined: 0,
                waitlisted: 0,
                pending: total - 1,
                revenue,
            },
        }
    }

    fn application(id: i64, status: ApplicationStatus) -> Application {
        Application {
            id,
            full_name: format!("Applicant {}", id),
            application_status: status,
            ..Default::default()
        }
    }

    #[test]
    fn test_engineering_category_includes_polytechnic() {
        let rows = vec![
            breakdown(1, "Engineering", 10, 50_000.0),
            breakdown(2, "Polytechnic", 4, 30_000.0),
            breakdown(3, "Medical", 6, 0.0),
            breakdown(4, "School", 2, 25_000.0),
        ];
        let eng = category_stats(&rows, Category::Engineering);
        assert_eq!(eng.total, 14);
        assert_eq!(eng.accepted, 2);
        assert_eq!(eng.pending, 12);
        assert_eq!(eng.revenue, 80_000.0);

        assert_eq!(category_stats(&rows, Category::Medical).total, 6);
        assert_eq!(institutions_in(&rows, Category::School).len(), 1);
        assert_eq!(institutions_in(&rows, Category::Engineering).len(), 2);
    }

    #[test]
    fn test_toggle_category_drill_down() {
        let mut dashboard = AdminDashboard::default();
        dashboard.next_category();
        assert_eq!(dashboard.focused_category(), Category::Medical);
        dashboard.toggle_category();
        assert_eq!(dashboard.expanded, Some(Category::Medical));
        dashboard.toggle_category();
        assert_eq!(dashboard.expanded, None);
        dashboard.prev_category();
        dashboard.prev_category();
        assert_eq!(dashboard.focused_category(), Category::School);
    }

    #[test]
    fn test_status_update_changes_only_one_row() {
        let mut dashboard = AdminDashboard::default();
        dashboard.set_applications(vec![
            application(1, ApplicationStatus::Pending),
            application(2, ApplicationStatus::Pending),
            application(3, ApplicationStatus::Waitlisted),
        ]);
        let before = dashboard.applications.clone();

        assert!(dashboard.apply_status(2, ApplicationStatus::Accepted));

        assert_eq!(dashboard.applications[0], before[0]);
        assert_eq!(
            dashboard.applications[1].application_status,
            ApplicationStatus::Accepted
        );
        assert_eq!(dashboard.applications[2], before[2]);
        assert!(!dashboard.apply_status(99, ApplicationStatus::Declined));
    }

    #[test]
    fn test_summary_counts() {
        let mut dashboard = AdminDashboard::default();
        let mut quota = application(3, ApplicationStatus::Accepted);
        quota.is_management_quota = true;
        dashboard.set_applications(vec![
            application(1, ApplicationStatus::Pending),
            application(2, ApplicationStatus::Waitlisted),
            quota,
        ]);
        assert_eq!(
            dashboard.summary(),
            ApplicationSummary {
                total: 3,
                pending: 1,
                waitlisted: 1,
                accepted: 1,
                management_quota: 1,
            }
        );
    }

    #[test]
    fn test_student_refresh_keeps_selection() {
        let mut dashboard = StudentDashboard::default();
        dashboard.set_applications(vec![
            application(1, ApplicationStatus::Pending),
            application(2, ApplicationStatus::Accepted),
        ]);
        dashboard.select_next();
        assert!(dashboard.can_respond());

        dashboard.set_applications(vec![
            application(5, ApplicationStatus::Pending),
            application(1, ApplicationStatus::Pending),
            application(2, ApplicationStatus::OfferAccepted),
        ]);
        assert_eq!(dashboard.selected_application().unwrap().id, 2);
        assert!(dashboard.awaiting_payment());
        assert!(!dashboard.can_respond());
    }

    #[test]
    fn test_application_tab_needs_applications() {
        let mut dashboard = StudentDashboard::default();
        assert!(!dashboard.open_application());
        assert_eq!(dashboard.tab, StudentTab::Home);
        assert!(!dashboard.start_edit());

        dashboard.set_applications(vec![application(1, ApplicationStatus::Pending)]);
        assert!(dashboard.open_application());
        assert_eq!(dashboard.tab, StudentTab::Application);
    }

    #[test]
    fn test_profile_edit_form_cycles_fields() {
        let mut app = application(1, ApplicationStatus::Pending);
        app.mobile = Some("9000000000".to_string());
        app.address_city = Some("Chennai".to_string());
        let mut dashboard = StudentDashboard::default();
        dashboard.set_applications(vec![app]);
        assert!(dashboard.start_edit());

        let form = dashboard.edit.as_mut().unwrap();
        assert_eq!(form.active(), ProfileField::Mobile);
        form.prev_field();
        assert_eq!(form.active(), ProfileField::State);
        form.next_field();
        form.next_field();
        form.next_field();
        form.active_value_mut().push_str(" North");
        assert_eq!(form.value(ProfileField::City), "Chennai North");
        assert_eq!(form.value(ProfileField::Mobile), "9000000000");
    }

    #[test]
    fn test_fee_by_institution_type() {
        assert_eq!(admission_fee(Some(InstitutionType::Engineering)), 50_000);
        assert_eq!(admission_fee(Some(InstitutionType::Medical)), 100_000);
        assert_eq!(admission_fee(Some(InstitutionType::Polytechnic)), 30_000);
        assert_eq!(admission_fee(Some(InstitutionType::School)), 25_000);
        assert_eq!(admission_fee(None), 25_000);

        let mut app = application(4, ApplicationStatus::OfferAccepted);
        app.application_ref_id = Some("MED-2025-0004".to_string());
        app.institution_type = Some("Medical".to_string());
        let payment = PaymentState::for_application(&app);
        assert_eq!(payment.reference, "MED-2025-0004");
        assert_eq!(payment.amount, 100_000);
    }

    #[test]
    fn test_admit_letter_link() {
        assert_eq!(
            admit_letter_link("http://127.0.0.1:8000/", "letters/a.pdf"),
            "http://127.0.0.1:8000/files/letters/a.pdf"
        );
        assert_eq!(
            admit_letter_link("http://x", "https://cdn.example.com/a.pdf"),
            "https://cdn.example.com/a.pdf"
        );
    }
}
