//! Records exchanged with the admissions backend

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Nullable backend columns: `null` reads as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Kind of institution; decides required fields and the scoring formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstitutionType {
    Engineering,
    Medical,
    School,
    Polytechnic,
}

impl InstitutionType {
    /// Parse the backend's type string
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Engineering" => Some(Self::Engineering),
            "Medical" => Some(Self::Medical),
            "School" => Some(Self::School),
            "Polytechnic" => Some(Self::Polytechnic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Medical => "Medical",
            Self::School => "School",
            Self::Polytechnic => "Polytechnic",
        }
    }

    /// Engineering and Polytechnic take three ranked course preferences
    pub fn allows_multiple_preferences(&self) -> bool {
        matches!(self, Self::Engineering | Self::Polytechnic)
    }

    /// Number of course preference slots shown for this type
    pub fn preference_count(&self) -> usize {
        if self.allows_multiple_preferences() {
            3
        } else {
            1
        }
    }

    /// Admission fee charged once an offer is accepted
    pub fn admission_fee(&self) -> u32 {
        match self {
            Self::Engineering => 50_000,
            Self::Medical => 100_000,
            Self::Polytechnic => 30_000,
            Self::School => 25_000,
        }
    }
}

impl fmt::Display for InstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Institution offered in the first wizard step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    pub institution_type: String,
}

impl Institution {
    pub fn kind(&self) -> Option<InstitutionType> {
        InstitutionType::parse(&self.institution_type)
    }
}

/// Course (or class/grade for schools) offered by an institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

/// Decision state of an application as tracked by the backend
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Waitlisted,
    Declined,
    OfferAccepted,
    AdmissionConfirmed,
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Waitlisted => "Waitlisted",
            Self::Declined => "Declined",
            Self::OfferAccepted => "Offer Accepted",
            Self::AdmissionConfirmed => "Admission Confirmed",
            Self::Other(s) => s,
        }
    }

    /// Label shown to applicants
    pub fn student_label(&self) -> &str {
        match self {
            Self::OfferAccepted => "Pending Payment",
            other => other.as_str(),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Accepted => "green",
            Self::OfferAccepted => "blue",
            Self::AdmissionConfirmed => "magenta",
            Self::Waitlisted => "yellow",
            Self::Declined => "red",
            Self::Pending | Self::Other(_) => "gray",
        }
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => Self::Pending,
            "Accepted" => Self::Accepted,
            "Waitlisted" => Self::Waitlisted,
            "Declined" => Self::Declined,
            "Offer Accepted" => Self::OfferAccepted,
            "Admission Confirmed" => Self::AdmissionConfirmed,
            _ => Self::Other(value),
        }
    }
}

impl From<ApplicationStatus> for String {
    fn from(value: ApplicationStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eligibility outcome returned when an application is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinalStatus {
    Qualified,
    ManagementReview,
    NotQualified,
    MeritList,
    Other(String),
}

impl FinalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Qualified => "Qualified",
            Self::ManagementReview => "Management Review",
            Self::NotQualified => "Not Qualified",
            Self::MeritList => "Merit List",
            Self::Other(s) => s,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Self::Qualified | Self::MeritList)
    }
}

impl From<String> for FinalStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Qualified" => Self::Qualified,
            "Management Review" => Self::ManagementReview,
            "Not Qualified" => Self::NotQualified,
            "Merit List" => Self::MeritList,
            _ => Self::Other(value),
        }
    }
}

impl From<FinalStatus> for String {
    fn from(value: FinalStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `POST /submit-application/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub final_status: FinalStatus,
    #[serde(default)]
    pub application_ref_id: Option<String>,
    #[serde(default)]
    pub ai_probability: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Application as listed on the admin and student dashboards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub id: i64,
    pub application_ref_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    pub mobile: Option<String>,
    pub community: Option<String>,
    pub pcm_average: Option<f64>,
    pub physics: Option<f64>,
    pub course_pref_1: Option<String>,
    pub qualification_status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub application_status: ApplicationStatus,
    pub ai_probability: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_management_quota: bool,
    pub institution_name: Option<String>,
    pub institution_type: Option<String>,
    pub admit_letter_url: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
}

impl Application {
    pub fn institution_kind(&self) -> Option<InstitutionType> {
        self.institution_type
            .as_deref()
            .and_then(InstitutionType::parse)
    }

    /// Reference used by the student endpoints; falls back to the numeric id
    pub fn reference(&self) -> String {
        self.application_ref_id
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.id.to_string())
    }

    pub fn course(&self) -> &str {
        self.course_pref_1.as_deref().unwrap_or("-")
    }
}

/// Per-institution counters from the group overview
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstitutionStats {
    pub total: u32,
    pub accepted: u32,
    pub declined: u32,
    pub waitlisted: u32,
    pub pending: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstitutionBreakdown {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub institution_type: String,
    #[serde(default)]
    pub stats: InstitutionStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallTotals {
    pub total_apps: u32,
    pub total_revenue: f64,
}

/// Response of `GET /admin/analytics/group-overview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupOverview {
    pub overall: OverallTotals,
    pub breakdown: Vec<InstitutionBreakdown>,
}

/// Staff identity returned by `POST /admin/login/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminIdentity {
    pub admin_id: Option<i64>,
    pub name: String,
    pub institution_id: Option<i64>,
    pub institution_name: Option<String>,
    pub institution_type: Option<String>,
}

impl AdminIdentity {
    /// Group management has no institution and sees the analytics overview
    pub fn is_group_level(&self) -> bool {
        self.institution_id.is_none()
    }

    pub fn institution_kind(&self) -> Option<InstitutionType> {
        self.institution_type
            .as_deref()
            .and_then(InstitutionType::parse)
    }
}

/// Applicant identity returned by `POST /student/login/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentIdentity {
    pub email: String,
    pub full_name: Option<String>,
}

/// Prior applicant data used to auto-fill the basic information step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupResult {
    pub found: bool,
    pub full_name: Option<String>,
    pub mobile: Option<String>,
    pub dob: Option<String>,
    pub aadhaar_no: Option<String>,
    pub community: Option<String>,
    pub father_name: Option<String>,
    pub father_mobile: Option<String>,
    pub address_city: Option<String>,
    pub address_state: Option<String>,
    pub gender: Option<String>,
    pub blood_group: Option<String>,
    pub message: Option<String>,
}

/// Applicant's answer to an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferAction {
    Accept,
    Decline,
}

/// Contact details an applicant may change after submitting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub mobile: String,
    pub email: String,
    pub address_city: String,
    pub address_state: String,
}

impl ProfileUpdate {
    pub fn from_application(app: &Application) -> Self {
        Self {
            mobile: app.mobile.clone().unwrap_or_default(),
            email: app.email.clone(),
            address_city: app.address_city.clone().unwrap_or_default(),
            address_state: app.address_state.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_institution_type_parse() {
        assert_eq!(
            InstitutionType::parse("Engineering"),
            Some(InstitutionType::Engineering)
        );
        assert_eq!(
            InstitutionType::parse(" Polytechnic "),
            Some(InstitutionType::Polytechnic)
        );
        assert_eq!(InstitutionType::parse("Management"), None);
    }

    #[test]
    fn test_preference_count_by_type() {
        assert_eq!(InstitutionType::Engineering.preference_count(), 3);
        assert_eq!(InstitutionType::Polytechnic.preference_count(), 3);
        assert_eq!(InstitutionType::Medical.preference_count(), 1);
        assert_eq!(InstitutionType::School.preference_count(), 1);
    }

    #[test]
    fn test_application_status_wire_strings() {
        let status: ApplicationStatus = serde_json::from_str("\"Offer Accepted\"").unwrap();
        assert_eq!(status, ApplicationStatus::OfferAccepted);
        assert_eq!(status.student_label(), "Pending Payment");

        let json = serde_json::to_string(&ApplicationStatus::AdmissionConfirmed).unwrap();
        assert_eq!(json, "\"Admission Confirmed\"");

        let unknown: ApplicationStatus = serde_json::from_str("\"On Hold\"").unwrap();
        assert_eq!(unknown, ApplicationStatus::Other("On Hold".to_string()));
    }

    #[test]
    fn test_final_status_keeps_unknown_values() {
        let status: FinalStatus = serde_json::from_str("\"Merit List\"").unwrap();
        assert_eq!(status, FinalStatus::MeritList);
        assert!(status.is_positive());

        let other: FinalStatus = serde_json::from_str("\"Deferred\"").unwrap();
        assert_eq!(other.as_str(), "Deferred");
        assert!(!other.is_positive());
    }

    #[test]
    fn test_application_tolerates_missing_and_null_fields() {
        let json = r#"{
            "id": 7,
            "full_name": "Test Student",
            "email": "test@example.com",
            "application_status": "Accepted",
            "course_pref_1": null,
            "unknown": 42
        }"#;
        let app: Application = serde_json::from_str(json).unwrap();
        assert_eq!(app.id, 7);
        assert_eq!(app.application_status, ApplicationStatus::Accepted);
        assert_eq!(app.course(), "-");
        assert_eq!(app.reference(), "7");
    }

    #[test]
    fn test_application_list_with_null_columns_decodes() {
        let json = r#"[
            {"id": 1, "full_name": "First", "email": "a@b.in", "is_management_quota": true},
            {"id": 2, "full_name": null, "email": null, "is_management_quota": null, "application_status": null}
        ]"#;
        let apps: Vec<Application> = serde_json::from_str(json).unwrap();
        assert_eq!(apps.len(), 2);
        assert!(apps[0].is_management_quota);
        assert_eq!(apps[1].full_name, "");
        assert_eq!(apps[1].email, "");
        assert!(!apps[1].is_management_quota);
        assert_eq!(apps[1].application_status, ApplicationStatus::Pending);
    }

    #[test]
    fn test_admin_identity_group_level() {
        let json = r#"{"admin_id": 1, "name": "Chair", "institution_id": null,
                       "institution_name": "Group", "institution_type": "Management"}"#;
        let admin: AdminIdentity = serde_json::from_str(json).unwrap();
        assert!(admin.is_group_level());
        assert_eq!(admin.institution_kind(), None);
    }

    #[test]
    fn test_group_overview_renames_type() {
        let json = r#"{"breakdown": [{"id": 1, "name": "SEC", "type": "Engineering",
                        "stats": {"total": 4, "accepted": 1, "declined": 1,
                                  "waitlisted": 1, "pending": 1, "revenue": 50000.0}}]}"#;
        let overview: GroupOverview = serde_json::from_str(json).unwrap();
        assert_eq!(overview.breakdown[0].institution_type, "Engineering");
        assert_eq!(overview.breakdown[0].stats.total, 4);
        assert_eq!(overview.overall, OverallTotals::default());
    }
}
