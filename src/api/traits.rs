//! Trait abstraction for the admissions backend to enable mocking in tests

use super::error::ApiError;
use crate::state::wizard::SubmissionPayload;
use crate::state::{
    AdminIdentity, Application, ApplicationStatus, Course, GroupOverview, Institution,
    LookupResult, OfferAction, ProfileUpdate, StudentIdentity, SubmissionOutcome,
};
use async_trait::async_trait;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Every backend call the portal makes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdmissionsApi: Send + Sync {
    /// Institutions an applicant can apply to
    async fn list_institutions(&self) -> ApiResult<Vec<Institution>>;

    /// Courses (or grades) offered by one institution
    async fn list_courses(&self, institution_id: i64) -> ApiResult<Vec<Course>>;

    /// Previous application data for an email, used for auto-fill
    async fn lookup_student(&self, email: &str) -> ApiResult<LookupResult>;

    /// Submit a completed application and receive the eligibility outcome
    async fn submit_application(&self, payload: &SubmissionPayload)
        -> ApiResult<SubmissionOutcome>;

    async fn admin_login(&self, email: &str, password: &str) -> ApiResult<AdminIdentity>;

    /// Group-wide statistics for management
    async fn group_overview(&self) -> ApiResult<GroupOverview>;

    /// Applications received by one institution
    async fn institution_applications(&self, institution_id: i64) -> ApiResult<Vec<Application>>;

    /// Change the decision status of an application
    async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
    ) -> ApiResult<()>;

    /// Free-form question to the admissions assistant
    async fn ask_ai(&self, question: &str, institution_id: Option<i64>) -> ApiResult<String>;

    async fn student_login(&self, email: &str, dob: &str) -> ApiResult<StudentIdentity>;

    /// Every application submitted with an email
    async fn my_applications(&self, email: &str) -> ApiResult<Vec<Application>>;

    /// Accept or decline an offer; returns the backend's confirmation message
    async fn respond_offer(&self, reference: &str, action: OfferAction) -> ApiResult<String>;

    async fn update_profile(&self, reference: &str, update: &ProfileUpdate) -> ApiResult<()>;

    /// Pay the admission fee for an accepted offer
    async fn pay_fee(&self, reference: &str, amount: f64) -> ApiResult<()>;
}
