//! Form state store for the application wizard

use super::academic::Score;
use super::draft::{ApplicationDraft, Field, FieldValue};
use super::payload::SubmissionPayload;
use super::schema::{validate_step, ValidationError};
use super::step::WizardStep;
use crate::api::{AdmissionsApi, ApiResult};
use crate::state::{Course, FinalStatus, Institution, LookupResult, SubmissionOutcome};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of a forward transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(WizardStep),
    /// Final step passed validation; the caller submits next
    ReadyToSubmit,
}

/// A course option for one preference slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceOption {
    pub name: String,
    /// Already held by another slot
    pub disabled: bool,
}

/// Owns the draft and the wizard position for one session
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    pub current_step: usize,
    pub draft: ApplicationDraft,
    pub is_loading: bool,
    pub qualification_status: Option<FinalStatus>,
    pub outcome: Option<SubmissionOutcome>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to a step index. Not bounds-checked; out-of-range indexes read as the final step.
    pub fn set_step(&mut self, step: usize) {
        debug!("Wizard step {} -> {}", self.current_step, step);
        self.current_step = step;
    }

    pub fn step(&self) -> WizardStep {
        WizardStep::from_index(self.current_step).unwrap_or(WizardStep::AcademicDetails)
    }

    /// Merge one field into the draft without validation
    pub fn update_data(&mut self, field: Field, value: impl Into<FieldValue>) {
        if !self.draft.set(field, value.into()) {
            debug!("Ignoring {:?}: not part of the current academic record", field);
        }
    }

    /// Validate the current step and move forward
    pub fn advance(&mut self) -> Result<Advance, ValidationError> {
        let step = self.step();
        validate_step(step, &self.draft)?;
        match step.next() {
            Some(next) => {
                self.set_step(next.index());
                Ok(Advance::Moved(next))
            }
            None => Ok(Advance::ReadyToSubmit),
        }
    }

    /// Move back one step; never validates
    pub fn retreat(&mut self) {
        if let Some(prev) = self.step().prev() {
            self.set_step(prev.index());
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.qualification_status.is_some()
    }

    /// Post the draft once. On failure the draft is left untouched.
    pub async fn submit_form(&mut self, api: &dyn AdmissionsApi) -> ApiResult<FinalStatus> {
        let payload = SubmissionPayload::from_draft(&self.draft);
        let correlation_id = Uuid::new_v4().simple().to_string();
        info!(
            "Submitting application to institution {} prefs={:?} (correlation_id={})",
            payload.institution_id,
            self.draft.chosen_preferences(),
            correlation_id
        );

        self.is_loading = true;
        let result = api.submit_application(&payload).await;
        self.is_loading = false;

        match result {
            Ok(outcome) => {
                info!(
                    "Application submitted: {} ref={} (correlation_id={})",
                    outcome.final_status,
                    outcome.application_ref_id.as_deref().unwrap_or("-"),
                    correlation_id
                );
                let status = outcome.final_status.clone();
                self.qualification_status = Some(status.clone());
                self.outcome = Some(outcome);
                Ok(status)
            }
            Err(e) => {
                warn!("Submission failed: {} (correlation_id={})", e, correlation_id);
                Err(e)
            }
        }
    }

    /// Start a new application, keeping institution, family and address answers
    pub fn reset_form(&mut self) {
        self.current_step = 0;
        self.qualification_status = None;
        self.outcome = None;

        let draft = &mut self.draft;
        draft.full_name.clear();
        draft.email.clear();
        draft.aadhaar_no.clear();
        draft.emis_number.clear();
        draft.transport_needed.clear();
        draft.academic = draft.academic.cleared();
        debug!("Wizard reset");
    }

    /// Overwrite draft fields with every non-empty value from a returning applicant's lookup.
    /// Returns the backend's greeting when something was found.
    pub fn apply_lookup(&mut self, result: &LookupResult) -> Option<String> {
        if !result.found {
            return None;
        }
        let known = [
            (Field::FullName, &result.full_name),
            (Field::Mobile, &result.mobile),
            (Field::DateOfBirth, &result.dob),
            (Field::AadhaarNo, &result.aadhaar_no),
            (Field::Community, &result.community),
            (Field::FatherName, &result.father_name),
            (Field::FatherMobile, &result.father_mobile),
            (Field::City, &result.address_city),
            (Field::State, &result.address_state),
            (Field::Gender, &result.gender),
            (Field::BloodGroup, &result.blood_group),
        ];
        for (field, value) in known {
            if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                self.draft.set(field, value.into());
            }
        }
        info!("Auto-filled returning applicant");
        Some(
            result
                .message
                .clone()
                .unwrap_or_else(|| "Welcome back! We auto-filled your details.".to_string()),
        )
    }

    /// Seed the institution chosen on the first step
    pub fn select_institution(&mut self, institution: &Institution) -> Result<(), ValidationError> {
        let kind = institution.kind().ok_or_else(|| {
            ValidationError::UnknownInstitutionType(institution.institution_type.clone())
        })?;
        let id = institution.id.to_string();
        if self.draft.institution_id != id {
            // Course names belong to the previous institution
            self.draft.course_prefs = Default::default();
        }
        self.draft.institution_id = id;
        self.draft.institution_name = institution.name.clone();
        self.draft.set_institution_type(Some(kind));
        debug!("Selected institution {} ({})", institution.name, kind);
        Ok(())
    }

    /// Put a course in a preference slot (zero-based).
    /// Single-choice institutions only use the first slot.
    pub fn select_preference(&mut self, slot: usize, course: &str) -> Result<(), ValidationError> {
        let multiple = self
            .draft
            .institution_type
            .is_some_and(|kind| kind.allows_multiple_preferences());

        if !multiple {
            self.draft.course_prefs = [course.to_string(), String::new(), String::new()];
            return Ok(());
        }

        if slot >= self.draft.course_prefs.len() {
            return Ok(());
        }
        let taken = !course.is_empty()
            && self
                .draft
                .course_prefs
                .iter()
                .enumerate()
                .any(|(i, held)| i != slot && held == course);
        if taken {
            return Err(ValidationError::PreferenceTaken(course.to_string()));
        }
        self.draft.course_prefs[slot] = course.to_string();
        Ok(())
    }

    /// Course options for a slot, marking those held by other slots
    pub fn preference_options(&self, slot: usize, courses: &[Course]) -> Vec<PreferenceOption> {
        let multiple = self
            .draft
            .institution_type
            .is_some_and(|kind| kind.allows_multiple_preferences());
        courses
            .iter()
            .map(|course| PreferenceOption {
                name: course.name.clone(),
                disabled: multiple
                    && self
                        .draft
                        .course_prefs
                        .iter()
                        .enumerate()
                        .any(|(i, held)| i != slot && *held == course.name),
            })
            .collect()
    }

    pub fn derived_score(&self) -> Option<Score> {
        self.draft.academic.score()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockAdmissionsApi};
    use crate::state::InstitutionType;
    use pretty_assertions::assert_eq;

    fn institution(kind: &str) -> Institution {
        Institution {
            id: 1,
            name: "Sri Sairam Engineering College".to_string(),
            code: Some("SEC".to_string()),
            institution_type: kind.to_string(),
        }
    }

    fn courses(names: &[&str]) -> Vec<Course> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Course {
                id: i as i64 + 1,
                name: name.to_string(),
            })
            .collect()
    }

    fn filled_engineering_store() -> FormStore {
        let mut store = FormStore::new();
        store.select_institution(&institution("Engineering")).unwrap();
        store.update_data(Field::FullName, "Test Student");
        store.update_data(Field::DateOfBirth, "2007-04-12");
        store.update_data(Field::Email, "test@example.com");
        store.update_data(Field::AadhaarNo, "123412341234");
        store.update_data(Field::EmisNumber, "EMIS-1");
        store.update_data(Field::TransportNeeded, "Yes");
        store.select_preference(0, "CSE").unwrap();
        store.select_preference(1, "ECE").unwrap();
        store.select_preference(2, "MECH").unwrap();
        store.update_data(Field::Community, "BC");
        store.update_data(Field::FatherName, "Test Parent");
        store.update_data(Field::Physics, "90");
        store.update_data(Field::Chemistry, "80");
        store.update_data(Field::Maths, "95");
        store
    }

    fn outcome(status: &str) -> SubmissionOutcome {
        SubmissionOutcome {
            final_status: FinalStatus::from(status.to_string()),
            application_ref_id: Some("ENG-2025-0042".to_string()),
            ai_probability: Some(87.5),
            message: Some("Application Submitted".to_string()),
        }
    }

    #[test]
    fn test_advance_blocks_on_missing_fields() {
        let mut store = FormStore::new();
        assert_eq!(
            store.advance(),
            Err(ValidationError::Missing("Institution"))
        );
        assert_eq!(store.current_step, 0);

        store.select_institution(&institution("Medical")).unwrap();
        assert_eq!(store.advance(), Ok(Advance::Moved(WizardStep::BasicInfo)));
        assert!(store.advance().is_err());
        assert_eq!(store.current_step, 1);
    }

    #[test]
    fn test_retreat_never_validates() {
        let mut store = FormStore::new();
        store.set_step(3);
        store.retreat();
        assert_eq!(store.current_step, 2);
        store.set_step(0);
        store.retreat();
        assert_eq!(store.current_step, 0);
    }

    #[test]
    fn test_set_step_is_unchecked() {
        let mut store = FormStore::new();
        store.set_step(9);
        assert_eq!(store.current_step, 9);
        assert_eq!(store.step(), WizardStep::AcademicDetails);
    }

    #[test]
    fn test_final_step_reports_ready_to_submit() {
        let mut store = filled_engineering_store();
        for expected in [
            WizardStep::BasicInfo,
            WizardStep::CourseSelection,
            WizardStep::PersonalDetails,
            WizardStep::AcademicDetails,
        ] {
            assert_eq!(store.advance(), Ok(Advance::Moved(expected)));
        }
        assert_eq!(store.advance(), Ok(Advance::ReadyToSubmit));
        assert_eq!(store.current_step, 4);
    }

    #[test]
    fn test_unknown_institution_type_rejected() {
        let mut store = FormStore::new();
        let err = store.select_institution(&institution("Management")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownInstitutionType("Management".to_string())
        );
        assert!(store.draft.institution_id.is_empty());
    }

    #[test]
    fn test_preference_uniqueness() {
        let mut store = FormStore::new();
        store.select_institution(&institution("Polytechnic")).unwrap();
        store.select_preference(0, "DCE").unwrap();
        assert_eq!(
            store.select_preference(1, "DCE"),
            Err(ValidationError::PreferenceTaken("DCE".to_string()))
        );
        assert_eq!(store.draft.course_prefs[1], "");
        // Re-selecting the same slot's own course is allowed
        assert_eq!(store.select_preference(0, "DCE"), Ok(()));

        let options = store.preference_options(1, &courses(&["DCE", "DME"]));
        assert_eq!(
            options,
            vec![
                PreferenceOption {
                    name: "DCE".to_string(),
                    disabled: true
                },
                PreferenceOption {
                    name: "DME".to_string(),
                    disabled: false
                },
            ]
        );
    }

    #[test]
    fn test_single_choice_clears_other_slots() {
        let mut store = FormStore::new();
        store.select_institution(&institution("Engineering")).unwrap();
        store.select_preference(1, "ECE").unwrap();
        store.select_preference(2, "EEE").unwrap();

        store.select_institution(&institution("School")).unwrap();
        store.select_preference(0, "Grade 6").unwrap();
        assert_eq!(
            store.draft.course_prefs,
            ["Grade 6".to_string(), String::new(), String::new()]
        );
        let options = store.preference_options(0, &courses(&["Grade 6"]));
        assert!(!options[0].disabled);
    }

    #[test]
    fn test_switching_institution_drops_old_preferences() {
        let mut store = filled_engineering_store();
        let medical = Institution {
            id: 2,
            name: "Sri Sairam Medical College".to_string(),
            code: None,
            institution_type: "Medical".to_string(),
        };
        store.select_institution(&medical).unwrap();

        assert_eq!(store.draft.course_prefs, <[String; 3]>::default());
        assert_eq!(
            validate_step(WizardStep::CourseSelection, &store.draft),
            Err(ValidationError::Missing("1st Preference"))
        );

        store.select_preference(0, "MBBS").unwrap();
        let payload = SubmissionPayload::from_draft(&store.draft);
        assert_eq!(payload.institution_id, 2);
        assert_eq!(payload.course_pref_1, "MBBS");
        assert_eq!(payload.course_pref_2, "");
        assert_eq!(payload.course_pref_3, "");
    }

    #[test]
    fn test_derived_score_follows_record() {
        let store = filled_engineering_store();
        let score = store.derived_score().unwrap();
        assert_eq!(score.value, 180.0);
        assert_eq!(score.to_string(), "180.00/200");
    }

    #[test]
    fn test_update_data_ignores_foreign_marks() {
        let mut store = FormStore::new();
        store.select_institution(&institution("Medical")).unwrap();
        store.update_data(Field::Physics, "90");
        assert_eq!(store.draft.text(Field::Physics), "");
    }

    #[test]
    fn test_reset_form_clears_identity_and_marks() {
        let mut store = filled_engineering_store();
        store.set_step(4);
        store.qualification_status = Some(FinalStatus::Qualified);

        store.reset_form();

        assert_eq!(store.current_step, 0);
        assert_eq!(store.qualification_status, None);
        assert_eq!(store.outcome, None);
        assert_eq!(store.draft.full_name, "");
        assert_eq!(store.draft.email, "");
        assert_eq!(store.draft.aadhaar_no, "");
        assert_eq!(store.draft.emis_number, "");
        assert_eq!(store.draft.transport_needed, "");
        assert_eq!(store.draft.text(Field::Physics), "");
        assert_eq!(store.derived_score().unwrap().value, 0.0);
        // Institution, family and address answers survive
        assert_eq!(store.draft.institution_id, "1");
        assert_eq!(
            store.draft.institution_type,
            Some(InstitutionType::Engineering)
        );
        assert_eq!(store.draft.father_name, "Test Parent");
        assert_eq!(store.draft.state, "Tamil Nadu");
    }

    #[test]
    fn test_apply_lookup_overwrites_with_present_fields() {
        let mut store = FormStore::new();
        store.update_data(Field::FullName, "Typed Name");
        store.update_data(Field::Mobile, "9000000000");
        let lookup = LookupResult {
            found: true,
            full_name: Some("Returning Student".to_string()),
            mobile: Some(String::new()),
            address_city: Some("Chennai".to_string()),
            message: Some("Welcome back, Returning Student!".to_string()),
            ..Default::default()
        };
        let message = store.apply_lookup(&lookup);
        assert_eq!(message.as_deref(), Some("Welcome back, Returning Student!"));
        assert_eq!(store.draft.full_name, "Returning Student");
        assert_eq!(store.draft.mobile, "9000000000");
        assert_eq!(store.draft.city, "Chennai");

        assert_eq!(store.apply_lookup(&LookupResult::default()), None);
    }

    #[tokio::test]
    async fn test_end_to_end_submission() {
        let mut store = filled_engineering_store();
        while let Ok(Advance::Moved(_)) = store.advance() {}
        assert_eq!(store.step(), WizardStep::AcademicDetails);

        let mut api = MockAdmissionsApi::new();
        api.expect_submit_application()
            .withf(|payload| {
                payload.institution_id == 1
                    && payload.physics == 90.0
                    && payload.chemistry == 80.0
                    && payload.maths == 95.0
                    && payload.course_pref_3 == "MECH"
                    && payload.email == "test@example.com"
            })
            .times(1)
            .returning(|_| Ok(outcome("Qualified")));

        let status = store.submit_form(&api).await.unwrap();

        assert_eq!(status, FinalStatus::Qualified);
        assert!(store.is_submitted());
        assert!(!store.is_loading);
        assert_eq!(
            store
                .outcome
                .as_ref()
                .and_then(|o| o.application_ref_id.as_deref()),
            Some("ENG-2025-0042")
        );
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_draft() {
        let mut store = filled_engineering_store();
        store.set_step(4);
        let before = store.draft.clone();

        let mut api = MockAdmissionsApi::new();
        api.expect_submit_application().times(1).returning(|_| {
            Err(ApiError::Backend {
                status: 422,
                detail: Some("Aadhaar already registered".to_string()),
            })
        });

        let err = store.submit_form(&api).await.unwrap_err();

        assert_eq!(err.to_string(), "Error: Aadhaar already registered");
        assert_eq!(store.draft, before);
        assert_eq!(store.qualification_status, None);
        assert!(!store.is_loading);
        assert_eq!(store.current_step, 4);
    }

    #[test]
    fn test_submit_is_driven_with_tokio_test() {
        let mut store = filled_engineering_store();
        let mut api = MockAdmissionsApi::new();
        api.expect_submit_application()
            .returning(|_| Ok(outcome("Management Review")));

        let status = tokio_test::block_on(store.submit_form(&api)).unwrap();
        assert_eq!(status, FinalStatus::ManagementReview);
        assert!(!status.is_positive());
    }
}
