//! Declarative per-step requirements and the transition guard

use super::draft::{ApplicationDraft, Field};
use super::step::WizardStep;
use crate::state::InstitutionType;
use chrono::NaiveDate;
use thiserror::Error;

/// Why a step refused to advance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an institution to proceed.")]
    InstitutionTypeUnset,
    #[error("Unsupported institution type `{0}`.")]
    UnknownInstitutionType(String),
    #[error("Please fill in {0}.")]
    Missing(&'static str),
    #[error("{0} must be a date in YYYY-MM-DD format.")]
    InvalidDate(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("{label} must be a number between {min} and {max}.")]
    OutOfRange {
        label: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{label} cannot exceed {limit}.")]
    Exceeds {
        label: &'static str,
        limit: &'static str,
    },
    #[error("{0} repeats another preference. Pick three different courses.")]
    DuplicatePreference(&'static str),
    #[error("{0} is already chosen for another preference.")]
    PreferenceTaken(String),
}

/// How a single field is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Non-blank
    Present,
    /// Non-blank, or the alternative field is non-blank
    PresentOr(Field),
    /// Calendar date in `YYYY-MM-DD`
    Date,
    /// `local@domain.tld`
    Email,
    /// Number within an inclusive range
    Range { min: u32, max: u32 },
    /// Number not greater than another field's number
    AtMost(Field),
    /// Non-blank and different from every other listed field
    Distinct(&'static [Field]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub field: Field,
    pub check: Check,
}

const fn req(field: Field, check: Check) -> Requirement {
    Requirement { field, check }
}

const PREFERENCES: &[Field] = &[Field::CoursePref1, Field::CoursePref2, Field::CoursePref3];

/// Requirements a step enforces before moving forward.
/// `None` means the step cannot be judged until an institution type is known.
pub fn schema_for(step: WizardStep, kind: Option<InstitutionType>) -> Option<Vec<Requirement>> {
    let requirements = match step {
        WizardStep::InstitutionSelect => vec![req(Field::InstitutionId, Check::Present)],
        WizardStep::BasicInfo => vec![
            req(Field::FullName, Check::Present),
            req(Field::DateOfBirth, Check::Date),
            req(Field::Email, Check::Email),
        ],
        WizardStep::CourseSelection => match kind? {
            InstitutionType::Engineering | InstitutionType::Polytechnic => PREFERENCES
                .iter()
                .map(|&field| req(field, Check::Distinct(PREFERENCES)))
                .collect(),
            InstitutionType::Medical | InstitutionType::School => {
                vec![req(Field::CoursePref1, Check::Present)]
            }
        },
        WizardStep::PersonalDetails => vec![
            req(Field::Community, Check::Present),
            req(Field::FatherName, Check::PresentOr(Field::GuardianName)),
        ],
        WizardStep::AcademicDetails => match kind? {
            InstitutionType::Engineering => vec![
                req(Field::Physics, Check::Range { min: 0, max: 100 }),
                req(Field::Chemistry, Check::Range { min: 0, max: 100 }),
                req(Field::Maths, Check::Range { min: 0, max: 100 }),
            ],
            InstitutionType::Medical => {
                vec![req(Field::NeetScore, Check::Range { min: 0, max: 720 })]
            }
            InstitutionType::Polytechnic => vec![
                req(Field::SslcMaxMarks, Check::Range { min: 1, max: 1000 }),
                req(Field::SslcMarksObtained, Check::Range { min: 0, max: 1000 }),
                req(Field::SslcMarksObtained, Check::AtMost(Field::SslcMaxMarks)),
            ],
            InstitutionType::School => vec![req(Field::PreviousGrade, Check::Present)],
        },
    };
    Some(requirements)
}

/// The single transition guard: every requirement of `step` must hold
pub fn validate_step(step: WizardStep, draft: &ApplicationDraft) -> Result<(), ValidationError> {
    let requirements =
        schema_for(step, draft.institution_type).ok_or(ValidationError::InstitutionTypeUnset)?;
    if step != WizardStep::InstitutionSelect && draft.institution_type.is_none() {
        return Err(ValidationError::InstitutionTypeUnset);
    }
    requirements
        .iter()
        .try_for_each(|requirement| check(requirement, draft))
}

fn check(requirement: &Requirement, draft: &ApplicationDraft) -> Result<(), ValidationError> {
    let field = requirement.field;
    let label = field.label();
    let value = draft.text(field).trim();

    match requirement.check {
        Check::Present => {
            if value.is_empty() {
                return Err(ValidationError::Missing(label));
            }
        }
        Check::PresentOr(alternative) => {
            if value.is_empty() && !draft.is_filled(alternative) {
                return Err(ValidationError::Missing(label));
            }
        }
        Check::Date => {
            if value.is_empty() {
                return Err(ValidationError::Missing(label));
            }
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                return Err(ValidationError::InvalidDate(label));
            }
        }
        Check::Email => {
            if value.is_empty() {
                return Err(ValidationError::Missing(label));
            }
            if !is_valid_email(value) {
                return Err(ValidationError::InvalidEmail);
            }
        }
        Check::Range { min, max } => {
            if value.is_empty() {
                return Err(ValidationError::Missing(label));
            }
            match value.parse::<f64>() {
                Ok(n) if n.is_finite() && n >= f64::from(min) && n <= f64::from(max) => {}
                _ => return Err(ValidationError::OutOfRange { label, min, max }),
            }
        }
        Check::AtMost(limit_field) => {
            let limit = draft.text(limit_field).trim().parse::<f64>();
            if let (Ok(n), Ok(limit)) = (value.parse::<f64>(), limit) {
                if n > limit {
                    return Err(ValidationError::Exceeds {
                        label,
                        limit: limit_field.label(),
                    });
                }
            }
        }
        Check::Distinct(group) => {
            if value.is_empty() {
                return Err(ValidationError::Missing(label));
            }
            let repeated = group
                .iter()
                .filter(|&&other| other != field)
                .any(|&other| draft.text(other).trim() == value);
            if repeated {
                return Err(ValidationError::DuplicatePreference(label));
            }
        }
    }
    Ok(())
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::wizard::draft::FieldValue;
    use pretty_assertions::assert_eq;

    fn draft_for(kind: InstitutionType) -> ApplicationDraft {
        let mut draft = ApplicationDraft::default();
        draft.institution_id = "1".to_string();
        draft.set_institution_type(Some(kind));
        draft
    }

    fn set(draft: &mut ApplicationDraft, field: Field, value: &str) {
        draft.set(field, FieldValue::from(value));
    }

    #[test]
    fn test_step0_requires_institution() {
        let draft = ApplicationDraft::default();
        assert_eq!(
            validate_step(WizardStep::InstitutionSelect, &draft),
            Err(ValidationError::Missing("Institution"))
        );
        let draft = draft_for(InstitutionType::School);
        assert_eq!(validate_step(WizardStep::InstitutionSelect, &draft), Ok(()));
    }

    #[test]
    fn test_later_steps_require_institution_type() {
        let draft = ApplicationDraft::default();
        for step in [
            WizardStep::BasicInfo,
            WizardStep::CourseSelection,
            WizardStep::PersonalDetails,
            WizardStep::AcademicDetails,
        ] {
            assert_eq!(
                validate_step(step, &draft),
                Err(ValidationError::InstitutionTypeUnset)
            );
        }
    }

    #[test]
    fn test_step1_requires_name_dob_and_email() {
        let mut draft = draft_for(InstitutionType::Engineering);
        assert_eq!(
            validate_step(WizardStep::BasicInfo, &draft),
            Err(ValidationError::Missing("Full Name"))
        );

        set(&mut draft, Field::FullName, "Test Student");
        assert_eq!(
            validate_step(WizardStep::BasicInfo, &draft),
            Err(ValidationError::Missing("Date of Birth (YYYY-MM-DD)"))
        );

        set(&mut draft, Field::DateOfBirth, "01/05/2008");
        assert_eq!(
            validate_step(WizardStep::BasicInfo, &draft),
            Err(ValidationError::InvalidDate("Date of Birth (YYYY-MM-DD)"))
        );

        set(&mut draft, Field::DateOfBirth, "2008-05-01");
        set(&mut draft, Field::Email, "not-an-email");
        assert_eq!(
            validate_step(WizardStep::BasicInfo, &draft),
            Err(ValidationError::InvalidEmail)
        );

        set(&mut draft, Field::Email, "test@example.com");
        assert_eq!(validate_step(WizardStep::BasicInfo, &draft), Ok(()));
    }

    #[test]
    fn test_step2_engineering_needs_three_distinct() {
        for kind in [InstitutionType::Engineering, InstitutionType::Polytechnic] {
            let mut draft = draft_for(kind);
            set(&mut draft, Field::CoursePref1, "CSE");
            set(&mut draft, Field::CoursePref2, "ECE");
            assert_eq!(
                validate_step(WizardStep::CourseSelection, &draft),
                Err(ValidationError::Missing("3rd Preference"))
            );

            set(&mut draft, Field::CoursePref3, "CSE");
            assert_eq!(
                validate_step(WizardStep::CourseSelection, &draft),
                Err(ValidationError::DuplicatePreference("1st Preference"))
            );

            set(&mut draft, Field::CoursePref3, "MECH");
            assert_eq!(validate_step(WizardStep::CourseSelection, &draft), Ok(()));
        }
    }

    #[test]
    fn test_step2_single_choice_types_need_one() {
        for kind in [InstitutionType::Medical, InstitutionType::School] {
            let mut draft = draft_for(kind);
            assert_eq!(
                validate_step(WizardStep::CourseSelection, &draft),
                Err(ValidationError::Missing("1st Preference"))
            );
            set(&mut draft, Field::CoursePref1, "MBBS");
            assert_eq!(validate_step(WizardStep::CourseSelection, &draft), Ok(()));
        }
    }

    #[test]
    fn test_step3_community_and_parent() {
        let mut draft = draft_for(InstitutionType::School);
        assert_eq!(
            validate_step(WizardStep::PersonalDetails, &draft),
            Err(ValidationError::Missing("Community"))
        );
        set(&mut draft, Field::Community, "OC");
        assert_eq!(
            validate_step(WizardStep::PersonalDetails, &draft),
            Err(ValidationError::Missing("Father's Name"))
        );
        set(&mut draft, Field::GuardianName, "Test Guardian");
        assert_eq!(validate_step(WizardStep::PersonalDetails, &draft), Ok(()));
    }

    #[test]
    fn test_step4_engineering_marks() {
        let mut draft = draft_for(InstitutionType::Engineering);
        set(&mut draft, Field::Physics, "90");
        set(&mut draft, Field::Chemistry, "80");
        assert_eq!(
            validate_step(WizardStep::AcademicDetails, &draft),
            Err(ValidationError::Missing("Maths"))
        );
        set(&mut draft, Field::Maths, "195");
        assert_eq!(
            validate_step(WizardStep::AcademicDetails, &draft),
            Err(ValidationError::OutOfRange {
                label: "Maths",
                min: 0,
                max: 100
            })
        );
        set(&mut draft, Field::Maths, "95");
        assert_eq!(validate_step(WizardStep::AcademicDetails, &draft), Ok(()));
    }

    #[test]
    fn test_step4_medical_neet_range() {
        let mut draft = draft_for(InstitutionType::Medical);
        set(&mut draft, Field::NeetScore, "800");
        assert!(validate_step(WizardStep::AcademicDetails, &draft).is_err());
        set(&mut draft, Field::NeetScore, "650");
        assert_eq!(validate_step(WizardStep::AcademicDetails, &draft), Ok(()));
    }

    #[test]
    fn test_step4_polytechnic_obtained_within_max() {
        let mut draft = draft_for(InstitutionType::Polytechnic);
        set(&mut draft, Field::SslcMarksObtained, "520");
        assert_eq!(
            validate_step(WizardStep::AcademicDetails, &draft),
            Err(ValidationError::Exceeds {
                label: "10th Marks Obtained",
                limit: "10th Maximum Marks"
            })
        );
        set(&mut draft, Field::SslcMarksObtained, "420");
        assert_eq!(validate_step(WizardStep::AcademicDetails, &draft), Ok(()));

        set(&mut draft, Field::SslcMaxMarks, "0");
        assert!(validate_step(WizardStep::AcademicDetails, &draft).is_err());
    }

    #[test]
    fn test_step4_school_grade_text() {
        let mut draft = draft_for(InstitutionType::School);
        assert!(validate_step(WizardStep::AcademicDetails, &draft).is_err());
        set(&mut draft, Field::PreviousGrade, "A1");
        assert_eq!(validate_step(WizardStep::AcademicDetails, &draft), Ok(()));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.in"));
        assert!(is_valid_email("first.last@college.edu.in"));
        assert!(!is_valid_email("@b.in"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.in"));
        assert!(!is_valid_email("a b@c.in"));
        assert!(!is_valid_email("a@.in"));
    }
}
