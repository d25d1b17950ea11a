//! Rows shown on each wizard step

use super::draft::{Field, DEFAULT_BOARD};
use super::schema::schema_for;
use super::step::WizardStep;
use crate::state::InstitutionType;

pub const BOARDS: &[&str] = &[DEFAULT_BOARD, "CBSE", "ICSE", "Other"];
pub const GENDERS: &[&str] = &["Male", "Female"];
pub const BLOOD_GROUPS: &[&str] = &["A+", "B+", "O+", "AB+"];
pub const COMMUNITIES: &[&str] = &["OC", "BC", "MBC", "SC", "ST"];
pub const RELIGIONS: &[&str] = &["Hindu", "Christian", "Muslim"];
pub const MOTHER_TONGUES: &[&str] = &["Tamil", "English", "Hindi"];
pub const YES_NO: &[&str] = &["Yes", "No"];

/// How a row is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Free text typed character by character
    Text,
    /// Cycled through a fixed option list with Left/Right
    Choice(&'static [&'static str]),
    /// Toggled with Space
    Flag,
    /// Picked from the institution's course list; zero-based slot
    Preference(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRow {
    pub field: Field,
    pub kind: RowKind,
    pub required: bool,
}

impl FormRow {
    pub fn label(&self) -> &'static str {
        self.field.label()
    }
}

fn text(field: Field) -> (Field, RowKind) {
    (field, RowKind::Text)
}

fn choice(field: Field, options: &'static [&'static str]) -> (Field, RowKind) {
    (field, RowKind::Choice(options))
}

/// Rows for a step, given the chosen institution type.
/// Step 0 is a list of institutions rather than a form, so it has no rows.
pub fn rows_for(step: WizardStep, kind: Option<InstitutionType>) -> Vec<FormRow> {
    let Some(kind) = kind else {
        return Vec::new();
    };
    let is_school = kind == InstitutionType::School;

    let rows: Vec<(Field, RowKind)> = match step {
        WizardStep::InstitutionSelect => Vec::new(),
        WizardStep::BasicInfo if is_school => vec![
            text(Field::Email),
            text(Field::FullName),
            text(Field::DateOfBirth),
            choice(Field::Gender, GENDERS),
            choice(Field::BloodGroup, BLOOD_GROUPS),
            text(Field::Mobile),
            text(Field::EmisNumber),
            text(Field::AadhaarNo),
        ],
        WizardStep::BasicInfo => vec![
            text(Field::Email),
            choice(Field::BoardOfStudy, BOARDS),
            text(Field::SslcRegNo),
            text(Field::AadhaarNo),
            text(Field::FullName),
            text(Field::DateOfBirth),
            text(Field::Mobile),
        ],
        WizardStep::CourseSelection => {
            let mut rows: Vec<(Field, RowKind)> = (0..kind.preference_count())
                .filter_map(|slot| Field::preference(slot).map(|f| (f, RowKind::Preference(slot))))
                .collect();
            rows.push(choice(Field::HasSiblings, YES_NO));
            rows
        }
        WizardStep::PersonalDetails => {
            let mut rows = vec![
                choice(Field::Community, COMMUNITIES),
                choice(Field::Religion, RELIGIONS),
                choice(Field::MotherTongue, MOTHER_TONGUES),
                text(Field::FatherName),
                text(Field::FatherMobile),
                text(Field::MotherName),
                text(Field::GuardianName),
                text(Field::AddressLine1),
                text(Field::AddressLine2),
                text(Field::City),
                text(Field::State),
                text(Field::Country),
                text(Field::Pincode),
            ];
            if is_school {
                rows.push(choice(Field::TransportNeeded, YES_NO));
            }
            rows
        }
        WizardStep::AcademicDetails => {
            let mut rows: Vec<(Field, RowKind)> = match kind {
                InstitutionType::Engineering => {
                    vec![text(Field::Physics), text(Field::Chemistry), text(Field::Maths)]
                }
                InstitutionType::Medical => vec![text(Field::NeetScore)],
                InstitutionType::Polytechnic => {
                    vec![text(Field::SslcMarksObtained), text(Field::SslcMaxMarks)]
                }
                InstitutionType::School => vec![
                    text(Field::PreviousSchoolName),
                    text(Field::PreviousBoard),
                    text(Field::TransferCertificateStatus),
                    text(Field::PreviousGrade),
                ],
            };
            rows.push((Field::ManagementQuota, RowKind::Flag));
            rows
        }
    };

    let required: Vec<Field> = schema_for(step, Some(kind))
        .unwrap_or_default()
        .into_iter()
        .map(|r| r.field)
        .collect();

    rows.into_iter()
        .map(|(field, kind)| FormRow {
            field,
            kind,
            required: required.contains(&field),
        })
        .collect()
}

/// Next (or previous) option after `current`; blank starts at the first option
pub fn cycle_choice(options: &[&'static str], current: &str, forward: bool) -> &'static str {
    if options.is_empty() {
        return "";
    }
    let len = options.len();
    let next = match options.iter().position(|o| *o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(rows: &[FormRow]) -> Vec<Field> {
        rows.iter().map(|r| r.field).collect()
    }

    #[test]
    fn test_no_rows_without_type() {
        assert!(rows_for(WizardStep::BasicInfo, None).is_empty());
        assert!(rows_for(WizardStep::InstitutionSelect, Some(InstitutionType::School)).is_empty());
    }

    #[test]
    fn test_basic_info_differs_for_school() {
        let school = fields(&rows_for(WizardStep::BasicInfo, Some(InstitutionType::School)));
        assert!(school.contains(&Field::EmisNumber));
        assert!(school.contains(&Field::Gender));
        assert!(!school.contains(&Field::BoardOfStudy));

        let eng = fields(&rows_for(
            WizardStep::BasicInfo,
            Some(InstitutionType::Engineering),
        ));
        assert!(eng.contains(&Field::BoardOfStudy));
        assert!(eng.contains(&Field::SslcRegNo));
        assert!(!eng.contains(&Field::EmisNumber));
        assert_eq!(eng[0], Field::Email);
    }

    #[test]
    fn test_preference_rows_follow_type() {
        let eng = rows_for(
            WizardStep::CourseSelection,
            Some(InstitutionType::Polytechnic),
        );
        let prefs: Vec<_> = eng
            .iter()
            .filter(|r| matches!(r.kind, RowKind::Preference(_)))
            .collect();
        assert_eq!(prefs.len(), 3);
        assert!(prefs.iter().all(|r| r.required));

        let med = rows_for(WizardStep::CourseSelection, Some(InstitutionType::Medical));
        assert_eq!(med[0].kind, RowKind::Preference(0));
        assert!(!med.iter().any(|r| r.kind == RowKind::Preference(1)));
    }

    #[test]
    fn test_required_marks_follow_schema() {
        let rows = rows_for(
            WizardStep::PersonalDetails,
            Some(InstitutionType::Engineering),
        );
        let community = rows.iter().find(|r| r.field == Field::Community).unwrap();
        assert!(community.required);
        let religion = rows.iter().find(|r| r.field == Field::Religion).unwrap();
        assert!(!religion.required);
        assert!(!rows.iter().any(|r| r.field == Field::TransportNeeded));
    }

    #[test]
    fn test_academic_rows_end_with_quota_flag() {
        for kind in [
            InstitutionType::Engineering,
            InstitutionType::Medical,
            InstitutionType::Polytechnic,
            InstitutionType::School,
        ] {
            let rows = rows_for(WizardStep::AcademicDetails, Some(kind));
            let last = rows.last().unwrap();
            assert_eq!(last.field, Field::ManagementQuota);
            assert_eq!(last.kind, RowKind::Flag);
        }
    }

    #[test]
    fn test_cycle_choice_wraps() {
        assert_eq!(cycle_choice(COMMUNITIES, "", true), "OC");
        assert_eq!(cycle_choice(COMMUNITIES, "", false), "ST");
        assert_eq!(cycle_choice(COMMUNITIES, "ST", true), "OC");
        assert_eq!(cycle_choice(COMMUNITIES, "OC", false), "ST");
        assert_eq!(cycle_choice(COMMUNITIES, "BC", true), "MBC");
        assert_eq!(cycle_choice(&[], "x", true), "");
    }
}
