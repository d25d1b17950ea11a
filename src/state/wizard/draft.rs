//! Application draft and field value objects

use super::academic::AcademicRecord;
use crate::state::InstitutionType;

/// Default board of study for higher-education applicants
pub const DEFAULT_BOARD: &str = "State Board (TN State)";
pub const DEFAULT_STATE: &str = "Tamil Nadu";
pub const DEFAULT_COUNTRY: &str = "India";

/// Every field the wizard collects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    InstitutionId,
    InstitutionName,
    InstitutionType,
    FullName,
    DateOfBirth,
    Email,
    Mobile,
    BoardOfStudy,
    SslcRegNo,
    AadhaarNo,
    EmisNumber,
    Gender,
    BloodGroup,
    CoursePref1,
    CoursePref2,
    CoursePref3,
    HasSiblings,
    Religion,
    Community,
    MotherTongue,
    FatherName,
    FatherMobile,
    MotherName,
    GuardianName,
    AddressLine1,
    AddressLine2,
    City,
    State,
    Country,
    Pincode,
    TransportNeeded,
    PreviousSchoolName,
    PreviousBoard,
    TransferCertificateStatus,
    Physics,
    Chemistry,
    Maths,
    NeetScore,
    SslcMarksObtained,
    SslcMaxMarks,
    PreviousGrade,
    ManagementQuota,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InstitutionId => "Institution",
            Self::InstitutionName => "Institution Name",
            Self::InstitutionType => "Institution Type",
            Self::FullName => "Full Name",
            Self::DateOfBirth => "Date of Birth (YYYY-MM-DD)",
            Self::Email => "Email",
            Self::Mobile => "Mobile",
            Self::BoardOfStudy => "Board of Study",
            Self::SslcRegNo => "10th Register No",
            Self::AadhaarNo => "Aadhaar No",
            Self::EmisNumber => "EMIS Number",
            Self::Gender => "Gender",
            Self::BloodGroup => "Blood Group",
            Self::CoursePref1 => "1st Preference",
            Self::CoursePref2 => "2nd Preference",
            Self::CoursePref3 => "3rd Preference",
            Self::HasSiblings => "Siblings in our Institutions",
            Self::Religion => "Religion",
            Self::Community => "Community",
            Self::MotherTongue => "Mother Tongue",
            Self::FatherName => "Father's Name",
            Self::FatherMobile => "Father's Mobile",
            Self::MotherName => "Mother's Name",
            Self::GuardianName => "Guardian's Name",
            Self::AddressLine1 => "Address Line 1",
            Self::AddressLine2 => "Address Line 2",
            Self::City => "City",
            Self::State => "State",
            Self::Country => "Country",
            Self::Pincode => "Pincode",
            Self::TransportNeeded => "School Transport Needed",
            Self::PreviousSchoolName => "Previous School",
            Self::PreviousBoard => "Previous Board",
            Self::TransferCertificateStatus => "Transfer Certificate",
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::Maths => "Maths",
            Self::NeetScore => "NEET Score (out of 720)",
            Self::SslcMarksObtained => "10th Marks Obtained",
            Self::SslcMaxMarks => "10th Maximum Marks",
            Self::PreviousGrade => "Previous Class Grade / Percentage",
            Self::ManagementQuota => "Consider for Management Quota",
        }
    }

    /// Course preference field for a zero-based slot
    pub fn preference(slot: usize) -> Option<Self> {
        match slot {
            0 => Some(Self::CoursePref1),
            1 => Some(Self::CoursePref2),
            2 => Some(Self::CoursePref3),
            _ => None,
        }
    }

    pub fn is_academic(&self) -> bool {
        matches!(
            self,
            Self::Physics
                | Self::Chemistry
                | Self::Maths
                | Self::NeetScore
                | Self::SslcMarksObtained
                | Self::SslcMaxMarks
                | Self::PreviousGrade
        )
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(true) => "Yes".to_string(),
            FieldValue::Flag(false) => "No".to_string(),
        }
    }

    fn into_flag(self) -> bool {
        match self {
            FieldValue::Flag(b) => b,
            FieldValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "yes" | "true" | "1"
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Answers collected across the wizard steps
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDraft {
    pub institution_id: String,
    pub institution_name: String,
    pub institution_type: Option<InstitutionType>,

    pub full_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub mobile: String,
    pub board_of_study: String,
    pub sslc_reg_no: String,
    pub aadhaar_no: String,
    pub emis_number: String,
    pub gender: String,
    pub blood_group: String,

    pub course_prefs: [String; 3],
    pub has_siblings: String,

    pub religion: String,
    pub community: String,
    pub mother_tongue: String,
    pub father_name: String,
    pub father_mobile: String,
    pub mother_name: String,
    pub guardian_name: String,

    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
    pub transport_needed: String,

    pub previous_school_name: String,
    pub previous_board: String,
    pub transfer_certificate_status: String,

    pub academic: AcademicRecord,
    pub management_quota: bool,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            institution_id: String::new(),
            institution_name: String::new(),
            institution_type: None,
            full_name: String::new(),
            date_of_birth: String::new(),
            email: String::new(),
            mobile: String::new(),
            board_of_study: DEFAULT_BOARD.to_string(),
            sslc_reg_no: String::new(),
            aadhaar_no: String::new(),
            emis_number: String::new(),
            gender: String::new(),
            blood_group: String::new(),
            course_prefs: Default::default(),
            has_siblings: String::new(),
            religion: String::new(),
            community: String::new(),
            mother_tongue: String::new(),
            father_name: String::new(),
            father_mobile: String::new(),
            mother_name: String::new(),
            guardian_name: String::new(),
            address_line1: String::new(),
            address_line2: String::new(),
            city: String::new(),
            state: DEFAULT_STATE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            pincode: String::new(),
            transport_needed: String::new(),
            previous_school_name: String::new(),
            previous_board: String::new(),
            transfer_certificate_status: String::new(),
            academic: AcademicRecord::Unselected,
            management_quota: false,
        }
    }
}

impl ApplicationDraft {
    fn text_slot(&self, field: Field) -> Option<&String> {
        let slot = match field {
            Field::InstitutionId => &self.institution_id,
            Field::InstitutionName => &self.institution_name,
            Field::FullName => &self.full_name,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Email => &self.email,
            Field::Mobile => &self.mobile,
            Field::BoardOfStudy => &self.board_of_study,
            Field::SslcRegNo => &self.sslc_reg_no,
            Field::AadhaarNo => &self.aadhaar_no,
            Field::EmisNumber => &self.emis_number,
            Field::Gender => &self.gender,
            Field::BloodGroup => &self.blood_group,
            Field::CoursePref1 => &self.course_prefs[0],
            Field::CoursePref2 => &self.course_prefs[1],
            Field::CoursePref3 => &self.course_prefs[2],
            Field::HasSiblings => &self.has_siblings,
            Field::Religion => &self.religion,
            Field::Community => &self.community,
            Field::MotherTongue => &self.mother_tongue,
            Field::FatherName => &self.father_name,
            Field::FatherMobile => &self.father_mobile,
            Field::MotherName => &self.mother_name,
            Field::GuardianName => &self.guardian_name,
            Field::AddressLine1 => &self.address_line1,
            Field::AddressLine2 => &self.address_line2,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Country => &self.country,
            Field::Pincode => &self.pincode,
            Field::TransportNeeded => &self.transport_needed,
            Field::PreviousSchoolName => &self.previous_school_name,
            Field::PreviousBoard => &self.previous_board,
            Field::TransferCertificateStatus => &self.transfer_certificate_status,
            academic if academic.is_academic() => return self.academic.slot(academic),
            _ => return None,
        };
        Some(slot)
    }

    fn text_slot_mut(&mut self, field: Field) -> Option<&mut String> {
        let slot = match field {
            Field::InstitutionId => &mut self.institution_id,
            Field::InstitutionName => &mut self.institution_name,
            Field::FullName => &mut self.full_name,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::Email => &mut self.email,
            Field::Mobile => &mut self.mobile,
            Field::BoardOfStudy => &mut self.board_of_study,
            Field::SslcRegNo => &mut self.sslc_reg_no,
            Field::AadhaarNo => &mut self.aadhaar_no,
            Field::EmisNumber => &mut self.emis_number,
            Field::Gender => &mut self.gender,
            Field::BloodGroup => &mut self.blood_group,
            Field::CoursePref1 => &mut self.course_prefs[0],
            Field::CoursePref2 => &mut self.course_prefs[1],
            Field::CoursePref3 => &mut self.course_prefs[2],
            Field::HasSiblings => &mut self.has_siblings,
            Field::Religion => &mut self.religion,
            Field::Community => &mut self.community,
            Field::MotherTongue => &mut self.mother_tongue,
            Field::FatherName => &mut self.father_name,
            Field::FatherMobile => &mut self.father_mobile,
            Field::MotherName => &mut self.mother_name,
            Field::GuardianName => &mut self.guardian_name,
            Field::AddressLine1 => &mut self.address_line1,
            Field::AddressLine2 => &mut self.address_line2,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Country => &mut self.country,
            Field::Pincode => &mut self.pincode,
            Field::TransportNeeded => &mut self.transport_needed,
            Field::PreviousSchoolName => &mut self.previous_school_name,
            Field::PreviousBoard => &mut self.previous_board,
            Field::TransferCertificateStatus => &mut self.transfer_certificate_status,
            academic if academic.is_academic() => return self.academic.slot_mut(academic),
            _ => return None,
        };
        Some(slot)
    }

    /// Current text of a field; empty for flags and marks the record does not hold
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::InstitutionType => self.institution_type.map(|t| t.label()).unwrap_or(""),
            _ => self.text_slot(field).map(String::as_str).unwrap_or(""),
        }
    }

    /// Whether a field currently holds a non-blank value
    pub fn is_filled(&self, field: Field) -> bool {
        match field {
            Field::ManagementQuota => self.management_quota,
            _ => !self.text(field).trim().is_empty(),
        }
    }

    /// Merge one value into the draft. Returns false when the field has no
    /// slot in the current shape (e.g. a NEET score on an engineering record).
    pub fn set(&mut self, field: Field, value: FieldValue) -> bool {
        match field {
            Field::ManagementQuota => {
                self.management_quota = value.into_flag();
                true
            }
            Field::InstitutionType => {
                let kind = InstitutionType::parse(&value.into_text());
                self.set_institution_type(kind);
                true
            }
            _ => match self.text_slot_mut(field) {
                Some(slot) => {
                    *slot = value.into_text();
                    true
                }
                None => false,
            },
        }
    }

    /// Set the institution type, reshaping the academic record when it changes
    pub fn set_institution_type(&mut self, kind: Option<InstitutionType>) {
        if self.institution_type == kind {
            return;
        }
        self.institution_type = kind;
        self.academic = match kind {
            Some(kind) => AcademicRecord::for_type(kind),
            None => AcademicRecord::Unselected,
        };
    }

    /// Preferences the applicant actually filled, in rank order
    pub fn chosen_preferences(&self) -> Vec<&str> {
        self.course_prefs
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form_initial_state() {
        let draft = ApplicationDraft::default();
        assert_eq!(draft.board_of_study, DEFAULT_BOARD);
        assert_eq!(draft.state, DEFAULT_STATE);
        assert_eq!(draft.country, DEFAULT_COUNTRY);
        assert_eq!(draft.institution_type, None);
        assert_eq!(draft.academic, AcademicRecord::Unselected);
        assert!(!draft.management_quota);
    }

    #[test]
    fn test_set_and_read_text_field() {
        let mut draft = ApplicationDraft::default();
        assert!(draft.set(Field::FullName, "Test Student".into()));
        assert_eq!(draft.text(Field::FullName), "Test Student");
        assert!(draft.is_filled(Field::FullName));
        assert!(!draft.is_filled(Field::Email));
    }

    #[test]
    fn test_set_institution_type_reshapes_record() {
        let mut draft = ApplicationDraft::default();
        draft.set(Field::InstitutionType, "Medical".into());
        assert_eq!(draft.institution_type, Some(InstitutionType::Medical));
        assert!(draft.set(Field::NeetScore, "600".into()));
        assert!(!draft.set(Field::Physics, "90".into()));
        assert_eq!(draft.text(Field::Physics), "");
    }

    #[test]
    fn test_same_institution_type_keeps_marks() {
        let mut draft = ApplicationDraft::default();
        draft.set_institution_type(Some(InstitutionType::Engineering));
        draft.set(Field::Physics, "90".into());
        draft.set_institution_type(Some(InstitutionType::Engineering));
        assert_eq!(draft.text(Field::Physics), "90");
    }

    #[test]
    fn test_flag_values() {
        let mut draft = ApplicationDraft::default();
        draft.set(Field::ManagementQuota, true.into());
        assert!(draft.management_quota);
        draft.set(Field::ManagementQuota, "no".into());
        assert!(!draft.management_quota);

        draft.set(Field::HasSiblings, true.into());
        assert_eq!(draft.has_siblings, "Yes");
    }

    #[test]
    fn test_preference_slots() {
        let mut draft = ApplicationDraft::default();
        draft.set(Field::CoursePref1, "CSE".into());
        draft.set(Field::CoursePref3, "ECE".into());
        assert_eq!(draft.chosen_preferences(), vec!["CSE", "ECE"]);
        assert_eq!(Field::preference(1), Some(Field::CoursePref2));
        assert_eq!(Field::preference(3), None);
    }
}
