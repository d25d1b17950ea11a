//! Submission payload in the backend's wire shape

use super::academic::{leading_number, parse_number, AcademicRecord, DEFAULT_SSLC_MAX};
use super::draft::ApplicationDraft;
use serde::{Deserialize, Serialize};

/// Body of `POST /submit-application/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub institution_id: i64,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub aadhaar_no: String,
    pub dob: String,
    pub community: String,

    pub board_of_study: String,
    pub sslc_reg_no: String,

    pub course_pref_1: String,
    pub course_pref_2: String,
    pub course_pref_3: String,

    pub emis_number: String,
    pub gender: String,
    pub blood_group: String,
    pub transport_needed: String,
    pub previous_school_name: String,
    pub previous_board: String,
    pub transfer_certificate_status: String,

    pub father_name: String,
    pub father_mobile: String,
    pub address_city: String,
    pub address_state: String,

    pub physics: f64,
    pub chemistry: f64,
    pub maths: f64,

    #[serde(rename = "sslcMarksObtained")]
    pub sslc_marks_obtained: String,
    #[serde(rename = "sslcMaxMarks")]
    pub sslc_max_marks: String,

    pub is_management_quota: bool,
}

/// Marks as the backend expects them: everything numeric rides in
/// physics/chemistry/maths, 10th marks travel as strings.
struct WireMarks {
    physics: f64,
    chemistry: f64,
    maths: f64,
    sslc_obtained: String,
    sslc_max: String,
}

impl WireMarks {
    fn from_record(record: &AcademicRecord) -> Self {
        let mut marks = Self {
            physics: 0.0,
            chemistry: 0.0,
            maths: 0.0,
            sslc_obtained: "0".to_string(),
            sslc_max: DEFAULT_SSLC_MAX.to_string(),
        };
        match record {
            AcademicRecord::Unselected => {}
            AcademicRecord::Engineering {
                physics,
                chemistry,
                maths,
            } => {
                marks.physics = parse_number(physics);
                marks.chemistry = parse_number(chemistry);
                marks.maths = parse_number(maths);
            }
            AcademicRecord::Medical { neet_score } => {
                marks.physics = parse_number(neet_score);
            }
            AcademicRecord::Polytechnic { obtained, max } => {
                if !obtained.trim().is_empty() {
                    marks.sslc_obtained = obtained.trim().to_string();
                }
                if !max.trim().is_empty() {
                    marks.sslc_max = max.trim().to_string();
                }
            }
            AcademicRecord::School { previous_grade } => {
                marks.physics = leading_number(previous_grade);
            }
        }
        marks
    }
}

impl SubmissionPayload {
    pub fn from_draft(draft: &ApplicationDraft) -> Self {
        let marks = WireMarks::from_record(&draft.academic);
        let [pref_1, pref_2, pref_3] = draft.course_prefs.clone();

        Self {
            institution_id: draft.institution_id.trim().parse().unwrap_or_default(),
            full_name: draft.full_name.clone(),
            email: draft.email.clone(),
            mobile: draft.mobile.clone(),
            aadhaar_no: draft.aadhaar_no.clone(),
            dob: draft.date_of_birth.clone(),
            community: draft.community.clone(),
            board_of_study: draft.board_of_study.clone(),
            sslc_reg_no: draft.sslc_reg_no.clone(),
            course_pref_1: pref_1,
            course_pref_2: pref_2,
            course_pref_3: pref_3,
            emis_number: draft.emis_number.clone(),
            gender: draft.gender.clone(),
            blood_group: draft.blood_group.clone(),
            transport_needed: draft.transport_needed.clone(),
            previous_school_name: draft.previous_school_name.clone(),
            previous_board: draft.previous_board.clone(),
            transfer_certificate_status: draft.transfer_certificate_status.clone(),
            father_name: draft.father_name.clone(),
            father_mobile: draft.father_mobile.clone(),
            address_city: draft.city.clone(),
            address_state: draft.state.clone(),
            physics: marks.physics,
            chemistry: marks.chemistry,
            maths: marks.maths,
            sslc_marks_obtained: marks.sslc_obtained,
            sslc_max_marks: marks.sslc_max,
            is_management_quota: draft.management_quota,
        }
    }
}
