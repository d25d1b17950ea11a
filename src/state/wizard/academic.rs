//! Academic record and derived eligibility score
//!
//! Each institution type records different marks. Keeping them in a tagged
//! variant means a NEET score can never be read back as a physics mark.

use super::draft::Field;
use crate::state::InstitutionType;
use std::fmt;

/// Default maximum for 10th standard marks
pub const DEFAULT_SSLC_MAX: &str = "500";

/// Marks as typed by the applicant, keyed by institution type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AcademicRecord {
    #[default]
    Unselected,
    Engineering {
        physics: String,
        chemistry: String,
        maths: String,
    },
    Medical {
        neet_score: String,
    },
    Polytechnic {
        obtained: String,
        max: String,
    },
    School {
        previous_grade: String,
    },
}

/// A derived score and the maximum it is measured against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub value: f64,
    pub max: f64,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}/{}", self.value, self.max)
    }
}

impl AcademicRecord {
    /// Blank record shaped for an institution type
    pub fn for_type(kind: InstitutionType) -> Self {
        match kind {
            InstitutionType::Engineering => Self::Engineering {
                physics: String::new(),
                chemistry: String::new(),
                maths: String::new(),
            },
            InstitutionType::Medical => Self::Medical {
                neet_score: String::new(),
            },
            InstitutionType::Polytechnic => Self::Polytechnic {
                obtained: String::new(),
                max: DEFAULT_SSLC_MAX.to_string(),
            },
            InstitutionType::School => Self::School {
                previous_grade: String::new(),
            },
        }
    }

    /// Same shape with every mark cleared
    pub fn cleared(&self) -> Self {
        match self {
            Self::Unselected => Self::Unselected,
            Self::Engineering { .. } => Self::for_type(InstitutionType::Engineering),
            Self::Medical { .. } => Self::for_type(InstitutionType::Medical),
            Self::Polytechnic { .. } => Self::for_type(InstitutionType::Polytechnic),
            Self::School { .. } => Self::for_type(InstitutionType::School),
        }
    }

    /// Fields this variant holds, in display order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Unselected => &[],
            Self::Engineering { .. } => &[Field::Physics, Field::Chemistry, Field::Maths],
            Self::Medical { .. } => &[Field::NeetScore],
            Self::Polytechnic { .. } => &[Field::SslcMarksObtained, Field::SslcMaxMarks],
            Self::School { .. } => &[Field::PreviousGrade],
        }
    }

    pub fn slot(&self, field: Field) -> Option<&String> {
        match (self, field) {
            (Self::Engineering { physics, .. }, Field::Physics) => Some(physics),
            (Self::Engineering { chemistry, .. }, Field::Chemistry) => Some(chemistry),
            (Self::Engineering { maths, .. }, Field::Maths) => Some(maths),
            (Self::Medical { neet_score }, Field::NeetScore) => Some(neet_score),
            (Self::Polytechnic { obtained, .. }, Field::SslcMarksObtained) => Some(obtained),
            (Self::Polytechnic { max, .. }, Field::SslcMaxMarks) => Some(max),
            (Self::School { previous_grade }, Field::PreviousGrade) => Some(previous_grade),
            _ => None,
        }
    }

    pub fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match (self, field) {
            (Self::Engineering { physics, .. }, Field::Physics) => Some(physics),
            (Self::Engineering { chemistry, .. }, Field::Chemistry) => Some(chemistry),
            (Self::Engineering { maths, .. }, Field::Maths) => Some(maths),
            (Self::Medical { neet_score }, Field::NeetScore) => Some(neet_score),
            (Self::Polytechnic { obtained, .. }, Field::SslcMarksObtained) => Some(obtained),
            (Self::Polytechnic { max, .. }, Field::SslcMaxMarks) => Some(max),
            (Self::School { previous_grade }, Field::PreviousGrade) => Some(previous_grade),
            _ => None,
        }
    }

    /// Derived eligibility score; schools are not numerically scored
    pub fn score(&self) -> Option<Score> {
        match self {
            Self::Unselected | Self::School { .. } => None,
            Self::Engineering {
                physics,
                chemistry,
                maths,
            } => Some(Score {
                value: engineering_cutoff(
                    parse_number(physics),
                    parse_number(chemistry),
                    parse_number(maths),
                ),
                max: 200.0,
            }),
            Self::Medical { neet_score } => Some(Score {
                value: round2(parse_number(neet_score)),
                max: 720.0,
            }),
            Self::Polytechnic { obtained, max } => Some(Score {
                value: percentage(parse_number(obtained), parse_number(max)),
                max: 100.0,
            }),
        }
    }
}

/// `maths + physics/2 + chemistry/2`, out of 200
pub fn engineering_cutoff(physics: f64, chemistry: f64, maths: f64) -> f64 {
    round2(maths + physics / 2.0 + chemistry / 2.0)
}

/// `obtained / max * 100`; a zero maximum yields zero
pub fn percentage(obtained: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    round2(obtained / max * 100.0)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Lenient numeric coercion: blank or non-numeric input counts as zero
pub fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Numeric prefix of free text such as `"85%"` or `"92.5 (A1)"`
pub fn leading_number(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        if ch.is_ascii_digit() {
            end = idx + 1;
        } else if ch == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }
    parse_number(&trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engineering(physics: &str, chemistry: &str, maths: &str) -> AcademicRecord {
        AcademicRecord::Engineering {
            physics: physics.to_string(),
            chemistry: chemistry.to_string(),
            maths: maths.to_string(),
        }
    }

    #[test]
    fn test_engineering_cutoff_example() {
        let score = engineering("90", "80", "95").score().unwrap();
        assert_eq!(score.value, 180.0);
        assert_eq!(score.max, 200.0);
        assert_eq!(score.to_string(), "180.00/200");
    }

    #[test]
    fn test_engineering_cutoff_rounds_to_two_decimals() {
        assert_eq!(engineering_cutoff(33.333, 0.0, 0.0), 16.67);
        assert_eq!(engineering_cutoff(91.0, 77.0, 88.5), 172.5);
        assert_eq!(engineering_cutoff(100.0, 100.0, 100.0), 200.0);
        assert_eq!(engineering_cutoff(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_engineering_treats_blank_marks_as_zero() {
        let score = engineering("", "abc", "95").score().unwrap();
        assert_eq!(score.value, 95.0);
    }

    #[test]
    fn test_polytechnic_percentage() {
        let record = AcademicRecord::Polytechnic {
            obtained: "420".to_string(),
            max: "500".to_string(),
        };
        assert_eq!(record.score().unwrap().value, 84.0);
    }

    #[test]
    fn test_polytechnic_zero_max_is_zero_percent() {
        let record = AcademicRecord::Polytechnic {
            obtained: "420".to_string(),
            max: "0".to_string(),
        };
        let score = record.score().unwrap();
        assert_eq!(score.value, 0.0);
        assert!(!score.value.is_nan());
        assert_eq!(percentage(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_medical_uses_raw_neet_score() {
        let record = AcademicRecord::Medical {
            neet_score: "612".to_string(),
        };
        let score = record.score().unwrap();
        assert_eq!(score.value, 612.0);
        assert_eq!(score.max, 720.0);
    }

    #[test]
    fn test_school_is_not_scored() {
        let record = AcademicRecord::School {
            previous_grade: "A1".to_string(),
        };
        assert!(record.score().is_none());
        assert!(AcademicRecord::Unselected.score().is_none());
    }

    #[test]
    fn test_slots_only_exist_on_matching_variant() {
        let mut record = AcademicRecord::for_type(InstitutionType::Medical);
        assert!(record.slot_mut(Field::Physics).is_none());
        *record.slot_mut(Field::NeetScore).unwrap() = "500".to_string();
        assert_eq!(record.slot(Field::NeetScore).unwrap(), "500");
    }

    #[test]
    fn test_polytechnic_defaults_max_marks() {
        let record = AcademicRecord::for_type(InstitutionType::Polytechnic);
        assert_eq!(record.slot(Field::SslcMaxMarks).unwrap(), DEFAULT_SSLC_MAX);
    }

    #[test]
    fn test_cleared_keeps_shape() {
        let record = engineering("90", "80", "95").cleared();
        assert_eq!(record, engineering("", "", ""));
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("85%"), 85.0);
        assert_eq!(leading_number(" 92.5 (A1)"), 92.5);
        assert_eq!(leading_number("A1"), 0.0);
        assert_eq!(leading_number(""), 0.0);
    }
}
