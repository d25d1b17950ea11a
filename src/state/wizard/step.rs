//! Wizard steps

/// The five pages of the application wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    InstitutionSelect,
    BasicInfo,
    CourseSelection,
    PersonalDetails,
    AcademicDetails,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::InstitutionSelect,
        Self::BasicInfo,
        Self::CourseSelection,
        Self::PersonalDetails,
        Self::AcademicDetails,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Self::InstitutionSelect => 0,
            Self::BasicInfo => 1,
            Self::CourseSelection => 2,
            Self::PersonalDetails => 3,
            Self::AcademicDetails => 4,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_final(self) -> bool {
        self.next().is_none()
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::InstitutionSelect => "Select Institution",
            Self::BasicInfo => "Basic Info",
            Self::CourseSelection => "Courses",
            Self::PersonalDetails => "Personal",
            Self::AcademicDetails => "Academic",
        }
    }
}
