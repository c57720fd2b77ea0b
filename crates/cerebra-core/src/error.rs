use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Please enter symptoms")]
    EmptySymptoms,

    #[error("Please enter Patient ID and Patient Name")]
    MissingPatientIdentity,

    #[error("Perform analysis before generating report")]
    AnalysisPending,

    #[error("Age must be between {min} and {max}, got {value}")]
    InvalidAge { value: String, min: u8, max: u8 },

    #[error("unknown gender: {0}")]
    UnknownGender(String),

    #[error("unsupported scan type: {0} (expected png, jpg or jpeg)")]
    UnsupportedScanType(String),
}

impl CoreError {
    /// Refusals the user can fix from the form. These are shown inline as a
    /// warning and never abort the interaction.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            CoreError::EmptySymptoms
                | CoreError::MissingPatientIdentity
                | CoreError::AnalysisPending
                | CoreError::InvalidAge { .. }
                | CoreError::UnsupportedScanType(_)
        )
    }
}
