use serde::{Deserialize, Serialize};

use super::patient::{Age, Gender, PatientDetails};

/// The widget values last submitted from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInputs {
    pub patient_id: String,
    pub patient_name: String,
    pub age: Age,
    pub gender: Gender,
    pub symptoms: String,
    /// Shown on the page, read by nothing.
    pub show_confidence: bool,
}

impl Default for FormInputs {
    fn default() -> Self {
        Self {
            patient_id: String::new(),
            patient_name: String::new(),
            age: Age::default(),
            gender: Gender::default(),
            symptoms: String::new(),
            show_confidence: true,
        }
    }
}

impl FormInputs {
    pub fn patient(&self) -> PatientDetails {
        PatientDetails {
            patient_id: self.patient_id.clone(),
            patient_name: self.patient_name.clone(),
            age: self.age,
            gender: self.gender,
        }
    }
}
