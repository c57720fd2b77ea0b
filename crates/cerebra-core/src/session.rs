//! Per-session report lifecycle.
//!
//! A [`SessionState`] is a value: every interaction takes the current state
//! and produces the next one. Nothing here mutates shared state, so each
//! transition can be exercised on its own.

use jiff::civil::Date;
use serde::Serialize;

use crate::error::CoreError;
use crate::models::form::FormInputs;
use crate::models::notice::Notice;
use crate::models::patient::PatientDetails;
use crate::models::record::PatientRecord;
use crate::models::scan::ScanUpload;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    history: Vec<PatientRecord>,
    analysis_done: bool,
    latest_report: Option<String>,
    form: FormInputs,
    scan: Option<ScanUpload>,
    notice: Option<Notice>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generated records in insertion order.
    pub fn history(&self) -> &[PatientRecord] {
        &self.history
    }

    /// Record at 1-based `position`, as labeled on the page.
    pub fn record(&self, position: usize) -> Option<&PatientRecord> {
        position
            .checked_sub(1)
            .and_then(|index| self.history.get(index))
    }

    pub fn latest_record(&self) -> Option<&PatientRecord> {
        self.history.last()
    }

    pub fn analysis_done(&self) -> bool {
        self.analysis_done
    }

    pub fn latest_report(&self) -> Option<&str> {
        self.latest_report.as_deref()
    }

    pub fn form(&self) -> &FormInputs {
        &self.form
    }

    pub fn scan(&self) -> Option<&ScanUpload> {
        self.scan.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn with_form(&self, form: FormInputs) -> Self {
        Self {
            form,
            ..self.clone()
        }
    }

    pub fn with_scan(&self, scan: ScanUpload) -> Self {
        Self {
            scan: Some(scan),
            ..self.clone()
        }
    }

    pub fn with_notice(&self, notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..self.clone()
        }
    }

    /// Split off the pending notice, leaving a state without one.
    pub fn take_notice(&self) -> (Self, Option<Notice>) {
        let mut next = self.clone();
        let notice = next.notice.take();
        (next, notice)
    }

    /// Mark the symptoms as analyzed. Refused, with the state left as it
    /// was, when the description is blank after trimming.
    pub fn analyze_symptoms(&self, symptoms: &str) -> Result<Self, CoreError> {
        if symptoms.trim().is_empty() {
            return Err(CoreError::EmptySymptoms);
        }
        Ok(Self {
            analysis_done: true,
            ..self.clone()
        })
    }

    /// Check the report guards: identity first, then analysis.
    pub fn authorize_report(&self, patient: PatientDetails) -> Result<ReportGrant, CoreError> {
        if !patient.has_identity() {
            return Err(CoreError::MissingPatientIdentity);
        }
        if !self.analysis_done {
            return Err(CoreError::AnalysisPending);
        }
        Ok(ReportGrant { patient })
    }

    /// Append a record and make its report the latest one. No dedup: the
    /// same patient may appear any number of times.
    pub fn with_record(&self, record: PatientRecord) -> Self {
        let mut next = self.clone();
        next.latest_report = Some(record.report().to_string());
        next.history.push(record);
        next
    }

    /// Authorize, synthesize and record a report in one step.
    ///
    /// `synthesize` runs only once the guards pass; if it fails the current
    /// state is kept untouched.
    pub fn generate_report<F, E>(
        &self,
        patient: PatientDetails,
        today: Date,
        synthesize: F,
    ) -> Result<Self, E>
    where
        F: FnOnce(&PatientDetails, Date) -> Result<String, E>,
        E: From<CoreError>,
    {
        let grant = self.authorize_report(patient)?;
        let report = synthesize(grant.patient(), today)?;
        Ok(self.with_record(grant.into_record(today, report)))
    }
}

/// Proof that the report guards passed for `patient`. The only way to build
/// a [`PatientRecord`].
#[derive(Debug)]
pub struct ReportGrant {
    patient: PatientDetails,
}

impl ReportGrant {
    pub fn patient(&self) -> &PatientDetails {
        &self.patient
    }

    pub fn into_record(self, date: Date, report: String) -> PatientRecord {
        PatientRecord::new(
            self.patient.patient_id,
            self.patient.patient_name,
            date,
            report,
        )
    }
}
