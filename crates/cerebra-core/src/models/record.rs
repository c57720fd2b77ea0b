use jiff::civil::Date;
use serde::Serialize;

/// One generated report, tied to the patient identity it was produced for.
///
/// Records are immutable once created and can only be minted through
/// [`ReportGrant::into_record`](crate::session::ReportGrant::into_record), so
/// every record in a history was authorized by the guards in
/// [`SessionState::authorize_report`](crate::session::SessionState::authorize_report).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRecord {
    id: String,
    name: String,
    date: String,
    report: String,
}

impl PatientRecord {
    pub(crate) fn new(id: String, name: String, date: Date, report: String) -> Self {
        Self {
            id,
            name,
            date: format_record_date(date),
            report,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display-formatted creation date, `dd-mm-YYYY`.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    /// Label for the collapsible history entry at 1-based `position`.
    pub fn label(&self, position: usize) -> String {
        format!("{position}. {} ({})", self.name, self.date)
    }
}

pub fn format_record_date(date: Date) -> String {
    date.strftime("%d-%m-%Y").to_string()
}

/// Long-form date used in the report header, e.g. `05 March 2026`.
pub fn format_report_date(date: Date) -> String {
    date.strftime("%d %B %Y").to_string()
}
