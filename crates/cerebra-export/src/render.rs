use jiff::civil::Date;
use serde::Serialize;
use tera::{Context, Tera};

use cerebra_core::models::patient::PatientDetails;
use cerebra_core::models::record::format_report_date;

use crate::error::ExportError;

pub const REPORT_TEMPLATE_NAME: &str = "medical_report.txt";
pub const REPORT_TEMPLATE: &str = include_str!("../templates/medical_report.txt.tera");

/// Diagnostic narrative. Constant: nothing about the scan or the symptom
/// text feeds into it.
pub const TUMOR_TYPE: &str = "Glioma";
pub const RISK_LEVEL: &str = "High";
pub const RECOMMENDATIONS: [&str; 4] = [
    "Immediate consultation with a Neurologist",
    "Further diagnostic confirmation if required",
    "Continuous neurological monitoring",
    "Avoid delay in medical evaluation",
];

/// Every variable the report template can address.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub patient_id: String,
    pub patient_name: String,
    pub age: u8,
    pub gender: String,
    pub report_date: String,
    pub tumor_type: &'static str,
    pub risk_level: &'static str,
    pub recommendations: Vec<&'static str>,
}

impl ReportContext {
    pub fn new(patient: &PatientDetails, today: Date) -> Self {
        Self {
            patient_id: patient.patient_id.clone(),
            patient_name: patient.patient_name.clone(),
            age: patient.age.years(),
            gender: patient.gender.to_string(),
            report_date: format_report_date(today),
            tumor_type: TUMOR_TYPE,
            risk_level: RISK_LEVEL,
            recommendations: RECOMMENDATIONS.to_vec(),
        }
    }
}

/// Produce the full medical report text for `patient` dated `today`.
pub fn synthesize_report(patient: &PatientDetails, today: Date) -> Result<String, ExportError> {
    let context = ReportContext::new(patient, today);
    render_template(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE, &context)
}

/// Render a Tera template with any serializable context.
///
/// The `template_name` decides autoescaping: only `.html`, `.htm` and `.xml`
/// names are escaped.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    context: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    // Convert the context to a Tera context via serde_json
    let value = serde_json::to_value(context)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}
