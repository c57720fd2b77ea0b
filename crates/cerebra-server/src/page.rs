//! Server-rendered single page.

use serde::Serialize;
use tera::{Context, Tera};

use cerebra_core::models::form::FormInputs;
use cerebra_core::models::notice::Notice;
use cerebra_core::models::patient::{Age, Gender};
use cerebra_core::models::scan::{ACCEPTED_EXTENSIONS, ScanUpload};
use cerebra_core::session::SessionState;

const INDEX: &str = "index.html";

pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(INDEX, include_str!("../templates/index.html.tera"))?;
    Ok(tera)
}

#[derive(Serialize)]
struct PageView<'a> {
    form: &'a FormInputs,
    genders: Vec<&'static str>,
    age_min: u8,
    age_max: u8,
    accepted_scan_types: String,
    notice: Option<&'a Notice>,
    analysis_done: bool,
    latest_report: Option<&'a str>,
    history: Vec<HistoryEntry<'a>>,
    scan: Option<&'a ScanUpload>,
}

#[derive(Serialize)]
struct HistoryEntry<'a> {
    position: usize,
    label: String,
    report: &'a str,
}

/// Render the page for `state`. `notice` is passed separately because the
/// caller has already taken it off the state.
pub fn render(
    tera: &Tera,
    state: &SessionState,
    notice: Option<&Notice>,
) -> Result<String, tera::Error> {
    let history = state
        .history()
        .iter()
        .enumerate()
        .map(|(i, record)| HistoryEntry {
            position: i + 1,
            label: record.label(i + 1),
            report: record.report(),
        })
        .collect();

    let view = PageView {
        form: state.form(),
        genders: Gender::ALL.iter().map(|g| g.label()).collect(),
        age_min: Age::MIN,
        age_max: Age::MAX,
        accepted_scan_types: ACCEPTED_EXTENSIONS
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(","),
        notice,
        analysis_done: state.analysis_done(),
        latest_report: state.latest_report(),
        history,
        scan: state.scan(),
    };

    tera.render(INDEX, &Context::from_serialize(&view)?)
}
