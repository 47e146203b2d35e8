//! The shared logical document model.
//!
//! `DocumentModel::compose` turns a prescription plus an already-resolved
//! doctor identity into one structured value that both rendering backends
//! consume. All content decisions live here: which sections appear, how
//! dates and vitals are formatted, what an absent value renders as. The
//! backends only decide geometry and pixels, so the printed page and the
//! captured page can never disagree about content.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::Error;
use crate::model::Prescription;
use crate::snapshot::DoctorIdentity;

pub const FOOTER_DISCLAIMER: &str = "This is a computer-generated prescription.";

/// Medicine table column widths as fractions of the table width, in order:
/// No., Medicine, Dosage, Instructions.
pub const TABLE_COLUMNS: [f64; 4] = [0.10, 0.40, 0.20, 0.30];
pub const TABLE_HEADERS: [&str; 4] = ["No.", "Medicine", "Dosage", "Instructions"];

#[derive(Debug, Clone)]
pub struct DocumentModel {
    pub header: Header,
    /// Always exactly 7 fields, in fixed order.
    pub patient: Vec<Field>,
    /// Diagnosis, description, additional comments. Empty entries omitted.
    pub leading_sections: Vec<Section>,
    /// Present only when the prescription has at least one medicine.
    pub medicines: Vec<MedicineRow>,
    /// Allergies, advice, lab tests, follow up. Empty entries omitted.
    pub trailing_sections: Vec<Section>,
    pub footer: String,
}

#[derive(Debug, Clone)]
pub struct Header {
    pub doctor: DoctorIdentity,
    pub rx_id: String,
    /// Encoded logo image bytes, when resolution succeeded.
    pub logo: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct MedicineRow {
    /// Rendered form, e.g. `"1."`.
    pub serial: String,
    pub name: String,
    pub dosage: String,
    pub instructions: String,
}

impl DocumentModel {
    pub fn compose(
        rx: &Prescription,
        doctor: &DoctorIdentity,
        logo: Option<Vec<u8>>,
    ) -> DocumentModel {
        let patient = vec![
            Field { label: "Name", value: rx.patient_name.clone() },
            Field { label: "Date", value: format_date(&rx.prescription_date) },
            Field { label: "Age", value: unit_or_dash(rx.patient_age, " Years") },
            Field { label: "Pat Id", value: text_or_dash(rx.patient_id.as_deref()) },
            Field { label: "Gender", value: text_or_dash(rx.patient_gender.as_deref()) },
            Field { label: "Height", value: unit_or_dash(rx.patient_height, "cms") },
            Field { label: "Weight", value: unit_or_dash(rx.patient_weight, "kgs") },
        ];

        let mut leading_sections = Vec::new();
        if let Some(body) = diagnosis_line(rx) {
            leading_sections.push(Section { title: "Diagnosis", body });
        }
        push_section(&mut leading_sections, "Description", rx.description.as_deref());
        push_section(
            &mut leading_sections,
            "Additional diagnosis comments",
            rx.additional_comments.as_deref(),
        );

        let medicines = rx
            .medicines
            .iter()
            .map(|m| MedicineRow {
                serial: format!("{}.", m.serial_no),
                name: m.name.clone(),
                dosage: dash_if_blank(&m.dosage),
                instructions: dash_if_blank(&m.instructions),
            })
            .collect();

        let mut trailing_sections = Vec::new();
        push_section(&mut trailing_sections, "Drug Allergies", rx.drug_allergies.as_deref());
        push_section(&mut trailing_sections, "Doctor's Advice", rx.doctor_advice.as_deref());
        push_section(&mut trailing_sections, "Lab Tests", rx.lab_tests.as_deref());
        push_section(&mut trailing_sections, "Follow Up", rx.follow_up.as_deref());

        DocumentModel {
            header: Header {
                doctor: doctor.clone(),
                rx_id: rx.rx_id.clone(),
                logo,
            },
            patient,
            leading_sections,
            medicines,
            trailing_sections,
            footer: FOOTER_DISCLAIMER.to_string(),
        }
    }
}

/// A rendering backend. Both take the same model; the output differs only in
/// how the page content is encoded.
pub trait Renderer {
    fn render(&self, model: &DocumentModel) -> Result<Vec<u8>, Error>;
}

fn diagnosis_line(rx: &Prescription) -> Option<String> {
    let code = present(rx.diagnosis_code.as_deref());
    let text = present(rx.diagnosis.as_deref());
    match (code, text) {
        (Some(c), Some(t)) => Some(format!("{c} - {t}")),
        (Some(c), None) => Some(c.to_string()),
        (None, Some(t)) => Some(t.to_string()),
        (None, None) => None,
    }
}

fn push_section(sections: &mut Vec<Section>, title: &'static str, body: Option<&str>) {
    if let Some(body) = present(body) {
        sections.push(Section { title, body: body.to_string() });
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn text_or_dash(value: Option<&str>) -> String {
    present(value).unwrap_or("-").to_string()
}

fn unit_or_dash(value: Option<i64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => "-".to_string(),
    }
}

fn dash_if_blank(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Replace every byte that is not an ASCII letter or digit with `_`.
pub fn sanitize_filename_part(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Filename for the print-quality export.
pub fn layout_filename(patient_name: &str) -> String {
    format!("Prescription_{}.pdf", sanitize_filename_part(patient_name))
}

/// Filename for the capture export; stamps the export date.
pub fn capture_filename(patient_name: &str, date: NaiveDate) -> String {
    format!(
        "Prescription_{}_{}.pdf",
        sanitize_filename_part(patient_name),
        date.format("%Y-%m-%d")
    )
}
