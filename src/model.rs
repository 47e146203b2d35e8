//! # Prescription Record Model
//!
//! The canonical shape of a prescription and its ordered medicine list, plus
//! the blank-tolerant input shapes the API layer submits. Every other module
//! builds on the invariants defined here:
//!
//! - `rx_id` is generated once at creation time and never changes.
//! - `serial_no` on a medicine is a dense 1-based position in the parent's
//!   ordered list, recomputed on every write. It is a display/sort key, not
//!   a stable identity.
//! - Numeric vitals submitted as strings parse leniently: blank or garbage
//!   input means "unset", never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a prescription. Freely mutable in both directions —
/// a published prescription may be reverted to draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Draft,
    Published,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "DRAFT",
            Status::Published => "PUBLISHED",
        }
    }

    /// Parse a stored status string. Unknown values fall back to `Draft`.
    pub fn parse(s: &str) -> Self {
        match s {
            "PUBLISHED" => Status::Published,
            _ => Status::Draft,
        }
    }
}

/// The root clinical record authored by a practitioner for one patient
/// encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    /// Opaque system-generated primary key.
    pub id: String,
    /// Human-facing business identifier, immutable after creation.
    pub rx_id: String,
    /// Owning practitioner. Never shared or transferred.
    pub user_id: String,
    pub status: Status,

    pub patient_name: String,
    pub patient_id: Option<String>,
    pub patient_age: Option<i64>,
    pub patient_gender: Option<String>,
    pub patient_height: Option<i64>,
    pub patient_weight: Option<i64>,
    pub prescription_date: DateTime<Utc>,

    pub diagnosis_code: Option<String>,
    pub diagnosis: Option<String>,
    pub description: Option<String>,
    pub additional_comments: Option<String>,
    pub drug_allergies: Option<String>,
    pub lab_tests: Option<String>,
    pub follow_up: Option<String>,
    pub doctor_advice: Option<String>,

    /// Doctor identity captured onto the record itself, so historical
    /// prescriptions stay stable when the profile changes later.
    pub doctor_name: Option<String>,
    pub doctor_qualifications: Option<String>,
    pub doctor_reg_id: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Ordered by `serial_no` ascending.
    #[serde(default)]
    pub medicines: Vec<Medicine>,
}

/// One ordered line item within a prescription's drug list. Deleted when the
/// parent prescription is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: String,
    pub prescription_id: String,
    /// Dense 1-based position. Always equals the row's place in the parent's
    /// ordered list after any successful write.
    pub serial_no: i64,
    pub name: String,
    /// Stored as an empty string when not provided, rendered as `-`.
    pub dosage: String,
    pub instructions: String,
}

/// Read-only profile input supplying snapshot defaults and the clinic logo.
/// Profile CRUD lives outside this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerProfile {
    pub name: Option<String>,
    pub qualifications: Option<String>,
    pub registration_id: Option<String>,
    pub logo_url: Option<String>,
}

/// A medicine as submitted by the caller. Any `serial_no` sent along is
/// ignored; serials are always recomputed from submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineInput {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub serial_no: Option<i64>,
}

/// Input shape for creating a prescription. Vitals arrive as strings from
/// form fields and are parsed leniently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDraft {
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_age: Option<String>,
    #[serde(default)]
    pub patient_gender: Option<String>,
    #[serde(default)]
    pub patient_height: Option<String>,
    #[serde(default)]
    pub patient_weight: Option<String>,
    #[serde(default)]
    pub prescription_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub diagnosis_code: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub additional_comments: Option<String>,
    #[serde(default)]
    pub drug_allergies: Option<String>,
    #[serde(default)]
    pub lab_tests: Option<String>,
    #[serde(default)]
    pub follow_up: Option<String>,
    #[serde(default)]
    pub doctor_advice: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub doctor_qualifications: Option<String>,
    #[serde(default)]
    pub doctor_reg_id: Option<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineInput>,
}

/// Partial update. `None` means "keep the current value" — omission is not
/// clearing. Medicines are the exception: when present, the submitted list
/// always fully replaces the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionPatch {
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub patient_age: Option<String>,
    #[serde(default)]
    pub patient_gender: Option<String>,
    #[serde(default)]
    pub patient_height: Option<String>,
    #[serde(default)]
    pub patient_weight: Option<String>,
    #[serde(default)]
    pub prescription_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub diagnosis_code: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub additional_comments: Option<String>,
    #[serde(default)]
    pub drug_allergies: Option<String>,
    #[serde(default)]
    pub lab_tests: Option<String>,
    #[serde(default)]
    pub follow_up: Option<String>,
    #[serde(default)]
    pub doctor_advice: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub doctor_qualifications: Option<String>,
    #[serde(default)]
    pub doctor_reg_id: Option<String>,
    #[serde(default)]
    pub medicines: Option<Vec<MedicineInput>>,
}

/// List-view projection: carries a medicine count instead of the full list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionSummary {
    pub id: String,
    pub rx_id: String,
    pub status: Status,
    pub patient_name: String,
    pub prescription_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub medicine_count: i64,
}

/// Lenient numeric-vital parsing: a blank or unparseable field means "unset",
/// not an error.
pub fn parse_vital(input: Option<&str>) -> Option<i64> {
    input.map(str::trim).filter(|s| !s.is_empty())?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vital_blank_is_none() {
        assert_eq!(parse_vital(None), None);
        assert_eq!(parse_vital(Some("")), None);
        assert_eq!(parse_vital(Some("   ")), None);
    }

    #[test]
    fn test_parse_vital_garbage_is_none() {
        assert_eq!(parse_vital(Some("abc")), None);
        assert_eq!(parse_vital(Some("12abc")), None);
    }

    #[test]
    fn test_parse_vital_number() {
        assert_eq!(parse_vital(Some("42")), Some(42));
        assert_eq!(parse_vital(Some(" 170 ")), Some(170));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(Status::parse(Status::Draft.as_str()), Status::Draft);
        assert_eq!(Status::parse(Status::Published.as_str()), Status::Published);
        assert_eq!(Status::parse("garbage"), Status::Draft);
    }

    #[test]
    fn test_draft_deserializes_from_form_shape() {
        let json = r#"{
            "patientName": "Jane Doe",
            "patientAge": "34",
            "patientHeight": "",
            "medicines": [{ "name": "Paracetamol", "dosage": "500mg" }]
        }"#;
        let draft: PrescriptionDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.patient_name.as_deref(), Some("Jane Doe"));
        assert_eq!(parse_vital(draft.patient_age.as_deref()), Some(34));
        assert_eq!(parse_vital(draft.patient_height.as_deref()), None);
        assert_eq!(draft.medicines.len(), 1);
        assert!(draft.medicines[0].instructions.is_none());
    }
}
