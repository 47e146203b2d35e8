//! Doctor-identity snapshot resolution.
//!
//! A prescription may carry its own copy of the doctor's name, qualifications
//! and registration id. When it does, that copy wins over the live profile,
//! so a record printed years later still shows the identity it was signed
//! with. Fields the record never captured fall through to the profile, and
//! finally to fixed placeholders so a rendered document never has holes.

use crate::model::{PractitionerProfile, Prescription};

pub const PLACEHOLDER_NAME: &str = "Doctor Name";
pub const PLACEHOLDER_QUALIFICATIONS: &str = "Qualifications";
pub const PLACEHOLDER_REG_ID: &str = "REG/XXX";

/// The fully-resolved identity both rendering backends consume. Resolution
/// happens exactly once, before composition, so the two backends cannot
/// disagree about whose name is on the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorIdentity {
    pub name: String,
    pub qualifications: String,
    pub reg_id: String,
}

impl DoctorIdentity {
    /// Per-field precedence: prescription snapshot, then profile default,
    /// then placeholder. Empty strings count as absent.
    pub fn resolve(rx: &Prescription, profile: Option<&PractitionerProfile>) -> Self {
        DoctorIdentity {
            name: pick(
                rx.doctor_name.as_deref(),
                profile.and_then(|p| p.name.as_deref()),
                PLACEHOLDER_NAME,
            ),
            qualifications: pick(
                rx.doctor_qualifications.as_deref(),
                profile.and_then(|p| p.qualifications.as_deref()),
                PLACEHOLDER_QUALIFICATIONS,
            ),
            reg_id: pick(
                rx.doctor_reg_id.as_deref(),
                profile.and_then(|p| p.registration_id.as_deref()),
                PLACEHOLDER_REG_ID,
            ),
        }
    }
}

fn pick(snapshot: Option<&str>, profile: Option<&str>, placeholder: &str) -> String {
    present(snapshot)
        .or_else(|| present(profile))
        .unwrap_or(placeholder)
        .to_string()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bare_prescription() -> Prescription {
        Prescription {
            id: "p1".into(),
            rx_id: "RX-1".into(),
            user_id: "u1".into(),
            status: Default::default(),
            patient_name: "Jane Doe".into(),
            patient_id: None,
            patient_age: None,
            patient_gender: None,
            patient_height: None,
            patient_weight: None,
            prescription_date: Utc::now(),
            diagnosis_code: None,
            diagnosis: None,
            description: None,
            additional_comments: None,
            drug_allergies: None,
            lab_tests: None,
            follow_up: None,
            doctor_advice: None,
            doctor_name: None,
            doctor_qualifications: None,
            doctor_reg_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            medicines: vec![],
        }
    }

    #[test]
    fn test_snapshot_wins_over_profile() {
        let mut rx = bare_prescription();
        rx.doctor_name = Some("Dr. Snapshot".into());
        let profile = PractitionerProfile {
            name: Some("Dr. Profile".into()),
            ..Default::default()
        };
        let id = DoctorIdentity::resolve(&rx, Some(&profile));
        assert_eq!(id.name, "Dr. Snapshot");
    }

    #[test]
    fn test_profile_fills_missing_fields() {
        let mut rx = bare_prescription();
        rx.doctor_name = Some("Dr. Snapshot".into());
        let profile = PractitionerProfile {
            name: Some("Dr. Profile".into()),
            qualifications: Some("MBBS, MD".into()),
            registration_id: Some("REG/12345".into()),
            logo_url: None,
        };
        let id = DoctorIdentity::resolve(&rx, Some(&profile));
        assert_eq!(id.name, "Dr. Snapshot");
        assert_eq!(id.qualifications, "MBBS, MD");
        assert_eq!(id.reg_id, "REG/12345");
    }

    #[test]
    fn test_placeholders_when_nothing_known() {
        let rx = bare_prescription();
        let id = DoctorIdentity::resolve(&rx, None);
        assert_eq!(id.name, PLACEHOLDER_NAME);
        assert_eq!(id.qualifications, PLACEHOLDER_QUALIFICATIONS);
        assert_eq!(id.reg_id, PLACEHOLDER_REG_ID);
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        let mut rx = bare_prescription();
        rx.doctor_name = Some("  ".into());
        let profile = PractitionerProfile {
            name: Some("Dr. Profile".into()),
            ..Default::default()
        };
        let id = DoctorIdentity::resolve(&rx, Some(&profile));
        assert_eq!(id.name, "Dr. Profile");
    }
}
