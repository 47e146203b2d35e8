//! # rxpad CLI
//!
//! Usage:
//!   rxpad input.json -o output.pdf
//!   rxpad input.json --capture -o output.pdf
//!   echo '{ ... }' | rxpad -o output.pdf
//!   rxpad --example > prescription.json
//!
//! Input is a JSON object with a `prescription` and an optional `profile`.
//! The logo reference on the profile is resolved before rendering; a
//! reference that cannot be fetched falls back per backend.

use std::env;
use std::fs;
use std::io::{self, Read};

use serde::Deserialize;

use rxpad::assets::LogoResolver;
use rxpad::document::{capture_filename, layout_filename, DocumentModel, Renderer};
use rxpad::{CaptureRenderer, DoctorIdentity, LayoutRenderer, PractitionerProfile, Prescription};

#[derive(Deserialize)]
struct CliInput {
    prescription: Prescription,
    #[serde(default)]
    profile: Option<PractitionerProfile>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rxpad=info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_prescription_json());
        return;
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .expect("Failed to read stdin");
        buf
    };

    let parsed: CliInput = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("✗ Failed to parse input: {}", e);
            std::process::exit(1);
        }
    };

    let capture = args.iter().any(|a| a == "--capture");

    let doctor = DoctorIdentity::resolve(&parsed.prescription, parsed.profile.as_ref());
    let logo = LogoResolver::new()
        .resolve(
            parsed
                .profile
                .as_ref()
                .and_then(|p| p.logo_url.as_deref()),
            None,
        )
        .await;
    let model = DocumentModel::compose(&parsed.prescription, &doctor, logo);

    let result = if capture {
        CaptureRenderer::new().render(&model)
    } else {
        LayoutRenderer::new().render(&model)
    };

    let default_name = if capture {
        capture_filename(
            &parsed.prescription.patient_name,
            chrono::Utc::now().date_naive(),
        )
    } else {
        layout_filename(&parsed.prescription.patient_name)
    };
    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or(default_name);

    match result {
        Ok(pdf_bytes) => {
            fs::write(&output_path, &pdf_bytes).expect("Failed to write PDF");
            eprintln!("✓ Written {} bytes to {}", pdf_bytes.len(), output_path);
        }
        Err(e) => {
            eprintln!("✗ Render failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn example_prescription_json() -> &'static str {
    r#"{
  "prescription": {
    "id": "6f1a9a1e-0000-4000-8000-000000000001",
    "rxId": "RX-1700000000000",
    "userId": "demo-user",
    "status": "DRAFT",
    "patientName": "Jane Doe",
    "patientId": "PAT-104",
    "patientAge": 34,
    "patientGender": "Female",
    "patientHeight": 170,
    "patientWeight": 62,
    "prescriptionDate": "2026-02-14T09:30:00Z",
    "diagnosisCode": "J06.9",
    "diagnosis": "Acute upper respiratory infection",
    "description": "Symptomatic since three days, no fever spikes.",
    "additionalComments": null,
    "drugAllergies": "Penicillin",
    "labTests": "CBC after one week",
    "followUp": "Review after 5 days",
    "doctorAdvice": "Plenty of fluids, rest.",
    "doctorName": "Dr. A. Carter",
    "doctorQualifications": "MBBS, MD",
    "doctorRegId": "REG/2041",
    "createdAt": "2026-02-14T09:30:00Z",
    "updatedAt": "2026-02-14T09:30:00Z",
    "medicines": [
      {
        "id": "m-1",
        "prescriptionId": "6f1a9a1e-0000-4000-8000-000000000001",
        "serialNo": 1,
        "name": "Paracetamol 500mg",
        "dosage": "1-0-1",
        "instructions": "After food"
      },
      {
        "id": "m-2",
        "prescriptionId": "6f1a9a1e-0000-4000-8000-000000000001",
        "serialNo": 2,
        "name": "Cetirizine 10mg",
        "dosage": "0-0-1",
        "instructions": ""
      }
    ]
  },
  "profile": {
    "name": "Dr. A. Carter",
    "qualifications": "MBBS, MD",
    "registrationId": "REG/2041",
    "logoUrl": null
  }
}
"#
}
