//! The export operation: load, resolve, compose, render, name.
//!
//! This is the seam the API layer calls. It owns the ordering guarantees:
//! ownership is checked before anything renders, the doctor snapshot is
//! resolved before composition, and logo failures are absorbed before the
//! renderer runs, so the only caller-visible failures are `NotFound`,
//! `Render`, and storage errors.

use tracing::info;

use crate::assets::{LogoResolver, RequestOrigin};
use crate::document::{capture_filename, layout_filename, DocumentModel, Renderer};
use crate::error::Error;
use crate::layout::LayoutRenderer;
use crate::model::PractitionerProfile;
use crate::snapshot::DoctorIdentity;
use crate::store::Store;

/// A finished export: the suggested filename and the PDF bytes.
#[derive(Debug, Clone)]
pub struct PdfExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl PdfExport {
    pub fn content_type(&self) -> &'static str {
        "application/pdf"
    }
}

pub struct ExportService {
    store: Store,
    logos: LogoResolver,
}

impl ExportService {
    pub fn new(store: Store) -> Self {
        ExportService {
            store,
            logos: LogoResolver::new(),
        }
    }

    /// Render a stored prescription to a print-quality PDF. Owner scoping
    /// applies before anything else; a foreign-owned id is `NotFound`.
    pub async fn export_pdf(
        &self,
        owner: &str,
        id: &str,
        profile: Option<&PractitionerProfile>,
        origin: Option<&RequestOrigin>,
    ) -> Result<PdfExport, Error> {
        let rx = self.store.get(owner, id).await?;
        let doctor = DoctorIdentity::resolve(&rx, profile);
        let logo = self
            .logos
            .resolve(profile.and_then(|p| p.logo_url.as_deref()), origin)
            .await;
        let model = DocumentModel::compose(&rx, &doctor, logo);

        let bytes = LayoutRenderer::new().render(&model)?;
        let filename = layout_filename(&rx.patient_name);
        info!(id, filename, len = bytes.len(), "exported prescription pdf");
        Ok(PdfExport { filename, bytes })
    }

    /// Render an already-composed document through the capture backend.
    /// No store access: the caller has the content loaded for display.
    pub fn export_capture(
        model: &DocumentModel,
        patient_name: &str,
    ) -> Result<PdfExport, Error> {
        let bytes = crate::capture::CaptureRenderer::new().render(model)?;
        let filename = capture_filename(patient_name, chrono::Utc::now().date_naive());
        info!(filename, len = bytes.len(), "exported capture pdf");
        Ok(PdfExport { filename, bytes })
    }
}
