//! # rxpad
//!
//! A prescription authoring and PDF export engine: one document model, two
//! rendering backends.
//!
//! Prescriptions are stored with an ordered medicine list and exported as
//! PDF two ways. The print backend lays text and rules out page by page and
//! serializes real PDF operators, so the output is small and selectable. The
//! capture backend renders the same content as a styled visual tree,
//! rasterizes it, and ships the pixels; the output looks exactly like the
//! on-screen preview at the cost of selectable text. Both consume the same
//! composed document, so they can never disagree about content.
//!
//! ## Architecture
//!
//! ```text
//! [store]     — owner-scoped CRUD over SQLite, transactional medicine lists
//!      ↓
//! [snapshot]  — doctor identity: record snapshot → profile → placeholder
//!      ↓
//! [document]  — one composed model: sections, formatting, filenames
//!      ↓                          ↓
//! [layout]+[pdf]            [capture]
//!  paged text PDF       SVG → raster → image PDF
//! ```

pub mod assets;
pub mod capture;
pub mod document;
pub mod error;
pub mod export;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod snapshot;
pub mod store;
pub mod style;

pub use capture::CaptureRenderer;
pub use document::{DocumentModel, Renderer};
pub use error::Error;
pub use export::{ExportService, PdfExport};
pub use layout::LayoutRenderer;
pub use model::{Prescription, PractitionerProfile};
pub use snapshot::DoctorIdentity;
pub use store::Store;

/// Render a prescription (plus optional profile) straight to print-quality
/// PDF bytes, without touching storage. The logo, if any, must already be
/// resolved by the caller.
pub fn render(
    prescription: &Prescription,
    profile: Option<&PractitionerProfile>,
    logo: Option<Vec<u8>>,
) -> Result<Vec<u8>, Error> {
    let doctor = DoctorIdentity::resolve(prescription, profile);
    let model = DocumentModel::compose(prescription, &doctor, logo);
    LayoutRenderer::new().render(&model)
}
