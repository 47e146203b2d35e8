//! Clinic logo resolution and upload validation.
//!
//! Logo references arrive in several shapes: data URIs, absolute URLs,
//! app-relative paths. Resolution never fails an export; any reference that
//! cannot be turned into image bytes resolves to `None` after a warning, and
//! each rendering backend decides what an absent logo looks like (the print
//! path omits the slot, the capture path substitutes the bundled default).

use std::path::PathBuf;

use base64::Engine;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Error;

/// Bundled fallback logo used by the capture backend.
pub static DEFAULT_LOGO: &[u8] = include_bytes!("../assets/default-logo.png");

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// `image/jpg` is not a registered type, but upload clients commonly
/// declare it for jpeg files; the content sniff still decides.
const ALLOWED_MIME_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// The scheme and host of the request being served, used to rewrite
/// app-relative logo paths into fetchable URLs.
#[derive(Debug, Clone)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        RequestOrigin {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    pub fn absolutize(&self, path: &str) -> String {
        let sep = if path.starts_with('/') { "" } else { "/" };
        format!("{}://{}{}{}", self.scheme, self.host, sep, path)
    }
}

/// Resolves logo references to raw image bytes.
pub struct LogoResolver {
    client: reqwest::Client,
}

impl Default for LogoResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LogoResolver {
    pub fn new() -> Self {
        LogoResolver {
            client: reqwest::Client::new(),
        }
    }

    /// Resolve a logo reference to image bytes. `None` in means `None` out;
    /// a reference that fails to fetch or decode also comes back as `None`,
    /// so a broken logo URL and no logo URL are indistinguishable downstream.
    pub async fn resolve(
        &self,
        reference: Option<&str>,
        origin: Option<&RequestOrigin>,
    ) -> Option<Vec<u8>> {
        let reference = reference.map(str::trim).filter(|s| !s.is_empty())?;

        let result = if reference.starts_with("data:image/") {
            decode_data_uri(reference)
        } else if reference.starts_with("http://") || reference.starts_with("https://") {
            self.fetch(reference).await
        } else if let Some(origin) = origin {
            self.fetch(&origin.absolutize(reference)).await
        } else {
            tokio::fs::read(reference)
                .await
                .map_err(|e| format!("read '{}': {}", reference, e))
        };

        match result {
            Ok(bytes) => {
                debug!(reference, len = bytes.len(), "resolved logo");
                Some(bytes)
            }
            Err(reason) => {
                warn!(reference, reason, "logo resolution failed");
                None
            }
        }
    }

    /// Like `resolve`, but substitutes the bundled default asset when the
    /// reference is absent or unresolvable.
    pub async fn resolve_or_default(
        &self,
        reference: Option<&str>,
        origin: Option<&RequestOrigin>,
    ) -> Vec<u8> {
        match self.resolve(reference, origin).await {
            Some(bytes) => bytes,
            None => DEFAULT_LOGO.to_vec(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("fetch '{}': {}", url, e))?;
        if !response.status().is_success() {
            return Err(format!("fetch '{}': status {}", url, response.status()));
        }
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| format!("read body of '{}': {}", url, e))
    }
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let comma = uri
        .find(',')
        .ok_or_else(|| "invalid data URI: missing comma".to_string())?;
    base64::engine::general_purpose::STANDARD
        .decode(&uri[comma + 1..])
        .map_err(|e| format!("base64 decode: {}", e))
}

/// Validate an uploaded logo: declared type must be on the allow-list, the
/// payload must be within the size cap, and the bytes must actually be one
/// of the allowed image formats.
pub fn validate_upload(declared_mime: &str, bytes: &[u8]) -> Result<(), Error> {
    let mime = declared_mime.to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(Error::Validation(format!(
            "file type '{}' not allowed; expected png, jpeg, or webp",
            declared_mime
        )));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(Error::Validation(format!(
            "file too large: {} bytes (max {})",
            bytes.len(),
            MAX_UPLOAD_BYTES
        )));
    }
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png)
        | Ok(image::ImageFormat::Jpeg)
        | Ok(image::ImageFormat::WebP) => Ok(()),
        _ => Err(Error::Validation(
            "file content is not a png, jpeg, or webp image".to_string(),
        )),
    }
}

/// Stores validated logo uploads under random filenames.
pub struct LogoStore {
    dir: PathBuf,
}

impl LogoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        LogoStore { dir: dir.into() }
    }

    /// Validate and persist an upload. Returns the stable relative reference
    /// to store on the profile.
    pub async fn save(&self, declared_mime: &str, bytes: &[u8]) -> Result<String, Error> {
        validate_upload(declared_mime, bytes)?;
        let ext = match image::guess_format(bytes) {
            Ok(image::ImageFormat::Jpeg) => "jpg",
            Ok(image::ImageFormat::WebP) => "webp",
            _ => "png",
        };
        let name = format!("{}.{}", Uuid::new_v4(), ext);
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        debug!(name, "stored uploaded logo");
        Ok(format!("/uploads/{}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        DEFAULT_LOGO.to_vec()
    }

    #[test]
    fn test_upload_allows_small_png() {
        assert!(validate_upload("image/png", &png_bytes()).is_ok());
    }

    #[test]
    fn test_upload_allows_jpg_alias_for_jpeg_content() {
        let img = image::RgbImage::from_fn(2, 2, |_, _| image::Rgb([200, 100, 50]));
        let mut jpeg = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new(&mut jpeg);
        image::ImageEncoder::write_image(encoder, img.as_raw(), 2, 2, image::ColorType::Rgb8)
            .unwrap();
        assert!(validate_upload("image/jpg", &jpeg).is_ok());
        // The alias does not bypass the content sniff.
        assert!(validate_upload("image/jpg", b"not an image").is_err());
    }

    #[test]
    fn test_upload_rejects_disallowed_type() {
        let err = validate_upload("application/pdf", &png_bytes()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_upload_rejects_oversize() {
        // Valid PNG header followed by padding past the cap; the size check
        // runs before content sniffing completes.
        let mut big = png_bytes();
        big.resize(MAX_UPLOAD_BYTES + 1, 0);
        let err = validate_upload("image/png", &big).unwrap_err();
        match err {
            Error::Validation(msg) => assert!(msg.contains("too large")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_upload_rejects_mismatched_content() {
        let err = validate_upload("image/png", b"just some text bytes").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_absolutize() {
        let origin = RequestOrigin::new("https", "clinic.example.com");
        assert_eq!(
            origin.absolutize("/uploads/a.png"),
            "https://clinic.example.com/uploads/a.png"
        );
        assert_eq!(
            origin.absolutize("uploads/a.png"),
            "https://clinic.example.com/uploads/a.png"
        );
    }

    #[tokio::test]
    async fn test_resolve_none_and_empty() {
        let resolver = LogoResolver::new();
        assert!(resolver.resolve(None, None).await.is_none());
        assert!(resolver.resolve(Some("  "), None).await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_data_uri() {
        let b64 = base64::engine::general_purpose::STANDARD.encode(DEFAULT_LOGO);
        let uri = format!("data:image/png;base64,{}", b64);
        let resolver = LogoResolver::new();
        let bytes = resolver.resolve(Some(&uri), None).await.unwrap();
        assert_eq!(bytes, DEFAULT_LOGO);
    }

    #[tokio::test]
    async fn test_resolve_missing_file_is_none() {
        let resolver = LogoResolver::new();
        let resolved = resolver.resolve(Some("/nonexistent/logo.png"), None).await;
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_resolve_or_default_falls_back() {
        let resolver = LogoResolver::new();
        let bytes = resolver
            .resolve_or_default(Some("/nonexistent/logo.png"), None)
            .await;
        assert_eq!(bytes, DEFAULT_LOGO);
    }
}
