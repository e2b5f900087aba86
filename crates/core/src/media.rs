//! Media classification, naming and re-encoding for uploaded files.
//!
//! Images are always stored as JPEG under a generated name. Videos are stored
//! byte-for-byte under [`VIDEO_FILE_NAME`]; there is exactly one video slot.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use rand::Rng;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted image upload (50 MiB).
pub const MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

/// Largest accepted video upload (1 GiB).
pub const MAX_VIDEO_BYTES: u64 = 1024 * 1024 * 1024;

/// Fixed name of the single stored video.
pub const VIDEO_FILE_NAME: &str = "video.mp4";

/// Media type reported for the stored video.
pub const VIDEO_MEDIA_TYPE: &str = "video/mp4";

/// Every stored image is re-encoded to this media type.
pub const CANONICAL_IMAGE_TYPE: &str = "image/jpeg";

/// Extension used for generated image names.
pub const CANONICAL_IMAGE_EXTENSION: &str = "jpg";

/// JPEG quality used when re-encoding images.
pub const JPEG_QUALITY: u8 = 80;

/// Length of the random suffix in generated names.
const NAME_SUFFIX_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify an upload by its declared content type.
    ///
    /// `label` identifies the offending part in the error message.
    pub fn classify(label: &str, content_type: Option<&str>) -> Result<Self, CoreError> {
        let declared = content_type.unwrap_or("").trim().to_ascii_lowercase();
        if declared.starts_with("image/") {
            Ok(Self::Image)
        } else if declared.starts_with("video/") {
            Ok(Self::Video)
        } else if declared.is_empty() {
            Err(CoreError::Validation(format!(
                "File '{label}' has no declared media type. Only images and videos are accepted"
            )))
        } else {
            Err(CoreError::Validation(format!(
                "File '{label}' has unsupported media type '{declared}'. Only images and videos are accepted"
            )))
        }
    }

    /// Upload ceiling in bytes for this kind.
    pub fn max_bytes(self) -> u64 {
        match self {
            Self::Image => MAX_IMAGE_BYTES,
            Self::Video => MAX_VIDEO_BYTES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// Error for an upload that exceeded its ceiling.
pub fn too_large(label: &str, kind: MediaKind) -> CoreError {
    CoreError::Validation(format!(
        "File '{label}' exceeds the {} MiB limit for {} uploads",
        kind.max_bytes() / (1024 * 1024),
        kind.label()
    ))
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// Reject names that could escape the upload directory or address a hidden
/// staging file inside it.
///
/// The fixed video name is a constant, not client input, and always passes.
pub fn validate_file_name(name: &str) -> Result<(), CoreError> {
    if name == VIDEO_FILE_NAME {
        return Ok(());
    }
    let unsafe_name = name.is_empty()
        || name.starts_with('.')
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0');
    if unsafe_name {
        Err(CoreError::Validation(format!("Invalid file name '{name}'")))
    } else {
        Ok(())
    }
}

/// Fresh collision-resistant name for a re-encoded image:
/// `<unix-millis>-<random>.jpg`.
pub fn generate_image_name() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(NAME_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!(
        "{}-{suffix}.{CANONICAL_IMAGE_EXTENSION}",
        chrono::Utc::now().timestamp_millis()
    )
}

/// Guess a Content-Type from a file extension.
pub fn content_type_for_extension(name: &str) -> &'static str {
    let ext = match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return "application/octet-stream",
    };
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "mkv" => "video/x-matroska",
        "ogg" => "video/ogg",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// Re-encoding
// ---------------------------------------------------------------------------

/// Decode any supported image and re-encode it as JPEG at [`JPEG_QUALITY`].
///
/// Alpha is dropped; JPEG has no transparency. CPU bound, so callers on an
/// async runtime should wrap this in `spawn_blocking`.
pub fn reencode_image(bytes: &[u8]) -> Result<Vec<u8>, CoreError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Validation(format!("Unsupported or corrupt image: {e}")))?;

    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut encoded = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY))
        .map_err(|e| CoreError::Internal(format!("JPEG encoding failed: {e}")))?;
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use assert_matches::assert_matches;
    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 3, Rgba([10, 200, 30, 128]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn classify_by_declared_type() {
        assert_eq!(
            MediaKind::classify("a.png", Some("image/png")).unwrap(),
            MediaKind::Image
        );
        assert_eq!(
            MediaKind::classify("clip", Some("VIDEO/MP4")).unwrap(),
            MediaKind::Video
        );
    }

    #[test]
    fn classify_rejects_other_types_naming_the_part() {
        let err = MediaKind::classify("notes.pdf", Some("application/pdf")).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("notes.pdf"));
        assert_matches!(
            MediaKind::classify("blob", None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn ceilings_differ_by_kind() {
        assert_eq!(MediaKind::Image.max_bytes(), 50 * 1024 * 1024);
        assert_eq!(MediaKind::Video.max_bytes(), 1024 * 1024 * 1024);
        let err = too_large("big.png", MediaKind::Image);
        assert!(err.to_string().contains("50 MiB"));
    }

    #[test]
    fn traversal_names_are_rejected() {
        for name in [
            "../secret",
            "..",
            "a/b.jpg",
            "a\\b.jpg",
            "",
            "x\0.jpg",
            ".",
            ".video.mp4.partial",
            ".env",
        ] {
            assert!(validate_file_name(name).is_err(), "{name:?} should be rejected");
        }
        assert!(validate_file_name("1700000000000-abcd1234.jpg").is_ok());
        assert!(validate_file_name(VIDEO_FILE_NAME).is_ok());
    }

    #[test]
    fn generated_names_are_unique_jpegs() {
        let a = generate_image_name();
        let b = generate_image_name();
        assert_ne!(a, b);
        assert!(a.ends_with(".jpg"));
        assert!(validate_file_name(&a).is_ok());
        assert_eq!(content_type_for_extension(&a), CANONICAL_IMAGE_TYPE);
    }

    #[test]
    fn content_types_follow_extension_table() {
        assert_eq!(content_type_for_extension("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for_extension("logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for_extension("video.mp4"), "video/mp4");
        assert_eq!(content_type_for_extension("clip.mkv"), "video/x-matroska");
        assert_eq!(content_type_for_extension("data.bin"), "application/octet-stream");
        assert_eq!(content_type_for_extension("README"), "application/octet-stream");
    }

    #[test]
    fn png_is_reencoded_as_jpeg() {
        let jpeg = reencode_image(&png_bytes()).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn garbage_is_a_validation_error() {
        assert_matches!(
            reencode_image(b"definitely not an image"),
            Err(CoreError::Validation(_))
        );
    }
}
