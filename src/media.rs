//! Image payloads: format sniffing, data URIs, and uploaded files.

use crate::error::{Result, TryOnError};
use base64::Engine;
use std::path::Path;

/// Mime type a browser file reader falls back to when a file declares none.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Image formats recognized for uploads and saved results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
    /// GIF format.
    Gif,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Gif => "gif",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Attempts to detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Attempts to detect format from a MIME type.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }
        // RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }
        None
    }
}

/// A decoded `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Declared media type.
    pub mime_type: String,
    /// Decoded payload bytes.
    pub data: Vec<u8>,
}

impl DataUri {
    /// Creates a data URI from raw bytes and a media type.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Parses a base64 data URI.
    ///
    /// Whitespace inside the payload and missing `=` padding are tolerated;
    /// gateways and hand-edited payloads produce both.
    pub fn parse(input: &str) -> Result<Self> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| TryOnError::Decode("not a data URI".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| TryOnError::Decode("data URI has no payload".into()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| TryOnError::Decode("data URI is not base64 encoded".into()))?;

        let data = decode_base64_lenient(payload)
            .map_err(|e| TryOnError::Decode(e.to_string()))?;

        let mime_type = if mime_type.is_empty() {
            FALLBACK_MIME
        } else {
            mime_type
        };
        Ok(Self::new(mime_type, data))
    }

    /// Returns true if `input` looks like a data URI.
    pub fn is_data_uri(input: &str) -> bool {
        input.starts_with("data:")
    }

    /// Best-effort image format: magic bytes first, then the declared type.
    pub fn image_format(&self) -> Option<ImageFormat> {
        ImageFormat::from_magic_bytes(&self.data)
            .or_else(|| ImageFormat::from_mime_type(&self.mime_type))
    }

    /// Encodes back to `data:<mime>;base64,<payload>`.
    pub fn encode(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

fn decode_base64_lenient(input: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    if let Ok(data) = base64::engine::general_purpose::STANDARD.decode(&cleaned) {
        return Ok(data);
    }
    base64::engine::general_purpose::STANDARD_NO_PAD.decode(cleaned.trim_end_matches('='))
}

/// A file handed to an upload slot, as a browser would describe it.
#[derive(Debug, Clone)]
pub struct ImageFile {
    /// File name, for display.
    pub name: String,
    /// Content type the file declares. Empty when unknown.
    pub declared_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Creates a file with an explicit declared type.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, declaring its type from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let declared_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension)
            .map(|f| f.mime_type())
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, declared_type, bytes))
    }

    /// Returns true if the declared type is an image type.
    pub fn declares_image(&self) -> bool {
        self.declared_type.starts_with("image/")
    }

    /// Converts the file into an embeddable data URI string.
    pub fn to_data_uri(&self) -> String {
        let mime = if self.declared_type.is_empty() {
            FALLBACK_MIME
        } else {
            self.declared_type.as_str()
        };
        DataUri::new(mime, self.bytes.clone()).encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(ImageFormat::from_magic_bytes(&PNG_MAGIC), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic_bytes(&JPEG_MAGIC), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_magic_bytes(&WEBP_MAGIC), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a.."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_magic_bytes(b"hello"), None);
    }

    #[test]
    fn test_format_from_extension_and_mime() {
        assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("txt"), None);
        assert_eq!(ImageFormat::from_mime_type("image/webp"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_mime_type("text/plain"), None);
    }

    #[test]
    fn test_data_uri_parse() {
        let uri = DataUri::parse("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(uri.mime_type, "image/png");
        assert_eq!(uri.data, b"hello");
    }

    #[test]
    fn test_data_uri_parse_lenient() {
        let uri = DataUri::parse("data:image/png;base64,aGVs\nbG8").unwrap();
        assert_eq!(uri.data, b"hello");
    }

    #[test]
    fn test_data_uri_parse_rejects_non_data() {
        assert!(DataUri::parse("https://cdn.example.com/a.png").is_err());
        assert!(DataUri::parse("data:image/png,plain").is_err());
        assert!(DataUri::parse("data:image/png;base64").is_err());
    }

    #[test]
    fn test_data_uri_image_format_prefers_magic_bytes() {
        let uri = DataUri::new("application/octet-stream", PNG_MAGIC.to_vec());
        assert_eq!(uri.image_format(), Some(ImageFormat::Png));

        let uri = DataUri::new("image/jpeg", b"not really".to_vec());
        assert_eq!(uri.image_format(), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn test_image_file_declares_image() {
        assert!(ImageFile::new("a.png", "image/png", vec![]).declares_image());
        assert!(!ImageFile::new("a.pdf", "application/pdf", vec![]).declares_image());
        assert!(!ImageFile::new("a", "", vec![]).declares_image());
    }

    #[test]
    fn test_image_file_to_data_uri() {
        let file = ImageFile::new("a.png", "image/png", b"hello".to_vec());
        assert_eq!(file.to_data_uri(), "data:image/png;base64,aGVsbG8=");

        let untyped = ImageFile::new("blob", "", b"hello".to_vec());
        assert_eq!(
            untyped.to_data_uri(),
            "data:application/octet-stream;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_image_file_from_path() {
        let path = std::env::temp_dir().join(format!("tryon-media-{}.JPG", std::process::id()));
        std::fs::write(&path, JPEG_MAGIC).unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.declared_type, "image/jpeg");
        assert_eq!(file.bytes, JPEG_MAGIC);
        assert!(file.name.ends_with(".JPG"));

        std::fs::remove_file(&path).unwrap();
    }
}
