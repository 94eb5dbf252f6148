//! Form images prepared for upload.

use std::path::Path;

use image::ImageFormat;
use thiserror::Error;

/// Errors that can occur while preparing an image
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Could not read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image file is empty")]
    Empty,

    #[error("Unsupported image format for {file_name}: {format} (expected PNG or JPEG)")]
    UnsupportedFormat { file_name: String, format: String },
}

/// A PNG or JPEG image ready to be posted as the `image` part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate raw bytes by sniffing their format
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        match image::guess_format(&bytes) {
            Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(Self { file_name, format, bytes }),
            Ok(other) => Err(UploadError::UnsupportedFormat {
                file_name,
                format: format!("{:?}", other),
            }),
            Err(_) => Err(UploadError::UnsupportedFormat {
                file_name,
                format: "unknown".to_string(),
            }),
        }
    }

    /// Read and validate an image from disk
    pub async fn from_path(path: &Path) -> Result<Self, UploadError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "form.jpg".to_string());
        Self::from_bytes(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
