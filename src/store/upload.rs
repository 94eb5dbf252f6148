//! Form image submission.

use crate::api::{ApiError, ImageUpload, RemotePort, UploadEndpoint};

/// Sends scanned forms to the processing endpoints
#[derive(Clone)]
pub struct UploadStore<P> {
    port: P,
}

impl<P: RemotePort> UploadStore<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Grade a student's form; returns the server's message
    pub async fn process_form(&self, image: ImageUpload) -> Result<String, ApiError> {
        self.submit(UploadEndpoint::ProcessForm, image).await
    }

    /// Read an answer key sheet; returns the server's message
    pub async fn extract_answer_key(&self, image: ImageUpload) -> Result<String, ApiError> {
        self.submit(UploadEndpoint::ExtractAnswerKey, image).await
    }

    pub async fn submit(&self, endpoint: UploadEndpoint, image: ImageUpload) -> Result<String, ApiError> {
        let response = self.port.upload(endpoint, image).await?;
        tracing::info!("{:?} finished: {}", endpoint, response.message);
        Ok(response.message)
    }
}
