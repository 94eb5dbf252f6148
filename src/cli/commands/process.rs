//! Form upload commands

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::{ApiClient, ImageUpload, UploadEndpoint};
use crate::cli::output::{print_formatted, OutputFormat};
use crate::store::UploadStore;

#[derive(Serialize)]
struct UploadResult<'a> {
    file: String,
    endpoint: &'a str,
    message: String,
}

fn endpoint_name(endpoint: UploadEndpoint) -> &'static str {
    match endpoint {
        UploadEndpoint::ProcessForm => "process",
        UploadEndpoint::ExtractAnswerKey => "extract-key",
    }
}

/// Upload one image and print the server's reply
pub async fn run(endpoint: UploadEndpoint, image: &Path, client: ApiClient, format: OutputFormat) -> Result<()> {
    let upload = ImageUpload::from_path(image)
        .await
        .with_context(|| format!("Cannot upload {}", image.display()))?;
    tracing::debug!("Uploading {} ({} bytes)", upload.file_name(), upload.len());

    let message = UploadStore::new(client).submit(endpoint, upload).await?;

    let result = UploadResult {
        file: image.display().to_string(),
        endpoint: endpoint_name(endpoint),
        message,
    };
    print_formatted(&result, format, |r| r.message.clone());

    Ok(())
}
