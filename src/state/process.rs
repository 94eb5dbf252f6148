//! Form processing screen state.

use std::path::Path;

use crate::api::{ImageUpload, RemotePort, UploadEndpoint};
use crate::store::UploadStore;

use super::sync::error_message;
use super::{Controller, StateReader, ViewState, ViewStateStream};

const PROCESS_FAILED: &str = "Error processing image.";
const EXTRACT_FAILED: &str = "Error extracting answer key.";

fn fallback(endpoint: UploadEndpoint) -> &'static str {
    match endpoint {
        UploadEndpoint::ProcessForm => PROCESS_FAILED,
        UploadEndpoint::ExtractAnswerKey => EXTRACT_FAILED,
    }
}

/// Submits scanned images and shows the server's reply.
///
/// The status stream starts `Empty` until the first submission. When
/// submissions overlap, only the latest one is shown.
pub struct ProcessController<P> {
    store: UploadStore<P>,
    status: ViewStateStream<String>,
}

impl<P: RemotePort> ProcessController<P> {
    pub fn new(store: UploadStore<P>) -> Self {
        Self {
            store,
            status: ViewStateStream::new("process_status", ViewState::Empty),
        }
    }

    pub fn status(&self) -> StateReader<String> {
        self.status.reader()
    }

    pub async fn process_form(&self, image: ImageUpload) {
        self.upload(UploadEndpoint::ProcessForm, image).await;
    }

    pub async fn extract_answer_key(&self, image: ImageUpload) {
        self.upload(UploadEndpoint::ExtractAnswerKey, image).await;
    }

    /// Read an image from disk and submit it
    pub async fn submit_file(&self, endpoint: UploadEndpoint, path: &Path) {
        let image = match ImageUpload::from_path(path).await {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!("Rejected {}: {}", path.display(), err);
                self.status.reset(ViewState::Error(err.to_string()));
                return;
            }
        };

        match endpoint {
            UploadEndpoint::ProcessForm => self.process_form(image).await,
            UploadEndpoint::ExtractAnswerKey => self.extract_answer_key(image).await,
        }
    }

    async fn upload(&self, endpoint: UploadEndpoint, image: ImageUpload) {
        let ticket = self.status.begin();
        self.status.publish_for(ticket, ViewState::Loading);

        let sent = match endpoint {
            UploadEndpoint::ProcessForm => self.store.process_form(image).await,
            UploadEndpoint::ExtractAnswerKey => self.store.extract_answer_key(image).await,
        };
        let outcome = match sent {
            Ok(message) => ViewState::Success(message),
            Err(err) => {
                tracing::warn!("{:?} failed: {}", endpoint, err);
                ViewState::Error(error_message(&err, fallback(endpoint)))
            }
        };
        self.status.publish_for(ticket, outcome);
    }

    /// Forget the last result
    pub fn clear(&self) {
        self.status.reset(ViewState::Empty);
    }
}

impl<P: RemotePort> Controller for ProcessController<P> {
    fn close(&self) {
        self.status.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::upload_fixtures::{JPEG_MAGIC, PNG_MAGIC};
    use crate::testing::FakePort;

    fn controller(port: &FakePort) -> ProcessController<FakePort> {
        ProcessController::new(UploadStore::new(port.clone()))
    }

    fn png(name: &str) -> ImageUpload {
        ImageUpload::from_bytes(name, PNG_MAGIC.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_process_form_reports_server_message() {
        let port = FakePort::new();
        port.set_upload_message("Form processed: 2021001");
        let controller = controller(&port);
        assert_eq!(controller.status().current(), ViewState::Empty);
        let mut sub = controller.status().subscribe();

        controller.process_form(png("scan.png")).await;

        assert_eq!(
            sub.drain(),
            vec![
                ViewState::Empty,
                ViewState::Loading,
                ViewState::Success("Form processed: 2021001".to_string()),
            ]
        );
        assert_eq!(
            port.uploads(),
            vec![(UploadEndpoint::ProcessForm, "scan.png".to_string())]
        );
    }

    #[tokio::test]
    async fn test_upload_failure_is_an_error() {
        let port = FakePort::new();
        port.fail_next_upload(ApiError::status(400, r#"{"error": "No image uploaded"}"#));
        let controller = controller(&port);

        controller.extract_answer_key(png("key.png")).await;

        let state = controller.status().current();
        assert!(state.error().unwrap().contains("No image uploaded"));
    }

    #[tokio::test]
    async fn test_later_submission_wins() {
        let port = FakePort::new();
        let gate = port.hold_next_upload();
        let controller = controller(&port);

        let first = controller.process_form(png("first.png"));
        let second = async {
            port.set_upload_message("second done");
            controller.process_form(png("second.png")).await;
            gate.release();
        };
        tokio::join!(first, second);

        assert_eq!(
            controller.status().current(),
            ViewState::Success("second done".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.jpg");
        std::fs::write(&path, JPEG_MAGIC).unwrap();

        let port = FakePort::new();
        let controller = controller(&port);
        controller.submit_file(UploadEndpoint::ProcessForm, &path).await;

        assert!(controller.status().current().data().is_some());
        assert_eq!(
            port.uploads(),
            vec![(UploadEndpoint::ProcessForm, "form.jpg".to_string())]
        );
    }

    #[tokio::test]
    async fn test_submit_file_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not an image").unwrap();

        let port = FakePort::new();
        let controller = controller(&port);
        controller.submit_file(UploadEndpoint::ExtractAnswerKey, &path).await;

        assert!(controller.status().current().error().is_some());
        assert!(port.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_file_drops_pending_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not an image").unwrap();

        let port = FakePort::new();
        port.set_upload_message("graded");
        let controller = controller(&port);

        let gate = port.hold_next_upload();
        let pending = controller.process_form(png("scan.png"));
        let rejected = async {
            tokio::task::yield_now().await;
            controller.submit_file(UploadEndpoint::ProcessForm, &path).await;
            gate.release();
        };
        tokio::join!(pending, rejected);

        assert!(controller.status().current().error().is_some());
    }
}
