//! Courses screen state.
//!
//! Both create and delete resynchronize the list from the server.

use crate::api::RemotePort;
use crate::model::{Course, EntityId};
use crate::store::CoursesStore;

use super::sync::{fail, load_into};
use super::{Controller, StateReader, ViewState, ViewStateStream};

const LOAD_FAILED: &str = "Failed to load courses.";
const CREATE_FAILED: &str = "Failed to add course.";
const DELETE_FAILED: &str = "Failed to delete course.";

pub struct CoursesController<P> {
    store: CoursesStore<P>,
    courses: ViewStateStream<Vec<Course>>,
}

impl<P: RemotePort> CoursesController<P> {
    pub fn new(store: CoursesStore<P>) -> Self {
        Self {
            store,
            courses: ViewStateStream::new("courses", ViewState::Loading),
        }
    }

    pub fn courses(&self) -> StateReader<Vec<Course>> {
        self.courses.reader()
    }

    pub async fn load(&self) {
        load_into(&self.courses, self.store.list(), LOAD_FAILED).await;
    }

    pub async fn create(&self, draft: Course) {
        match self.store.create(&draft).await {
            Ok(_) => self.load().await,
            Err(err) => fail(&self.courses, &err, CREATE_FAILED),
        }
    }

    pub async fn delete(&self, id: EntityId) {
        match self.store.delete(id).await {
            Ok(()) => self.load().await,
            Err(err) => fail(&self.courses, &err, DELETE_FAILED),
        }
    }
}

impl<P: RemotePort> Controller for CoursesController<P> {
    fn close(&self) {
        self.courses.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Collection};
    use crate::state::Screen;
    use crate::testing::{self, FakePort};

    fn controller(port: &FakePort) -> CoursesController<FakePort> {
        CoursesController::new(CoursesStore::new(port.clone()))
    }

    #[tokio::test]
    async fn test_load_publishes_loading_then_outcome() {
        let port = FakePort::new();
        port.seed(Collection::Courses, &[testing::course(1, "MAT101")]);
        let controller = controller(&port);
        let mut sub = controller.courses().subscribe();

        controller.load().await;

        assert_eq!(
            sub.drain(),
            vec![
                ViewState::Loading,
                ViewState::Loading,
                ViewState::Success(vec![testing::course(1, "MAT101")]),
            ]
        );
    }

    #[tokio::test]
    async fn test_load_twice_settles_the_same() {
        let port = FakePort::new();
        port.seed(Collection::Courses, &[testing::course(1, "MAT101")]);
        let controller = controller(&port);

        controller.load().await;
        let first = controller.courses().current();
        controller.load().await;

        assert_eq!(controller.courses().current(), first);
        assert!(first.data().is_some());
    }

    #[tokio::test]
    async fn test_empty_and_error_are_distinct() {
        let port = FakePort::new();
        let controller = controller(&port);

        controller.load().await;
        assert_eq!(controller.courses().current(), ViewState::Empty);

        port.fail_next(Collection::Courses, ApiError::status(500, "database is locked"));
        controller.load().await;
        assert_eq!(
            controller.courses().current(),
            ViewState::Error("database is locked".to_string())
        );
    }

    #[tokio::test]
    async fn test_bodyless_failure_uses_unknown_error() {
        let port = FakePort::new();
        port.fail_next(Collection::Courses, ApiError::status(502, ""));
        let controller = controller(&port);

        controller.load().await;
        assert_eq!(
            controller.courses().current(),
            ViewState::Error(crate::api::UNKNOWN_ERROR.to_string())
        );
    }

    #[tokio::test]
    async fn test_newer_load_wins_over_slower_older_one() {
        let port = FakePort::new();
        port.seed(Collection::Courses, &[testing::course(1, "OLD101")]);
        let controller = controller(&port);

        let gate = port.hold_next(Collection::Courses);
        let older = controller.load();
        let newer = async {
            // The older call has read its rows; change them before the newer one starts
            tokio::task::yield_now().await;
            port.seed(Collection::Courses, &[testing::course(2, "NEW101")]);
            controller.load().await;
            gate.release();
        };
        tokio::join!(older, newer);

        assert_eq!(
            controller.courses().current(),
            ViewState::Success(vec![testing::course(2, "NEW101")])
        );
    }

    #[tokio::test]
    async fn test_create_resyncs() {
        let port = FakePort::new();
        port.seed(Collection::Courses, &[testing::course(1, "MAT101")]);
        let controller = controller(&port);
        controller.load().await;

        controller.create(testing::course_draft("TR101")).await;

        assert_eq!(port.list_calls(Collection::Courses), 2);
        let shown = controller.courses().current();
        let codes: Vec<_> = shown.data().unwrap().iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["MAT101", "TR101"]);
    }

    #[tokio::test]
    async fn test_create_failure_overwrites_list() {
        let port = FakePort::new();
        port.seed(Collection::Courses, &[testing::course(1, "MAT101")]);
        let controller = controller(&port);
        controller.load().await;

        port.fail_next(
            Collection::Courses,
            ApiError::status(400, r#"{"code": ["Ensure this field has no more than 10 characters."]}"#),
        );
        controller.create(testing::course_draft("MATHEMATICS1")).await;

        assert_eq!(
            controller.courses().current(),
            ViewState::Error(
                r#"{"code": ["Ensure this field has no more than 10 characters."]}"#.to_string()
            )
        );
        assert_eq!(port.list_calls(Collection::Courses), 1);
    }

    #[tokio::test]
    async fn test_delete_then_resync() {
        let port = FakePort::new();
        port.seed(
            Collection::Courses,
            &[testing::course(1, "MAT101"), testing::course(2, "TR101")],
        );
        let controller = controller(&port);
        controller.load().await;

        controller.delete(1).await;

        assert_eq!(
            controller.courses().current(),
            ViewState::Success(vec![testing::course(2, "TR101")])
        );
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let port = FakePort::new();
        port.seed(Collection::Courses, &[testing::course(1, "MAT101")]);
        let controller = controller(&port);
        controller.load().await;

        controller.delete(42).await;

        let state = controller.courses().current();
        assert!(!state.error().unwrap().is_empty());
        assert_eq!(port.list_calls(Collection::Courses), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_survives_pending_refresh() {
        let port = FakePort::new();
        port.seed(Collection::Courses, &[testing::course(1, "MAT101")]);
        let controller = controller(&port);

        let gate = port.hold_next(Collection::Courses);
        let refresh = controller.load();
        let failing_delete = async {
            // The refresh is parked on its gate by now
            tokio::task::yield_now().await;
            port.fail_next(Collection::Courses, ApiError::status(500, "delete refused"));
            controller.delete(1).await;
            gate.release();
        };
        tokio::join!(refresh, failing_delete);

        assert_eq!(
            controller.courses().current(),
            ViewState::Error("delete refused".to_string())
        );
        assert_eq!(port.list_calls(Collection::Courses), 1);
    }

    #[tokio::test]
    async fn test_leaving_the_screen_stops_publishes() {
        let port = FakePort::new();
        port.seed(Collection::Courses, &[testing::course(1, "MAT101")]);
        let gate = port.hold_next(Collection::Courses);

        let mut screen = Screen::new(controller(&port));
        let reader = screen.controller().courses();
        let mut sub = reader.subscribe();
        screen.spawn(|c| async move { c.load().await });
        tokio::task::yield_now().await;

        drop(screen);
        gate.release();
        tokio::task::yield_now().await;

        let seen = sub.drain();
        assert!(seen.iter().all(ViewState::is_loading));
        assert_eq!(sub.next().await, None);
        assert_eq!(reader.current(), ViewState::Loading);
    }
}
