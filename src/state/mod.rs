//! Screen state
//!
//! Each screen of the client owns a controller that drives one or more
//! view-state streams from the entity stores. Presentation code only ever
//! sees `StateReader`s and calls controller intents through a `Screen`.

mod answer_keys;
mod courses;
mod process;
mod screen;
mod stream;
mod students;
mod sync;
mod ui;
mod view_state;

pub use answer_keys::AnswerKeysController;
pub use courses::CoursesController;
pub use process::ProcessController;
pub use screen::{Controller, Screen};
pub use stream::{StateReader, ViewStateStream};
pub use students::StudentsController;
pub use ui::{Tab, UiState};
pub use view_state::{Payload, ViewState};
