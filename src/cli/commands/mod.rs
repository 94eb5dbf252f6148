pub mod answer_keys;
pub mod config;
pub mod courses;
pub mod mappings;
pub mod process;
pub mod students;
