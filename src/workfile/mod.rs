pub mod autosave;
pub mod version;
