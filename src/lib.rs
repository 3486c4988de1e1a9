// Typing engine, layout and practice text. Terminal drawing lives in the binary.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod drill;
pub mod error;
pub mod input;
pub mod language;
pub mod layout;
pub mod runtime;
pub mod session;
pub mod word_edit;
pub mod word_generator;
pub mod word_store;

pub use drill::{Drill, View, ViewRow};
pub use error::{SessionError, TextError};
pub use input::KeyInput;
