pub mod core;
pub mod word_list;

// Re-export the main types for convenience
pub use self::core::{available_languages, Language};
pub use word_list::WordList;
