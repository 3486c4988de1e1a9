use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::TextError;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// A word list shipped inside the binary
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn new(name: &str) -> Result<Self, TextError> {
        read_language_from_file(name)
    }
}

/// Names of the embedded languages, sorted
pub fn available_languages() -> Vec<String> {
    let mut names: Vec<String> = LANG_DIR
        .files()
        .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
        .filter_map(|f| f.path().file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn read_language_from_file(name: &str) -> Result<Language, TextError> {
    let file_name = format!("{name}.json");
    let file = LANG_DIR
        .get_file(&file_name)
        .ok_or_else(|| TextError::UnknownLanguage(name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| TextError::Embedded(file_name.clone()))?;

    let lang: Language = from_str(file_as_str).map_err(|_| TextError::Embedded(file_name))?;
    if lang.words.is_empty() {
        return Err(TextError::EmptyWordList(name.to_string()));
    }

    Ok(lang)
}
