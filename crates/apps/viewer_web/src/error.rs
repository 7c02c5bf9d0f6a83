use std::fmt;

use catalog::{DateError, ManifestError};
use wasm_bindgen::JsValue;

/// Anything that stops the download page from loading once its containers
/// have been found.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Cutoff(DateError),
    Fetch(String),
    Manifest(ManifestError),
    Mount(String),
}

impl LoadError {
    /// Sentence shown to visitors in the links container.
    pub fn notice(&self) -> String {
        match self {
            LoadError::Cutoff(err) => format!("The staleness cutoff is not valid ({err})."),
            LoadError::Fetch(detail) => {
                format!("The download list could not be loaded ({detail}).")
            }
            LoadError::Manifest(err) => format!("The download list could not be read ({err})."),
            LoadError::Mount(detail) => format!("The download map could not be drawn ({detail})."),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Cutoff(err) => write!(f, "invalid staleness cutoff: {err}"),
            LoadError::Fetch(detail) => write!(f, "failed to fetch manifest: {detail}"),
            LoadError::Manifest(err) => write!(f, "{err}"),
            LoadError::Mount(detail) => write!(f, "failed to mount download page: {detail}"),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<DateError> for LoadError {
    fn from(err: DateError) -> Self {
        LoadError::Cutoff(err)
    }
}

impl From<ManifestError> for LoadError {
    fn from(err: ManifestError) -> Self {
        LoadError::Manifest(err)
    }
}

impl From<LoadError> for JsValue {
    fn from(err: LoadError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Text of a JS exception, falling back to its debug form.
pub fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
