use thiserror::Error;

use crate::wire::SectionKind;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("generation failed: {0}")] Transport(String),
    #[error("malformed response: could not locate the {section} section")] MalformedResponse { section: SectionKind },
    #[error("archive error: {0}")] Archive(String),
    #[error("configuration error: {0}")] Config(String),
}

impl From<reqwest::Error> for GenError {
    fn from(e: reqwest::Error) -> Self {
        GenError::Transport(e.to_string())
    }
}

impl From<zip::result::ZipError> for GenError {
    fn from(e: zip::result::ZipError) -> Self {
        GenError::Archive(e.to_string())
    }
}
