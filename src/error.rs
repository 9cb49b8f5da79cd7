//! Crate-level error type.

use thiserror::Error;

use crate::charts::RenderError;
use crate::data::LoaderError;
use crate::display::DisplayError;
use crate::notebook::NotebookError;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure surfaced while producing or displaying an output.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Notebook(#[from] NotebookError),
}
