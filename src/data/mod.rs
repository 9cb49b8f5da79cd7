//! Data module - dataset loading and table output

mod dataset;
mod loader;
mod table;

pub use dataset::{record, ColumnKind, Dataset, Record, Scalar};
pub use loader::{dataset_from_frame, is_numeric_dtype, DataLoader, LoaderError};
pub use table::{FieldKind, TableView, PANDAS_VERSION};
