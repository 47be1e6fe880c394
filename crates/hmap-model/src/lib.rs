#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod grid;
pub mod mapping;
pub mod schema;

pub use config::{MatchingConfig, ThresholdConfig};
pub use error::{ConfigError, Result};
pub use grid::{CellValue, HeaderGrid, MergedSpan, SheetHeaders};
pub use mapping::{HeaderMatchType, MappingAction, MappingResult};
pub use schema::{ColumnSchema, ColumnSchemaStore};
