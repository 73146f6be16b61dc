//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{DEFAULT_NULL_VALUES, Parser, ParserConfig};
pub use source::{Cell, DataTable, SourceMetadata};
