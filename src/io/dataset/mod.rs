mod reader;

pub use reader::{ColumnSpec, DatasetReader, Records};
