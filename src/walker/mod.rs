//! Table reference extraction

mod scope;
mod table_walker;

pub use scope::{Binding, NameScope};
pub use table_walker::{collect_table_references, Classification, TableReference};
