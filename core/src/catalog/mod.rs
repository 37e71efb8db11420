pub mod filter;
pub mod record;
pub mod table;

pub use filter::Filter;
pub use record::{CatalogRecord, RecordKey};
pub use table::Catalog;
