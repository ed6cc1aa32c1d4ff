pub mod loader;
pub mod source;

pub use loader::{Catalog, CatalogError, CatalogLoader, NUTRITION_FILE};
pub use source::{CsvCatalogSource, CsvSourceFactory};
