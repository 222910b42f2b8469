pub mod catalog_io;
pub mod config_io;

pub use catalog_io::CatalogError;
