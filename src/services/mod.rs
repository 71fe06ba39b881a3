// Service exports
pub mod cache;
pub mod catalog;

pub use cache::CatalogCache;
pub use catalog::{read_venues, CatalogError, CatalogLoader};
