pub mod catalog;
pub mod item;
pub mod types;

pub use catalog::{normalize_key, Catalog};
pub use item::Item;
pub use types::{ActionKind, CategoryDefinition, ClassificationResult, RouteDefinition, WebContent};
