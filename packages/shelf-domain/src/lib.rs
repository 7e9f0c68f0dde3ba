pub mod comparison;
pub mod item;
pub mod language;
pub mod predicate;
pub mod time_serde;

pub use comparison::ComparisonFields;
pub use item::{CatalogItem, CategoryRef, ItemProjection};
pub use language::Language;
pub use predicate::Predicate;
