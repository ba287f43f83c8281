pub mod geometry;
pub mod item;
pub mod keys;
pub mod receipt;

pub use geometry::{BoundingBox, Geometry, Point};
pub use item::Item;
pub use keys::{Entity, GeometrySide, Key};
pub use receipt::{FieldName, Receipt, ReconcileReport, SpecialField};
