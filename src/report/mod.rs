pub mod catalog;
pub mod export;
pub mod model;
pub mod render;

pub use catalog::{placeholder_token, PlaceholderPolicy, Slot, SlotCatalog};
pub use model::ReportValues;
pub use render::{render, Block, RenderedPage};
