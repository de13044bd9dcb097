//! Table models, one per entity kind.

mod catalog;
mod item;

pub use catalog::*;
pub use item::*;
