pub mod element;
pub mod grid;
pub mod snapshot;
pub mod text_index;

pub use crate::element::{ControlKind, ControlTraits, Tag};
pub use crate::grid::{CellCoords, TableGrid};
pub use crate::snapshot::{DomSnapshot, NodeId, PageBuilder};
pub use crate::text_index::PageTextIndex;
