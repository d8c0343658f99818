pub mod pattern;
pub mod secret;
pub mod spot;
pub mod wpath;

pub use crate::pattern::SearchPattern;
pub use crate::secret::SecretString;
pub use crate::spot::FindSpot;
pub use crate::wpath::{TableCoordSpec, WPath, WPathError};
