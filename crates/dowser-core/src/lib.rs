pub mod finder;
pub mod found;
pub mod list;
pub mod matcher;
pub mod report;
pub mod resolver;

pub use crate::finder::{ControlCategory, ControlFinder, ElementRef, FindError, MatcherRegistry};
pub use crate::found::FoundType;
pub use crate::list::{BackendControl, Entry, WeightedControlList};
pub use crate::matcher::{ElementMatcher, HitFrame, MatchContext, MatchHit};
