pub mod attributes;
pub mod caption;
pub mod ident;
pub mod image;
pub mod label_element;
pub mod labeling_text;
pub mod table;
pub mod text;

use dowser_core::{ControlFinder, MatcherRegistry};
use dowser_dom::DomSnapshot;

use crate::attributes::{ByAriaLabelMatcher, ByPlaceholderMatcher, ByTitleAttributeMatcher};
use crate::caption::ByCaptionMatcher;
use crate::ident::{ByIdMatcher, ByNameMatcher};
use crate::image::{ByImageMatcher, ByInnerImageMatcher};
use crate::label_element::ByLabelElementMatcher;
use crate::labeling_text::{ByLabelingTextAfterMatcher, ByLabelingTextBeforeMatcher};
use crate::table::ByTableCoordinateMatcher;
use crate::text::{ByTextMatcher, ByTitleTextMatcher, ByWholeTextBeforeMatcher};

/// The stock strategy sets. Every category carries the identifying
/// attribute strategies; what else runs depends on how controls of that
/// category are usually addressed on real pages.
pub fn default_registry() -> MatcherRegistry {
    MatcherRegistry {
        setable: vec![
            Box::new(ByLabelElementMatcher),
            Box::new(ByLabelingTextBeforeMatcher),
            Box::new(ByPlaceholderMatcher),
            Box::new(ByWholeTextBeforeMatcher),
            Box::new(ByNameMatcher),
            Box::new(ByIdMatcher),
            Box::new(ByTitleAttributeMatcher),
            Box::new(ByAriaLabelMatcher),
        ],
        clickable: vec![
            Box::new(ByCaptionMatcher),
            Box::new(ByTextMatcher),
            Box::new(ByInnerImageMatcher),
            Box::new(ByImageMatcher),
            Box::new(ByNameMatcher),
            Box::new(ByIdMatcher),
            Box::new(ByTitleAttributeMatcher),
            Box::new(ByAriaLabelMatcher),
        ],
        selectable: vec![
            Box::new(ByLabelElementMatcher),
            Box::new(ByCaptionMatcher),
            Box::new(ByLabelingTextBeforeMatcher),
            Box::new(ByLabelingTextAfterMatcher),
            Box::new(ByNameMatcher),
            Box::new(ByIdMatcher),
            Box::new(ByTitleAttributeMatcher),
            Box::new(ByAriaLabelMatcher),
        ],
        other: vec![
            Box::new(ByIdMatcher),
            Box::new(ByNameMatcher),
            Box::new(ByTextMatcher),
            Box::new(ByTitleTextMatcher),
        ],
        text: vec![Box::new(ByTextMatcher), Box::new(ByTitleTextMatcher)],
        coordinate: Some(Box::new(ByTableCoordinateMatcher)),
    }
}

/// A finder over the snapshot with the stock registry.
pub fn control_finder(snapshot: &DomSnapshot) -> ControlFinder<'_> {
    ControlFinder::new(snapshot, default_registry())
}
