use dowser_core::{ElementMatcher, FoundType, MatchContext, MatchHit};
use dowser_dom::{ControlTraits, NodeId};

use crate::ident::attr_whole_match;

/// Whole-match against the `placeholder` of empty-looking fields.
pub struct ByPlaceholderMatcher;

impl ElementMatcher for ByPlaceholderMatcher {
    fn id(&self) -> &'static str {
        "by_placeholder"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let setable = ctx
            .snapshot
            .kind(element)
            .is_some_and(|kind| kind.traits().contains(ControlTraits::SETABLE));
        if !setable {
            return Vec::new();
        }
        attr_whole_match(ctx, element, "placeholder", FoundType::ByPlaceholder)
    }
}

/// Whole-match against the `title` attribute.
pub struct ByTitleAttributeMatcher;

impl ElementMatcher for ByTitleAttributeMatcher {
    fn id(&self) -> &'static str {
        "by_title_attribute"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        attr_whole_match(ctx, element, "title", FoundType::ByTitleAttribute)
    }
}

/// Whole-match against the `aria-label` attribute.
pub struct ByAriaLabelMatcher;

impl ElementMatcher for ByAriaLabelMatcher {
    fn id(&self) -> &'static str {
        "by_aria_label"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        attr_whole_match(ctx, element, "aria-label", FoundType::ByAriaLabel)
    }
}
