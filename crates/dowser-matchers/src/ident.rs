use dowser_core::{ElementMatcher, FoundType, MatchContext, MatchHit};
use dowser_dom::NodeId;

/// Whole-match of the target against the `id` attribute.
pub struct ByIdMatcher;

impl ElementMatcher for ByIdMatcher {
    fn id(&self) -> &'static str {
        "by_id"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        attr_whole_match(ctx, element, "id", FoundType::ById)
    }
}

/// Whole-match of the target against the `name` attribute.
pub struct ByNameMatcher;

impl ElementMatcher for ByNameMatcher {
    fn id(&self) -> &'static str {
        "by_name"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        attr_whole_match(ctx, element, "name", FoundType::ByName)
    }
}

pub(crate) fn attr_whole_match(
    ctx: &MatchContext<'_>,
    element: NodeId,
    attr: &str,
    found_type: FoundType,
) -> Vec<MatchHit> {
    let Some(target) = ctx.target() else {
        return Vec::new();
    };
    let Some(frame) = ctx.frame(element) else {
        return Vec::new();
    };
    let Some(value) = ctx.snapshot.non_empty_attr(element, attr) else {
        return Vec::new();
    };
    match target.match_deviation(value) {
        Some(deviation) => vec![MatchHit::new(element, found_type, deviation, frame)],
        None => Vec::new(),
    }
}
