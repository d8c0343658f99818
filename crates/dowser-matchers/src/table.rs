use tracing::debug;

use dowser_core::{resolver, ElementMatcher, FoundType, MatchContext, MatchHit};
use dowser_dom::NodeId;

/// Accepts every candidate sitting inside cells that satisfy the search's
/// coordinate pairs. Carries no deviation of its own; ranking within the
/// accepted cells falls back to position. Enclosing hits are dropped in
/// the post pass so a coordinate search names the innermost cells.
pub struct ByTableCoordinateMatcher;

impl ElementMatcher for ByTableCoordinateMatcher {
    fn id(&self) -> &'static str {
        "by_table_coordinate"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        if !ctx.has_coords() {
            return Vec::new();
        }
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        if !resolver::element_in_coordinates(ctx, element) {
            return Vec::new();
        }
        vec![MatchHit::new(element, FoundType::ByTableCoordinate, 0, frame)]
    }

    fn post_process(&self, ctx: &MatchContext<'_>, hits: Vec<MatchHit>) -> Vec<MatchHit> {
        let before = hits.len();
        let kept = resolver::remove_ancestors(ctx, hits);
        if kept.len() < before {
            debug!(dropped = before - kept.len(), "enclosing coordinate hits dropped");
        }
        kept
    }
}
