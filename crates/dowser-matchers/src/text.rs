use dowser_core::{resolver, ElementMatcher, FoundType, MatchContext, MatchHit};
use dowser_dom::{ControlTraits, NodeId};

/// Containment match against an element's own rendered text. Ancestors of
/// a hit match trivially through the same characters, so the post pass
/// keeps only the innermost hits.
pub struct ByTextMatcher;

impl ElementMatcher for ByTextMatcher {
    fn id(&self) -> &'static str {
        "by_text"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let Some(text) = ctx.index.text_of(element) else {
            return Vec::new();
        };
        if text.is_empty() {
            return Vec::new();
        }
        match target.deviation_in(&text) {
            Some(deviation) => vec![MatchHit::new(element, FoundType::ByText, deviation, frame)],
            None => Vec::new(),
        }
    }

    fn post_process(&self, ctx: &MatchContext<'_>, hits: Vec<MatchHit>) -> Vec<MatchHit> {
        resolver::remove_ancestors(ctx, hits)
    }
}

/// Suffix match of the target against everything rendered before the
/// control. Catches fields addressed by the text that visually precedes
/// them when no dedicated label exists.
pub struct ByWholeTextBeforeMatcher;

impl ElementMatcher for ByWholeTextBeforeMatcher {
    fn id(&self) -> &'static str {
        "by_whole_text_before"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        let setable = ctx
            .snapshot
            .kind(element)
            .is_some_and(|kind| kind.traits().contains(ControlTraits::SETABLE));
        if !setable {
            return Vec::new();
        }
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let Some(before) = ctx.index.text_before(element) else {
            return Vec::new();
        };
        match target.deviation_at_end(&before) {
            Some(deviation) => vec![MatchHit::new(element, FoundType::ByText, deviation, frame)],
            None => Vec::new(),
        }
    }
}

/// Containment match against the `title` attribute, ranked after plain
/// text.
pub struct ByTitleTextMatcher;

impl ElementMatcher for ByTitleTextMatcher {
    fn id(&self) -> &'static str {
        "by_title_text"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let Some(title) = ctx.snapshot.non_empty_attr(element, "title") else {
            return Vec::new();
        };
        match target.deviation_in(title) {
            Some(deviation) => {
                vec![MatchHit::new(element, FoundType::ByTitleText, deviation, frame)]
            }
            None => Vec::new(),
        }
    }
}
