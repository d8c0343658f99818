use dowser_core::{ElementMatcher, FoundType, MatchContext, MatchHit};
use dowser_dom::{ControlKind, NodeId};

/// Matches images by their own attributes: whole-match on `alt` and
/// `title`, suffix match on `src` so a path tail like `logo.png` works.
pub struct ByImageMatcher;

impl ElementMatcher for ByImageMatcher {
    fn id(&self) -> &'static str {
        "by_image"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        let is_image = matches!(
            ctx.snapshot.kind(element),
            Some(ControlKind::Image) | Some(ControlKind::ImageInput)
        );
        if !is_image {
            return Vec::new();
        }
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let mut hits = Vec::new();
        if let Some(alt) = ctx.snapshot.non_empty_attr(element, "alt") {
            if let Some(deviation) = target.match_deviation(alt) {
                hits.push(MatchHit::new(element, FoundType::ByImgAltAttribute, deviation, frame));
            }
        }
        if let Some(title) = ctx.snapshot.non_empty_attr(element, "title") {
            if let Some(deviation) = target.match_deviation(title) {
                hits.push(MatchHit::new(element, FoundType::ByImgTitleAttribute, deviation, frame));
            }
        }
        if let Some(src) = ctx.snapshot.non_empty_attr(element, "src") {
            if let Some(deviation) = target.deviation_at_end(src) {
                hits.push(MatchHit::new(element, FoundType::ByImgSrcAttribute, deviation, frame));
            }
        }
        hits
    }
}

/// Matches anchors and buttons through the images they contain. Each inner
/// image may contribute one hit per attribute kind; only the best deviation
/// per kind survives.
pub struct ByInnerImageMatcher;

impl ElementMatcher for ByInnerImageMatcher {
    fn id(&self) -> &'static str {
        "by_inner_image"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        let wraps_content = matches!(
            ctx.snapshot.kind(element),
            Some(ControlKind::Anchor) | Some(ControlKind::Button)
        );
        if !wraps_content {
            return Vec::new();
        }
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let mut best_alt: Option<usize> = None;
        let mut best_title: Option<usize> = None;
        let mut best_src: Option<usize> = None;
        let mut best_name: Option<usize> = None;
        for inner in ctx.snapshot.descendant_elements(element) {
            if ctx.snapshot.kind(inner) != Some(ControlKind::Image) {
                continue;
            }
            if let Some(alt) = ctx.snapshot.non_empty_attr(inner, "alt") {
                keep_best(&mut best_alt, target.match_deviation(alt));
            }
            if let Some(title) = ctx.snapshot.non_empty_attr(inner, "title") {
                keep_best(&mut best_title, target.match_deviation(title));
            }
            if let Some(src) = ctx.snapshot.non_empty_attr(inner, "src") {
                keep_best(&mut best_src, target.deviation_at_end(src));
            }
            if let Some(name) = ctx.snapshot.non_empty_attr(inner, "name") {
                keep_best(&mut best_name, target.match_deviation(name));
            }
        }
        let mut hits = Vec::new();
        if let Some(deviation) = best_alt {
            hits.push(MatchHit::new(element, FoundType::ByInnerImgAltAttribute, deviation, frame));
        }
        if let Some(deviation) = best_title {
            hits.push(MatchHit::new(element, FoundType::ByInnerImgTitleAttribute, deviation, frame));
        }
        if let Some(deviation) = best_src {
            hits.push(MatchHit::new(element, FoundType::ByInnerImgSrcAttribute, deviation, frame));
        }
        if let Some(deviation) = best_name {
            hits.push(MatchHit::new(element, FoundType::ByInnerName, deviation, frame));
        }
        hits
    }
}

fn keep_best(best: &mut Option<usize>, candidate: Option<usize>) {
    if let Some(deviation) = candidate {
        *best = Some(best.map_or(deviation, |b| b.min(deviation)));
    }
}
