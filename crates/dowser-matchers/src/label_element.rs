use dowser_core::{ElementMatcher, FoundType, MatchContext, MatchHit};
use dowser_dom::{NodeId, Tag};

/// Match through `label` elements: a label referencing the control via its
/// `for` attribute, or a label wrapping the control. The label's own text
/// carries the target (containment match); for wrapping labels the
/// control's text is cut out first.
pub struct ByLabelElementMatcher;

impl ElementMatcher for ByLabelElementMatcher {
    fn id(&self) -> &'static str {
        "by_label_element"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        if ctx.snapshot.kind(element).is_none() {
            return Vec::new();
        }
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let mut best: Option<(usize, NodeId)> = None;
        if let Some(id_attr) = ctx.snapshot.non_empty_attr(element, "id") {
            for &label in ctx.labels() {
                let points_here = ctx
                    .snapshot
                    .non_empty_attr(label, "for")
                    .is_some_and(|f| f == id_attr);
                if !points_here {
                    continue;
                }
                if let Some(text) = ctx.index.text_of(label) {
                    if let Some(deviation) = target.deviation_in(&text) {
                        keep_best(&mut best, deviation, label);
                    }
                }
            }
        }
        let mut ancestor = ctx.snapshot.parent(element);
        while let Some(current) = ancestor {
            if ctx.snapshot.tag(current) == Some(&Tag::Label) {
                if let Some(text) = ctx.index.text_without(current, element) {
                    if let Some(deviation) = target.deviation_in(&text) {
                        keep_best(&mut best, deviation, current);
                    }
                }
                break;
            }
            ancestor = ctx.snapshot.parent(current);
        }
        match best {
            Some((deviation, label)) => {
                vec![MatchHit::new(element, FoundType::ByLabelElement, deviation, frame).via(label)]
            }
            None => Vec::new(),
        }
    }
}

fn keep_best(best: &mut Option<(usize, NodeId)>, deviation: usize, label: NodeId) {
    match best {
        Some((current, _)) if *current <= deviation => {}
        _ => *best = Some((deviation, label)),
    }
}
