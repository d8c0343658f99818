use dowser_core::{ElementMatcher, FoundType, MatchContext, MatchHit};
use dowser_dom::{ControlKind, ControlTraits, NodeId};

/// Containment match against the free text running up to the control:
/// everything between the previous form control (or the enclosing cell)
/// and the candidate. Applies to fields and selects, which are labeled
/// from the left.
pub struct ByLabelingTextBeforeMatcher;

impl ElementMatcher for ByLabelingTextBeforeMatcher {
    fn id(&self) -> &'static str {
        "by_labeling_text_before"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        let applies = ctx.snapshot.kind(element).is_some_and(|kind| {
            kind.traits().contains(ControlTraits::SETABLE) || kind == ControlKind::Select
        });
        if !applies {
            return Vec::new();
        }
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let Some(labeling) = ctx.index.labeling_text_before(element) else {
            return Vec::new();
        };
        if labeling.is_empty() {
            return Vec::new();
        }
        match target.deviation_in(&labeling) {
            Some(deviation) => {
                vec![MatchHit::new(element, FoundType::ByLabelingText, deviation, frame)]
            }
            None => Vec::new(),
        }
    }
}

/// Containment match against the text following the control, for controls
/// labeled from the right: checkboxes and radio buttons.
pub struct ByLabelingTextAfterMatcher;

impl ElementMatcher for ByLabelingTextAfterMatcher {
    fn id(&self) -> &'static str {
        "by_labeling_text_after"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        let applies = matches!(
            ctx.snapshot.kind(element),
            Some(ControlKind::Checkbox) | Some(ControlKind::RadioButton)
        );
        if !applies {
            return Vec::new();
        }
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let Some(labeling) = ctx.index.labeling_text_after(element) else {
            return Vec::new();
        };
        if labeling.is_empty() {
            return Vec::new();
        }
        match target.deviation_in(&labeling) {
            Some(deviation) => {
                vec![MatchHit::new(element, FoundType::ByLabelingText, deviation, frame)]
            }
            None => Vec::new(),
        }
    }
}
