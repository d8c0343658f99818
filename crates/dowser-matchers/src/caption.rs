use dowser_core::{ElementMatcher, FoundType, MatchContext, MatchHit};
use dowser_dom::{ControlKind, NodeId};

/// Whole-match of the target against a control's caption: the `value` of
/// button-like inputs, the rendered text of buttons and options, the
/// `label` attribute of option groups.
pub struct ByCaptionMatcher;

impl ElementMatcher for ByCaptionMatcher {
    fn id(&self) -> &'static str {
        "by_caption"
    }

    fn match_element(&self, ctx: &MatchContext<'_>, element: NodeId) -> Vec<MatchHit> {
        let Some(target) = ctx.target() else {
            return Vec::new();
        };
        let Some(frame) = ctx.frame(element) else {
            return Vec::new();
        };
        let caption = match ctx.snapshot.kind(element) {
            Some(ControlKind::SubmitInput)
            | Some(ControlKind::ResetInput)
            | Some(ControlKind::ButtonInput) => {
                ctx.snapshot.non_empty_attr(element, "value").map(str::to_string)
            }
            Some(ControlKind::Button) | Some(ControlKind::SelectOption) => {
                ctx.index.text_of(element)
            }
            Some(ControlKind::OptionGroup) => {
                ctx.snapshot.non_empty_attr(element, "label").map(str::to_string)
            }
            _ => None,
        };
        let Some(caption) = caption else {
            return Vec::new();
        };
        let caption = caption.trim();
        if caption.is_empty() {
            return Vec::new();
        }
        match target.match_deviation(caption) {
            Some(deviation) => vec![MatchHit::new(element, FoundType::ByLabel, deviation, frame)],
            None => Vec::new(),
        }
    }
}
