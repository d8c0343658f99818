use bitflags::bitflags;

/// HTML tags the engine treats specially; everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    A,
    Body,
    Br,
    Button,
    Div,
    Form,
    Head,
    Img,
    Input,
    Label,
    Li,
    Link,
    Meta,
    OptGroup,
    Option,
    P,
    Script,
    Select,
    Span,
    Style,
    Table,
    TBody,
    Td,
    TextArea,
    TFoot,
    Th,
    THead,
    Title,
    Tr,
    Ul,
    Other(String),
}

impl Tag {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "a" => Tag::A,
            "body" => Tag::Body,
            "br" => Tag::Br,
            "button" => Tag::Button,
            "div" => Tag::Div,
            "form" => Tag::Form,
            "head" => Tag::Head,
            "img" => Tag::Img,
            "input" => Tag::Input,
            "label" => Tag::Label,
            "li" => Tag::Li,
            "link" => Tag::Link,
            "meta" => Tag::Meta,
            "optgroup" => Tag::OptGroup,
            "option" => Tag::Option,
            "p" => Tag::P,
            "script" => Tag::Script,
            "select" => Tag::Select,
            "span" => Tag::Span,
            "style" => Tag::Style,
            "table" => Tag::Table,
            "tbody" => Tag::TBody,
            "td" => Tag::Td,
            "textarea" => Tag::TextArea,
            "tfoot" => Tag::TFoot,
            "th" => Tag::Th,
            "thead" => Tag::THead,
            "title" => Tag::Title,
            "tr" => Tag::Tr,
            "ul" => Tag::Ul,
            other => Tag::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tag::A => "a",
            Tag::Body => "body",
            Tag::Br => "br",
            Tag::Button => "button",
            Tag::Div => "div",
            Tag::Form => "form",
            Tag::Head => "head",
            Tag::Img => "img",
            Tag::Input => "input",
            Tag::Label => "label",
            Tag::Li => "li",
            Tag::Link => "link",
            Tag::Meta => "meta",
            Tag::OptGroup => "optgroup",
            Tag::Option => "option",
            Tag::P => "p",
            Tag::Script => "script",
            Tag::Select => "select",
            Tag::Span => "span",
            Tag::Style => "style",
            Tag::Table => "table",
            Tag::TBody => "tbody",
            Tag::Td => "td",
            Tag::TextArea => "textarea",
            Tag::TFoot => "tfoot",
            Tag::Th => "th",
            Tag::THead => "thead",
            Tag::Title => "title",
            Tag::Tr => "tr",
            Tag::Ul => "ul",
            Tag::Other(name) => name,
        }
    }

    /// Tags whose content never reaches the rendered page.
    pub fn never_rendered(&self) -> bool {
        matches!(self, Tag::Head | Tag::Link | Tag::Meta | Tag::Script | Tag::Style | Tag::Title)
    }

    /// Block-level boundary for the canonical text: content on either side
    /// never glues into one word.
    pub fn is_word_boundary(&self) -> bool {
        matches!(
            self,
            Tag::Body
                | Tag::Br
                | Tag::Div
                | Tag::Form
                | Tag::Li
                | Tag::P
                | Tag::Table
                | Tag::TBody
                | Tag::Td
                | Tag::TFoot
                | Tag::Th
                | Tag::THead
                | Tag::Tr
                | Tag::Ul
        )
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Tag::Td | Tag::Th)
    }

    pub fn is_row(&self) -> bool {
        matches!(self, Tag::Tr)
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Tag::Table)
    }
}

bitflags! {
    /// What a control can do; drives which finder category accepts it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ControlTraits: u8 {
        const SETABLE = 1;
        const CLICKABLE = 1 << 1;
        const SELECTABLE = 1 << 2;
    }
}

/// Concrete control derived from tag plus, for inputs, the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    TextInput,
    PasswordInput,
    FileInput,
    HiddenInput,
    TextArea,
    SubmitInput,
    ResetInput,
    ButtonInput,
    ImageInput,
    Button,
    Anchor,
    Image,
    Checkbox,
    RadioButton,
    Select,
    SelectOption,
    OptionGroup,
}

impl ControlKind {
    pub fn derive(tag: &Tag, input_type: Option<&str>) -> Option<ControlKind> {
        match tag {
            Tag::Input => {
                let ty = input_type.unwrap_or("text").trim().to_ascii_lowercase();
                Some(match ty.as_str() {
                    "password" => ControlKind::PasswordInput,
                    "file" => ControlKind::FileInput,
                    "hidden" => ControlKind::HiddenInput,
                    "submit" => ControlKind::SubmitInput,
                    "reset" => ControlKind::ResetInput,
                    "button" => ControlKind::ButtonInput,
                    "image" => ControlKind::ImageInput,
                    "checkbox" => ControlKind::Checkbox,
                    "radio" => ControlKind::RadioButton,
                    // text, search, email, tel, url, number and friends
                    _ => ControlKind::TextInput,
                })
            }
            Tag::TextArea => Some(ControlKind::TextArea),
            Tag::Button => Some(ControlKind::Button),
            Tag::A => Some(ControlKind::Anchor),
            Tag::Img => Some(ControlKind::Image),
            Tag::Select => Some(ControlKind::Select),
            Tag::Option => Some(ControlKind::SelectOption),
            Tag::OptGroup => Some(ControlKind::OptionGroup),
            _ => None,
        }
    }

    pub fn traits(self) -> ControlTraits {
        match self {
            ControlKind::TextInput
            | ControlKind::PasswordInput
            | ControlKind::FileInput
            | ControlKind::TextArea => ControlTraits::SETABLE,
            ControlKind::SubmitInput
            | ControlKind::ResetInput
            | ControlKind::ButtonInput
            | ControlKind::ImageInput
            | ControlKind::Button
            | ControlKind::Anchor
            | ControlKind::Image => ControlTraits::CLICKABLE,
            ControlKind::Checkbox
            | ControlKind::RadioButton
            | ControlKind::Select
            | ControlKind::SelectOption
            | ControlKind::OptionGroup => ControlTraits::SELECTABLE,
            ControlKind::HiddenInput => ControlTraits::empty(),
        }
    }

    pub fn describing_name(self) -> &'static str {
        match self {
            ControlKind::TextInput => "HtmlTextInput",
            ControlKind::PasswordInput => "HtmlPasswordInput",
            ControlKind::FileInput => "HtmlFileInput",
            ControlKind::HiddenInput => "HtmlHiddenInput",
            ControlKind::TextArea => "HtmlTextArea",
            ControlKind::SubmitInput => "HtmlSubmitInput",
            ControlKind::ResetInput => "HtmlResetInput",
            ControlKind::ButtonInput => "HtmlButtonInput",
            ControlKind::ImageInput => "HtmlImageInput",
            ControlKind::Button => "HtmlButton",
            ControlKind::Anchor => "HtmlAnchor",
            ControlKind::Image => "HtmlImage",
            ControlKind::Checkbox => "HtmlCheckBoxInput",
            ControlKind::RadioButton => "HtmlRadioButtonInput",
            ControlKind::Select => "HtmlSelect",
            ControlKind::SelectOption => "HtmlOption",
            ControlKind::OptionGroup => "HtmlOptionGroup",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_parse_is_case_insensitive() {
        assert_eq!(Tag::parse("INPUT"), Tag::Input);
        assert_eq!(Tag::parse("Td"), Tag::Td);
        assert_eq!(Tag::parse("article"), Tag::Other("article".to_string()));
    }

    #[test]
    fn input_kind_follows_the_type_attribute() {
        assert_eq!(ControlKind::derive(&Tag::Input, None), Some(ControlKind::TextInput));
        assert_eq!(ControlKind::derive(&Tag::Input, Some("EMAIL")), Some(ControlKind::TextInput));
        assert_eq!(ControlKind::derive(&Tag::Input, Some("password")), Some(ControlKind::PasswordInput));
        assert_eq!(ControlKind::derive(&Tag::Input, Some("checkbox")), Some(ControlKind::Checkbox));
        assert_eq!(ControlKind::derive(&Tag::Input, Some("hidden")), Some(ControlKind::HiddenInput));
        assert_eq!(ControlKind::derive(&Tag::Div, None), None);
    }

    #[test]
    fn traits_split_controls_into_categories() {
        assert!(ControlKind::TextArea.traits().contains(ControlTraits::SETABLE));
        assert!(ControlKind::Anchor.traits().contains(ControlTraits::CLICKABLE));
        assert!(ControlKind::Select.traits().contains(ControlTraits::SELECTABLE));
        assert!(ControlKind::HiddenInput.traits().is_empty());
    }
}
