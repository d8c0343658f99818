use std::fmt;

/// How a control was found. The weight ranks strategies against each other;
/// smaller weights are more specific and win the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoundType {
    ById,
    ByInnerName,
    ByName,
    ByLabelElement,
    ByLabel,
    ByPlaceholder,
    ByLabelingText,
    ByTitleAttribute,
    ByInnerImgAltAttribute,
    ByInnerImgTitleAttribute,
    ByInnerImgSrcAttribute,
    ByImgAltAttribute,
    ByImgTitleAttribute,
    ByImgSrcAttribute,
    ByAriaLabel,
    ByTableCoordinate,
    ByText,
    ByTitleText,
}

impl FoundType {
    pub fn weight(self) -> u32 {
        match self {
            FoundType::ById => 400,
            FoundType::ByInnerName => 900,
            FoundType::ByName => 1000,
            FoundType::ByLabelElement => 2000,
            FoundType::ByLabel => 2000,
            FoundType::ByPlaceholder => 2500,
            FoundType::ByLabelingText => 3000,
            FoundType::ByTitleAttribute => 3500,
            FoundType::ByInnerImgAltAttribute => 4000,
            FoundType::ByInnerImgTitleAttribute => 4000,
            FoundType::ByInnerImgSrcAttribute => 4000,
            FoundType::ByImgAltAttribute => 5000,
            FoundType::ByImgTitleAttribute => 5000,
            FoundType::ByImgSrcAttribute => 5000,
            FoundType::ByAriaLabel => 5500,
            FoundType::ByTableCoordinate => 6000,
            FoundType::ByText => 9000,
            FoundType::ByTitleText => 9900,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FoundType::ById => "BY_ID",
            FoundType::ByInnerName => "BY_INNER_NAME",
            FoundType::ByName => "BY_NAME",
            FoundType::ByLabelElement => "BY_LABEL_ELEMENT",
            FoundType::ByLabel => "BY_LABEL",
            FoundType::ByPlaceholder => "BY_PLACEHOLDER",
            FoundType::ByLabelingText => "BY_LABELING_TEXT",
            FoundType::ByTitleAttribute => "BY_TITLE_ATTRIBUTE",
            FoundType::ByInnerImgAltAttribute => "BY_INNER_IMG_ALT_ATTRIBUTE",
            FoundType::ByInnerImgTitleAttribute => "BY_INNER_IMG_TITLE_ATTRIBUTE",
            FoundType::ByInnerImgSrcAttribute => "BY_INNER_IMG_SRC_ATTRIBUTE",
            FoundType::ByImgAltAttribute => "BY_IMG_ALT_ATTRIBUTE",
            FoundType::ByImgTitleAttribute => "BY_IMG_TITLE_ATTRIBUTE",
            FoundType::ByImgSrcAttribute => "BY_IMG_SRC_ATTRIBUTE",
            FoundType::ByAriaLabel => "BY_ARIA_LABEL",
            FoundType::ByTableCoordinate => "BY_TABLE_COORDINATE",
            FoundType::ByText => "BY_TEXT",
            FoundType::ByTitleText => "BY_TITLE_TEXT",
        }
    }
}

impl fmt::Display for FoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
