use dowser_core::report::entry_line;
use dowser_core::FoundType;
use dowser_dom::PageBuilder;
use dowser_matchers::control_finder;
use dowser_path::{SecretString, WPath};

fn wpath(tokens: &[&str]) -> WPath {
    let tokens: Vec<SecretString> = tokens.iter().map(|t| SecretString::new(*t)).collect();
    WPath::parse(&tokens).unwrap()
}

#[test]
fn placeholder_beats_title_and_aria_label() {
    let page = PageBuilder::new()
        .open("input")
        .attr("placeholder", "Email address")
        .attr("title", "Email address")
        .attr("aria-label", "Email address")
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_setables(&wpath(&["Email address"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_type, FoundType::ByPlaceholder);
}

#[test]
fn title_attribute_matches_whole_only() {
    let page = PageBuilder::new()
        .open("input").attr("title", "Search terms").close()
        .finish();
    let finder = control_finder(&page);
    let hit = finder.find_setables(&wpath(&["Search terms"])).unwrap().entries_sorted();
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].found_type, FoundType::ByTitleAttribute);
    // partial text is not enough for the attribute strategy
    let miss = finder.find_setables(&wpath(&["Search"])).unwrap().entries_sorted();
    assert!(miss.is_empty());
}

#[test]
fn aria_label_addresses_unlabeled_fields() {
    let page = PageBuilder::new()
        .open("input").attr("aria-label", "Quantity").close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_setables(&wpath(&["Quantity"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_type, FoundType::ByAriaLabel);
}

#[test]
fn submit_caption_reports_by_label() {
    let page = PageBuilder::new()
        .open("input").attr("type", "submit").attr("name", "go").attr("value", "Save").close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_clickables(&wpath(&["Save"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entry_line(&entries[0]),
        "[HtmlSubmitInput 'Save' (name='go')] found by: BY_LABEL deviation: 0 distance: 0 start: 0 index: 1"
    );
}

#[test]
fn anchor_text_matches_by_containment() {
    let page = PageBuilder::new()
        .open("a").attr("id", "lnk").text("Click here to continue").close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_clickables(&wpath(&["here"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_type, FoundType::ByText);
    assert_eq!(entries[0].deviation, 0);
    assert_eq!(page.attr(entries[0].control.id, "id"), Some("lnk"));
}

#[test]
fn option_caption_names_its_select() {
    let page = PageBuilder::new()
        .open("select").attr("id", "color")
        .open("option").text("Red").close()
        .open("option").text("Green").close()
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_selectables(&wpath(&["Green"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entry_line(&entries[0]),
        "[HtmlOption 'Green' part of [HtmlSelect (id='color')]] found by: BY_LABEL deviation: 0 distance: 0 start: 3 index: 3"
    );
}

#[test]
fn checkbox_is_labeled_by_the_text_after_it() {
    let page = PageBuilder::new()
        .open("input").attr("type", "checkbox").attr("id", "terms").close()
        .text("Accept the terms")
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_selectables(&wpath(&["Accept the terms"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_type, FoundType::ByLabelingText);
    assert_eq!(page.attr(entries[0].control.id, "id"), Some("terms"));
}

#[test]
fn wrapping_label_matches_without_its_own_control_text() {
    let page = PageBuilder::new()
        .open("label")
        .text("Remember me")
        .open("input").attr("type", "checkbox").attr("id", "rm").close()
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_selectables(&wpath(&["Remember me"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entry_line(&entries[0]),
        "[HtmlCheckBoxInput (id='rm') by [HtmlLabel 'Remember me']] found by: BY_LABEL_ELEMENT deviation: 0 distance: 0 start: 11 index: 2"
    );
}

#[test]
fn label_containment_beats_the_suffix_text_strategy() {
    let page = PageBuilder::new()
        .open("label").attr("for", "fn").text("Your full name").close()
        .open("input").attr("id", "fn").close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_setables(&wpath(&["full name"])).unwrap().entries_sorted();
    // several strategies hit the same input; one entry per control
    // survives and the label one ranks first
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_type, FoundType::ByLabelElement);
}

#[test]
fn image_alt_text_matches_whole() {
    let page = PageBuilder::new()
        .open("img")
        .attr("id", "logo")
        .attr("alt", "Company Logo")
        .attr("src", "/static/img/logo-2024.png")
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_clickables(&wpath(&["Company Logo"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_type, FoundType::ByImgAltAttribute);
}

#[test]
fn image_src_matches_by_suffix() {
    let page = PageBuilder::new()
        .open("img")
        .attr("id", "logo")
        .attr("alt", "Company Logo")
        .attr("src", "/static/img/logo-2024.png")
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_clickables(&wpath(&["logo-2024.png"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_type, FoundType::ByImgSrcAttribute);
    assert_eq!(entries[0].deviation, 0);
}

#[test]
fn anchor_via_inner_image_outranks_the_image_itself() {
    let page = PageBuilder::new()
        .open("a").attr("id", "home")
        .open("img").attr("alt", "Home").attr("name", "homeIcon").close()
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_clickables(&wpath(&["Home"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].found_type, FoundType::ByInnerImgAltAttribute);
    assert_eq!(page.attr(entries[0].control.id, "id"), Some("home"));
    assert_eq!(entries[1].found_type, FoundType::ByImgAltAttribute);
}

#[test]
fn inner_image_name_outranks_the_image_name() {
    let page = PageBuilder::new()
        .open("a").attr("id", "home")
        .open("img").attr("alt", "Home").attr("name", "homeIcon").close()
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_clickables(&wpath(&["homeIcon"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].found_type, FoundType::ByInnerName);
    assert_eq!(page.attr(entries[0].control.id, "id"), Some("home"));
    assert_eq!(entries[1].found_type, FoundType::ByName);
}

#[test]
fn text_search_keeps_only_the_innermost_element() {
    let page = PageBuilder::new()
        .open("div").attr("id", "note")
        .open("span").text("Important notice").close()
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_by_text(&wpath(&["Important notice"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    let span = {
        let div = page.children(page.root())[0];
        page.children(div)[0]
    };
    assert_eq!(entries[0].control.id, span);
    assert_eq!(entries[0].found_type, FoundType::ByText);
}

#[test]
fn others_are_addressable_by_id() {
    let page = PageBuilder::new()
        .open("div").attr("id", "note")
        .open("span").text("Important notice").close()
        .close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_others(&wpath(&["note"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].found_type, FoundType::ById);
    let div = page.children(page.root())[0];
    assert_eq!(entries[0].control.id, div);
}

#[test]
fn title_text_ranks_after_plain_text() {
    let page = PageBuilder::new()
        .open("div").attr("title", "overview of results").close()
        .open("div").open("span").text("overview table").close().close()
        .finish();
    let finder = control_finder(&page);
    let entries = finder.find_by_text(&wpath(&["overview*"])).unwrap().entries_sorted();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].found_type, FoundType::ByText);
    assert_eq!(entries[1].found_type, FoundType::ByTitleText);
}
