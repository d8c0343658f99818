use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::list::{BackendControl, Entry, WeightedControlList};

/// Renders one entry in the fixed diagnostic shape tooling greps for:
///
/// `[<description>] found by: <FOUND_TYPE> deviation: <n> distance: <n> start: <n> index: <n>`
pub fn entry_line<C: BackendControl>(entry: &Entry<C>) -> String {
    format!(
        "[{}] found by: {} deviation: {} distance: {} start: {} index: {}",
        description(entry),
        entry.found_type,
        entry.deviation,
        entry.distance,
        entry.start,
        entry.index
    )
}

fn description<C: BackendControl>(entry: &Entry<C>) -> String {
    let mut text = entry.control.describing_text();
    if let Some(via) = &entry.via {
        text.push_str(&format!(" by [{}]", via.describing_text()));
    }
    text
}

/// Machine-readable form of one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    pub control: String,
    pub found_by: String,
    pub deviation: usize,
    pub distance: usize,
    pub start: usize,
    pub index: usize,
}

pub fn entry_record<C: BackendControl>(entry: &Entry<C>) -> EntryRecord {
    EntryRecord {
        control: description(entry),
        found_by: entry.found_type.as_str().to_string(),
        deviation: entry.deviation,
        distance: entry.distance,
        start: entry.start,
        index: entry.index,
    }
}

/// Writes the ranked entries one line each.
pub fn print_lines<C, W>(out: &mut W, list: &WeightedControlList<C>) -> std::io::Result<()>
where
    C: BackendControl + Clone,
    W: Write,
{
    for entry in list.entries_sorted() {
        writeln!(out, "{}", entry_line(&entry))?;
    }
    Ok(())
}

/// Writes the ranked entries as JSON lines.
pub fn print_jsonl<C, W>(out: &mut W, list: &WeightedControlList<C>) -> std::io::Result<()>
where
    C: BackendControl + Clone,
    W: Write,
{
    for entry in list.entries_sorted() {
        let line = serde_json::to_string(&entry_record(&entry)).unwrap_or_default();
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::found::FoundType;

    #[derive(Debug, Clone)]
    struct Desc(&'static str);

    impl BackendControl for Desc {
        fn has_same_backend_control(&self, other: &Self) -> bool {
            self.0 == other.0
        }

        fn describing_text(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn line_shape_is_stable() {
        let entry = Entry {
            control: Desc("HtmlTextInput (id='ti')"),
            found_type: FoundType::ById,
            deviation: 1,
            distance: 0,
            start: 14,
            index: 2,
            via: None,
        };
        assert_eq!(
            entry_line(&entry),
            "[HtmlTextInput (id='ti')] found by: BY_ID deviation: 1 distance: 0 start: 14 index: 2"
        );
    }

    #[test]
    fn via_control_joins_the_description() {
        let entry = Entry {
            control: Desc("HtmlTextInput (id='x')"),
            found_type: FoundType::ByLabelElement,
            deviation: 0,
            distance: 0,
            start: 7,
            index: 2,
            via: Some(Desc("HtmlLabel 'myLabel'")),
        };
        assert_eq!(
            entry_line(&entry),
            "[HtmlTextInput (id='x') by [HtmlLabel 'myLabel']] found by: BY_LABEL_ELEMENT deviation: 0 distance: 0 start: 7 index: 2"
        );
    }

    #[test]
    fn jsonl_lines_parse_back() {
        let mut list = WeightedControlList::new();
        list.add(Entry {
            control: Desc("HtmlAnchor 'go'"),
            found_type: FoundType::ByText,
            deviation: 2,
            distance: 3,
            start: 5,
            index: 7,
            via: None,
        });
        let mut out = Vec::new();
        print_jsonl(&mut out, &list).unwrap();
        let text = String::from_utf8(out).unwrap();
        let record: EntryRecord = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(record.control, "HtmlAnchor 'go'");
        assert_eq!(record.found_by, "BY_TEXT");
        assert_eq!(record.deviation, 2);
        assert_eq!(record.index, 7);
    }

    #[test]
    fn print_lines_emits_the_ranking_order() {
        let mut list = WeightedControlList::new();
        list.add(Entry {
            control: Desc("b"),
            found_type: FoundType::ByText,
            deviation: 0,
            distance: 0,
            start: 0,
            index: 0,
            via: None,
        });
        list.add(Entry {
            control: Desc("a"),
            found_type: FoundType::ById,
            deviation: 0,
            distance: 0,
            start: 0,
            index: 0,
            via: None,
        });
        let mut out = Vec::new();
        print_lines(&mut out, &list).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("[a]"));
        assert!(lines[1].starts_with("[b]"));
    }
}
