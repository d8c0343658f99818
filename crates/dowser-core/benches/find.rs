use criterion::{criterion_group, criterion_main, Criterion};
use dowser_dom::{DomSnapshot, PageBuilder};
use dowser_path::{SecretString, WPath};

/// A form-heavy page: fifty sections of labeled fields, selects and
/// buttons, one section per table row.
fn form_page() -> DomSnapshot {
    let mut b = PageBuilder::new().open("table");
    for section in 0..50 {
        b = b
            .open("tr")
            .open("td")
            .text(&format!("Section{section}"))
            .close()
            .open("td")
            .open("label")
            .attr("for", &format!("field{section}"))
            .text(&format!("Field label {section}"))
            .close()
            .open("input")
            .attr("id", &format!("field{section}"))
            .attr("name", &format!("field_{section}"))
            .close()
            .open("select")
            .attr("id", &format!("choice{section}"))
            .open("option")
            .text("yes")
            .close()
            .open("option")
            .text("no")
            .close()
            .close()
            .open("input")
            .attr("type", "submit")
            .attr("name", &format!("go{section}"))
            .attr("value", &format!("Save {section}"))
            .close()
            .close()
            .close();
    }
    b.close().finish()
}

fn wpath(tokens: &[&str]) -> WPath {
    let tokens: Vec<SecretString> = tokens.iter().map(|t| SecretString::new(*t)).collect();
    WPath::parse(&tokens).unwrap()
}

fn bench_find(c: &mut Criterion) {
    let page = form_page();
    let by_label = wpath(&["Field label 37"]);
    let anchored = wpath(&["Section42", "field_4?"]);
    let clickable = wpath(&["Save 13"]);
    c.bench_function("find_setables_by_label", |b| {
        b.iter(|| {
            let finder = dowser_matchers::control_finder(&page);
            finder.find_setables(&by_label).unwrap().entries_sorted().len()
        })
    });
    c.bench_function("find_setables_anchored_wildcard", |b| {
        b.iter(|| {
            let finder = dowser_matchers::control_finder(&page);
            finder.find_setables(&anchored).unwrap().entries_sorted().len()
        })
    });
    c.bench_function("find_clickables_by_caption", |b| {
        b.iter(|| {
            let finder = dowser_matchers::control_finder(&page);
            finder.find_clickables(&clickable).unwrap().entries_sorted().len()
        })
    });
}

criterion_group!(benches, bench_find);
criterion_main!(benches);
