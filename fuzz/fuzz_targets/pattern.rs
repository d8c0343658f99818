#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let (raw, haystack) = text.split_once('\n').unwrap_or((text, ""));
        let pattern = dowser_path::SearchPattern::new(raw);
        let _ = pattern.matches(haystack);
        let _ = pattern.match_deviation(haystack);
        let _ = pattern.deviation_in(haystack);
        let _ = pattern.deviation_at_end(haystack);
        let _ = pattern.first_occurrence_in(haystack);
        let _ = pattern.chars_before_last_occurrence(haystack);
        let _ = pattern.chars_after_last_occurrence(haystack);
    }
});
