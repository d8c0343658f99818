#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let tokens: Vec<dowser_path::SecretString> =
            text.lines().map(dowser_path::SecretString::new).collect();
        let _ = dowser_path::WPath::parse(&tokens);
    }
});
