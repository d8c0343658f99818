use std::fmt;

const MASK: &str = "****";

/// A search token as authored by the user: raw text plus a secret flag.
///
/// The flag never changes how the token matches. It only keeps the raw value
/// out of rendered output: `Display` masks secret tokens, `as_str` hands the
/// raw text to the matching engine. Log events and error messages must always
/// go through `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretString {
    text: String,
    secret: bool,
}

impl SecretString {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), secret: false }
    }

    pub fn secret(text: impl Into<String>) -> Self {
        Self { text: text.into(), secret: true }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for SecretString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SecretString {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.secret {
            f.write_str(MASK)
        } else {
            f.write_str(&self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_token_displays_raw_text() {
        let t = SecretString::new("TextInput");
        assert_eq!(t.as_str(), "TextInput");
        assert_eq!(t.to_string(), "TextInput");
        assert!(!t.is_secret());
    }

    #[test]
    fn secret_token_masks_display_but_keeps_value() {
        let t = SecretString::secret("hunter2");
        assert_eq!(t.as_str(), "hunter2");
        assert_eq!(t.to_string(), "****");
        assert!(t.is_secret());
    }

    #[test]
    fn secret_debug_is_not_used_for_rendering() {
        // Display is the rendering contract; format! on the value goes through it.
        let t = SecretString::secret("pw");
        assert_eq!(format!("token {t}"), "token ****");
    }
}
