use serde::{Deserialize, Serialize};

/// Half-open character range `[start, end)` in the canonical page text.
///
/// Offsets count characters, not bytes. An empty spot (`start == end`) marks
/// the position of an element that contributes no text of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FindSpot {
    pub start: usize,
    pub end: usize,
}

impl FindSpot {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_empty() {
        let s = FindSpot::new(3, 8);
        assert_eq!(s.len(), 5);
        assert!(!s.is_empty());
        assert!(FindSpot::new(4, 4).is_empty());
        assert_eq!(FindSpot::new(4, 4).len(), 0);
    }

    #[test]
    fn serializes_to_a_flat_record() {
        let s = FindSpot::new(3, 8);
        assert_eq!(serde_json::to_string(&s).unwrap(), r#"{"start":3,"end":8}"#);
    }
}
