use std::fmt;

use crate::secret::SecretString;
use crate::spot::FindSpot;

/// One literal run between `*` wildcards. `None` slots come from `?` and
/// match any single character.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    slots: Vec<Option<char>>,
}

impl Segment {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn matches_at(&self, text: &[char], pos: usize) -> bool {
        pos + self.slots.len() <= text.len()
            && self
                .slots
                .iter()
                .zip(text[pos..].iter())
                .all(|(slot, ch)| slot.map_or(true, |lit| lit == *ch))
    }

    /// Earliest placement with `start >= from`.
    fn find_from(&self, text: &[char], from: usize) -> Option<usize> {
        let upper = text.len().checked_sub(self.slots.len())?;
        (from..=upper).find(|&p| self.matches_at(text, p))
    }

    /// Latest placement with `min_start <= start <= max_start`.
    fn rfind_in(&self, text: &[char], min_start: usize, max_start: usize) -> Option<usize> {
        let upper = max_start.min(text.len().checked_sub(self.slots.len())?);
        if upper < min_start {
            return None;
        }
        (min_start..=upper).rev().find(|&p| self.matches_at(text, p))
    }
}

/// Wildcard search pattern over character sequences.
///
/// `*` matches any run of characters, `?` exactly one, backslash escapes the
/// next character. A pattern with no segments and no wildcards is the empty
/// pattern; it stands for "no constraint" and matches every text with
/// deviation 0.
///
/// Deviation is the number of characters absorbed by `*` wildcards to make a
/// match work. `?` counts toward the matched length, never toward deviation.
/// All offsets and counts are characters.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    source: SecretString,
    segments: Vec<Segment>,
    leading_star: bool,
    trailing_star: bool,
    min_len: usize,
}

fn compile(raw: &str) -> (Vec<Segment>, bool, bool) {
    let mut segments = Vec::new();
    let mut current: Vec<Option<char>> = Vec::new();
    let mut leading_star = false;
    let mut trailing_star = false;
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            // a lone trailing backslash stays literal
            '\\' => current.push(Some(chars.next().unwrap_or('\\'))),
            '*' => {
                if !current.is_empty() {
                    segments.push(Segment { slots: std::mem::take(&mut current) });
                }
                if segments.is_empty() {
                    leading_star = true;
                }
                trailing_star = true;
            }
            '?' => current.push(None),
            c => current.push(Some(c)),
        }
    }
    if !current.is_empty() {
        segments.push(Segment { slots: current });
        trailing_star = false;
    }
    (segments, leading_star, trailing_star)
}

impl SearchPattern {
    pub fn new(pattern: &str) -> Self {
        Self::build(SecretString::new(pattern))
    }

    pub fn from_token(token: &SecretString) -> Self {
        Self::build(token.clone())
    }

    /// Joins the tokens with `*` and compiles the result. The joined pattern
    /// is marked secret if any token is. An empty slice yields the empty
    /// pattern.
    pub fn from_tokens(tokens: &[SecretString]) -> Self {
        let raw = tokens.iter().map(SecretString::as_str).collect::<Vec<_>>().join("*");
        let source = if tokens.iter().any(SecretString::is_secret) {
            SecretString::secret(raw)
        } else {
            SecretString::new(raw)
        };
        Self::build(source)
    }

    fn build(source: SecretString) -> Self {
        let (segments, leading_star, trailing_star) = compile(source.as_str());
        let min_len = segments.iter().map(Segment::len).sum();
        Self { source, segments, leading_star, trailing_star, min_len }
    }

    pub fn source(&self) -> &SecretString {
        &self.source
    }

    /// Minimal number of characters any match consumes.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// True for the empty pattern (no literals, no wildcards).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && !self.leading_star && !self.trailing_star
    }

    /// Whole-string match.
    pub fn matches(&self, text: &str) -> bool {
        let t: Vec<char> = text.chars().collect();
        self.full_match(&t)
    }

    /// Whole-string match deviation. The empty pattern matches everything
    /// with deviation 0; otherwise the deviation is every character the `*`
    /// wildcards had to absorb.
    pub fn match_deviation(&self, text: &str) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        let t: Vec<char> = text.chars().collect();
        if self.full_match(&t) {
            Some(t.len() - self.min_len)
        } else {
            None
        }
    }

    /// Minimal deviation over all occurrences of the pattern inside `text`.
    /// Characters outside the occurrence cost nothing.
    pub fn deviation_in(&self, text: &str) -> Option<usize> {
        let t: Vec<char> = text.chars().collect();
        self.containment_deviation(&t)
    }

    pub fn matches_at_end(&self, text: &str) -> bool {
        self.deviation_at_end(text).is_some()
    }

    /// Deviation of the shortest suffix of `text` the pattern matches.
    pub fn deviation_at_end(&self, text: &str) -> Option<usize> {
        let t: Vec<char> = text.chars().collect();
        self.suffix_deviation(&t)
    }

    /// Leftmost occurrence, extended as far right as the wildcards allow.
    pub fn first_occurrence_in(&self, text: &str) -> Option<FindSpot> {
        let t: Vec<char> = text.chars().collect();
        self.first_occurrence(&t)
    }

    pub fn chars_before_first_occurrence(&self, text: &str) -> Option<usize> {
        let t: Vec<char> = text.chars().collect();
        self.first_occurrence(&t).map(|s| s.start)
    }

    /// Start of the rightmost occurrence.
    pub fn chars_before_last_occurrence(&self, text: &str) -> Option<usize> {
        let t: Vec<char> = text.chars().collect();
        self.last_start(&t)
    }

    /// Characters between the end of the rightmost occurrence and the end of
    /// the text. This is the distance measure of the ranking.
    pub fn chars_after_last_occurrence(&self, text: &str) -> Option<usize> {
        let t: Vec<char> = text.chars().collect();
        self.last_end(&t).map(|end| t.len() - end)
    }

    fn full_match(&self, text: &[char]) -> bool {
        let n = self.segments.len();
        if n == 0 {
            // empty pattern and star-only patterns match everything
            return true;
        }
        if n == 1 {
            let seg = &self.segments[0];
            return match (self.leading_star, self.trailing_star) {
                (false, false) => text.len() == seg.len() && seg.matches_at(text, 0),
                (false, true) => seg.matches_at(text, 0),
                (true, false) => {
                    text.len() >= seg.len() && seg.matches_at(text, text.len() - seg.len())
                }
                (true, true) => seg.find_from(text, 0).is_some(),
            };
        }
        let first = &self.segments[0];
        let start = if self.leading_star {
            match first.find_from(text, 0) {
                Some(p) => p,
                None => return false,
            }
        } else {
            if !first.matches_at(text, 0) {
                return false;
            }
            0
        };
        let mut pos = start + first.len();
        for seg in &self.segments[1..n - 1] {
            match seg.find_from(text, pos) {
                Some(p) => pos = p + seg.len(),
                None => return false,
            }
        }
        let last = &self.segments[n - 1];
        if self.trailing_star {
            last.find_from(text, pos).is_some()
        } else {
            match text.len().checked_sub(last.len()) {
                Some(lp) => lp >= pos && last.matches_at(text, lp),
                None => false,
            }
        }
    }

    fn containment_deviation(&self, text: &[char]) -> Option<usize> {
        if self.segments.is_empty() {
            return Some(0);
        }
        let first = &self.segments[0];
        let mut from = 0;
        let mut best: Option<usize> = None;
        // For a fixed start the greedy earliest chain has minimal extent, so
        // scanning starts left to right and keeping the minimum is exact.
        while let Some(start) = first.find_from(text, from) {
            let mut pos = start + first.len();
            let mut complete = true;
            for seg in &self.segments[1..] {
                match seg.find_from(text, pos) {
                    Some(p) => pos = p + seg.len(),
                    None => {
                        complete = false;
                        break;
                    }
                }
            }
            if !complete {
                break;
            }
            let dev = pos - start - self.min_len;
            best = Some(best.map_or(dev, |b| b.min(dev)));
            if dev == 0 {
                break;
            }
            from = start + 1;
        }
        best
    }

    fn suffix_deviation(&self, text: &[char]) -> Option<usize> {
        let n = self.segments.len();
        if n == 0 {
            return Some(0);
        }
        // Right-to-left greedy placement maximises the chain start, which
        // minimises the suffix extent. A trailing star absorbs up to the end
        // of the text, so those characters count too.
        let last = &self.segments[n - 1];
        let mut bound = if self.trailing_star {
            last.rfind_in(text, 0, text.len())?
        } else {
            let lp = text.len().checked_sub(last.len())?;
            if !last.matches_at(text, lp) {
                return None;
            }
            lp
        };
        for seg in self.segments[..n - 1].iter().rev() {
            bound = seg.rfind_in(text, 0, bound.checked_sub(seg.len())?)?;
        }
        Some(text.len() - bound - self.min_len)
    }

    fn first_occurrence(&self, text: &[char]) -> Option<FindSpot> {
        let n = self.segments.len();
        if n == 0 {
            // star-only patterns cover the whole text, the empty pattern an
            // empty spot at the start
            let end = if self.leading_star || self.trailing_star { text.len() } else { 0 };
            return Some(FindSpot::new(0, end));
        }
        let first = &self.segments[0];
        let s0 = first.find_from(text, 0)?;
        let start = if self.leading_star { 0 } else { s0 };
        let end = if self.trailing_star {
            // verify the whole chain completes, then stretch to the end
            let mut pos = s0 + first.len();
            for seg in &self.segments[1..] {
                let p = seg.find_from(text, pos)?;
                pos = p + seg.len();
            }
            text.len()
        } else if self.leading_star {
            // the leading star absorbs freely, so the longest end is the
            // latest feasible chain end
            self.last_end(text)?
        } else if n == 1 {
            s0 + first.len()
        } else {
            // middle segments earliest, last segment latest: longest extent
            // for the leftmost start
            let mut pos = s0 + first.len();
            for seg in &self.segments[1..n - 1] {
                let p = seg.find_from(text, pos)?;
                pos = p + seg.len();
            }
            let last = &self.segments[n - 1];
            let lp = last.rfind_in(text, pos, text.len().checked_sub(last.len())?)?;
            lp + last.len()
        };
        Some(FindSpot::new(start, end))
    }

    fn last_start(&self, text: &[char]) -> Option<usize> {
        let n = self.segments.len();
        if n == 0 {
            return Some(text.len());
        }
        let last = &self.segments[n - 1];
        let mut bound = last.rfind_in(text, 0, text.len().checked_sub(last.len())?)?;
        for seg in self.segments[..n - 1].iter().rev() {
            bound = seg.rfind_in(text, 0, bound.checked_sub(seg.len())?)?;
        }
        Some(bound)
    }

    fn last_end(&self, text: &[char]) -> Option<usize> {
        let n = self.segments.len();
        if n == 0 {
            return Some(text.len());
        }
        if self.trailing_star {
            // any occurrence lets the star run to the end of the text
            return self.containment_deviation(text).map(|_| text.len());
        }
        let last = &self.segments[n - 1];
        let pos_min = if n == 1 {
            0
        } else {
            let first = &self.segments[0];
            let s0 = first.find_from(text, 0)?;
            let mut pos = s0 + first.len();
            for seg in &self.segments[1..n - 1] {
                let p = seg.find_from(text, pos)?;
                pos = p + seg.len();
            }
            pos
        };
        let lp = last.rfind_in(text, pos_min, text.len().checked_sub(last.len())?)?;
        Some(lp + last.len())
    }
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
