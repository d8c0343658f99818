use crate::found::FoundType;

/// What the engine needs from a backend control: identity across repeated
/// hits and a human description for reports.
pub trait BackendControl {
    fn has_same_backend_control(&self, other: &Self) -> bool;
    fn describing_text(&self) -> String;
}

/// One ranked hit. `via` names the mediating element when the control was
/// found through another one, e.g. its label.
#[derive(Debug, Clone)]
pub struct Entry<C> {
    pub control: C,
    pub found_type: FoundType,
    pub deviation: usize,
    pub distance: usize,
    pub start: usize,
    pub index: usize,
    pub via: Option<C>,
}

impl<C> Entry<C> {
    fn sort_key(&self) -> (u32, usize, usize, usize, usize) {
        (self.found_type.weight(), self.deviation, self.distance, self.start, self.index)
    }
}

/// Append-only collection of hits. Insertion order carries no meaning;
/// `entries_sorted` is the one ranking, a pure projection that leaves the
/// list untouched.
#[derive(Debug, Clone, Default)]
pub struct WeightedControlList<C> {
    entries: Vec<Entry<C>>,
}

impl<C> WeightedControlList<C> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add(&mut self, entry: Entry<C>) {
        self.entries.push(entry);
    }

    pub fn add_all(&mut self, other: WeightedControlList<C>) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw hits in insertion order.
    pub fn entries(&self) -> &[Entry<C>] {
        &self.entries
    }
}

impl<C: BackendControl + Clone> WeightedControlList<C> {
    /// Hits ordered by (weight, deviation, distance, start, index), with
    /// every later duplicate of an already kept control dropped.
    pub fn entries_sorted(&self) -> Vec<Entry<C>> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(Entry::sort_key);
        let mut kept: Vec<Entry<C>> = Vec::new();
        for entry in sorted {
            let duplicate = kept
                .iter()
                .any(|k| k.control.has_same_backend_control(&entry.control));
            if !duplicate {
                kept.push(entry);
            }
        }
        kept
    }
}
