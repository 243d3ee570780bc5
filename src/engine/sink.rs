use crate::types::Violation;

/// Per-asset violation buffers in expansion order.
///
/// Slots may be filled in any order; only the leading run of filled slots
/// is reported, so a cancelled scan yields a consistent prefix.
#[derive(Debug)]
pub struct ViolationSink {
    slots: Vec<Option<Vec<Violation>>>,
}

impl ViolationSink {
    pub fn new(total: usize) -> Self {
        Self {
            slots: vec![None; total],
        }
    }

    pub fn from_slots(slots: Vec<Option<Vec<Violation>>>) -> Self {
        Self { slots }
    }

    pub fn record(&mut self, index: usize, violations: Vec<Violation>) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(violations);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Violations of the completed prefix, and how many assets it covers.
    pub fn into_prefix(self) -> (Vec<Violation>, usize) {
        let mut violations = Vec::new();
        let mut scanned = 0;
        for slot in self.slots {
            let Some(found) = slot else {
                break;
            };
            violations.extend(found);
            scanned += 1;
        }
        (violations, scanned)
    }
}
