//! Cancellable named timers
//!
//! At most one timer of each kind exists: starting a kind replaces the old
//! instance. Fired timers are popped one at a time in chronological order so
//! the caller can cancel the rest before they run.

/// Slack for float drift when comparing due times (ms)
const DUE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone)]
struct Slot<K> {
    kind: K,
    period_ms: f64,
    remaining_ms: f64,
    repeat: bool,
}

/// Timer registry keyed by `K`
#[derive(Debug, Clone)]
pub struct Timers<K> {
    slots: Vec<Slot<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<K: Copy + PartialEq + std::fmt::Debug> Timers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repeating timer, first firing after one period
    pub fn start_interval(&mut self, kind: K, period_ms: f64) {
        self.start(kind, period_ms, true);
    }

    /// One-shot timer
    pub fn start_timeout(&mut self, kind: K, delay_ms: f64) {
        self.start(kind, delay_ms, false);
    }

    fn start(&mut self, kind: K, period_ms: f64, repeat: bool) {
        if self.cancel(kind) {
            log::debug!("Timer {:?} restarted", kind);
        }
        // A zero period would fire forever within one frame
        let period_ms = period_ms.max(DUE_EPSILON * 10.0);
        self.slots.push(Slot {
            kind,
            period_ms,
            remaining_ms: period_ms,
            repeat,
        });
    }

    /// Stop a timer. Returns true if it was running.
    pub fn cancel(&mut self, kind: K) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.kind != kind);
        self.slots.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.slots.clear();
    }

    pub fn is_active(&self, kind: K) -> bool {
        self.slots.iter().any(|s| s.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Milliseconds until `kind` next fires
    pub fn remaining(&self, kind: K) -> Option<f64> {
        self.slots
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.remaining_ms)
    }

    /// Pop the next timer due within `budget` ms.
    ///
    /// Time up to the firing is taken off the budget and every timer. When
    /// nothing is due, the whole budget elapses and `None` is returned. Ties
    /// fire in start order.
    pub fn next_due(&mut self, budget: &mut f64) -> Option<K> {
        let next = self
            .slots
            .iter()
            .enumerate()
            .min_by(|(ia, a), (ib, b)| {
                a.remaining_ms
                    .partial_cmp(&b.remaining_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(ia.cmp(ib))
            })
            .map(|(i, s)| (i, s.remaining_ms));

        match next {
            Some((index, wait)) if wait <= *budget + DUE_EPSILON => {
                let wait = wait.max(0.0);
                self.elapse(wait);
                *budget = (*budget - wait).max(0.0);

                let slot = &mut self.slots[index];
                let kind = slot.kind;
                if slot.repeat {
                    slot.remaining_ms += slot.period_ms;
                } else {
                    self.slots.remove(index);
                }
                Some(kind)
            }
            _ => {
                self.elapse(*budget);
                *budget = 0.0;
                None
            }
        }
    }

    fn elapse(&mut self, ms: f64) {
        for slot in &mut self.slots {
            slot.remaining_ms -= ms;
        }
    }
}
