use std::collections::BTreeMap;

/// Where attention has dwelt.
///
/// Per-region visit counts and dwell weight, plus the running total. Grows
/// monotonically for the lifetime of one engine; BTreeMaps keep iteration
/// (and therefore salience tie-breaks) deterministic.
#[derive(Clone, Debug, Default)]
pub struct AttentionHistory {
    visits: BTreeMap<String, u32>,
    dwell: BTreeMap<String, f64>,
    total: f64,
}

impl AttentionHistory {
    pub fn record(&mut self, label: &str, weight: f64) {
        *self.visits.entry(label.to_string()).or_insert(0) += 1;
        *self.dwell.entry(label.to_string()).or_insert(0.0) += weight;
        self.total += weight;
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn visit_count(&self, label: &str) -> u32 {
        self.visits.get(label).copied().unwrap_or(0)
    }

    /// This region's share of all accumulated dwell weight. 0 when nothing
    /// has been recorded yet.
    pub fn salience(&self, label: &str) -> f64 {
        if self.total > 0.0 {
            self.dwell.get(label).copied().unwrap_or(0.0) / self.total
        } else {
            0.0
        }
    }

    /// Most salient region, ties broken by label order.
    pub fn most_salient(&self) -> Option<(String, f64)> {
        let mut best: Option<(&String, f64)> = None;
        for label in self.visits.keys() {
            let s = self.salience(label);
            if best.is_none_or(|(_, bs)| s > bs) {
                best = Some((label, s));
            }
        }
        best.map(|(label, s)| (label.clone(), s))
    }

    /// The n most attended regions, salience descending.
    pub fn top(&self, n: usize) -> Vec<(String, f64)> {
        let mut items: Vec<(String, f64)> = self
            .visits
            .keys()
            .map(|label| (label.clone(), self.salience(label)))
            .collect();
        items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        items.truncate(n);
        items
    }

    pub fn visited_labels(&self) -> impl Iterator<Item = &str> {
        self.visits.keys().map(String::as_str)
    }
}
