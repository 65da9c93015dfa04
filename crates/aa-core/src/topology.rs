use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sigil::Sigil;

/// A graph of sigils keyed by label.
///
/// Backed by a BTreeMap so that uniform choice over all labels is
/// deterministic under a seeded RNG. Edges may reference labels outside the
/// map; such edges are filtered at decision time, never validated at load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    sigils: BTreeMap<String, Sigil>,
}

impl Topology {
    /// Build from an ordered list of records. Duplicate labels overwrite
    /// earlier entries (last write wins).
    pub fn from_sigils(sigils: Vec<Sigil>) -> Self {
        Self {
            sigils: sigils.into_iter().map(|s| (s.label.clone(), s)).collect(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.sigils.contains_key(label)
    }

    pub fn get(&self, label: &str) -> Option<&Sigil> {
        self.sigils.get(label)
    }

    pub fn len(&self) -> usize {
        self.sigils.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sigils.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sigils.keys().map(String::as_str)
    }

    /// Uniform choice among all loaded labels. None if the map is empty.
    pub fn random_position(&self, rng: &mut impl Rng) -> Option<String> {
        if self.sigils.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.sigils.len());
        self.sigils.keys().nth(idx).cloned()
    }

    /// The sub-sequence of a sigil's edges that resolve to loaded labels.
    pub fn traversable_edges(&self, sigil: &Sigil) -> Vec<String> {
        sigil
            .edges
            .iter()
            .filter(|e| self.sigils.contains_key(*e))
            .cloned()
            .collect()
    }

    /// Weighted choice among candidates, weights = candidate gravities
    /// normalized by their sum. A non-positive weight sum falls back to a
    /// uniform choice.
    pub fn choose_by_gravity(&self, candidates: &[String], rng: &mut impl Rng) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }
        let weights: Vec<f64> = candidates
            .iter()
            .map(|c| self.get(c).map_or(0.0, |s| s.gravity))
            .collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            let idx = rng.random_range(0..candidates.len());
            return Some(candidates[idx].clone());
        }
        let mut roll = rng.random::<f64>() * total;
        for (label, weight) in candidates.iter().zip(&weights) {
            roll -= weight;
            if roll <= 0.0 {
                return Some(label.clone());
            }
        }
        candidates.last().cloned()
    }
}
