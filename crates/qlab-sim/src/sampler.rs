//! Outcome distributions and multinomial shot sampling.

use std::collections::BTreeMap;

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{SimError, SimResult};
use crate::statevector::StateVector;

/// Format a basis index as a bitstring of `num_qubits` characters.
///
/// Qubit 0 is the rightmost character.
pub fn bitstring(index: usize, num_qubits: usize) -> String {
    format!("{index:0num_qubits$b}")
}

/// Check a requested shot count and narrow it to `u32`.
pub fn validate_shots(shots: i64) -> SimResult<u32> {
    u32::try_from(shots)
        .ok()
        .filter(|&s| s > 0)
        .ok_or(SimError::InvalidShots(shots))
}

/// Exact outcome probabilities keyed by bitstring.
///
/// Entries below the reporting threshold are omitted, so the retained values
/// sum to at most 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityDistribution(BTreeMap<String, f64>);

impl ProbabilityDistribution {
    /// Derive the reported distribution of a state.
    pub fn from_statevector(state: &StateVector, epsilon: f64) -> Self {
        let n = state.num_qubits();
        Self(
            state
                .amplitudes()
                .iter()
                .enumerate()
                .map(|(i, a)| (i, a.norm_sqr()))
                .filter(|&(_, p)| p > epsilon)
                .map(|(i, p)| (bitstring(i, n), p))
                .collect(),
        )
    }

    /// Probability of a bitstring; 0 for omitted outcomes.
    pub fn get(&self, bitstring: &str) -> f64 {
        self.0.get(bitstring).copied().unwrap_or(0.0)
    }

    /// Number of retained outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no outcome was retained.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of retained probabilities.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterate over outcomes in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.0
    }
}

/// Sampled outcome counts keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShotCounts(BTreeMap<String, u64>);

impl ShotCounts {
    /// Count for a bitstring; 0 if it never occurred.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over outcomes in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Most frequent outcome, ties broken by bitstring order.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Observed frequency `count / total` of each outcome.
    #[allow(clippy::cast_precision_loss)]
    pub fn frequencies(&self) -> BTreeMap<String, f64> {
        let total = self.total().max(1) as f64;
        self.0
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total))
            .collect()
    }

    /// Consume into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, u64> {
        self.0
    }
}

/// Draw `shots` independent outcomes from unnormalized `weights` over the
/// basis indices of an `num_qubits`-qubit register.
///
/// The weights are used at full precision; nothing is dropped below the
/// reporting threshold.
pub fn sample_counts<R: Rng + ?Sized>(
    weights: &[f64],
    num_qubits: usize,
    shots: u32,
    rng: &mut R,
) -> SimResult<ShotCounts> {
    if shots == 0 {
        return Err(SimError::InvalidShots(0));
    }
    let dist =
        WeightedIndex::new(weights).map_err(|e| SimError::InvalidDistribution(e.to_string()))?;

    let mut tally: FxHashMap<usize, u64> = FxHashMap::default();
    for _ in 0..shots {
        *tally.entry(dist.sample(rng)).or_insert(0) += 1;
    }

    Ok(ShotCounts(
        tally
            .into_iter()
            .map(|(i, count)| (bitstring(i, num_qubits), count))
            .collect(),
    ))
}
