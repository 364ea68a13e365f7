//! Association rule generation from mined frequent itemsets
//!
//! Every frequent itemset of size ≥ 2 is split into every non-empty
//! antecedent / consequent pair. Both halves of a split are themselves
//! frequent (closure), so their supports are looked up from the mining
//! output, never recounted.

use clap::ValueEnum;
use rayon::prelude::*;

use crate::error::MineError;
use crate::metrics;
use crate::miner::FrequentItemsets;

/// The metric a rule is filtered or ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    Support,
    Confidence,
    Lift,
    Leverage,
    Conviction,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
            Metric::Leverage => "leverage",
            Metric::Conviction => "conviction",
        };
        write!(f, "{name}")
    }
}

/// One antecedent → consequent rule with all quality metrics populated.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    /// Sorted item labels on the left-hand side.
    pub antecedent: Vec<String>,
    /// Sorted item labels on the right-hand side.
    pub consequent: Vec<String>,
    /// Support of antecedent ∪ consequent.
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: f64,
}

impl AssociationRule {
    /// Value of the given metric for this rule.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Support => self.support,
            Metric::Confidence => self.confidence,
            Metric::Lift => self.lift,
            Metric::Leverage => self.leverage,
            Metric::Conviction => self.conviction,
        }
    }

    /// Display form, e.g. `{milk} -> {bread}`; also the deterministic
    /// tie-break key when sorting.
    pub fn label(&self) -> String {
        format!(
            "{{{}}} -> {{{}}}",
            self.antecedent.join(", "),
            self.consequent.join(", ")
        )
    }
}

impl std::fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Generate every rule whose chosen metric is ≥ `min_threshold`.
///
/// Output order is deterministic for a given input (itemsets are visited in
/// sorted key order) but carries no ranking; use [`sort_rules`] for that.
pub fn generate_rules(
    itemsets: &FrequentItemsets,
    metric: Metric,
    min_threshold: f64,
) -> Result<Vec<AssociationRule>, MineError> {
    if min_threshold < 0.0 {
        return Err(MineError::InvalidThreshold(format!(
            "min_threshold must be non-negative, got {min_threshold}"
        )));
    }

    let keys: Vec<&Vec<u32>> = itemsets
        .sorted_keys()
        .into_iter()
        .filter(|key| key.len() >= 2)
        .collect();

    // Each itemset's splits are independent; shard across itemsets and
    // merge the per-itemset rule vectors.
    let per_itemset: Vec<Vec<AssociationRule>> = keys
        .par_iter()
        .map(|itemset| rules_for_itemset(itemsets, itemset, metric, min_threshold))
        .collect::<Result<_, MineError>>()?;

    Ok(per_itemset.into_iter().flatten().collect())
}

fn rules_for_itemset(
    itemsets: &FrequentItemsets,
    itemset: &[u32],
    metric: Metric,
    min_threshold: f64,
) -> Result<Vec<AssociationRule>, MineError> {
    let support_union = itemsets.support[itemset];
    let n = itemset.len();
    let mut rules = Vec::new();

    // Every non-empty proper subset of positions forms an antecedent.
    for mask in 1..((1u32 << n) - 1) {
        let mut antecedent = Vec::new();
        let mut consequent = Vec::new();
        for (pos, &item) in itemset.iter().enumerate() {
            if mask & (1 << pos) != 0 {
                antecedent.push(item);
            } else {
                consequent.push(item);
            }
        }

        // Closure guarantees both sides are in the map; a miss can only
        // happen in degenerate configurations and surfaces as a zero
        // support, which the metric layer reports.
        let support_a = itemsets.support.get(&antecedent).copied().unwrap_or(0.0);
        let support_c = itemsets.support.get(&consequent).copied().unwrap_or(0.0);

        let confidence = metrics::confidence(support_a, support_union)?;
        let lift = metrics::lift(support_a, support_c, support_union)?;
        let leverage = metrics::leverage(support_a, support_c, support_union);
        let conviction = metrics::conviction(support_a, support_c, support_union)?;

        let rule = AssociationRule {
            antecedent: to_labels(itemsets, &antecedent),
            consequent: to_labels(itemsets, &consequent),
            support: support_union,
            confidence,
            lift,
            leverage,
            conviction,
        };

        if rule.metric(metric) >= min_threshold {
            rules.push(rule);
        }
    }

    Ok(rules)
}

fn to_labels(itemsets: &FrequentItemsets, indices: &[u32]) -> Vec<String> {
    indices
        .iter()
        .map(|&i| itemsets.vocabulary[i as usize].clone())
        .collect()
}

/// Sort rules by the given metric, descending; ties break on the rule's
/// display string so repeated runs render identically.
pub fn sort_rules(rules: &mut [AssociationRule], metric: Metric) {
    rules.sort_by(|a, b| {
        b.metric(metric)
            .partial_cmp(&a.metric(metric))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label().cmp(&b.label()))
    });
}

/// Keep the rules matching an arbitrary predicate over the computed metrics.
///
/// Composed thresholds (e.g. lift above 1.2 AND confidence above 0.5) belong
/// here, downstream of generation, not inside the mining engine.
pub fn filter_rules<F>(rules: &[AssociationRule], predicate: F) -> Vec<AssociationRule>
where
    F: Fn(&AssociationRule) -> bool,
{
    rules.iter().filter(|rule| predicate(rule)).cloned().collect()
}
