//! Apriori frequent-itemset mining
//!
//! Levelwise search: frequent single items first, then candidate k-itemsets
//! built by joining frequent (k−1)-itemsets that share a (k−2)-prefix, pruned
//! by the anti-monotone property (every (k−1)-subset must itself be frequent)
//! before any counting happens. Support counting scans the bit-packed
//! transactions once per level, parallelized across candidates.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::encoder::{EncodedTransactions, ItemBits};
use crate::error::MineError;

/// Output of one mining run: every itemset meeting the support floor,
/// keyed by its sorted vocabulary-index tuple.
#[derive(Debug, Clone)]
pub struct FrequentItemsets {
    /// Vocabulary the index keys refer to (copied from the encoder output).
    pub vocabulary: Vec<String>,
    /// Sorted index tuple → support in [0, 1].
    pub support: HashMap<Vec<u32>, f64>,
    /// Denominator used for every support value.
    pub n_transactions: usize,
}

impl FrequentItemsets {
    pub fn len(&self) -> usize {
        self.support.len()
    }

    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }

    /// Size of the largest frequent itemset, 0 when empty.
    pub fn max_size(&self) -> usize {
        self.support.keys().map(Vec::len).max().unwrap_or(0)
    }

    /// Resolve an index tuple back to item labels.
    pub fn labels(&self, itemset: &[u32]) -> Vec<&str> {
        itemset
            .iter()
            .map(|&i| self.vocabulary[i as usize].as_str())
            .collect()
    }

    /// Itemset keys in lexicographic order, for reproducible iteration.
    pub fn sorted_keys(&self) -> Vec<&Vec<u32>> {
        let mut keys: Vec<_> = self.support.keys().collect();
        keys.sort();
        keys
    }

    /// Itemsets with labels attached, ranked by support descending; ties
    /// break on the sorted label tuple so output order is reproducible.
    pub fn ranked(&self) -> Vec<(Vec<&str>, f64)> {
        let mut ranked: Vec<(Vec<&str>, f64)> = self
            .support
            .iter()
            .map(|(key, &support)| (self.labels(key), support))
            .collect();
        ranked.sort_by(|(la, sa), (lb, sb)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| la.cmp(lb))
        });
        ranked
    }
}

/// Mine every itemset with support ≥ `min_support` (inclusive threshold).
///
/// Returns an empty result, not an error, when no single item is frequent.
pub fn mine(
    encoded: &EncodedTransactions,
    min_support: f64,
) -> Result<FrequentItemsets, MineError> {
    if !(min_support > 0.0 && min_support <= 1.0) {
        return Err(MineError::InvalidThreshold(format!(
            "min_support must be in (0, 1], got {min_support}"
        )));
    }

    let n = encoded.n_transactions();
    let n_items = encoded.n_items();
    let total = n as f64;
    let mut support: HashMap<Vec<u32>, f64> = HashMap::new();

    // Level 1: one counting pass over all transactions.
    let mut item_counts = vec![0usize; n_items];
    for row in &encoded.rows {
        for i in row.iter_ones() {
            item_counts[i] += 1;
        }
    }

    // Kept in lexicographic order so the prefix join below can rely on
    // equal-prefix itemsets being contiguous.
    let mut level: Vec<Vec<u32>> = item_counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count as f64 / total >= min_support)
        .map(|(i, _)| vec![i as u32])
        .collect();
    for itemset in &level {
        support.insert(itemset.clone(), item_counts[itemset[0] as usize] as f64 / total);
    }

    while !level.is_empty() {
        let candidates = {
            let level_set: HashSet<&[u32]> = level.iter().map(Vec::as_slice).collect();
            join_and_prune(&level, &level_set)
        };
        if candidates.is_empty() {
            break;
        }

        // Fan out across candidates; each worker scans the shared rows and
        // owns its own count, merged by collect.
        let counts: Vec<usize> = candidates
            .par_iter()
            .map(|candidate| {
                let mask = ItemBits::from_indices(candidate, n_items);
                encoded
                    .rows
                    .iter()
                    .filter(|row| row.is_superset_of(&mask))
                    .count()
            })
            .collect();

        level = candidates
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count as f64 / total >= min_support)
            .map(|(candidate, count)| {
                support.insert(candidate.clone(), count as f64 / total);
                candidate
            })
            .collect();
    }

    Ok(FrequentItemsets {
        vocabulary: encoded.vocabulary.clone(),
        support,
        n_transactions: n,
    })
}

/// Candidate (k+1)-itemsets from the frequent k-itemsets.
///
/// `level` must be lexicographically sorted. Two itemsets sharing their first
/// k−1 items join into a candidate; the candidate survives only if all of its
/// k-subsets are frequent — pruning before counting is what keeps the scan
/// per level affordable.
fn join_and_prune(level: &[Vec<u32>], level_set: &HashSet<&[u32]>) -> Vec<Vec<u32>> {
    let mut candidates = Vec::new();
    for i in 0..level.len() {
        for j in (i + 1)..level.len() {
            let (a, b) = (&level[i], &level[j]);
            let prefix = a.len() - 1;
            if a[..prefix] != b[..prefix] {
                // Sorted order: no later j shares this prefix either.
                break;
            }
            let mut candidate = a.clone();
            candidate.push(b[prefix]);
            if all_subsets_frequent(&candidate, level_set) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

fn all_subsets_frequent(candidate: &[u32], level_set: &HashSet<&[u32]>) -> bool {
    // The two subsets that formed the join are frequent by construction, but
    // checking every leave-one-out subset keeps the prune exact.
    (0..candidate.len()).all(|skip| {
        let subset: Vec<u32> = candidate
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != skip)
            .map(|(_, &item)| item)
            .collect();
        level_set.contains(subset.as_slice())
    })
}
