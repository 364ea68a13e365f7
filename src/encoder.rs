//! Transaction encoding: label transactions to a boolean incidence form
//!
//! Builds a deterministic vocabulary (sorted distinct item labels) and
//! bit-packs each transaction into one bit per vocabulary item, so that the
//! miner's "does this transaction contain the candidate" test is a word-wise
//! AND/compare instead of a set intersection.

use std::collections::{BTreeSet, HashMap};

use crate::error::MineError;

/// Bit-packed set of vocabulary indices (one bit per item, u64 words).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBits {
    words: Vec<u64>,
}

impl ItemBits {
    /// Empty set over a vocabulary of `n_items` items.
    pub fn new(n_items: usize) -> Self {
        Self {
            words: vec![0u64; n_items.div_ceil(64)],
        }
    }

    pub fn from_indices(indices: &[u32], n_items: usize) -> Self {
        let mut bits = Self::new(n_items);
        for &i in indices {
            bits.insert(i as usize);
        }
        bits
    }

    pub fn insert(&mut self, index: usize) {
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    pub fn contains(&self, index: usize) -> bool {
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// True iff every bit of `other` is set in `self`.
    pub fn is_superset_of(&self, other: &ItemBits) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & b == *b)
    }

    /// Indices of the set bits, ascending.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            (0..64)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| w * 64 + bit)
        })
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// The encoded incidence representation: fixed vocabulary plus one bitset
/// row per transaction. Immutable once built; a single mining run reads it.
#[derive(Debug, Clone)]
pub struct EncodedTransactions {
    /// Distinct item labels in sorted order; index = bit position.
    pub vocabulary: Vec<String>,
    /// One bitset per input transaction, same order as the input.
    pub rows: Vec<ItemBits>,
}

impl EncodedTransactions {
    pub fn n_transactions(&self) -> usize {
        self.rows.len()
    }

    pub fn n_items(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Encode raw label transactions into the boolean incidence form.
///
/// Duplicate labels within a transaction collapse; empty transactions are
/// kept (they count toward the support denominator). Fails if the collection
/// itself is empty, since no support can be computed over zero transactions.
pub fn encode(transactions: &[Vec<String>]) -> Result<EncodedTransactions, MineError> {
    if transactions.is_empty() {
        return Err(MineError::Validation(
            "transaction collection is empty".to_string(),
        ));
    }

    // Sorted distinct labels give a stable vocabulary across runs and
    // independent of input order.
    let vocabulary: Vec<String> = transactions
        .iter()
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();

    let index_of: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect();

    let n_items = vocabulary.len();
    let rows = transactions
        .iter()
        .map(|transaction| {
            let mut bits = ItemBits::new(n_items);
            for label in transaction {
                bits.insert(index_of[label.as_str()]);
            }
            bits
        })
        .collect();

    Ok(EncodedTransactions { vocabulary, rows })
}
