//! BasketForge: A Rust CLI application for market basket analysis
//!
//! This library mines frequent itemsets from retail transaction data with
//! the Apriori algorithm and derives association rules scored by support,
//! confidence, lift, leverage and conviction.

pub mod cli;
pub mod data;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod miner;
pub mod rules;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{item_frequencies, load_transactions, TransactionData};
pub use encoder::{encode, EncodedTransactions, ItemBits};
pub use error::MineError;
pub use miner::{mine, FrequentItemsets};
pub use rules::{filter_rules, generate_rules, sort_rules, AssociationRule, Metric};
pub use viz::generate_visualization_report;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
