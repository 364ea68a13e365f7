//! Command-line interface definitions and argument parsing

use clap::Parser;

use crate::rules::Metric;

/// Market basket analysis CLI: Apriori frequent itemsets and association rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "OnlineRetail.csv")]
    pub input: String,

    /// Minimum support for a frequent itemset, in (0, 1]
    #[arg(short = 's', long, default_value = "0.02")]
    pub min_support: f64,

    /// Metric used to filter and rank rules
    #[arg(short, long, value_enum, default_value_t = Metric::Lift)]
    pub metric: Metric,

    /// Floor on the chosen metric (e.g. 1.0 is the no-correlation baseline
    /// for lift)
    #[arg(short = 't', long, default_value = "1.0")]
    pub min_threshold: f64,

    /// Output path for the rules scatter plot; companion charts derive
    /// their names from it
    #[arg(short, long, default_value = "rules_scatter.png")]
    pub output: String,

    /// How many itemsets/rules to show in tables and bar charts
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
