//! BasketForge: Market Basket Analysis CLI using the Apriori algorithm
//!
//! This is the main entrypoint that orchestrates data loading, itemset
//! mining, rule generation and visualization.

use anyhow::Result;
use basketforge::{
    encode, filter_rules, generate_rules, item_frequencies, load_transactions, mine, sort_rules,
    viz, Args,
};
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.verbose {
        println!("BasketForge - Market Basket Analysis using Apriori");
        println!("==================================================\n");
    }

    run_full_pipeline(&args)?;

    Ok(())
}

/// Run the complete analysis pipeline
fn run_full_pipeline(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    // Load and clean transaction data
    if args.verbose {
        println!("Loading transactions from: {}", args.input);
    }
    let data = load_transactions(&args.input)?;

    if args.verbose {
        println!("Rows read: {}", data.n_raw_rows);
        println!("Invoices excluded by cleaning: {}", data.n_invalid_invoices);
        println!("Transactions prepared: {}", data.transactions.len());
        println!("Unique products: {}", data.n_unique_items());
    }

    // Encode into the boolean incidence representation
    let encoded = encode(&data.transactions)?;
    if args.verbose {
        println!(
            "\nEncoded {} transactions over {} items",
            encoded.n_transactions(),
            encoded.n_items()
        );
        println!("Mining with min_support = {}...", args.min_support);
    }

    // Mine frequent itemsets
    let mining_start = Instant::now();
    let itemsets = mine(&encoded, args.min_support)?;
    if args.verbose {
        println!(
            "Found {} frequent itemsets in {:.2?}",
            itemsets.len(),
            mining_start.elapsed()
        );
        println!(
            "Generating rules with {} >= {}...",
            args.metric, args.min_threshold
        );
    }

    // Generate and rank association rules
    let mut rules = generate_rules(&itemsets, args.metric, args.min_threshold)?;
    sort_rules(&mut rules, args.metric);

    if args.verbose {
        println!("Generated {} rules", rules.len());

        // The composed strong-rule filter from the reference analysis
        let strong = filter_rules(&rules, |r| r.lift > 1.2 && r.confidence > 0.5);
        println!(
            "Strong rules (lift > 1.2 and confidence > 0.5): {}",
            strong.len()
        );
    }

    // Charts and console reports
    let frequencies = item_frequencies(&data.transactions);
    viz::generate_visualization_report(
        &frequencies,
        &itemsets,
        &rules,
        args.metric,
        &args.output,
        args.top,
    )?;

    println!("\nTotal analysis time: {:.2?}", start_time.elapsed());

    Ok(())
}
