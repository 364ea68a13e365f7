//! Visualization functions using Plotters for basket analysis
//!
//! Chart set mirrors the classic market-basket workflow: item frequency
//! bars, a support/confidence scatter sized by lift, top rules by the chosen
//! metric, and a directed item graph of the strongest rules.

use plotters::prelude::*;

use crate::miner::FrequentItemsets;
use crate::rules::{sort_rules, AssociationRule, Metric};

/// Color palette cycled across bars and graph edges
const CHART_COLORS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),
    RGBColor(59, 82, 139),
    RGBColor(33, 145, 140),
    RGBColor(94, 201, 98),
    RGBColor(253, 231, 37),
];

/// Bar chart of the `top_n` most frequent items (by basket count).
pub fn create_item_frequency_chart(
    frequencies: &[(String, usize)],
    output_path: &str,
    top_n: usize,
) -> crate::Result<()> {
    let top: Vec<&(String, usize)> = frequencies.iter().take(top_n).collect();
    if top.is_empty() {
        anyhow::bail!("No item frequencies to plot");
    }
    let max_count = top[0].1 as f64;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top {} Items by Basket Count", top.len()),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(top.len() as f64), 0f64..(max_count * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Item Rank")
        .y_desc("Baskets Containing Item")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (rank, (_, count)) in top.iter().enumerate() {
        let color = &CHART_COLORS[rank % CHART_COLORS.len()];
        chart.draw_series(std::iter::once(Rectangle::new(
            [
                (rank as f64 + 0.1, 0.0),
                (rank as f64 + 0.9, *count as f64),
            ],
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Item frequency chart saved to: {}", output_path);
    Ok(())
}

/// Scatter plot of rules: support (x) vs confidence (y), point size and
/// shade keyed by lift.
pub fn create_rule_scatter(rules: &[AssociationRule], output_path: &str) -> crate::Result<()> {
    if rules.is_empty() {
        anyhow::bail!("No rules to plot");
    }

    let support_max = rules.iter().map(|r| r.support).fold(0.0f64, f64::max);
    let lift_max = rules.iter().map(|r| r.lift).fold(0.0f64, f64::max).max(1e-9);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Association Rules: Support vs Confidence (Size = Lift)",
            ("sans-serif", 26),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(support_max * 1.1).max(0.01), 0f64..1.05f64)?;

    chart
        .configure_mesh()
        .x_desc("Support")
        .y_desc("Confidence")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for rule in rules {
        let intensity = (rule.lift / lift_max).clamp(0.0, 1.0);
        let radius = 3 + (intensity * 7.0) as i32;
        let color = RGBColor(
            (30.0 + 200.0 * intensity) as u8,
            40,
            (220.0 - 180.0 * intensity) as u8,
        );
        chart.draw_series(std::iter::once(Circle::new(
            (rule.support, rule.confidence),
            radius,
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Rule scatter plot saved to: {}", output_path);
    Ok(())
}

/// Bar chart of the `top_n` rules ranked by `metric`; bar order matches the
/// console rule table.
pub fn create_top_rules_chart(
    rules: &[AssociationRule],
    metric: Metric,
    output_path: &str,
    top_n: usize,
) -> crate::Result<()> {
    if rules.is_empty() {
        anyhow::bail!("No rules to plot");
    }
    let mut ranked = rules.to_vec();
    sort_rules(&mut ranked, metric);
    ranked.truncate(top_n);

    let max_value = ranked
        .iter()
        .map(|r| r.metric(metric))
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max)
        .max(1e-9);

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top {} Rules by {}", ranked.len(), metric),
            ("sans-serif", 28),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(ranked.len() as f64), 0f64..(max_value * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Rule Rank")
        .y_desc(format!("{}", metric))
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (rank, rule) in ranked.iter().enumerate() {
        let value = rule.metric(metric).min(max_value);
        let color = &CHART_COLORS[rank % CHART_COLORS.len()];
        chart.draw_series(std::iter::once(Rectangle::new(
            [(rank as f64 + 0.1, 0.0), (rank as f64 + 0.9, value)],
            color.filled(),
        )))?;
    }

    root.present()?;
    println!("Top rules chart saved to: {}", output_path);
    Ok(())
}

/// Directed item graph of the strongest rules: nodes on a circle, one edge
/// per antecedent-item → consequent-item pair, edge shade keyed by lift.
pub fn create_rule_network(
    rules: &[AssociationRule],
    output_path: &str,
    top_n: usize,
) -> crate::Result<()> {
    if rules.is_empty() {
        anyhow::bail!("No rules to plot");
    }
    let mut ranked = rules.to_vec();
    sort_rules(&mut ranked, Metric::Lift);
    ranked.truncate(top_n);

    // Distinct items of the selected rules, laid out on a circle.
    let mut nodes: Vec<&str> = ranked
        .iter()
        .flat_map(|r| r.antecedent.iter().chain(r.consequent.iter()))
        .map(String::as_str)
        .collect();
    nodes.sort_unstable();
    nodes.dedup();

    let position = |node: &str| -> (f64, f64) {
        let index = nodes.binary_search(&node).unwrap_or(0);
        let angle = 2.0 * std::f64::consts::PI * index as f64 / nodes.len() as f64;
        (angle.cos(), angle.sin())
    };

    let lift_max = ranked.iter().map(|r| r.lift).fold(0.0f64, f64::max).max(1e-9);

    let root = BitMapBackend::new(output_path, (1000, 1000)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Association Rule Network (Top {} by Lift)", ranked.len()),
            ("sans-serif", 28),
        )
        .margin(20)
        .build_cartesian_2d(-1.4f64..1.4f64, -1.4f64..1.4f64)?;

    for rule in &ranked {
        let intensity = (rule.lift / lift_max).clamp(0.2, 1.0);
        let shade = (200.0 * (1.0 - intensity)) as u8;
        let edge_color = RGBColor(shade, shade, shade);
        for antecedent in &rule.antecedent {
            for consequent in &rule.consequent {
                let (x1, y1) = position(antecedent);
                let (x2, y2) = position(consequent);
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(x1, y1), (x2, y2)],
                    edge_color.stroke_width(1 + (intensity * 2.0) as u32),
                )))?;
                // mark the head of the edge near the consequent
                let (hx, hy) = (x1 + 0.85 * (x2 - x1), y1 + 0.85 * (y2 - y1));
                chart.draw_series(std::iter::once(Circle::new(
                    (hx, hy),
                    3,
                    edge_color.filled(),
                )))?;
            }
        }
    }

    for &node in &nodes {
        let (x, y) = position(node);
        chart.draw_series(std::iter::once(Circle::new(
            (x, y),
            8,
            RGBColor(110, 200, 110).filled(),
        )))?;
        let label: String = node.chars().take(24).collect();
        chart.draw_series(std::iter::once(Text::new(
            label,
            (x * 1.12, y * 1.12),
            ("sans-serif", 13),
        )))?;
    }

    root.present()?;
    println!("Rule network graph saved to: {}", output_path);
    Ok(())
}

/// Print a frequent-itemset summary to the console.
pub fn print_itemset_summary(itemsets: &FrequentItemsets, top_n: usize) {
    println!("\n=== Frequent Itemsets ===");
    println!("Transactions analyzed: {}", itemsets.n_transactions);
    println!("Frequent itemsets found: {}", itemsets.len());
    println!("Largest itemset size: {}", itemsets.max_size());

    println!("\nTop itemsets by support:");
    println!("  Support | Itemset");
    println!("  --------|--------");
    for (labels, support) in itemsets.ranked().into_iter().take(top_n) {
        println!("  {:7.4} | {{{}}}", support, labels.join(", "));
    }
}

/// Print the top rules with all metrics as a console table.
pub fn print_rule_table(rules: &[AssociationRule], metric: Metric, top_n: usize) {
    println!("\n=== Association Rules (ranked by {}) ===", metric);
    if rules.is_empty() {
        println!("No rules met the threshold.");
        return;
    }
    let mut ranked = rules.to_vec();
    sort_rules(&mut ranked, metric);

    println!("  Support | Confidence |   Lift | Leverage | Conviction | Rule");
    println!("  --------|------------|--------|----------|------------|-----");
    for rule in ranked.iter().take(top_n) {
        println!(
            "  {:7.4} | {:10.4} | {:6.3} | {:8.4} | {:10.3} | {}",
            rule.support,
            rule.confidence,
            rule.lift,
            rule.leverage,
            rule.conviction,
            rule.label()
        );
    }
}

/// Generate the full chart set plus console reports.
pub fn generate_visualization_report(
    frequencies: &[(String, usize)],
    itemsets: &FrequentItemsets,
    rules: &[AssociationRule],
    metric: Metric,
    base_output_path: &str,
    top_n: usize,
) -> crate::Result<()> {
    create_item_frequency_chart(
        frequencies,
        &base_output_path.replace(".png", "_items.png"),
        top_n,
    )?;

    print_itemset_summary(itemsets, top_n);
    print_rule_table(rules, metric, top_n);

    if !rules.is_empty() {
        create_rule_scatter(rules, base_output_path)?;
        create_top_rules_chart(
            rules,
            metric,
            &base_output_path.replace(".png", "_top_rules.png"),
            top_n,
        )?;
        create_rule_network(rules, &base_output_path.replace(".png", "_network.png"), 50)?;
    } else {
        println!("Skipping rule charts: no rules to draw.");
    }

    Ok(())
}
