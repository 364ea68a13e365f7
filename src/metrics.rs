//! Rule-quality metrics as pure functions over support values
//!
//! All inputs are supports in [0, 1]: `support_a` for the antecedent A,
//! `support_c` for the consequent C, `support_union` for A ∪ C. Antecedent
//! and consequent supports come from already-frequent itemsets, so zero
//! supports only arise in degenerate configurations (e.g. a mining run with
//! min_support effectively 0); those are reported rather than producing NaN.

use crate::error::MineError;

/// confidence(A → C) = support(A ∪ C) / support(A)
pub fn confidence(support_a: f64, support_union: f64) -> Result<f64, MineError> {
    if support_a == 0.0 {
        return Err(MineError::DivisionByZero {
            metric: "confidence",
            operand: "antecedent",
        });
    }
    Ok(support_union / support_a)
}

/// lift(A → C) = confidence(A → C) / support(C)
pub fn lift(support_a: f64, support_c: f64, support_union: f64) -> Result<f64, MineError> {
    if support_c == 0.0 {
        return Err(MineError::DivisionByZero {
            metric: "lift",
            operand: "consequent",
        });
    }
    Ok(confidence(support_a, support_union)? / support_c)
}

/// leverage(A → C) = support(A ∪ C) − support(A) · support(C)
pub fn leverage(support_a: f64, support_c: f64, support_union: f64) -> f64 {
    support_union - support_a * support_c
}

/// conviction(A → C) = (1 − support(C)) / (1 − confidence(A → C))
///
/// Defined as +∞ when confidence is exactly 1 (the rule never misses).
pub fn conviction(support_a: f64, support_c: f64, support_union: f64) -> Result<f64, MineError> {
    let conf = confidence(support_a, support_union)?;
    if conf >= 1.0 {
        return Ok(f64::INFINITY);
    }
    Ok((1.0 - support_c) / (1.0 - conf))
}
