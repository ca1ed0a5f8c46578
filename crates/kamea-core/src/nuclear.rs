//! Nuclear mutation: repeatedly fold a six-digit ditrune onto its inner
//! digits until it becomes a bigram repeated three times.
//!
//! The iteration is bounded by an explicit step limit and a visited set, so
//! it always terminates. Failing to reach a fixed point is a result, not an
//! error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_ITERATIONS, LATTICE_SIZE, WIDTH};
use crate::error::{KameaError, Result};
use crate::ternary::{Bigram, TernaryString};

/// Standing of a ditrune by its concentric bigrams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyClass {
    /// Core, body and skin are the same bigram.
    Prime,
    /// Core matches body, skin differs.
    Acolyte,
    /// Core differs from body.
    Temple,
}

impl HierarchyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prime => "prime",
            Self::Acolyte => "acolyte",
            Self::Temple => "temple",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    FixedPoint,
    CycleDetected,
    IterationLimit,
}

impl TerminalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedPoint => "fixed_point",
            Self::CycleDetected => "cycle_detected",
            Self::IterationLimit => "iteration_limit",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    pub core_value: TernaryString,
    /// Classification of the input, not of `core_value`.
    pub hierarchy_class: HierarchyClass,
    pub iterations: usize,
    pub terminal_reason: TerminalReason,
}

impl MutationResult {
    /// The repeated bigram of a fixed-point core (its first two digits).
    pub fn core_bigram(&self) -> Option<Bigram> {
        (self.terminal_reason == TerminalReason::FixedPoint)
            .then(|| self.core_value.bigram(1, 2))
            .flatten()
    }
}

fn require_six_digits(s: &TernaryString) -> Result<()> {
    if s.width() != WIDTH {
        return Err(KameaError::InvalidWidth {
            width: s.width(),
            reason: format!("nuclear mutation needs exactly {WIDTH} digits"),
        });
    }
    Ok(())
}

/// Prime, Acolyte or Temple by comparing core (3,4), body (2,5) and skin (1,6).
pub fn classify_hierarchy(s: &TernaryString) -> Result<HierarchyClass> {
    require_six_digits(s)?;
    let d = s.digits();
    let core = Bigram::new(d[2], d[3]);
    let body = Bigram::new(d[1], d[4]);
    let skin = Bigram::new(d[0], d[5]);
    Ok(if core != body {
        HierarchyClass::Temple
    } else if body != skin {
        HierarchyClass::Acolyte
    } else {
        HierarchyClass::Prime
    })
}

/// True when the string is one bigram repeated three times.
pub fn is_fixed_point(s: &TernaryString) -> bool {
    let d = s.digits();
    d.len() == WIDTH && d[0] == d[2] && d[2] == d[4] && d[1] == d[3] && d[3] == d[5]
}

/// One step: digits 1..4 followed by digits 2..5 (0-indexed, end exclusive).
pub fn mutate(s: &TernaryString) -> TernaryString {
    let d = s.digits();
    let mut next = Vec::with_capacity(WIDTH);
    next.extend_from_slice(&d[1..4]);
    next.extend_from_slice(&d[2..5]);
    TernaryString::from_valid(next)
}

/// Reduce `s` to its core, stopping at a fixed point, a repeated value, or
/// after `max_iterations` steps (never more than 729).
pub fn nuclear_mutation(s: &TernaryString, max_iterations: usize) -> Result<MutationResult> {
    require_six_digits(s)?;
    let hierarchy_class = classify_hierarchy(s)?;
    let (core_value, iterations, terminal_reason) =
        iterate(s, max_iterations.min(LATTICE_SIZE), mutate);
    Ok(MutationResult {
        core_value,
        hierarchy_class,
        iterations,
        terminal_reason,
    })
}

/// [`nuclear_mutation`] with the default limit of 10 steps.
pub fn nuclear_mutation_default(s: &TernaryString) -> Result<MutationResult> {
    nuclear_mutation(s, DEFAULT_MAX_ITERATIONS)
}

fn iterate(
    start: &TernaryString,
    max_iterations: usize,
    step: impl Fn(&TernaryString) -> TernaryString,
) -> (TernaryString, usize, TerminalReason) {
    let mut current = start.clone();
    if is_fixed_point(&current) {
        return (current, 0, TerminalReason::FixedPoint);
    }

    let mut visited = HashSet::from([current.clone()]);
    let mut iterations = 0;
    while iterations < max_iterations {
        current = step(&current);
        iterations += 1;
        if is_fixed_point(&current) {
            return (current, iterations, TerminalReason::FixedPoint);
        }
        if !visited.insert(current.clone()) {
            return (current, iterations, TerminalReason::CycleDetected);
        }
    }
    (current, iterations, TerminalReason::IterationLimit)
}
