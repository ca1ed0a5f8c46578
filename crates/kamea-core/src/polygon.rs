//! Polygon transitions: vertex sets, skip-group edge cycles, per-edge
//! transition records and their summary statistics.
//!
//! Every edge endpoint value is converted to a ditrune, the two are combined
//! with [`transition`], and the result is folded back to an integer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_SIDES, WIDTH};
use crate::error::{KameaError, Result};
use crate::patterns::{BUILTIN_PATTERNS, PatternDefinition, PatternRegistry};
use crate::ternary::{TernaryString, decimal_to_ternary, validate_width};
use crate::transition::transition;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub index: usize,
    pub value: i64,
}

/// Ordered pair of vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Both endpoints reduced modulo `sides`.
    pub fn normalized(self, sides: usize) -> Self {
        Self {
            from: self.from % sides,
            to: self.to % sides,
        }
    }
}

/// The transition across one edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from_index: usize,
    pub to_index: usize,
    pub from_value: i64,
    pub to_value: i64,
    pub from_ternary: TernaryString,
    pub to_ternary: TernaryString,
    pub result_ternary: TernaryString,
    pub result_decimal: u64,
    /// `(to_index - from_index) mod sides`
    pub skip: usize,
}

/// Aggregate of `result_decimal` over a list of transitions. All zero when
/// the list is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    /// Wide enough for any count of 40-digit results.
    pub sum: u128,
    pub mean: f64,
    pub min: u64,
    pub max: u64,
    pub unique_count: usize,
}

fn check_sides(sides: usize) -> Result<()> {
    if sides < MIN_SIDES {
        return Err(KameaError::InvalidSides {
            sides,
            min: MIN_SIDES,
        });
    }
    Ok(())
}

/// Vertices `0..sides`. Without `values` each vertex holds its own index.
pub fn build_vertices(sides: usize, values: Option<&[i64]>) -> Result<Vec<Vertex>> {
    check_sides(sides)?;
    match values {
        None => Ok((0..sides)
            .map(|index| Vertex {
                index,
                value: index as i64,
            })
            .collect()),
        Some(values) if values.len() != sides => Err(KameaError::ValueCountMismatch {
            sides,
            supplied: values.len(),
        }),
        Some(values) => Ok(values
            .iter()
            .enumerate()
            .map(|(index, &value)| Vertex { index, value })
            .collect()),
    }
}

/// An owned vertex set. Only [`Polygon::new`] builds one, so it always has
/// at least three vertices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Polygon {
    vertices: Vec<Vertex>,
}

impl Polygon {
    pub fn new(sides: usize, values: Option<&[i64]>) -> Result<Self> {
        Ok(Self {
            vertices: build_vertices(sides, values)?,
        })
    }

    pub fn sides(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Value at `index`, taken modulo `sides`.
    pub fn value_of(&self, index: usize) -> i64 {
        self.vertices[index % self.sides()].value
    }
}

pub fn gcd(a: usize, b: usize) -> usize {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Edges `(i, (i + skip) mod sides)` for every vertex, in index order.
///
/// They split into `gcd(skip, sides)` disjoint cycles of
/// `sides / gcd(skip, sides)` edges each; see [`skip_cycles`].
pub fn skip_groups(sides: usize, skip: usize) -> Vec<Edge> {
    if sides == 0 {
        return Vec::new();
    }
    let skip = skip % sides;
    (0..sides)
        .map(|i| Edge::new(i, (i + skip) % sides))
        .collect()
}

/// The cycles of a skip group as vertex lists, each starting at its
/// smallest index.
pub fn skip_cycles(sides: usize, skip: usize) -> Vec<Vec<usize>> {
    if sides == 0 {
        return Vec::new();
    }
    let skip = skip % sides;
    let cycles = gcd(skip, sides);
    (0..cycles)
        .map(|start| {
            let mut cycle = vec![start];
            let mut next = (start + skip) % sides;
            while next != start {
                cycle.push(next);
                next = (next + skip) % sides;
            }
            cycle
        })
        .collect()
}

/// Every distinct skip group, skips `1..=sides/2`.
pub fn all_skip_groups(sides: usize) -> Vec<(usize, Vec<Edge>)> {
    (1..=sides / 2)
        .map(|skip| (skip, skip_groups(sides, skip)))
        .collect()
}

/// Fold transition results into count, sum, mean, extremes and distinct values.
pub fn summarize(transitions: &[TransitionRecord]) -> Summary {
    if transitions.is_empty() {
        return Summary::default();
    }
    let results = transitions.iter().map(|t| t.result_decimal);
    let sum: u128 = results.clone().map(u128::from).sum();
    let count = transitions.len();
    Summary {
        count,
        sum,
        mean: sum as f64 / count as f64,
        min: results.clone().min().unwrap_or(0),
        max: results.clone().max().unwrap_or(0),
        unique_count: results.collect::<BTreeSet<_>>().len(),
    }
}

/// A generated sequence with its label and summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionReport {
    pub sides: usize,
    pub label: String,
    pub transitions: Vec<TransitionRecord>,
    pub summary: Summary,
}

/// Converts vertex values at a fixed width and looks patterns up in a
/// borrowed registry.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEngine<'a> {
    width: usize,
    patterns: &'a PatternRegistry,
}

impl Default for TransitionEngine<'static> {
    fn default() -> Self {
        Self {
            width: WIDTH,
            patterns: &BUILTIN_PATTERNS,
        }
    }
}

impl TransitionEngine<'static> {
    pub fn new(width: usize) -> Result<Self> {
        validate_width(width)?;
        Ok(Self {
            width,
            patterns: &BUILTIN_PATTERNS,
        })
    }
}

impl<'a> TransitionEngine<'a> {
    pub fn with_patterns<'b>(self, patterns: &'b PatternRegistry) -> TransitionEngine<'b> {
        TransitionEngine {
            width: self.width,
            patterns,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn special_patterns(&self, sides: usize) -> &'a [PatternDefinition] {
        self.patterns.for_sides(sides)
    }

    /// Transition across `from_index → to_index`, both taken modulo the
    /// vertex count.
    pub fn build_transition(
        &self,
        vertices: &[Vertex],
        from_index: usize,
        to_index: usize,
    ) -> Result<TransitionRecord> {
        let sides = vertices.len();
        check_sides(sides)?;
        let from_index = from_index % sides;
        let to_index = to_index % sides;
        let from_value = vertices[from_index].value;
        let to_value = vertices[to_index].value;

        let from_ternary = decimal_to_ternary(from_value, self.width)?;
        let to_ternary = decimal_to_ternary(to_value, self.width)?;
        let result_ternary = transition(&from_ternary, &to_ternary);
        let result_decimal = result_ternary.to_decimal();

        Ok(TransitionRecord {
            from_index,
            to_index,
            from_value,
            to_value,
            from_ternary,
            to_ternary,
            result_ternary,
            result_decimal,
            skip: (to_index + sides - from_index) % sides,
        })
    }

    /// One record per edge, in edge order. Fails on the first bad vertex value.
    pub fn generate_sequence(
        &self,
        vertices: &[Vertex],
        edges: &[Edge],
    ) -> Result<Vec<TransitionRecord>> {
        edges
            .iter()
            .map(|e| self.build_transition(vertices, e.from, e.to))
            .collect()
    }

    pub fn skip_report(&self, polygon: &Polygon, skip: usize) -> Result<TransitionReport> {
        let sides = polygon.sides();
        let edges = skip_groups(sides, skip);
        self.report(polygon, format!("skip {}", skip % sides), &edges)
    }

    /// Report for a named pattern, `None` if no such pattern is registered.
    pub fn pattern_report(
        &self,
        polygon: &Polygon,
        name: &str,
    ) -> Result<Option<TransitionReport>> {
        match self.patterns.find(polygon.sides(), name) {
            Some(pattern) => self
                .report(polygon, pattern.name.clone(), &pattern.edges)
                .map(Some),
            None => Ok(None),
        }
    }

    fn report(&self, polygon: &Polygon, label: String, edges: &[Edge]) -> Result<TransitionReport> {
        let transitions = self.generate_sequence(polygon.vertices(), edges)?;
        let summary = summarize(&transitions);
        Ok(TransitionReport {
            sides: polygon.sides(),
            label,
            transitions,
            summary,
        })
    }
}

/// Named patterns from the built-in registry.
pub fn special_patterns(sides: usize) -> &'static [PatternDefinition] {
    BUILTIN_PATTERNS.for_sides(sides)
}

/// [`TransitionEngine::build_transition`] at the canonical width.
pub fn build_transition(
    vertices: &[Vertex],
    from_index: usize,
    to_index: usize,
) -> Result<TransitionRecord> {
    TransitionEngine::default().build_transition(vertices, from_index, to_index)
}

/// [`TransitionEngine::generate_sequence`] at the canonical width.
pub fn generate_sequence(vertices: &[Vertex], edges: &[Edge]) -> Result<Vec<TransitionRecord>> {
    TransitionEngine::default().generate_sequence(vertices, edges)
}
