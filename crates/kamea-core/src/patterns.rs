//! Named edge sequences (stars and unicursal figures) keyed by polygon size.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::polygon::{Edge, skip_cycles};

/// A named, ordered edge list for one polygon size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDefinition {
    pub name: String,
    pub description: String,
    pub edges: Vec<Edge>,
}

impl PatternDefinition {
    pub fn new(name: &str, description: &str, edges: Vec<Edge>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            edges,
        }
    }
}

/// Pattern definitions grouped by number of sides.
#[derive(Clone, Debug, Default)]
pub struct PatternRegistry {
    by_sides: BTreeMap<usize, Vec<PatternDefinition>>,
}

/// Built-in figures for pentagon through enneagon, built once.
pub static BUILTIN_PATTERNS: LazyLock<PatternRegistry> = LazyLock::new(PatternRegistry::builtin);

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            5,
            PatternDefinition::new("Pentagram", "Five-pointed star {5/2}", star(5, 2)),
        );
        registry.register(
            6,
            PatternDefinition::new("Hexagram", "Two interlaced triangles {6/2}", star(6, 2)),
        );
        registry.register(
            6,
            PatternDefinition::new(
                "Unicursal Hexagram",
                "Six-pointed star drawn in one closed stroke",
                closed_walk(&[0, 2, 5, 3, 1, 4]),
            ),
        );
        registry.register(
            7,
            PatternDefinition::new("Heptagram {7/2}", "Obtuse seven-pointed star", star(7, 2)),
        );
        registry.register(
            7,
            PatternDefinition::new("Heptagram {7/3}", "Acute seven-pointed star", star(7, 3)),
        );
        registry.register(
            8,
            PatternDefinition::new(
                "Octagram {8/3}",
                "Eight-pointed star in one stroke",
                star(8, 3),
            ),
        );
        registry.register(
            8,
            PatternDefinition::new("Star of Lakshmi", "Two interlaced squares {8/2}", star(8, 2)),
        );
        let mut enneagram = closed_walk(&[0, 3, 6]);
        enneagram.extend(closed_walk(&[1, 4, 2, 8, 5, 7]));
        registry.register(
            9,
            PatternDefinition::new(
                "Enneagram",
                "Triangle 0-3-6 with the hexad 1-4-2-8-5-7",
                enneagram,
            ),
        );
        registry
    }

    pub fn register(&mut self, sides: usize, pattern: PatternDefinition) {
        self.by_sides.entry(sides).or_default().push(pattern);
    }

    /// Patterns registered for `sides`; empty when none are.
    pub fn for_sides(&self, sides: usize) -> &[PatternDefinition] {
        self.by_sides.get(&sides).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, sides: usize, name: &str) -> Option<&PatternDefinition> {
        self.for_sides(sides)
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Edges of a closed walk through `vertices`, returning to the first.
fn closed_walk(vertices: &[usize]) -> Vec<Edge> {
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&from, &to)| Edge::new(from, to))
        .collect()
}

/// The {sides/skip} star traced cycle by cycle.
fn star(sides: usize, skip: usize) -> Vec<Edge> {
    skip_cycles(sides, skip)
        .iter()
        .flat_map(|cycle| closed_walk(cycle))
        .collect()
}
