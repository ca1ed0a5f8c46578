//! Kamea ternary engine.
//!
//! Ditrunes are six-digit base-3 values (3^6 = 729 of them). This crate
//! converts between integers and digit strings, applies the digit-wise
//! transition `t(a, b) = -(a + b) mod 3` and the reversal / conrune symmetries,
//! classifies cells of the 27x27 Kamea lattice into regions and quadsets,
//! reduces ditrunes to their core by nuclear mutation, and runs transitions
//! along the edges of regular polygons.
//!
//! Zero I/O — pure math engine with no opinions about transport or persistence.

pub mod constants;
pub mod error;
pub mod lattice;
pub mod nuclear;
pub mod patterns;
pub mod polygon;
pub mod ternary;
pub mod transition;

pub use constants::{
    DEFAULT_MAX_ITERATIONS, LATTICE_EXTENT, LATTICE_SIZE, MAX_WIDTH, MIN_SIDES, WIDTH,
};
pub use error::{KameaError, Result};
pub use lattice::{
    Coordinate, QuadsetEntry, REGIONS, Region, check_quadset, classify_region, quadset_entries,
    quadset_values,
};
pub use nuclear::{
    HierarchyClass, MutationResult, TerminalReason, classify_hierarchy, nuclear_mutation,
    nuclear_mutation_default,
};
pub use patterns::{BUILTIN_PATTERNS, PatternDefinition, PatternRegistry};
pub use polygon::{
    Edge, Polygon, Summary, TransitionEngine, TransitionRecord, TransitionReport, Vertex,
    all_skip_groups, build_transition, build_vertices, generate_sequence, skip_cycles,
    skip_groups, special_patterns, summarize,
};
pub use ternary::{Bigram, TernaryString, decimal_to_ternary, max_value, ternary_to_decimal};
pub use transition::{
    Transform, complex_transform, conrune, reversal, transition, transition_decimal,
    transition_str,
};
