/// Canonical ditrune width: six ternary digits.
pub const WIDTH: usize = 6;

/// Number of distinct ditrunes at the canonical width (3^6).
pub const LATTICE_SIZE: usize = 729;

/// Widest digit string whose value still fits in a `u64` (3^40 < 2^64).
pub const MAX_WIDTH: usize = 40;

/// Half-extent of the Kamea lattice: coordinates live in [-13, 13] on both axes.
pub const LATTICE_EXTENT: i32 = 13;

/// Half-extent of the central 9x9 block of the lattice.
pub const BLOCK_EXTENT: i32 = 4;

/// Default step limit for nuclear mutation.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Fewest sides a polygon may have.
pub const MIN_SIDES: usize = 3;
