//! A facelet model of the 3×3×3 cube.
//!
//! The cube is stored as 54 colored facelets. Moves are precomputed
//! permutations of those facelets, and the color analysis only looks at how
//! many facelets carry each color. Whether a state is reachable by turning a
//! real cube is never checked.

pub mod analysis;
pub mod cube;
pub mod face;
pub mod moves;
pub mod notation;
pub mod state;

pub use analysis::{ColorDefectReport, ColorScheme};
pub use cube::{CommandError, CommandOutcome, Cube, MoveCompleted};
pub use face::Face;
pub use moves::{CubeTurn, Direction, MoveDescriptor, MoveKind, Slab, Slice, Turn};
pub use notation::{Command, ParseError, parse_move, parse_sequence};
pub use state::{Color, FaceGrid, FaceletState, GridError};
