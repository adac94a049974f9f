use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    analysis::{self, ColorDefectReport, ColorScheme},
    face::Face,
    moves::{self, MoveDescriptor},
    notation::{self, Command, ParseError},
    state::{Color, FaceletState, GridError},
};

/// Sent after every applied move.
///
/// A slab turn sends one event for the slab as written, not one per primitive
/// turn it is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCompleted {
    pub descriptor: MoveDescriptor,
    pub solved: bool,
}

/// What a command line did to the cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied(Vec<MoveCompleted>),
    CleanSlate,
}

/// A command line stopped at a token that is not valid notation. The moves
/// before it stay applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} (after {applied} applied move(s))")]
pub struct CommandError {
    pub applied: usize,
    pub source: ParseError,
}

/// The live cube together with the state it was loaded from.
#[derive(Debug)]
pub struct Cube<C> {
    live: FaceletState<C>,
    baseline: FaceletState<C>,
    subscribers: Vec<Sender<MoveCompleted>>,
}

impl<C: Color> Cube<C> {
    pub fn new(state: FaceletState<C>) -> Self {
        Cube {
            baseline: state.clone(),
            live: state,
            subscribers: Vec::new(),
        }
    }

    /// Loads a cube from a persisted grid of six faces, each three rows of
    /// three colors.
    ///
    /// # Errors
    ///
    /// Fails if the grid is not 6×3×3.
    pub fn from_rows(rows: Vec<Vec<Vec<C>>>) -> Result<Self, GridError> {
        Ok(Cube::new(FaceletState::from_rows(rows)?))
    }

    /// A solved cube with one color per face in [`Face::ALL`] order.
    pub fn solved(colors: &[C; 6]) -> Self {
        Cube::new(FaceletState::solved(colors))
    }

    pub fn state(&self) -> &FaceletState<C> {
        &self.live
    }

    pub fn baseline(&self) -> &FaceletState<C> {
        &self.baseline
    }

    pub fn facelet(&self, face: Face, row: usize, col: usize) -> &C {
        self.live.facelet(face, row, col)
    }

    /// Recolors one facelet of the live state.
    pub fn paint(&mut self, face: Face, row: usize, col: usize, color: C) -> C {
        self.live.paint(face, row, col, color)
    }

    pub fn scheme(&self) -> ColorScheme<C> {
        analysis::derive_scheme(&self.live)
    }

    pub fn defects(&self) -> ColorDefectReport<C> {
        analysis::find_defects(&self.live)
    }

    pub fn is_solved(&self) -> bool {
        analysis::is_solved(&self.live)
    }

    pub fn has_valid_color_quantities(&self) -> bool {
        analysis::has_valid_color_quantities(&self.live)
    }

    /// Returns a channel receiving a [`MoveCompleted`] for every move applied
    /// from now on. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<MoveCompleted> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Applies one move and notifies subscribers.
    pub fn apply(&mut self, descriptor: &MoveDescriptor) -> MoveCompleted {
        moves::apply(&mut self.live, descriptor);

        let event = MoveCompleted {
            descriptor: *descriptor,
            solved: self.is_solved(),
        };

        debug!("Applied {descriptor} (solved: {})", event.solved);

        self.subscribers.retain(|tx| tx.send(event).is_ok());

        event
    }

    /// Parses and applies a single token.
    ///
    /// # Errors
    ///
    /// Fails without touching the cube if the token is not valid notation.
    pub fn apply_token(&mut self, token: &str) -> Result<MoveCompleted, ParseError> {
        let descriptor = notation::parse_move(token)?;
        Ok(self.apply(&descriptor))
    }

    /// Runs a command line: `scramble`, `clean slate`, or a list of moves.
    ///
    /// # Errors
    ///
    /// Stops at the first invalid token. Moves before it remain applied and
    /// are counted in [`CommandError::applied`].
    pub fn execute(&mut self, line: &str) -> Result<CommandOutcome, CommandError> {
        let command = Command::parse(line);

        if command == Command::CleanSlate {
            self.clean_slate();
            return Ok(CommandOutcome::CleanSlate);
        }

        let mut applied = Vec::new();

        for token in command.tokens() {
            match self.apply_token(token) {
                Ok(event) => applied.push(event),
                Err(source) => {
                    warn!("Rejected `{line}` at `{token}` after {} move(s)", applied.len());
                    return Err(CommandError {
                        applied: applied.len(),
                        source,
                    });
                }
            }
        }

        Ok(CommandOutcome::Applied(applied))
    }

    /// Puts back the state the cube was loaded with.
    pub fn restore(&mut self) {
        info!("Restoring the loaded state");
        self.live = self.baseline.clone();
    }

    /// Replaces the cube with a solved one in the current color scheme. The
    /// new solved state also becomes what [`Cube::restore`] returns to.
    pub fn clean_slate(&mut self) {
        let scheme = self.scheme();
        info!("Clean slate with scheme {:?}", scheme.colors());
        self.live = FaceletState::solved(scheme.colors());
        self.baseline = self.live.clone();
    }
}

/// Clones the facelets only. Subscribers stay with the cube they subscribed to.
impl<C: Color> Clone for Cube<C> {
    fn clone(&self) -> Self {
        Cube {
            live: self.live.clone(),
            baseline: self.baseline.clone(),
            subscribers: Vec::new(),
        }
    }
}
