//! Move descriptors and the engine that applies them.
//!
//! Every primitive [`Turn`] is a fixed permutation of the 54 facelets. The
//! tables are derived once from the cube geometry in [`crate::face`]: a turn
//! rotates every facelet of one layer (or of the whole cube) a quarter turn
//! about an axis and the facelet's new position and normal name its new slot.
//! Slab moves have no table of their own; they are a sequence of primitives.

use std::{
    fmt::Display,
    num::NonZeroU32,
    sync::LazyLock,
};

use log::{debug, trace};

use crate::{
    face::{FACELETS, Face, Vec3, dot, facelet_coords, rotate_clockwise},
    state::FaceletState,
};

/// The direction of a face turn, as seen looking at that face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// A turn of one of the two middle layers.
///
/// The horizontal slice is the middle row of Front, Right, Back and Left and
/// turns the same way as `D`. The vertical slice is the middle column of
/// Front, Up, Back and Down and turns the same way as `R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Horizontal,
    HorizontalInverse,
    Vertical,
    VerticalInverse,
}

impl Slice {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Slice::Horizontal => Slice::HorizontalInverse,
            Slice::HorizontalInverse => Slice::Horizontal,
            Slice::Vertical => Slice::VerticalInverse,
            Slice::VerticalInverse => Slice::Vertical,
        }
    }
}

/// A reorientation of the whole cube.
///
/// `Right` moves the Front face to the Right (so the old Left becomes the new
/// Front) and `Up` moves the Front face to the Up (so the old Down becomes the
/// new Front).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeTurn {
    Left,
    Right,
    Up,
    Down,
}

impl CubeTurn {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            CubeTurn::Left => CubeTurn::Right,
            CubeTurn::Right => CubeTurn::Left,
            CubeTurn::Up => CubeTurn::Down,
            CubeTurn::Down => CubeTurn::Up,
        }
    }
}

/// A move that has its own permutation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Face(Face, Direction),
    Slice(Slice),
    Cube(CubeTurn),
}

impl Turn {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Turn::Face(face, dir) => Turn::Face(face, dir.inverse()),
            Turn::Slice(slice) => Turn::Slice(slice.inverse()),
            Turn::Cube(turn) => Turn::Cube(turn.inverse()),
        }
    }

    /// The face being turned, if this is a face turn.
    pub fn face(self) -> Option<Face> {
        match self {
            Turn::Face(face, _) => Some(face),
            Turn::Slice(_) | Turn::Cube(_) => None,
        }
    }

    fn table_index(self) -> usize {
        match self {
            Turn::Face(face, Direction::Clockwise) => face as usize,
            Turn::Face(face, Direction::CounterClockwise) => 6 + face as usize,
            Turn::Slice(slice) => 12 + slice as usize,
            Turn::Cube(turn) => 16 + turn as usize,
        }
    }

    /// The clockwise axis and the layers turned by the forward version of
    /// this turn. Inverse variants share the geometry of their forward turn.
    fn geometry(self) -> (Vec3, Layers) {
        match self {
            Turn::Face(face, _) => (face.normal(), Layers::Outer),
            Turn::Slice(Slice::Horizontal | Slice::HorizontalInverse) => {
                (Face::Down.normal(), Layers::Middle)
            }
            Turn::Slice(Slice::Vertical | Slice::VerticalInverse) => {
                (Face::Right.normal(), Layers::Middle)
            }
            Turn::Cube(CubeTurn::Left | CubeTurn::Right) => (Face::Down.normal(), Layers::All),
            Turn::Cube(CubeTurn::Up | CubeTurn::Down) => (Face::Right.normal(), Layers::All),
        }
    }
}

impl Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Turn::Face(face, Direction::Clockwise) => write!(f, "{}", face.letter()),
            Turn::Face(face, Direction::CounterClockwise) => write!(f, "{}i", face.letter()),
            Turn::Slice(Slice::Horizontal) => write!(f, "H"),
            Turn::Slice(Slice::HorizontalInverse) => write!(f, "Hi"),
            Turn::Slice(Slice::Vertical) => write!(f, "V"),
            Turn::Slice(Slice::VerticalInverse) => write!(f, "Vi"),
            Turn::Cube(CubeTurn::Left) => write!(f, "CL"),
            Turn::Cube(CubeTurn::Right) => write!(f, "CR"),
            Turn::Cube(CubeTurn::Up) => write!(f, "CU"),
            Turn::Cube(CubeTurn::Down) => write!(f, "CD"),
        }
    }
}

/// A compound move turning an outer layer pair together with the middle
/// slice between them. Each slab is a rigid turn of all three layers about
/// one axis and is applied as its [`Slab::sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slab {
    Right,
    Left,
    Up,
    Down,
}

impl Slab {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Slab::Right => Slab::Left,
            Slab::Left => Slab::Right,
            Slab::Up => Slab::Down,
            Slab::Down => Slab::Up,
        }
    }

    /// The primitive turns making up this slab, in application order.
    pub fn sequence(self) -> [Turn; 3] {
        use Direction::{Clockwise as Cw, CounterClockwise as Ccw};

        match self {
            Slab::Right => [
                Turn::Face(Face::Up, Ccw),
                Turn::Slice(Slice::Horizontal),
                Turn::Face(Face::Down, Cw),
            ],
            Slab::Left => [
                Turn::Face(Face::Up, Cw),
                Turn::Slice(Slice::HorizontalInverse),
                Turn::Face(Face::Down, Ccw),
            ],
            Slab::Up => [
                Turn::Face(Face::Left, Ccw),
                Turn::Slice(Slice::Vertical),
                Turn::Face(Face::Right, Cw),
            ],
            Slab::Down => [
                Turn::Face(Face::Right, Ccw),
                Turn::Slice(Slice::VerticalInverse),
                Turn::Face(Face::Left, Cw),
            ],
        }
    }
}

impl Display for Slab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Slab::Right => "RS",
            Slab::Left => "LS",
            Slab::Up => "US",
            Slab::Down => "DS",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Turn(Turn),
    Slab(Slab),
}

impl MoveKind {
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            MoveKind::Turn(turn) => MoveKind::Turn(turn.inverse()),
            MoveKind::Slab(slab) => MoveKind::Slab(slab.inverse()),
        }
    }
}

/// A fully resolved move: what to turn, in which direction, how many times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveDescriptor {
    pub kind: MoveKind,
    pub count: NonZeroU32,
}

impl MoveDescriptor {
    pub fn new(kind: MoveKind, count: NonZeroU32) -> Self {
        MoveDescriptor { kind, count }
    }

    pub fn turn(turn: Turn) -> Self {
        MoveDescriptor::new(MoveKind::Turn(turn), NonZeroU32::MIN)
    }

    pub fn slab(slab: Slab) -> Self {
        MoveDescriptor::new(MoveKind::Slab(slab), NonZeroU32::MIN)
    }

    /// The face being turned, or `None` for slices, slabs and reorientations.
    pub fn face(&self) -> Option<Face> {
        match self.kind {
            MoveKind::Turn(turn) => turn.face(),
            MoveKind::Slab(_) => None,
        }
    }

    /// The move undoing this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        MoveDescriptor::new(self.kind.inverse(), self.count)
    }

    /// The primitive turns of one repetition of this move.
    pub fn primitives(&self) -> Vec<Turn> {
        match self.kind {
            MoveKind::Turn(turn) => vec![turn],
            MoveKind::Slab(slab) => slab.sequence().to_vec(),
        }
    }

    /// How many repetitions actually change the cube. Every move is a
    /// rotation of order four.
    pub fn effective_count(&self) -> u32 {
        self.count.get() % 4
    }
}

impl Display for MoveDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            MoveKind::Turn(turn) => write!(f, "{turn}")?,
            MoveKind::Slab(slab) => write!(f, "{slab}")?,
        }

        if self.count.get() > 1 {
            write!(f, "{}", self.count)?;
        }

        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Layers {
    Outer,
    Middle,
    All,
}

impl Layers {
    fn contains(self, axis: Vec3, position: Vec3) -> bool {
        match self {
            Layers::Outer => dot(axis, position) == 1,
            Layers::Middle => dot(axis, position) == 0,
            Layers::All => true,
        }
    }
}

/// A permutation of the facelets in comes-from form: after applying it,
/// facelet `i` holds the color that was on facelet `self.0[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation([u8; FACELETS]);

impl Permutation {
    pub fn identity() -> Self {
        Permutation(std::array::from_fn(to_u8))
    }

    pub fn comes_from(&self) -> &[u8; FACELETS] {
        &self.0
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut out = [0; FACELETS];
        for (to, &from) in self.0.iter().enumerate() {
            out[from as usize] = to_u8(to);
        }
        Permutation(out)
    }

    /// The number of facelets this permutation moves.
    pub fn moved(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .filter(|&(i, &from)| i != from as usize)
            .count()
    }

    /// Derives the clockwise quarter turn of `layers` about `axis`.
    fn quarter_turn(axis: Vec3, layers: Layers) -> Self {
        let locations: Vec<(Vec3, Vec3)> = (0..FACELETS)
            .map(|i| {
                let (face, row, col) = facelet_coords(i);
                (face.position(row, col), face.normal())
            })
            .collect();

        let mut comes_from = std::array::from_fn(to_u8);

        for (from, &(position, normal)) in locations.iter().enumerate() {
            if !layers.contains(axis, position) {
                continue;
            }

            let target = (
                rotate_clockwise(axis, position),
                rotate_clockwise(axis, normal),
            );

            // A rotation of the cube always maps a facelet onto another facelet
            let Some(to) = locations.iter().position(|&loc| loc == target) else {
                unreachable!("rotated facelet {from} left the cube");
            };

            comes_from[to] = to_u8(from);
        }

        Permutation(comes_from)
    }
}

fn to_u8(i: usize) -> u8 {
    debug_assert!(i < FACELETS);
    // Facelet indices are always below 54
    #[allow(clippy::cast_possible_truncation)]
    let v = i as u8;
    v
}

const TURN_COUNT: usize = 20;

static TABLES: LazyLock<[Permutation; TURN_COUNT]> = LazyLock::new(|| {
    let forward = |turn: Turn| {
        let (axis, layers) = turn.geometry();
        Permutation::quarter_turn(axis, layers)
    };

    let mut tables = std::array::from_fn(|_| Permutation::identity());

    for face in Face::ALL {
        let cw = forward(Turn::Face(face, Direction::Clockwise));
        tables[Turn::Face(face, Direction::CounterClockwise).table_index()] = cw.inverse();
        tables[Turn::Face(face, Direction::Clockwise).table_index()] = cw;
    }

    for turn in [
        Turn::Slice(Slice::Horizontal),
        Turn::Slice(Slice::Vertical),
        Turn::Cube(CubeTurn::Right),
        Turn::Cube(CubeTurn::Up),
    ] {
        let table = forward(turn);
        tables[turn.inverse().table_index()] = table.inverse();
        tables[turn.table_index()] = table;
    }

    for face in Face::ALL {
        let turn = Turn::Face(face, Direction::Clockwise);
        debug!("{turn} moves {} facelets", tables[turn.table_index()].moved());
    }

    tables
});

/// The permutation performed by a single primitive turn.
pub fn permutation(turn: Turn) -> &'static Permutation {
    &TABLES[turn.table_index()]
}

/// Applies one primitive turn.
pub fn apply_turn<C: Clone>(state: &mut FaceletState<C>, turn: Turn) {
    trace!("Applying {turn}");
    state.permute(permutation(turn).comes_from());
}

/// Applies a move descriptor, repeating it `count` times. Slabs apply their
/// whole sequence on each repetition.
pub fn apply<C: Clone>(state: &mut FaceletState<C>, descriptor: &MoveDescriptor) {
    let primitives = descriptor.primitives();

    for _ in 0..descriptor.effective_count() {
        for &turn in &primitives {
            apply_turn(state, turn);
        }
    }
}
