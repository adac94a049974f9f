//! The six face identities of the cube and the geometry used to place their
//! facelets in space.
//!
//! Coordinates are integer vectors with `x` pointing towards [`Face::Right`],
//! `y` towards [`Face::Up`] and `z` towards [`Face::Front`]. Every facelet is
//! described by the position of its cubie (each component in `-1..=1`) and the
//! outward normal of the face it sits on.
//!
//! Each face grid is addressed as if looking straight at that face from
//! outside the cube: for the four side faces row 0 is the row touching
//! [`Face::Up`], for [`Face::Up`] row 0 touches [`Face::Back`] and for
//! [`Face::Down`] row 0 touches [`Face::Front`]. Column 0 is the left-hand
//! column in that view, which is the column nearest [`Face::Left`] on Front,
//! Up and Down.

use strum::{Display, EnumString};

pub type Vec3 = [i8; 3];

/// Number of facelets on a single face.
pub const FACE_SIZE: usize = 9;

/// Number of facelets on the whole cube.
pub const FACELETS: usize = FACE_SIZE * 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Face {
    #[strum(to_string = "Front", serialize = "F")]
    Front,
    #[strum(to_string = "Back", serialize = "B")]
    Back,
    #[strum(to_string = "Right", serialize = "R")]
    Right,
    #[strum(to_string = "Left", serialize = "L")]
    Left,
    #[strum(to_string = "Up", serialize = "U")]
    Up,
    #[strum(to_string = "Down", serialize = "D")]
    Down,
}

impl Face {
    /// Every face, in storage order.
    pub const ALL: [Self; 6] = {
        use Face::{Back, Down, Front, Left, Right, Up};
        let v = [Front, Back, Right, Left, Up, Down];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// The single letter used for this face in move notation.
    pub const fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Right => 'R',
            Face::Left => 'L',
            Face::Up => 'U',
            Face::Down => 'D',
        }
    }

    pub const fn normal(self) -> Vec3 {
        match self {
            Face::Front => [0, 0, 1],
            Face::Back => [0, 0, -1],
            Face::Right => [1, 0, 0],
            Face::Left => [-1, 0, 0],
            Face::Up => [0, 1, 0],
            Face::Down => [0, -1, 0],
        }
    }

    /// The cubie position of the facelet at `(row, col)` on this face.
    pub fn position(self, row: usize, col: usize) -> Vec3 {
        debug_assert!(row < 3 && col < 3);

        // Both are in 0..3, so the casts cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let (r, c) = (row as i8, col as i8);

        match self {
            Face::Front => [c - 1, 1 - r, 1],
            Face::Back => [1 - c, 1 - r, -1],
            Face::Right => [1, 1 - r, 1 - c],
            Face::Left => [-1, 1 - r, c - 1],
            Face::Up => [c - 1, 1, r - 1],
            Face::Down => [c - 1, -1, 1 - r],
        }
    }
}

/// The flat index of a facelet, in `0..FACELETS`.
pub const fn facelet_index(face: Face, row: usize, col: usize) -> usize {
    face as usize * FACE_SIZE + row * 3 + col
}

/// The inverse of [`facelet_index`].
pub const fn facelet_coords(index: usize) -> (Face, usize, usize) {
    let face = Face::ALL[index / FACE_SIZE];
    let within = index % FACE_SIZE;
    (face, within / 3, within % 3)
}

pub(crate) fn dot(a: Vec3, b: Vec3) -> i8 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Rotates `v` a quarter turn clockwise about `axis`, as seen when looking at
/// the cube from the tip of `axis`.
pub(crate) fn rotate_clockwise(axis: Vec3, v: Vec3) -> Vec3 {
    let along = dot(axis, v);
    let across = cross(axis, v);
    [
        axis[0] * along - across[0],
        axis[1] * along - across[1],
        axis[2] * along - across[2],
    ]
}
