use std::{
    array,
    fmt::Debug,
    hash::Hash,
    ops::{Index, IndexMut},
};

use thiserror::Error;

use crate::face::{FACE_SIZE, FACELETS, Face, facelet_coords};

/// Anything usable as a facelet color. Colors only need exact equality;
/// hashing is used to count them.
pub trait Color: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Color for T {}

/// A single face, addressed as `grid[row][col]`.
pub type FaceGrid<C> = [[C; 3]; 3];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Expected 6 faces but got {0}")]
    WrongFaceCount(usize),
    #[error("Expected 3 rows on the {face} face but got {actual}")]
    WrongRowCount { face: Face, actual: usize },
    #[error("Expected 3 columns in row {row} of the {face} face but got {actual}")]
    WrongColumnCount {
        face: Face,
        row: usize,
        actual: usize,
    },
}

/// The colors of all 54 facelets, stored face by face in [`Face::ALL`] order.
///
/// No invariant is placed on the colors: a state may be unsolvable or
/// painted with any number of colors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FaceletState<C> {
    faces: [FaceGrid<C>; 6],
}

impl<C> FaceletState<C> {
    pub fn new(faces: [FaceGrid<C>; 6]) -> Self {
        FaceletState { faces }
    }

    /// Builds a state from nested vectors, checking the 6×3×3 shape.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] naming the first face, row or column of the
    /// wrong length.
    pub fn from_rows(rows: Vec<Vec<Vec<C>>>) -> Result<Self, GridError> {
        let faces: [Vec<Vec<C>>; 6] = rows
            .try_into()
            .map_err(|v: Vec<_>| GridError::WrongFaceCount(v.len()))?;

        let mut out = Vec::with_capacity(6);

        for (face, rows) in Face::ALL.into_iter().zip(faces) {
            let rows: [Vec<C>; 3] = rows.try_into().map_err(|v: Vec<_>| GridError::WrongRowCount {
                face,
                actual: v.len(),
            })?;

            let mut grid = Vec::with_capacity(3);
            for (row, cols) in rows.into_iter().enumerate() {
                let cols: [C; 3] =
                    cols.try_into()
                        .map_err(|v: Vec<_>| GridError::WrongColumnCount {
                            face,
                            row,
                            actual: v.len(),
                        })?;
                grid.push(cols);
            }

            out.push(to_array(grid));
        }

        Ok(FaceletState::new(to_array(out)))
    }

    pub fn faces(&self) -> &[FaceGrid<C>; 6] {
        &self.faces
    }

    pub fn into_faces(self) -> [FaceGrid<C>; 6] {
        self.faces
    }

    pub fn facelet(&self, face: Face, row: usize, col: usize) -> &C {
        &self[face][row][col]
    }

    /// Recolors a single facelet, returning the color it had before.
    pub fn paint(&mut self, face: Face, row: usize, col: usize, color: C) -> C {
        std::mem::replace(&mut self[face][row][col], color)
    }

    pub fn center(&self, face: Face) -> &C {
        self.facelet(face, 1, 1)
    }

    /// The facelet at a flat index, see [`crate::face::facelet_index`].
    pub fn get(&self, index: usize) -> &C {
        let (face, row, col) = facelet_coords(index);
        self.facelet(face, row, col)
    }

    /// All 54 facelets in flat index order.
    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.faces.iter().flatten().flatten()
    }
}

impl<C: Clone> FaceletState<C> {
    /// Six uniform faces, one color per face in [`Face::ALL`] order.
    pub fn solved(colors: &[C; 6]) -> Self {
        FaceletState {
            faces: array::from_fn(|face| array::from_fn(|_| array::from_fn(|_| colors[face].clone()))),
        }
    }

    /// Rearranges the facelets so that facelet `i` takes the color previously
    /// held by facelet `comes_from[i]`.
    pub(crate) fn permute(&mut self, comes_from: &[u8; FACELETS]) {
        let old = &self.faces;
        let faces = array::from_fn(|face| {
            array::from_fn(|row| {
                array::from_fn(|col| {
                    let (f, r, c) = facelet_coords(comes_from[face * FACE_SIZE + row * 3 + col] as usize);
                    old[f as usize][r][c].clone()
                })
            })
        });
        self.faces = faces;
    }
}

impl<C> Index<Face> for FaceletState<C> {
    type Output = FaceGrid<C>;

    fn index(&self, index: Face) -> &Self::Output {
        &self.faces[index as usize]
    }
}

impl<C> IndexMut<Face> for FaceletState<C> {
    fn index_mut(&mut self, index: Face) -> &mut Self::Output {
        &mut self.faces[index as usize]
    }
}

impl<C> From<[FaceGrid<C>; 6]> for FaceletState<C> {
    fn from(faces: [FaceGrid<C>; 6]) -> Self {
        FaceletState { faces }
    }
}

fn to_array<T, const N: usize>(v: Vec<T>) -> [T; N] {
    let mut v = v.into_iter();
    array::from_fn(|_| match v.next() {
        Some(item) => item,
        None => unreachable!("length was checked by the caller"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> FaceletState<usize> {
        FaceletState::new(array::from_fn(|f| {
            array::from_fn(|r| array::from_fn(|c| f * FACE_SIZE + r * 3 + c))
        }))
    }

    #[test]
    fn iteration_follows_flat_index_order() {
        let state = numbered();
        for (i, color) in state.iter().enumerate() {
            assert_eq!(*color, i);
            assert_eq!(*state.get(i), i);
        }
    }

    #[test]
    fn solved_state_is_uniform_per_face() {
        let state = FaceletState::solved(&['g', 'b', 'r', 'o', 'w', 'y']);
        assert_eq!(state[Face::Up], [['w'; 3]; 3]);
        assert_eq!(*state.center(Face::Left), 'o');
    }

    #[test]
    fn paint_replaces_one_facelet() {
        let mut state = FaceletState::solved(&['g', 'b', 'r', 'o', 'w', 'y']);
        let old = state.paint(Face::Up, 0, 2, 'r');
        assert_eq!(old, 'w');
        assert_eq!(*state.facelet(Face::Up, 0, 2), 'r');
        assert_eq!(state.iter().filter(|c| **c == 'r').count(), 10);
    }

    #[test]
    fn from_rows_checks_shape() {
        let face = vec![vec![0; 3]; 3];

        let good = FaceletState::from_rows(vec![face.clone(); 6]).unwrap();
        assert!(good.iter().all(|c| *c == 0));

        assert_eq!(
            FaceletState::from_rows(vec![face.clone(); 5]).unwrap_err(),
            GridError::WrongFaceCount(5)
        );

        let mut short_row = vec![face.clone(); 6];
        short_row[4][2].pop();
        assert_eq!(
            FaceletState::from_rows(short_row).unwrap_err(),
            GridError::WrongColumnCount {
                face: Face::Up,
                row: 2,
                actual: 2
            }
        );

        let mut missing_row = vec![face; 6];
        missing_row[1].pop();
        assert_eq!(
            FaceletState::from_rows(missing_row).unwrap_err(),
            GridError::WrongRowCount {
                face: Face::Back,
                actual: 2
            }
        );
    }

    #[test]
    fn permute_moves_colors_from_source_positions() {
        let mut state = numbered();
        let mut comes_from = [0u8; FACELETS];
        for (i, slot) in comes_from.iter_mut().enumerate() {
            *slot = u8::try_from((i + 1) % FACELETS).unwrap();
        }
        state.permute(&comes_from);
        assert_eq!(*state.get(0), 1);
        assert_eq!(*state.get(FACELETS - 1), 0);
    }
}
