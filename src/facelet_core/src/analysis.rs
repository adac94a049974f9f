//! Color scheme derivation and color defect detection.
//!
//! Only color counts are inspected. A state passing every check here may
//! still be impossible to reach by turning a real cube.

use std::{
    collections::HashMap,
    fmt::Display,
    ops::Index,
};

use itertools::Itertools;

use crate::{
    face::{FACE_SIZE, Face},
    state::{Color, FaceletState},
};

/// The six colors read from the face centers, in [`Face::ALL`] order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorScheme<C>([C; 6]);

impl<C> ColorScheme<C> {
    pub fn colors(&self) -> &[C; 6] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.0.iter()
    }

    /// The faces whose center has `color`.
    pub fn faces_with<'a>(&'a self, color: &'a C) -> impl Iterator<Item = Face> + 'a
    where
        C: PartialEq,
    {
        Face::ALL
            .into_iter()
            .filter(move |&face| self[face] == *color)
    }
}

impl<C> Index<Face> for ColorScheme<C> {
    type Output = C;

    fn index(&self, index: Face) -> &Self::Output {
        &self.0[index as usize]
    }
}

/// Problems with how colors are distributed over the facelets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorDefectReport<C> {
    /// Colors on more than nine facelets, scheme colors first.
    pub excessive: Vec<C>,
    /// Colors that are the center of more than one face.
    pub redundant: Vec<C>,
    /// Whether more than six distinct colors are present.
    pub too_many_colors: bool,
}

impl<C> ColorDefectReport<C> {
    pub fn is_empty(&self) -> bool {
        self.excessive.is_empty() && self.redundant.is_empty() && !self.too_many_colors
    }
}

impl<C: Display> Display for ColorDefectReport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "No color defects");
        }

        let mut lines = Vec::new();

        for color in &self.excessive {
            lines.push(format!("Too many {color} facelets"));
        }

        for color in &self.redundant {
            lines.push(format!("{color} is the center of more than one face"));
        }

        if self.too_many_colors {
            lines.push("More than 6 colors are in use".to_owned());
        }

        write!(f, "{}", lines.join("\n"))
    }
}

pub fn derive_scheme<C: Clone>(state: &FaceletState<C>) -> ColorScheme<C> {
    ColorScheme(Face::ALL.map(|face| state.center(face).clone()))
}

fn color_counts<C: Color>(state: &FaceletState<C>) -> HashMap<&C, usize> {
    state.iter().counts()
}

pub fn find_defects<C: Color>(state: &FaceletState<C>) -> ColorDefectReport<C> {
    let scheme = derive_scheme(state);
    let counts = color_counts(state);

    let excessive = scheme
        .iter()
        .chain(state.iter())
        .unique()
        .filter(|color| counts.get(color).copied().unwrap_or(0) > FACE_SIZE)
        .cloned()
        .collect();

    let redundant = scheme.iter().duplicates().cloned().collect();

    ColorDefectReport {
        excessive,
        redundant,
        too_many_colors: counts.len() > 6,
    }
}

/// Whether each of the six scheme colors covers exactly nine facelets and no
/// other color is present.
pub fn has_valid_color_quantities<C: Color>(state: &FaceletState<C>) -> bool {
    let scheme = derive_scheme(state);
    let counts = color_counts(state);

    scheme.iter().all_unique()
        && counts.len() == 6
        && scheme
            .iter()
            .all(|color| counts.get(color).copied() == Some(FACE_SIZE))
}

/// Whether every face is a single color. The colors themselves do not matter.
pub fn is_solved<C: PartialEq>(state: &FaceletState<C>) -> bool {
    state
        .faces()
        .iter()
        .all(|face| face.iter().flatten().all_equal())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEME: [char; 6] = ['G', 'B', 'R', 'O', 'W', 'Y'];

    #[test]
    fn solved_cube_has_no_defects() {
        let state = FaceletState::solved(&SCHEME);

        assert_eq!(derive_scheme(&state).colors(), &SCHEME);
        assert!(find_defects(&state).is_empty());
        assert!(has_valid_color_quantities(&state));
        assert!(is_solved(&state));
    }

    #[test]
    fn one_repainted_facelet() {
        let mut state = FaceletState::solved(&SCHEME);
        state.paint(Face::Up, 0, 0, 'R');

        let report = find_defects(&state);
        assert_eq!(report.excessive, vec!['R']);
        assert!(report.redundant.is_empty());
        assert!(!report.too_many_colors);
        assert!(!has_valid_color_quantities(&state));
        assert!(!is_solved(&state));
    }

    #[test]
    fn every_defect_at_once() {
        let mut state = FaceletState::solved(&SCHEME);
        // Back now shares its center with Front
        state.paint(Face::Back, 1, 1, 'G');
        state.paint(Face::Down, 0, 0, 'P');

        let report = find_defects(&state);
        assert_eq!(report.excessive, vec!['G']);
        assert_eq!(report.redundant, vec!['G']);
        assert!(report.too_many_colors);
        assert!(!has_valid_color_quantities(&state));
    }

    #[test]
    fn excessive_non_scheme_colors_are_reported_after_scheme_colors() {
        let mut state = FaceletState::solved(&SCHEME);
        for col in 0..3 {
            for row in 0..3 {
                if (row, col) != (1, 1) {
                    state.paint(Face::Front, row, col, 'P');
                    state.paint(Face::Back, row, col, 'P');
                }
            }
        }
        state.paint(Face::Up, 0, 0, 'O');

        let report = find_defects(&state);
        assert_eq!(report.excessive, vec!['O', 'P']);
        assert!(report.too_many_colors);
    }

    #[test]
    fn solved_does_not_depend_on_the_scheme() {
        let state = FaceletState::solved(&['X'; 6]);
        assert!(is_solved(&state));
        assert!(!has_valid_color_quantities(&state));

        let report = find_defects(&state);
        assert_eq!(report.excessive, vec!['X']);
        assert_eq!(report.redundant, vec!['X']);
        assert!(!report.too_many_colors);
    }

    #[test]
    fn missing_color_is_invalid() {
        // Six distinct centers but a seventh color replaced a whole face
        let mut state = FaceletState::solved(&SCHEME);
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (1, 1) {
                    state.paint(Face::Down, row, col, 'W');
                }
            }
        }
        assert!(!has_valid_color_quantities(&state));
        assert_eq!(find_defects(&state).excessive, vec!['W']);
    }

    #[test]
    fn summary() {
        let mut state = FaceletState::solved(&SCHEME);
        assert_eq!(find_defects(&state).to_string(), "No color defects");

        state.paint(Face::Up, 1, 1, 'R');
        assert_eq!(
            find_defects(&state).to_string(),
            "Too many R facelets\nR is the center of more than one face"
        );

        assert_eq!(
            derive_scheme(&state).faces_with(&'R').collect::<Vec<_>>(),
            vec![Face::Right, Face::Up]
        );
    }
}
