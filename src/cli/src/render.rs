use std::collections::HashMap;

use facelet_core::{Cube, Face};
use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::config::{Color, Rgb};

const BLANK: &str = "      ";

fn facelet(color: &Color, palette: &HashMap<Color, Rgb>) -> String {
    match palette.get(color) {
        Some(&Rgb(r, g, b)) => "██".truecolor(r, g, b).to_string(),
        None => "??".dimmed().to_string(),
    }
}

fn row(cube: &Cube<Color>, face: Face, row: usize, palette: &HashMap<Color, Rgb>) -> String {
    (0..3)
        .map(|col| facelet(cube.facelet(face, row, col), palette))
        .join("")
}

/// Draws the cube as an unfolded net:
///
/// ```text
///       U
///    L  F  R  B
///       D
/// ```
pub fn net(cube: &Cube<Color>, palette: &HashMap<Color, Rgb>) -> String {
    let mut lines = Vec::with_capacity(9);

    for r in 0..3 {
        lines.push(format!("{BLANK} {}", row(cube, Face::Up, r, palette)));
    }

    for r in 0..3 {
        lines.push(
            [Face::Left, Face::Front, Face::Right, Face::Back]
                .into_iter()
                .map(|face| row(cube, face, r, palette))
                .join(" "),
        );
    }

    for r in 0..3 {
        lines.push(format!("{BLANK} {}", row(cube, Face::Down, r, palette)));
    }

    lines.join("\n")
}

pub fn status(cube: &Cube<Color>) -> String {
    if cube.is_solved() {
        format!("Solved: {}", "yes".green())
    } else {
        format!("Solved: {}", "no".yellow())
    }
}

/// The defect summary, followed by the faces sharing each repeated center.
pub fn defects(cube: &Cube<Color>) -> String {
    let report = cube.defects();

    if report.is_empty() {
        return report.green().to_string();
    }

    let scheme = cube.scheme();
    let shared = report
        .redundant
        .iter()
        .map(|color| format!("  {color} centers: {}", scheme.faces_with(color).join(", ")));

    std::iter::once(report.red().to_string())
        .chain(shared)
        .join("\n")
}

/// The net, the solved status and the defect summary.
pub fn summary(cube: &Cube<Color>, palette: &HashMap<Color, Rgb>) -> String {
    format!("{}\n\n{}\n{}", net(cube, palette), status(cube), defects(cube))
}

/// Names the colors on the facelets whose color is missing from the palette.
pub fn unknown_colors(cube: &Cube<Color>, palette: &HashMap<Color, Rgb>) -> Vec<Color> {
    cube.state()
        .iter()
        .filter(|color| !palette.contains_key(*color))
        .unique()
        .cloned()
        .collect()
}
