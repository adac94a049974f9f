//! The persisted palette and facelet grid.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
    str::FromStr,
};

use color_eyre::eyre::{WrapErr, eyre};
use facelet_core::{Cube, Face, FaceGrid, FaceletState};
use internment::ArcIntern;
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub type Color = ArcIntern<str>;

/// Face order matches [`Face::ALL`].
const DEFAULT_SCHEME: [(&str, &str); 6] = [
    ("Green", "#009b48"),
    ("Blue", "#0046ad"),
    ("Red", "#b71234"),
    ("Orange", "#ff5800"),
    ("White", "#ffffff"),
    ("Yellow", "#ffd500"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = color_eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| eyre!("Colors must be written as `#rrggbb`, got `{s}`"))?;

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .wrap_err_with(|| format!("Bad hex digits in `{s}`"))
        };

        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

type Rows = Vec<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
struct Faces {
    front: Rows,
    back: Rows,
    right: Rows,
    left: Rows,
    up: Rows,
    down: Rows,
}

/// The on-disk document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CubeFile {
    palette: BTreeMap<String, String>,
    faces: Faces,
}

impl Default for CubeFile {
    fn default() -> Self {
        let palette = DEFAULT_SCHEME
            .iter()
            .map(|&(name, hex)| (name.to_owned(), hex.to_owned()))
            .collect();

        let uniform = |face: Face| vec![vec![DEFAULT_SCHEME[face as usize].0.to_owned(); 3]; 3];

        CubeFile {
            palette,
            faces: Faces {
                front: uniform(Face::Front),
                back: uniform(Face::Back),
                right: uniform(Face::Right),
                left: uniform(Face::Left),
                up: uniform(Face::Up),
                down: uniform(Face::Down),
            },
        }
    }
}

impl CubeFile {
    /// Reads the file at `path`, falling back to a solved cube in the
    /// standard scheme if it does not exist.
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        if !path.exists() {
            info!("No cube file at {}, starting from a solved cube", path.display());
            return Ok(CubeFile::default());
        }

        debug!("Loading {}", path.display());

        let text = fs::read_to_string(path)?;
        toml::from_str(&text).wrap_err_with(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> color_eyre::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, toml::to_string_pretty(self)?)?;
        info!("Saved cube to {}", path.display());

        Ok(())
    }

    /// Colors by name. Entries that are not valid `#rrggbb` are an error.
    pub fn palette(&self) -> color_eyre::Result<HashMap<Color, Rgb>> {
        self.palette
            .iter()
            .map(|(name, hex)| {
                let rgb = hex
                    .parse::<Rgb>()
                    .wrap_err_with(|| format!("Palette entry `{name}`"))?;
                Ok::<_, color_eyre::Report>((Color::from(name.as_str()), rgb))
            })
            .collect()
    }

    pub fn contains_color(&self, name: &str) -> bool {
        self.palette.contains_key(name)
    }

    pub fn cube(&self) -> color_eyre::Result<Cube<Color>> {
        let faces = &self.faces;
        let rows = [
            &faces.front,
            &faces.back,
            &faces.right,
            &faces.left,
            &faces.up,
            &faces.down,
        ]
        .into_iter()
        .map(|rows| {
            rows.iter()
                .map(|row| row.iter().map(|name| Color::from(name.as_str())).collect())
                .collect()
        })
        .collect();

        Cube::from_rows(rows).wrap_err("The stored facelet grid has the wrong shape")
    }

    /// Replaces the stored grid with `state`, keeping the palette.
    pub fn set_state(&mut self, state: &FaceletState<Color>) {
        let rows = |grid: &FaceGrid<Color>| -> Rows {
            grid.iter()
                .map(|row| row.iter().map(|color| (**color).to_owned()).collect())
                .collect()
        };

        self.faces = Faces {
            front: rows(&state[Face::Front]),
            back: rows(&state[Face::Back]),
            right: rows(&state[Face::Right]),
            left: rows(&state[Face::Left]),
            up: rows(&state[Face::Up]),
            down: rows(&state[Face::Down]),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn default_is_a_solved_standard_cube() {
        let file = CubeFile::default();
        let cube = file.cube().unwrap();

        assert!(cube.is_solved());
        assert!(cube.has_valid_color_quantities());
        assert_eq!(&*cube.scheme()[Face::Front], "Green");
        assert_eq!(&*cube.scheme()[Face::Up], "White");
        assert_eq!(file.palette().unwrap()[&Color::from("Red")], Rgb(0xb7, 0x12, 0x34));
    }

    #[test_log::test]
    fn survives_a_toml_round_trip() {
        let mut file = CubeFile::default();
        let mut cube = file.cube().unwrap();
        cube.execute("R U2 Fi").unwrap();
        file.set_state(cube.state());

        let text = toml::to_string_pretty(&file).unwrap();
        let reloaded: CubeFile = toml::from_str(&text).unwrap();

        assert_eq!(reloaded, file);
        assert_eq!(reloaded.cube().unwrap().state(), cube.state());
    }

    #[test_log::test]
    fn rejects_bad_shapes_and_colors() {
        let mut file = CubeFile::default();
        file.faces.left.pop();
        assert!(file.cube().is_err());

        assert!("ffffff".parse::<Rgb>().is_err());
        assert!("#fffff".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert_eq!("#00ff7f".parse::<Rgb>().unwrap(), Rgb(0, 0xff, 0x7f));
    }
}
