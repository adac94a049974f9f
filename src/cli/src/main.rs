mod config;
mod render;

use std::{
    collections::HashMap,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{OptionExt, eyre};
use config::{Color, CubeFile, Rgb};
use crossbeam_channel::Receiver;
use env_logger::TimestampPrecision;
use facelet_core::{CommandOutcome, Cube, Face, MoveCompleted};
use log::{LevelFilter, debug, warn};
use owo_colors::OwoColorize;

/// Applies moves to a stored 3x3x3 cube and reports on its colors
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The cube file to use, in TOML format. Defaults to `facelet/cube.toml`
    /// in the user's config directory.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply command lines in order, then show the cube
    Run {
        /// Move sequences like "R U' F2", or `scramble` / `clean slate`
        #[arg(required = true)]
        lines: Vec<String>,
        /// Write the resulting grid back to the cube file
        #[arg(long)]
        save: bool,
    },
    /// Read command lines from stdin until `quit`
    Repl {
        /// Write the grid back to the cube file on exit
        #[arg(long)]
        save: bool,
    },
    /// Report color defects of the stored cube
    Check,
    /// Recolor one facelet of the stored cube
    Paint {
        /// The face to paint, e.g. `F` or `front`
        face: Face,
        #[arg(value_parser = clap::value_parser!(u8).range(0..3))]
        row: u8,
        #[arg(value_parser = clap::value_parser!(u8).range(0..3))]
        col: u8,
        /// A color name from the palette
        color: String,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let path = match cli.config {
        Some(path) => path,
        None => dirs::config_dir()
            .ok_or_eyre("Could not find a config directory; pass --config")?
            .join("facelet")
            .join("cube.toml"),
    };

    let mut file = CubeFile::load(&path)?;
    let palette = file.palette()?;
    let mut cube = file.cube()?;

    for color in render::unknown_colors(&cube, &palette) {
        warn!("`{color}` is not in the palette");
    }

    match cli.command {
        Commands::Run { lines, save } => {
            for line in &lines {
                match cube.execute(line)? {
                    CommandOutcome::Applied(events) => {
                        debug!("`{line}` applied {} move(s)", events.len());
                    }
                    CommandOutcome::CleanSlate => debug!("Clean slate"),
                }
            }

            println!("{}", render::summary(&cube, &palette));

            if save {
                file.set_state(cube.state());
                file.save(&path)?;
            }
        }
        Commands::Repl { save } => {
            run_repl(&mut cube, &palette)?;

            if save {
                file.set_state(cube.state());
                file.save(&path)?;
            }
        }
        Commands::Check => {
            println!("{}", render::defects(&cube));

            if !cube.has_valid_color_quantities() {
                return Err(eyre!("The cube does not have nine facelets of each of six colors"));
            }
        }
        Commands::Paint {
            face,
            row,
            col,
            color,
        } => {
            if !file.contains_color(&color) {
                warn!("`{color}` is not in the palette");
            }

            let old = cube.paint(
                face,
                usize::from(row),
                usize::from(col),
                Color::from(color.as_str()),
            );
            eprintln!("Painted {face} ({row}, {col}) {color}, was {old}");

            println!("{}", render::summary(&cube, &palette));

            file.set_state(cube.state());
            file.save(&path)?;
        }
    }

    Ok(())
}

fn run_repl(cube: &mut Cube<Color>, palette: &HashMap<Color, Rgb>) -> color_eyre::Result<()> {
    let events = cube.subscribe();

    println!("{}", render::summary(cube, palette));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break Ok(());
        };

        match line.trim() {
            "" => {}
            "quit" | "exit" => break Ok(()),
            "show" => println!("{}", render::summary(cube, palette)),
            "check" => println!("{}", render::defects(cube)),
            "restore" => {
                cube.restore();
                println!("{}", render::summary(cube, palette));
            }
            command => {
                let result = cube.execute(command);
                echo_events(&events);

                match result {
                    Ok(CommandOutcome::CleanSlate) => {
                        println!("{}", render::summary(cube, palette));
                    }
                    Ok(CommandOutcome::Applied(_)) => println!("{}", render::net(cube, palette)),
                    Err(e) => println!("{}", e.red()),
                }
            }
        }
    }
}

fn echo_events(events: &Receiver<MoveCompleted>) {
    for event in events.try_iter() {
        let solved = if event.solved { "yes" } else { "no" };
        println!("{} applied (solved: {solved})", event.descriptor);
    }
}
