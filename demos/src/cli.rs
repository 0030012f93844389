// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use kurbo::Point;

/// Lay out size trees from the command line and print what a treemap would draw.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Cli {
    #[arg(long, short, default_value = "warn", value_enum, global = true)]
    pub(crate) log_level: LogLevel,

    /// Width of the layout rectangle.
    #[arg(long, default_value_t = 1024, global = true)]
    pub(crate) width: u32,

    /// Height of the layout rectangle.
    #[arg(long, default_value_t = 768, global = true)]
    pub(crate) height: u32,

    /// Expand every node before printing tiles.
    #[arg(long, global = true)]
    pub(crate) expand_all: bool,

    /// Report the tile under this point, given as `x,y`.
    #[arg(long, value_parser = parse_point, global = true)]
    pub(crate) at: Option<Point>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Build a tree from a directory on disk.
    Dir {
        /// Directory (or file) to list.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Build a tree of positions from a JSON array of games, each an array of moves.
    Games {
        /// JSON file to read.
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub(crate) enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    /// Filter directive for this level, or `None` to disable logging.
    pub(crate) fn directive(self) -> Option<&'static str> {
        match self {
            Self::Trace => Some("trace"),
            Self::Debug => Some("debug"),
            Self::Info => Some("info"),
            Self::Warn => Some("warn"),
            Self::Error => Some("error"),
            Self::Silent => None,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate `{v}`: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("3,4.5"), Ok(Point::new(3.0, 4.5)));
        assert_eq!(parse_point(" 0 , 0 "), Ok(Point::ORIGIN));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
    }

    #[test]
    fn parses_subcommands_with_global_flags() {
        let cli = Cli::try_parse_from([
            "canopy", "games", "wgm_10.json", "--expand-all", "-l", "debug", "--at", "1,2",
        ])
        .unwrap();
        assert!(cli.expand_all);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.at, Some(Point::new(1.0, 2.0)));
        assert!(matches!(cli.command, Command::Games { ref file } if file.ends_with("wgm_10.json")));

        let cli = Cli::try_parse_from(["canopy", "dir"]).unwrap();
        assert_eq!((cli.width, cli.height), (1024, 768));
        assert!(matches!(cli.command, Command::Dir { ref path } if path == &PathBuf::from(".")));
    }
}
