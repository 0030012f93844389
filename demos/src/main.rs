// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `canopy`: build a size tree from a directory or a set of games, lay it out,
//! and print the tree, its displayed tiles, and optionally the tile under a point.

mod cli;
mod logging;

use std::io::{self, Write};

use anyhow::{Context, Result};
use canopy_ingest::{
    MoveTrie, build_directory_tree, build_move_tree, move_sequence, read_listing,
};
use canopy_size_tree::{NodeId, SizeTree, TileRect};
use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_tracing(cli.log_level);
    let stdout = io::stdout();
    run(&cli, &mut stdout.lock())
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let mut tree = SizeTree::new();
    let root = match &cli.command {
        Command::Dir { path } => {
            let listing = read_listing(path)
                .with_context(|| format!("failed to list {}", path.display()))?;
            build_directory_tree(&mut tree, &listing)?
        }
        Command::Games { file } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let games: Vec<Vec<String>> = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON array of games", file.display()))?;
            let trie = MoveTrie::from_games(&games);
            info!(games = trie.games(), "merged games");
            build_move_tree(&mut tree, &trie).context("no game contains a move")?
        }
    };

    tree.layout(root, TileRect::new(0, 0, cli.width, cli.height))?;
    let last = if cli.expand_all {
        Some(tree.expand_all(root)?)
    } else {
        None
    };

    writeln!(out, "{}", tree.display(root).context("root vanished")?)?;
    writeln!(out)?;
    for tile in tree.rectangles(root) {
        writeln!(
            out,
            "{} {} {}",
            tile.rect,
            tile.colour,
            label(&tree, tile.node)
        )?;
    }

    if let Some(last) = last {
        writeln!(out, "last: {}", label(&tree, last))?;
        if let Some(moves) = move_sequence(&tree, last) {
            writeln!(out, "moves: {}", moves.join("-"))?;
        }
    }
    if let Some(point) = cli.at {
        match tree.node_at(root, point) {
            Some(hit) => writeln!(out, "at ({}, {}): {}", point.x, point.y, label(&tree, hit))?,
            None => writeln!(out, "at ({}, {}): nothing", point.x, point.y)?,
        }
    }
    Ok(())
}

fn label(tree: &SizeTree, id: NodeId) -> String {
    tree.path_string(id).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::<u8>::new();
        run(&cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn games_print_deepest_line() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("games.json");
        std::fs::write(&file, r#"[["e2e4", "e7e5"], ["e2e4", "c7c5", "g1f3"], []]"#).unwrap();

        let text = output(&[
            "canopy",
            "games",
            file.to_str().unwrap(),
            "--expand-all",
            "--width",
            "100",
            "--height",
            "200",
        ]);
        assert!(text.starts_with("- | (2) (0, 0, 100, 200)\n"), "{text}");
        assert!(text.contains("last: - | e2e4 | c7c5 | g1f3 (end)"), "{text}");
        assert!(text.contains("moves: e2e4-c7c5-g1f3"), "{text}");
    }

    #[test]
    fn directory_tiles_and_hit_test() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("a.txt"), [0_u8; 9]).unwrap();
        std::fs::write(root.join("b.txt"), [0_u8; 9]).unwrap();

        let text = output(&[
            "canopy",
            "dir",
            root.to_str().unwrap(),
            "--width",
            "20",
            "--height",
            "10",
            "--at",
            "15,5",
        ]);
        assert!(text.contains("(0, 0, 10, 10)"), "{text}");
        assert!(text.contains("(10, 0, 10, 10)"), "{text}");
        assert!(text.contains("b.txt (file)"), "{text}");
        assert!(text.trim_end().ends_with("b.txt (file)"), "{text}");
    }

    #[test]
    fn bad_game_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("games.json");
        std::fs::write(&file, "{}").unwrap();
        let cli = Cli::try_parse_from(["canopy", "games", file.to_str().unwrap()]).unwrap();
        let err = run(&cli, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("not a JSON array"), "{err}");
    }
}
