//! Command line driver for the perft traversals.

use std::io::{self, Write};

use clap::Parser;
use log::debug;
use thiserror::Error;

use crate::perft::{perft, perft_divide, perft_parallel, perft_report, PerftReport};
use crate::position::{FenError, MoveParseError, Position};

/// Failures surfaced to the command line user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("depth must be a non-negative integer, got '{0}'")]
    InvalidDepthArgument(String),
    #[error("invalid FEN: {0}")]
    Position(#[from] FenError),
    #[error("invalid move list: {0}")]
    Moves(#[from] MoveParseError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Enumerate the legal move tree of a chess position")]
pub struct Cli {
    /// Number of plies to explore
    #[arg(value_parser = parse_depth)]
    pub depth: usize,

    /// Starting position as FEN, or "startpos"
    pub fen: Option<String>,

    /// Whitespace separated moves (e.g. "e2e4 e7e5") played before counting
    pub moves: Option<String>,

    /// Print the node count below each root move, then the total
    #[arg(long, conflicts_with = "count")]
    pub divide: bool,

    /// Print only the node count
    #[arg(long)]
    pub count: bool,

    /// Worker threads for the traversal
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,
}

pub fn parse_depth(arg: &str) -> Result<usize, CliError> {
    arg.trim()
        .parse()
        .map_err(|_| CliError::InvalidDepthArgument(arg.to_string()))
}

/// Build the position named by the FEN and move arguments.
pub fn setup_position(fen: Option<&str>, moves: Option<&str>) -> Result<Position, CliError> {
    let mut position = match fen {
        None | Some("startpos") => Position::new(),
        Some(fen) => Position::from_fen(fen)?,
    };
    for mv in moves.unwrap_or_default().split_whitespace() {
        position.apply_uci(mv)?;
    }
    debug!("starting from {}", position.to_fen());
    Ok(position)
}

/// Run the traversal selected by `cli`, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let mut position = setup_position(cli.fen.as_deref(), cli.moves.as_deref())?;

    if cli.divide {
        let split = perft_divide(&mut position, cli.depth);
        let mut total = 0;
        for (mv, nodes) in &split {
            writeln!(out, "{mv} {nodes}")?;
            total += nodes;
        }
        if cli.depth == 0 {
            total = 1;
        }
        writeln!(out)?;
        writeln!(out, "{total}")?;
    } else if cli.count {
        let nodes = if cli.threads > 1 {
            perft_parallel(&position, cli.depth, cli.threads).nodes
        } else {
            perft(&mut position, cli.depth)
        };
        writeln!(out, "{nodes}")?;
    } else {
        let PerftReport { moves, .. } = if cli.threads > 1 {
            perft_parallel(&position, cli.depth, cli.threads)
        } else {
            perft_report(&mut position, cli.depth)
        };
        for mv in moves {
            writeln!(out, "{mv}")?;
        }
    }
    out.flush()?;
    Ok(())
}
