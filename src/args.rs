//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long)]
    pub ui: Option<Ui>,

    /// Number of players; asked for at startup if omitted.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(2..=4))]
    pub players: Option<u8>,

    /// Number of rounds; asked for at startup if omitted.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub rounds: Option<u8>,

    /// Seed for shuffling, to replay a match.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write a JSON transcript of the match to this file.
    #[arg(short, long)]
    pub transcript: Option<PathBuf>,

    /// Write logs to this file. Filtered with RUST_LOG, which defaults to `info`.
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Print plain text in the console, without colors or bold.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, ValueEnum, Default)]
pub enum Ui {
    Console,
    #[default]
    Tui,
}
