use std::fs::File;

use clap::Parser;
use env_logger::{Builder, Env, Target};

mod args;
mod deck;
mod golf;
use self::args::{Args, Ui};
use self::golf::{cli_main, tui_main};

/// Logs go to a file, if one is given, so they don't clobber the game.
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let mut builder = match &args.log_file {
        Some(path) => {
            let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
            builder.target(Target::Pipe(Box::new(File::create(path)?)));
            builder
        }
        None => Builder::from_env(Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    match args.ui.clone().unwrap_or_default() {
        Ui::Console => cli_main(&args),
        Ui::Tui => tui_main(&args),
    }
}
