//! Cupboard CLI - grocery lists and recipes

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use cupboard::util::{CupboardContext, Shell};

/// Options shared by every command.
pub struct GlobalOptions {
    pub shell: Shell,
    pub ctx: CupboardContext,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("cupboard=debug")
    } else {
        EnvFilter::new("cupboard=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color, cli.json);
    let ctx = match CupboardContext::new() {
        Ok(ctx) => ctx,
        Err(e) => fail(&shell, e),
    };
    let global_opts = GlobalOptions { shell, ctx };

    if let Err(e) = run(cli.command, &global_opts) {
        fail(&global_opts.shell, e);
    }
}

/// Report `error` through the shell (a JSON event under `--json`) and exit.
fn fail(shell: &Shell, error: anyhow::Error) -> ! {
    shell.error(format!("{:#}", error));
    std::process::exit(1);
}

fn run(command: Commands, global_opts: &GlobalOptions) -> Result<()> {
    match command {
        Commands::Login(args) => commands::auth::login(args, global_opts),
        Commands::Logout => commands::auth::logout(global_opts),
        Commands::Whoami => commands::auth::whoami(global_opts),
        Commands::Catalog(args) => commands::catalog::execute(args, global_opts),
        Commands::Custom(args) => commands::catalog::custom(args, global_opts),
        Commands::Lists => commands::lists::show_all(global_opts),
        Commands::List(args) => commands::lists::execute(args, global_opts),
        Commands::Recipes => commands::recipes::show_all(global_opts),
        Commands::Recipe(args) => commands::recipes::execute(args, global_opts),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
