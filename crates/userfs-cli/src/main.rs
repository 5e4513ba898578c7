use std::io;

use anyhow::{Context, Result};
use tracing::info;
use userfs_cli::{demo, shell::Shell, Cli, Commands, Parser};
use userfs_core::Namespace;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so shell output stays clean
    tracing_subscriber::fmt()
        .with_max_level(cli.max_level())
        .with_writer(io::stderr)
        .init();

    let config = cli.load_config()?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            info!("starting interactive shell");
            let mut shell = Shell::new(Namespace::new(config));
            let stdin = io::stdin();
            let stdout = io::stdout();
            shell
                .run(stdin.lock(), &mut stdout.lock(), false)
                .context("Shell I/O failed")
        }
        Commands::Run(args) => args.run(config),
        Commands::Demo => demo::run(config, &mut io::stdout().lock()),
    }
}
