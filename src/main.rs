use std::io::{self, Write};
use std::process;

use chrono::Local;
use clap::Parser;
use diario_campo::commands::{execute, hash_password};
use diario_campo::{AppConfig, Cli, Command};

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let today = Local::now().date_naive();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match &cli.command {
        Command::HashPassword { .. } => hash_password(&cli, &mut out),
        _ => AppConfig::from_env().and_then(|config| {
                                      execute(&cli, &config, today, &mut out, campo_persistence::shared_connector)
                                  }),
    };
    let _ = out.flush();

    if let Err(e) = result {
        eprintln!("erro: {e}");
        process::exit(e.exit_code());
    }
}
