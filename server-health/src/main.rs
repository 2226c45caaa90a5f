//! server-health Entry Point

use clap::Parser;
use server_health::cli::{self, Cli, Commands};
use server_health::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check(args)) => match cli::check::execute(&args).await {
            Ok(true) => {}
            Ok(false) => std::process::exit(1),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Serve(args)) => {
            init_logging();
            if let Err(e) = cli::serve::execute(args).await {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            // No subcommand - default to serve
            init_logging();
            if let Err(e) = cli::serve::execute(cli::serve::ServeArgs::from_env()).await {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_logging() {
    if let Err(e) = logging::init() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
