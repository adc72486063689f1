//! Algoviz Visualizer
//!
//! List the catalog, play an algorithm in the terminal, or serve the
//! visualization frontend.

use std::env;
use std::io;
use std::sync::Arc;

use algoviz_vis::{parse_args, play, Command, VisServer, SEED_VAR};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "algoviz=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let (command, config) = parse_args(env::args().skip(1))?;
    let config = config.with_seed_var(env::var(SEED_VAR).ok().as_deref());
    let catalog = Arc::new(algoviz_algorithms::catalog());

    match command {
        Command::List => {
            for info in catalog.iter() {
                println!("{:<24} {:<16} {}", info.id, info.category.to_string(), info.name);
            }
        }
        Command::Play { id, size } => {
            let steps = play(catalog, &config, &id, size, &mut io::stdout()).await?;
            println!();
            println!("{id}: {steps} steps");
        }
        Command::Serve => {
            println!("Algoviz Visualizer");
            println!("==================");
            println!();
            println!("{} algorithms loaded", catalog.len());
            println!("Starting visualization server on http://localhost:{}", config.port);
            println!();

            let server = VisServer::new(catalog, &config);
            server.serve(config.port).await?;
        }
    }

    Ok(())
}
