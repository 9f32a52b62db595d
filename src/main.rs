//! mongo-transformer command-line tool
//!
//! Reads MongoDB documents as Extended JSON and prints them as JSON or JSONP.
//!
//! # Usage
//!
//! ```bash
//! # JSON Lines from mongoexport, printed as a JSON array
//! mongoexport -c users | mongo-transformer
//!
//! # JSONP with simplified BSON types
//! mongo-transformer users.json --input-format array -f jsonp --callback render -m simplified
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use mongo_transformer::cli::CliInterface;
use mongo_transformer::config::LOG_ENV_VAR;
use mongo_transformer::error::Result;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands, or read input and print the converted output
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    let cursor = cli.read_cursor().await?;
    let output = cli.render(cursor)?;
    println!("{}", output);
    Ok(())
}

/// Initialize logging on stderr so stdout only carries the payload
///
/// `-v` / `--vv` win over `MONGO_TRANSFORMER_LOG`, which wins over the
/// configured level.
fn initialize_logging(cli: &CliInterface) {
    let level = LevelFilter::from_level(cli.config().logging.level.to_tracing_level());
    let builder = EnvFilter::builder().with_default_directive(level.into());

    let filter = if cli.log_level_overridden() {
        builder.parse_lossy("")
    } else {
        builder.with_env_var(LOG_ENV_VAR).from_env_lossy()
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
