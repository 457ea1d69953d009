mod platform;

use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "mediatimeline.ron";

fn main() -> anyhow::Result<()> {
    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--version") {
        println!("mediatimeline {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config_path = arg
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = platform::config::load(&config_path)?;
    platform::logging::initialize(
        config.log_destination,
        config.level_filter()?,
        &config.log_file,
    );

    platform::run_app(config)
}
