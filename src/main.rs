use anyhow::Result;
use std::io;

use urlfix::{cli, config, logger};

fn main() -> Result<()> {
    cli::parse_args();

    let settings = config::load_settings()?;
    let log_path = logger::init_run_logging(&settings.logging)?;
    if let Some(path) = &log_path {
        tracing::info!(root = %settings.scan.root.display(), log = %path.display(), "starting run");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    urlfix::run(&settings, &mut out)?;

    Ok(())
}
