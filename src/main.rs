use clap::Parser;

use bank_manager::app::{self, Cli};

fn main() -> anyhow::Result<()> {
    bank_manager::telemetry::init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app::run(cli, &mut out)?;
    Ok(())
}
