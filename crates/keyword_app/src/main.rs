mod platform;
mod settings;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = settings::Args::parse();
    let settings = settings::Settings::resolve(args)?;
    keyword_logging::initialize(&settings.log, settings.log_level);
    platform::run_app(settings)
}
