use clap::Parser;
use knobdeck::config;
use knobdeck::events::EventSink;
use knobdeck::gui::app::AppModel;
use knobdeck::gui::panel::InterfaceController;
use knobdeck::sys::runtime;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file to use instead of the one in the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default configuration file (if missing), print its path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => config::resolve_config_path(&path)?,
        None => config::get_config_path()?,
    };

    if args.init_config {
        let path = config::write_default_config(&config_path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default(&config_path);

    let (tx, rx) = async_channel::bounded(32);
    let controller = InterfaceController::new(&config, EventSink::new(tx.clone()))?;

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    let app = RelmApp::new("org.troia.knobdeck").with_args(Vec::new());

    app.run::<AppModel>((controller, config, config_path, rx));
    Ok(())
}
