//! Foundation Installer - points Maya at a Shared Scripting folder
//!
//! This is the main entry point. It handles:
//! 1. CLI argument parsing (--silent, --shared-folder, etc.)
//! 2. Loading installer.toml and setting up logging
//! 3. Running the terminal wizard or a silent install

use anyhow::{bail, Context, Result};
use clap::Parser;
use foundation_installer::config::{self, InstallerConfig};
use foundation_installer::installer::InstallationEngine;
use foundation_installer::logging;
use foundation_installer::relay::EventRelay;
use foundation_installer::ui::console::{self, ConsoleView};
use foundation_installer::wizard::{WizardController, WizardStep};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::info;

/// Foundation Installer - Shared Scripting setup for Maya
#[derive(Parser, Debug)]
#[command(name = "foundation-installer")]
#[command(about = "Installs the shared scripting bootstrap into Maya's user script folder")]
#[command(version)]
struct Args {
    /// Path to installer.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host per-user script directory (default: platform convention)
    #[arg(long, value_name = "DIR")]
    user_script_dir: Option<PathBuf>,

    /// Shared Scripting folder to install
    #[arg(long, value_name = "DIR")]
    shared_folder: Option<String>,

    /// Install without prompting (requires a shared folder)
    #[arg(long)]
    silent: bool,

    /// Print the installation report as JSON
    #[arg(long)]
    json: bool,

    /// Print a template installer.toml and exit
    #[arg(long)]
    init_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.init_config {
        print!("{}", config::generate_template());
        return Ok(());
    }

    let config = InstallerConfig::load_or_default(args.config.as_deref())?;
    logging::init_logging(&config.logging.level, args.verbose, args.silent);

    info!("Foundation Installer v{}", env!("CARGO_PKG_VERSION"));

    let user_script_dir = match args.user_script_dir.clone() {
        Some(dir) => dir,
        None => config.user_script_dir()?,
    };
    info!("User script directory: {:?}", user_script_dir);

    let relay = Rc::new(EventRelay::new());
    let engine = InstallationEngine::new(relay, user_script_dir)
        .with_product_url(config.host.product_url.clone());

    let shared_folder = args
        .shared_folder
        .clone()
        .or_else(|| config.install.shared_folder.clone());

    if args.silent {
        run_silent(engine, shared_folder, args.json)
    } else {
        run_wizard(engine, shared_folder, args.json)
    }
}

/// Drive the wizard straight through without a terminal page per step
fn run_silent(
    engine: InstallationEngine,
    shared_folder: Option<String>,
    json: bool,
) -> Result<()> {
    let shared_folder = shared_folder
        .context("Silent install needs --shared-folder or [install] shared_folder")?;

    let mut wizard = WizardController::new(engine, Box::new(ConsoleView::quiet()));
    wizard.on_path_field_changed(&shared_folder)?;
    wizard.go_forward()?;
    wizard.go_forward()?;

    finish(&wizard, json)?;

    match (wizard.step(), wizard.installation_success()) {
        (WizardStep::Summary, Some(true)) => {
            wizard.go_forward()?;
            Ok(())
        }
        (WizardStep::SelectFolder, _) => bail!(
            "Shared folder '{}' could not be used",
            wizard
                .engine()
                .shared_folder_path()
                .map(|p| p.as_str())
                .unwrap_or_default()
        ),
        _ => bail!("Installation failed, see details above"),
    }
}

fn run_wizard(
    engine: InstallationEngine,
    shared_folder: Option<String>,
    json: bool,
) -> Result<()> {
    let mut wizard = WizardController::new(engine, Box::new(ConsoleView::stdout()));
    if let Some(ref folder) = shared_folder {
        wizard.on_path_field_changed(folder)?;
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    console::run_interactive(&mut wizard, stdin.lock(), &mut stdout)?;

    if wizard.installation_success().is_some() {
        finish(&wizard, json)?;
    }
    Ok(())
}

fn finish(wizard: &WizardController, json: bool) -> Result<()> {
    let report = wizard.engine().report();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.success != Some(true) {
        eprintln!("{}", wizard.engine().log());
    }
    Ok(())
}
