//! The `exoscape` binary.

use std::process::ExitCode;

use clap::Parser;
use exoscape_app::assets::ImageCache;
use exoscape_app::export::SceneExport;
use exoscape_app::platform::PlatformDirs;
use exoscape_app::{AppError, load_config, run_headless};
use exoscape_catalog::{CatalogState, PlanetSummary, load_catalog};
use exoscape_config::{CliArgs, Config};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match args.config.as_deref() {
        Some(root) => Ok(PlatformDirs::resolve_with_root(root)),
        None => PlatformDirs::resolve(),
    };
    let setup = dirs.map_err(AppError::from).and_then(|dirs| {
        dirs.create_dirs()?;
        let config = load_config(&dirs.config_dir, &args)?;
        Ok((dirs, config))
    });

    let (dirs, config) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            exoscape_log::init_logging(None, false, None);
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    exoscape_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, args: &CliArgs) -> Result<(), AppError> {
    let mut catalog = CatalogState::default();
    catalog.load_with(|| load_catalog(&config.catalog));
    match catalog.error() {
        Some(message) => warn!("Rendering without featured planets: {message}"),
        None => info!("Catalog loaded: {} planets", catalog.records().len()),
    }

    let mut images = ImageCache::new();
    let run = run_headless(config, catalog.records(), &mut images);
    if !run.assets.missing.is_empty() {
        warn!(
            "{} assets missing under {}",
            run.assets.missing.len(),
            config.render.texture_root.display()
        );
    }

    for planet in run.scene.planets() {
        println!("{}", PlanetSummary::new(&planet.record));
    }

    if let Some(path) = args.export.as_deref() {
        SceneExport::capture(
            &run.scene,
            config,
            run.steps.frame_count(),
            run.steps.total_sim_time(),
            catalog.error(),
        )
        .write(path)?;
        info!("Scene exported to {}", path.display());
    }
    Ok(())
}
