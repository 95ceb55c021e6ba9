//! Headless Exoscape application: config and logging setup, catalog load,
//! scene generation and animation, summary output and JSON export.

pub mod assets;
pub mod error;
pub mod export;
pub mod game_loop;
pub mod headless;
pub mod platform;

pub use error::AppError;
pub use headless::{HeadlessRun, load_config, run_headless};
