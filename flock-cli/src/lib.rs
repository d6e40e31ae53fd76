//! Headless driver for `flock-core`: settings loading, a scripted mouse
//! target and JSON-lines frame output.

pub mod runner;
pub mod script;
pub mod settings;

pub use runner::{frame_snapshot, write_frame, Runner};
pub use script::{parse_vec3, MouseAction, MouseScript};
pub use settings::{load_settings, to_config, validate_population, validate_settings};
