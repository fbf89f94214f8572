//! Configuration handling for kpkg
//!
//! This module contains:
//! - `config.yaml` - user settings, see [`Settings`]

pub mod settings;

pub use settings::Settings;
