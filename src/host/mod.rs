//! Line-oriented JSON bridge to whatever drives the filter.

pub mod commands;
pub mod control;
pub mod io;

pub use commands::HostCommand;
pub use control::SettingsControl;
