pub mod env;
mod loader;

pub use env::{
    AppConfig, DirectoryConfig, HeuristicConfig, PresentationConfig, PresentationMode,
    WebContentConfig,
};
pub use loader::load_config;
