pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LogFormat};

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{
    catalog::ZoneCatalog,
    generator::{Canvas, PositionGenerator},
    layout::LayoutEngine,
    random::RngSource,
    transition::TransitionController,
};
pub use domain::model::{AngularPolicy, Entity, Placement, Point, Snapshot, Zone};
pub use utils::error::{LayoutError, Result};
