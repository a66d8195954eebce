pub mod catalog;
pub mod generator;
pub mod layout;
pub mod random;
pub mod snapshot;
pub mod transition;

pub use crate::domain::model::{AngularPolicy, Entity, Placement, Point, Snapshot, Zone};
pub use crate::domain::ports::{ConfigProvider, RandomSource, Storage};
pub use crate::utils::error::Result;
