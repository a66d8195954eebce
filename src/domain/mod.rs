// Domain layer: plan geometry, entity records and ports (interfaces).

pub mod model;
pub mod ports;
