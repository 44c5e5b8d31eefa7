// Domain layer: the state document model and the ports the loader depends on.

pub mod model;
pub mod ports;
