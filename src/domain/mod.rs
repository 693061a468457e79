// Domain layer: selection models and ports (interfaces) to the file system.

pub mod model;
pub mod ports;
