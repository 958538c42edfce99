// Domain layer: entity records and the backend port. No transport concerns here.

pub mod model;
pub mod ports;
