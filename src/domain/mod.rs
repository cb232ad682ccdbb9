// Domain layer: breed/pet models and the ports the HTTP adapters implement.

pub mod model;
pub mod ports;
