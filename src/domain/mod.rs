// Domain layer: widget entities and the ports every external collaborator is reached through.

pub mod model;
pub mod ports;
