// Domain layer: slide/presentation models and the ports the scheduler talks through.

pub mod model;
pub mod ports;
