// Domain layer: the explanation record and the ports the pipeline talks through.

pub mod model;
pub mod ports;
