// Domain layer: listing records and the ports the export loop talks through.

pub mod model;
pub mod ports;
