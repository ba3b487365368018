// Domain layer: data contract, response schema and ports. No transport code here.

pub mod model;
pub mod ports;
pub mod schema;
