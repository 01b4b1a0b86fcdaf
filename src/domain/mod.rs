// Domain layer: numeral models and ports (converter, reporter).

pub mod model;
pub mod ports;
