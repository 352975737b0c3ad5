// Domain layer: the section data shapes and the conflict capability the schedule depends on.

pub mod model;
pub mod ports;
