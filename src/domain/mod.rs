// Domain layer: waitlist models and the ports the watcher depends on.

pub mod model;
pub mod ports;
