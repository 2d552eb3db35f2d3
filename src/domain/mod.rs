// Domain layer: response models and the ports the loaders are written against.

pub mod model;
pub mod ports;
