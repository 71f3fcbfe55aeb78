pub mod classifier;
pub mod entities;
pub mod ports;
pub mod value_objects;
