pub mod container;
pub mod driver;
pub mod particle_field;
pub mod point;
