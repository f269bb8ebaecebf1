pub mod animal;
pub mod area;
pub mod configuration;
pub mod snapshot;
