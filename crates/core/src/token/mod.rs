pub mod entity;
pub mod registry;
