//! Core simulation types: math re-exports, flight state, free-look camera,
//! decoration scenery.

pub use glam::{Mat4, Vec3, vec3};

pub mod camera;
pub mod flight;
pub mod scenery;
