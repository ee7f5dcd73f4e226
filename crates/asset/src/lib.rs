//! Asset loading/parsers: triangle-mesh model type and OBJ loader.

pub mod model;
pub mod obj;
