//! Infrastructure layer: concrete implementations of domain abstractions.

pub mod dto;
pub mod registry;
