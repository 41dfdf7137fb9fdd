// src/render/mod.rs
pub mod comparison;

pub use comparison::{render, Cell, Comparison, ComparisonRow, TextStyle, PLACEHOLDER};
