//! Slices of the lab store

pub mod counter;
pub mod lessons;
pub mod photos;
pub mod products;
pub mod student;
