pub mod assembler;
pub mod data;
pub mod plan;
pub mod resolver;
pub mod types;

pub use assembler::*;
pub use data::*;
pub use plan::*;
pub use resolver::*;
pub use types::*;

#[cfg(test)]
mod catalog_tests;
