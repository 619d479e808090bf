pub mod browser;
pub mod catalog;
pub mod connection;
pub mod error;
pub mod pager;

pub use browser::*;
pub use catalog::*;
pub use connection::*;
