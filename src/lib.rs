//! Bookshelf application library
//!
//! Hosts the book catalogue module and the helpers it needs, mounted by the
//! `bookshelf` binary onto the shared HTTP facade.

pub mod modules;
pub mod utils;

pub use modules::books;
