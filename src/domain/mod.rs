//! Domain types shared by forms, storage and views.

pub mod level;

pub use level::{Level, Scale};
