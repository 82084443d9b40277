pub mod cascade;
pub mod common;
pub mod orbit;
pub mod spill;

pub use common::*;
