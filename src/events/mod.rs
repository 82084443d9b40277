pub mod orientation;
pub mod pointer;
pub mod scroll;
