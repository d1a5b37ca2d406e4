//! Small filesystem helpers shared by the tools.

pub mod atomic;
