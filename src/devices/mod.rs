//! Device implementations of the hardware boundary traits

pub mod mock;
