//! Common, shared types.

pub mod math;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
