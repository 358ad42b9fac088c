//! `stompguard` frame constraints
//!
//! This crate defines the frame model read by the guard and the
//! [`Constraints`] checks applied to frames received from clients.

pub mod constants;
pub mod constraints;
pub mod frame;

pub use constants::CONSTRAINTS_MAX;
pub use constraints::{ConstraintError, Constraints, FrameConstraints};
pub use frame::{Command, CommandError, Frame, Header};
