//! Core building blocks shared by the Marea crates.
//!
//! - [`Component`]: the deterministic input → output contract models implement.
//! - [`constraint`]: numeric invariants enforced at construction time.
//! - [`InvalidParameter`]: a constraint violation tied to the offending field,
//!   raised by [`constrain`] and [`ensure_finite`].

mod component;
pub mod constraint;
mod parameter;

pub use component::Component;
pub use parameter::{InvalidParameter, constrain, ensure_finite};
