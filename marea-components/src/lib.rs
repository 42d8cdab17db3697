//! Estimates the fate of a spilled volume of hydrocarbon.
//!
//! The [`mass_balance`] engine partitions the spilled volume into recovered,
//! evaporated, dispersed, dissolved, biodegraded and remaining fractions, using
//! the sub-models in [`fate`] and a hydrocarbon profile resolved through the
//! [`hydrocarbon`] catalog.
//! [`scenario`] wires the pieces together from a configuration document.

pub mod environment;
pub mod fate;
pub mod hydrocarbon;
pub mod mass_balance;
pub mod recovery;
pub mod scenario;
pub mod spill;
