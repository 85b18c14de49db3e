//! Stores owned by the composing service.
//!
//! Each repository is an explicit value constructed at startup and handed to whatever needs
//! it; there is no process-global store. Tests build a fresh instance each.

pub mod patients;
