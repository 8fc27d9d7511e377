//! vocatrack CLI library.
//!
//! Project loading and the command implementations behind the `vocatrack`
//! binary.

pub mod commands;
pub mod project;
