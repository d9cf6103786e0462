//! Script front-end and memory core for a small retro-style virtual machine.
//!
//! The `syntax` module turns script sources into an AST, and the `mem` module provides
//! the RAM arena that the VM's subsystems allocate from.

pub mod fmt;
pub mod mem;
pub mod symbol;
pub mod syntax;
pub mod term;
#[cfg(test)]
mod tests;
