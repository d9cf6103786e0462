//! Simulated RAM for the virtual machine: a fixed size arena, an allocator handing out
//! typed blocks of it, and the structures built on top of blocks.
//!
//! There is no global memory. Every subsystem that needs RAM receives the
//! `MemoryManager` that owns it.

mod block;
mod error;
mod manager;
mod record;
mod stack;
mod value;
#[cfg(test)]
mod tests;

pub use block::{BlockView, BlockViewMut, MemBlock};
pub use error::OutOfMemory;
pub use manager::{Dump, DumpBlock, MemoryManager};
pub use record::{Field, Layout, Struct};
pub use stack::{Item, Stack, StackMode};
pub use value::{ElementType, Endian, Value};


/// Memory configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
	/// RAM size, in bytes.
	pub capacity: usize,
	/// Minimum number of ticks between two collections.
	pub collect_interval: u64,
}


impl Default for Config {
	fn default() -> Self {
		Self {
			capacity: 4 * 1024 * 1024,
			collect_interval: 32 * 1024,
		}
	}
}
