use std::fmt::{self, Display};


/// An allocation didn't fit in the remaining RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfMemory {
	/// Requested size, in bytes, after rounding.
	pub requested: usize,
	/// Bytes available above the high-water mark.
	pub available: usize,
}


impl Display for OutOfMemory {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"out of memory: requested {} bytes, {} available",
			self.requested,
			self.available
		)
	}
}


impl std::error::Error for OutOfMemory { }
