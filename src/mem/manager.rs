use serde::Serialize;

use super::{BlockView, BlockViewMut, Config, ElementType, MemBlock, OutOfMemory, Value};


/// A tracked range of RAM, either allocated or free for reuse.
#[derive(Debug, Clone)]
struct Entry {
	id: u32,
	/// Bumped every time the range is handed out again, invalidating older handles.
	generation: u32,
	offset: usize,
	len: usize,
	ty: ElementType,
	active: bool,
}


impl Entry {
	fn end(&self) -> usize {
		self.offset + self.len
	}


	fn handle(&self) -> MemBlock {
		MemBlock {
			id: self.id,
			generation: self.generation,
			offset: self.offset,
			len: self.len,
			ty: self.ty,
		}
	}
}


/// The allocator over a fixed size RAM buffer.
///
/// Tracked blocks are kept in allocation order, which is also the order in which free
/// blocks are scanned for reuse. Freed blocks keep their range until the next
/// collection, and may be reused whole or split in the meantime. Fresh allocations are
/// placed at the high-water mark.
#[derive(Debug)]
pub struct MemoryManager {
	ram: Box<[u8]>,
	blocks: Vec<Entry>,
	next_id: u32,
	collect_interval: u64,
	last_collect: u64,
}


impl MemoryManager {
	pub fn new(config: Config) -> Self {
		log::debug!(
			"memory: {} bytes, collecting every {} ticks",
			config.capacity,
			config.collect_interval
		);

		Self {
			ram: vec![0; config.capacity].into(),
			blocks: Vec::new(),
			next_id: 0,
			collect_interval: config.collect_interval,
			last_collect: 0,
		}
	}


	/// Total RAM size, in bytes.
	pub fn capacity(&self) -> usize {
		self.ram.len()
	}


	/// The end of the highest tracked block, active or not.
	pub fn high_water(&self) -> usize {
		self.blocks
			.iter()
			.map(Entry::end)
			.max()
			.unwrap_or(0)
	}


	/// Number of bytes in active blocks.
	pub fn used(&self) -> usize {
		self.blocks
			.iter()
			.filter(|entry| entry.active)
			.map(|entry| entry.len)
			.sum()
	}


	/// Number of tracked blocks, including freed ones not yet collected.
	pub fn tracked(&self) -> usize {
		self.blocks.len()
	}


	/// Allocate a block for `count` elements of the given type. The count is rounded up
	/// to a multiple of four, and a count of zero is treated as four. The initial values
	/// are converted to the element type and written from the first element on.
	///
	/// Fresh ranges are zero filled. Reused ranges keep their previous contents except
	/// for the initial values.
	pub fn alloc(
		&mut self,
		ty: ElementType,
		count: usize,
		initial: &[Value],
	) -> Result<MemBlock, OutOfMemory> {
		let Some((count, size)) = round_up(count.max(1), 4)
			.and_then(|count| Some((count, count.checked_mul(ty.size())?)))
		else {
			let available = self.capacity() - self.high_water();
			log::warn!("memory: allocation of {} elements of {} overflows", count, ty);
			return Err(OutOfMemory { requested: usize::MAX, available });
		};

		let block = match self.reuse(ty, size) {
			Some(block) => block,
			None => self.extend(ty, size)?,
		};

		let mut view = self.view_mut(&block);
		for (index, value) in initial.iter().take(count).enumerate() {
			view.set(index, value.clone());
		}

		Ok(block)
	}


	/// Reactivate the first free block that is large enough, splitting off the remainder.
	fn reuse(&mut self, ty: ElementType, size: usize) -> Option<MemBlock> {
		let ix = self.blocks
			.iter()
			.position(|entry| !entry.active && entry.len >= size)?;

		let entry = &mut self.blocks[ix];
		let remainder = entry.len - size;

		entry.len = size;
		entry.ty = ty;
		entry.active = true;
		entry.generation = entry.generation.wrapping_add(1);

		let block = entry.handle();

		if remainder > 0 {
			let id = self.next_id();
			self.blocks.push(
				Entry {
					id,
					generation: 0,
					offset: block.offset + size,
					len: remainder,
					ty: ElementType::U8,
					active: false,
				}
			);

			log::debug!(
				"memory: split block at {}, {} bytes left free at {}",
				block.offset,
				remainder,
				block.offset + size
			);
		} else {
			log::debug!("memory: reused block of {} bytes at {}", size, block.offset);
		}

		Some(block)
	}


	/// Append a zero filled block at the high-water mark.
	fn extend(&mut self, ty: ElementType, size: usize) -> Result<MemBlock, OutOfMemory> {
		let offset = self.high_water();
		let available = self.capacity() - offset;

		if size > available {
			log::warn!(
				"memory: failed to allocate {} bytes, {} available",
				size,
				available
			);
			return Err(OutOfMemory { requested: size, available });
		}

		let entry = Entry {
			id: self.next_id(),
			generation: 0,
			offset,
			len: size,
			ty,
			active: true,
		};

		self.ram[entry.offset .. entry.end()].fill(0);

		let block = entry.handle();
		self.blocks.push(entry);

		log::debug!("memory: allocated {} bytes of {} at {}", size, ty, offset);

		Ok(block)
	}


	/// Release a block. The contents are left untouched, and the range may be handed out
	/// again by later allocations.
	///
	/// # Panics
	/// Panics if the block has already been freed.
	pub fn free(&mut self, block: MemBlock) {
		let entry = self.entry_mut(&block);
		entry.active = false;

		log::debug!("memory: freed {} bytes at {}", entry.len, entry.offset);
	}


	/// Drop all free blocks from the tracked list, returning how many were dropped.
	/// Ranges above the new high-water mark become available to fresh allocations.
	pub fn collect(&mut self) -> usize {
		let before = self.blocks.len();
		self.blocks.retain(|entry| entry.active);
		let collected = before - self.blocks.len();

		log::debug!("memory: collected {} blocks", collected);

		collected
	}


	/// Advance the clock, collecting if the collection interval has elapsed since the
	/// last collection. Returns the number of collected blocks, if a collection ran.
	pub fn tick(&mut self, timestamp: u64) -> Option<usize> {
		if timestamp.saturating_sub(self.last_collect) < self.collect_interval {
			return None;
		}

		self.last_collect = timestamp;
		Some(self.collect())
	}


	/// Read access to a block.
	///
	/// # Panics
	/// Panics if the block has been freed.
	pub fn view(&self, block: &MemBlock) -> BlockView<'_> {
		let entry = self.entry(block);
		BlockView::new(&self.ram[entry.offset .. entry.end()], entry.ty)
	}


	/// Write access to a block.
	///
	/// # Panics
	/// Panics if the block has been freed.
	pub fn view_mut(&mut self, block: &MemBlock) -> BlockViewMut<'_> {
		let entry = self.entry(block);
		let (range, ty) = (entry.offset .. entry.end(), entry.ty);

		BlockViewMut::new(&mut self.ram[range], ty)
	}


	/// A snapshot of the allocator's bookkeeping, for debugging.
	pub fn dump(&self) -> Dump {
		Dump {
			capacity: self.capacity(),
			high_water: self.high_water(),
			used: self.used(),
			blocks: self.blocks
				.iter()
				.map(
					|entry| DumpBlock {
						offset: entry.offset,
						len: entry.len,
						ty: entry.ty,
						active: entry.active,
					}
				)
				.collect(),
		}
	}


	fn next_id(&mut self) -> u32 {
		let id = self.next_id;
		self.next_id = self.next_id.wrapping_add(1);
		id
	}


	fn position(&self, block: &MemBlock) -> usize {
		let ix = self.blocks
			.iter()
			.position(|entry| entry.id == block.id);

		match ix {
			Some(ix) if self.blocks[ix].active && self.blocks[ix].generation == block.generation => ix,
			_ => panic!("use of freed memory block at {}", block.offset),
		}
	}


	fn entry(&self, block: &MemBlock) -> &Entry {
		&self.blocks[self.position(block)]
	}


	fn entry_mut(&mut self, block: &MemBlock) -> &mut Entry {
		let ix = self.position(block);
		&mut self.blocks[ix]
	}
}


impl Default for MemoryManager {
	fn default() -> Self {
		Self::new(Config::default())
	}
}


/// Round up to the next multiple, None on overflow.
fn round_up(value: usize, multiple: usize) -> Option<usize> {
	Some(value.checked_add(multiple - 1)? / multiple * multiple)
}


/// Serializable snapshot of the tracked blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dump {
	pub capacity: usize,
	pub high_water: usize,
	pub used: usize,
	/// Blocks in allocation order.
	pub blocks: Vec<DumpBlock>,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpBlock {
	pub offset: usize,
	pub len: usize,
	pub ty: ElementType,
	pub active: bool,
}
