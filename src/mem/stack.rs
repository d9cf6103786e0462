use std::{collections::VecDeque, rc::Rc};

use super::{ElementType, Endian, Layout, MemBlock, MemoryManager, OutOfMemory, Struct, Value};


/// What happens when a push doesn't fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackMode {
	/// Items that don't fit are dropped.
	Bounded,
	/// The oldest items are evicted to make room. Used for input event history, where only
	/// the most recent events matter.
	Rolling,
}


/// An item stored in a stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
	Value(Value),
	Record(Struct),
}


impl Item {
	fn size(&self) -> usize {
		self.tag().size()
	}


	fn tag(&self) -> Tag {
		match self {
			Self::Value(value) => Tag::Value(value.ty()),
			Self::Record(record) => Tag::Record(record.layout().clone()),
		}
	}
}


impl From<Value> for Item {
	fn from(value: Value) -> Self {
		Self::Value(value)
	}
}


impl From<Struct> for Item {
	fn from(record: Struct) -> Self {
		Self::Record(record)
	}
}


/// The type of a stored item, needed to read it back.
#[derive(Debug, Clone)]
enum Tag {
	Value(ElementType),
	Record(Rc<Layout>),
}


impl Tag {
	fn size(&self) -> usize {
		match self {
			Self::Value(ty) => ty.size(),
			Self::Record(layout) => layout.size(),
		}
	}
}


/// A stack of heterogeneous items stored in a memory block.
///
/// Items are packed without padding, in little endian. The type of every item is kept
/// aside, oldest first, so that pops can decode them.
#[derive(Debug)]
pub struct Stack {
	block: MemBlock,
	mode: StackMode,
	/// Bytes in use.
	top: usize,
	tags: VecDeque<Tag>,
}


impl Stack {
	/// Allocate a stack of `capacity` bytes. The capacity is rounded up like any other
	/// allocation.
	pub fn new(
		mem: &mut MemoryManager,
		capacity: usize,
		mode: StackMode,
	) -> Result<Self, OutOfMemory> {
		let block = mem.alloc(ElementType::U8, capacity, &[])?;

		Ok(Self {
			block,
			mode,
			top: 0,
			tags: VecDeque::new(),
		})
	}


	pub fn block(&self) -> &MemBlock {
		&self.block
	}


	pub fn mode(&self) -> StackMode {
		self.mode
	}


	/// Capacity in bytes.
	pub fn capacity(&self) -> usize {
		self.block.len()
	}


	/// Bytes in use.
	pub fn used(&self) -> usize {
		self.top
	}


	/// Number of items.
	pub fn len(&self) -> usize {
		self.tags.len()
	}


	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}


	/// Push items in order, returning how many were stored. In bounded mode, the first
	/// item that doesn't fit and all following ones are dropped. In rolling mode, the
	/// oldest items are evicted until the new one fits. Items larger than the whole stack
	/// are always dropped.
	pub fn push<I, T>(&mut self, mem: &mut MemoryManager, items: I) -> usize
	where
		I: IntoIterator<Item = T>,
		T: Into<Item>,
	{
		let mut view = mem.view_mut(&self.block);
		let mut pushed = 0;

		for item in items {
			let item = item.into();
			let size = item.size();

			if self.top + size > self.capacity() {
				if self.mode == StackMode::Bounded || size > self.capacity() {
					log::trace!("stack: dropping item of {} bytes", size);
					break;
				}

				while self.top + size > self.capacity() {
					let Some(oldest) = self.tags.pop_front() else { break };
					let evicted = oldest.size();

					view.bytes_mut().copy_within(evicted .. self.top, 0);
					self.top -= evicted;
				}
			}

			match &item {
				Item::Value(value) => view.store_value(self.top, value, Endian::Little),
				Item::Record(record) => record.store(&mut view, self.top),
			}

			self.top += size;
			self.tags.push_back(item.tag());
			pushed += 1;
		}

		pushed
	}


	/// Pop the most recent item.
	pub fn pop(&mut self, mem: &MemoryManager) -> Option<Item> {
		let tag = self.tags.pop_back()?;
		self.top -= tag.size();

		let view = mem.view(&self.block);

		let item = match tag {
			Tag::Value(ty) => Item::Value(view.load_value(self.top, ty, Endian::Little)),
			Tag::Record(layout) => Item::Record(Struct::load(layout, &view, self.top)),
		};

		Some(item)
	}


	/// Remove all items.
	pub fn clear(&mut self) {
		self.top = 0;
		self.tags.clear();
	}


	/// Release the stack's memory.
	pub fn free(self, mem: &mut MemoryManager) {
		mem.free(self.block)
	}
}
