use std::ops::Range;

use super::{ElementType, Endian, Value};


/// A handle to an allocated range of RAM.
///
/// Handles are plain copyable values. Access goes through the memory manager, which
/// checks that the handle still refers to a live allocation: using a handle after it
/// has been freed is a programming error, and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemBlock {
	pub(super) id: u32,
	pub(super) generation: u32,
	pub(super) offset: usize,
	pub(super) len: usize,
	pub(super) ty: ElementType,
}


impl MemBlock {
	/// Absolute offset of the block in RAM.
	pub fn offset(&self) -> usize {
		self.offset
	}


	/// Size of the block, in bytes.
	pub fn len(&self) -> usize {
		self.len
	}


	pub fn is_empty(&self) -> bool {
		self.len == 0
	}


	/// The element type.
	pub fn ty(&self) -> ElementType {
		self.ty
	}


	/// Number of elements in the block.
	pub fn count(&self) -> usize {
		self.len / self.ty.size()
	}


	/// The absolute byte range in RAM.
	pub fn range(&self) -> Range<usize> {
		self.offset .. self.offset + self.len
	}
}


/// Panic for an access outside of a block.
#[cold]
fn out_of_bounds(offset: usize, size: usize, len: usize) -> ! {
	panic!(
		"memory access out of bounds: {} bytes at offset {} in a block of {} bytes",
		size,
		offset,
		len
	)
}


/// Get a fixed size array from a block's bytes.
fn array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
	let mut array = [0; N];
	array.copy_from_slice(slice(bytes, offset, N));
	array
}


fn slice(bytes: &[u8], offset: usize, size: usize) -> &[u8] {
	offset
		.checked_add(size)
		.and_then(|end| bytes.get(offset .. end))
		.unwrap_or_else(|| out_of_bounds(offset, size, bytes.len()))
}


fn slice_mut(bytes: &mut [u8], offset: usize, size: usize) -> &mut [u8] {
	let len = bytes.len();

	match offset.checked_add(size) {
		Some(end) if end <= len => &mut bytes[offset .. end],
		_ => out_of_bounds(offset, size, len),
	}
}


macro_rules! load {
	($name: ident, $type: ty) => {
		/// Load a value at the given byte offset, relative to the block.
		pub fn $name(&self, offset: usize, endian: Endian) -> $type {
			let bytes = array(self.bytes, offset);

			match endian {
				Endian::Little => <$type>::from_le_bytes(bytes),
				Endian::Big => <$type>::from_be_bytes(bytes),
			}
		}
	};
}


macro_rules! store {
	($name: ident, $type: ty) => {
		/// Store a value at the given byte offset, relative to the block.
		pub fn $name(&mut self, offset: usize, value: $type, endian: Endian) {
			let bytes = match endian {
				Endian::Little => value.to_le_bytes(),
				Endian::Big => value.to_be_bytes(),
			};

			slice_mut(self.bytes, offset, bytes.len()).copy_from_slice(&bytes);
		}
	};
}


/// Read access to a block's bytes.
///
/// All offsets are relative to the start of the block. Accesses past the end of the
/// block panic.
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a> {
	bytes: &'a [u8],
	ty: ElementType,
}


impl<'a> BlockView<'a> {
	pub(super) fn new(bytes: &'a [u8], ty: ElementType) -> Self {
		Self { bytes, ty }
	}


	pub fn ty(&self) -> ElementType {
		self.ty
	}


	/// Number of elements in the block.
	pub fn len(&self) -> usize {
		self.bytes.len() / self.ty.size()
	}


	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}


	/// The raw bytes.
	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}


	pub fn load_u8(&self, offset: usize) -> u8 {
		slice(self.bytes, offset, 1)[0]
	}


	pub fn load_i8(&self, offset: usize) -> i8 {
		self.load_u8(offset) as i8
	}


	load!(load_u16, u16);
	load!(load_i16, i16);
	load!(load_u32, u32);
	load!(load_i32, i32);
	load!(load_f32, f32);


	/// Load a null terminated string of at most `max_len` bytes. Invalid UTF-8 sequences
	/// are replaced.
	pub fn load_str(&self, offset: usize, max_len: usize) -> Box<str> {
		let bytes = slice(self.bytes, offset, max_len);
		let end = bytes
			.iter()
			.position(|&byte| byte == 0)
			.unwrap_or(bytes.len());

		String::from_utf8_lossy(&bytes[..end]).into()
	}


	/// Load a value of the given type at a byte offset.
	pub fn load_value(&self, offset: usize, ty: ElementType, endian: Endian) -> Value {
		match ty {
			ElementType::U8 => Value::U8(self.load_u8(offset)),
			ElementType::I8 => Value::I8(self.load_i8(offset)),
			ElementType::U16 => Value::U16(self.load_u16(offset, endian)),
			ElementType::I16 => Value::I16(self.load_i16(offset, endian)),
			ElementType::U32 => Value::U32(self.load_u32(offset, endian)),
			ElementType::I32 => Value::I32(self.load_i32(offset, endian)),
			ElementType::F32 => Value::F32(self.load_f32(offset, endian)),
			ElementType::Str => Value::Str(self.load_str(offset, ElementType::STR_SIZE)),
		}
	}


	/// Get the element at the given index. Elements are little endian.
	pub fn get(&self, index: usize) -> Value {
		self.load_value(index * self.ty.size(), self.ty, Endian::Little)
	}


	/// Iterate over all elements.
	pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
		(0 .. self.len()).map(move |index| self.get(index))
	}
}


/// Write access to a block's bytes.
///
/// All offsets are relative to the start of the block. Accesses past the end of the
/// block panic.
#[derive(Debug)]
pub struct BlockViewMut<'a> {
	bytes: &'a mut [u8],
	ty: ElementType,
}


impl<'a> BlockViewMut<'a> {
	pub(super) fn new(bytes: &'a mut [u8], ty: ElementType) -> Self {
		Self { bytes, ty }
	}


	/// Reborrow as a read only view.
	pub fn as_view(&self) -> BlockView<'_> {
		BlockView::new(&*self.bytes, self.ty)
	}


	pub fn ty(&self) -> ElementType {
		self.ty
	}


	/// Number of elements in the block.
	pub fn len(&self) -> usize {
		self.bytes.len() / self.ty.size()
	}


	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}


	/// The raw bytes.
	pub fn bytes_mut(&mut self) -> &mut [u8] {
		&mut *self.bytes
	}


	pub fn store_u8(&mut self, offset: usize, value: u8) {
		slice_mut(self.bytes, offset, 1)[0] = value;
	}


	pub fn store_i8(&mut self, offset: usize, value: i8) {
		self.store_u8(offset, value as u8)
	}


	store!(store_u16, u16);
	store!(store_i16, i16);
	store!(store_u32, u32);
	store!(store_i32, i32);
	store!(store_f32, f32);


	/// Store a string in a field of `max_len` bytes. The string is truncated to leave
	/// room for the null terminator, and the rest of the field is zeroed.
	pub fn store_str(&mut self, offset: usize, value: &str, max_len: usize) {
		let field = slice_mut(self.bytes, offset, max_len);
		let len = value.len().min(max_len.saturating_sub(1));

		field[..len].copy_from_slice(&value.as_bytes()[..len]);
		field[len..].fill(0);
	}


	/// Store a value at a byte offset, using the value's own type.
	pub fn store_value(&mut self, offset: usize, value: &Value, endian: Endian) {
		match value {
			Value::U8(int) => self.store_u8(offset, *int),
			Value::I8(int) => self.store_i8(offset, *int),
			Value::U16(int) => self.store_u16(offset, *int, endian),
			Value::I16(int) => self.store_i16(offset, *int, endian),
			Value::U32(int) => self.store_u32(offset, *int, endian),
			Value::I32(int) => self.store_i32(offset, *int, endian),
			Value::F32(float) => self.store_f32(offset, *float, endian),
			Value::Str(string) => self.store_str(offset, string, ElementType::STR_SIZE),
		}
	}


	/// Set the element at the given index, converting the value to the block's type.
	/// Elements are little endian.
	pub fn set(&mut self, index: usize, value: Value) {
		let offset = index * self.ty.size();
		let value = value.cast(self.ty);
		self.store_value(offset, &value, Endian::Little)
	}


	/// Set every element in the range to the given value.
	pub fn fill(&mut self, elements: Range<usize>, value: Value) {
		let value = value.cast(self.ty);

		for index in elements {
			self.store_value(index * self.ty.size(), &value, Endian::Little);
		}
	}


	/// Copy a range of elements to the given destination index. The ranges may overlap.
	pub fn copy_within(&mut self, elements: Range<usize>, dest: usize) {
		let size = self.ty.size();
		let src = elements.start * size .. elements.end * size;
		let dest = dest * size;

		if src.end > self.bytes.len() || dest + src.len() > self.bytes.len() {
			out_of_bounds(dest.max(src.start), src.len(), self.bytes.len());
		}

		self.bytes.copy_within(src, dest);
	}
}
