use std::rc::Rc;

use super::{BlockView, BlockViewMut, ElementType, Endian, Value};


/// A field in a record layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	pub name: Box<str>,
	pub ty: ElementType,
	/// Byte offset from the start of the record.
	pub offset: usize,
}


/// The fixed layout of a record: fields packed in declaration order, without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
	fields: Box<[Field]>,
	size: usize,
}


impl Layout {
	pub fn new<I, S>(fields: I) -> Self
	where
		I: IntoIterator<Item = (S, ElementType)>,
		S: Into<Box<str>>,
	{
		let mut size = 0;

		let fields = fields
			.into_iter()
			.map(
				|(name, ty)| {
					let field = Field { name: name.into(), ty, offset: size };
					size += ty.size();
					field
				}
			)
			.collect();

		Self { fields, size }
	}


	/// Total size of a record, in bytes.
	pub fn size(&self) -> usize {
		self.size
	}


	pub fn fields(&self) -> &[Field] {
		&self.fields
	}


	fn index_of(&self, name: &str) -> Option<usize> {
		self.fields
			.iter()
			.position(|field| &*field.name == name)
	}
}


/// A record of values following a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
	layout: Rc<Layout>,
	values: Box<[Value]>,
}


impl Struct {
	/// A record with every field zeroed.
	pub fn new(layout: Rc<Layout>) -> Self {
		let values = layout.fields
			.iter()
			.map(|field| field.ty.zero())
			.collect();

		Self { layout, values }
	}


	pub fn layout(&self) -> &Rc<Layout> {
		&self.layout
	}


	pub fn get(&self, name: &str) -> Option<&Value> {
		self.layout
			.index_of(name)
			.map(|ix| &self.values[ix])
	}


	/// Set a field, converting the value to the field's type. Returns false if there is
	/// no such field.
	pub fn set(&mut self, name: &str, value: Value) -> bool {
		match self.layout.index_of(name) {
			Some(ix) => {
				self.values[ix] = value.cast(self.layout.fields[ix].ty);
				true
			}

			None => false,
		}
	}


	/// The values, in field order.
	pub fn values(&self) -> &[Value] {
		&self.values
	}


	/// Read a record stored at the given byte offset of a block. Fields are little endian.
	pub fn load(layout: Rc<Layout>, view: &BlockView, offset: usize) -> Self {
		let values = layout.fields
			.iter()
			.map(|field| view.load_value(offset + field.offset, field.ty, Endian::Little))
			.collect();

		Self { layout, values }
	}


	/// Write the record at the given byte offset of a block. Fields are little endian.
	pub fn store(&self, view: &mut BlockViewMut, offset: usize) {
		for (field, value) in self.layout.fields.iter().zip(self.values.iter()) {
			view.store_value(offset + field.offset, value, Endian::Little);
		}
	}
}
