use std::fmt::{self, Display};

use serde::Serialize;


/// The type of the elements stored in a memory block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
	U8,
	I8,
	U16,
	I16,
	U32,
	I32,
	F32,
	/// Fixed size, null terminated string.
	Str,
}


impl ElementType {
	/// The number of bytes taken by a string element, including the terminator.
	pub const STR_SIZE: usize = 64;


	/// The size of a single element, in bytes.
	pub fn size(self) -> usize {
		match self {
			Self::U8 | Self::I8 => 1,
			Self::U16 | Self::I16 => 2,
			Self::U32 | Self::I32 | Self::F32 => 4,
			Self::Str => Self::STR_SIZE,
		}
	}


	/// The type's name, as used in scripts.
	pub fn name(self) -> &'static str {
		match self {
			Self::U8 => "u8",
			Self::I8 => "i8",
			Self::U16 => "u16",
			Self::I16 => "i16",
			Self::U32 => "u32",
			Self::I32 => "i32",
			Self::F32 => "f32",
			Self::Str => "str",
		}
	}


	/// Parse a type name, ignoring case. `string` is accepted as an alias for `str`.
	pub fn from_name(name: &str) -> Option<Self> {
		let ty = match name.to_ascii_lowercase().as_str() {
			"u8" => Self::U8,
			"i8" => Self::I8,
			"u16" => Self::U16,
			"i16" => Self::I16,
			"u32" => Self::U32,
			"i32" => Self::I32,
			"f32" => Self::F32,
			"str" | "string" => Self::Str,
			_ => return None,
		};

		Some(ty)
	}


	/// The value of a zero filled element.
	pub fn zero(self) -> Value {
		match self {
			Self::U8 => Value::U8(0),
			Self::I8 => Value::I8(0),
			Self::U16 => Value::U16(0),
			Self::I16 => Value::I16(0),
			Self::U32 => Value::U32(0),
			Self::I32 => Value::I32(0),
			Self::F32 => Value::F32(0.0),
			Self::Str => Value::Str("".into()),
		}
	}
}


impl Display for ElementType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}


/// Byte order for multi-byte accesses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
	#[default]
	Little,
	Big,
}


/// A value as stored in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	U8(u8),
	I8(i8),
	U16(u16),
	I16(i16),
	U32(u32),
	I32(i32),
	F32(f32),
	Str(Box<str>),
}


impl Value {
	/// The element type that stores this value.
	pub fn ty(&self) -> ElementType {
		match self {
			Self::U8(_) => ElementType::U8,
			Self::I8(_) => ElementType::I8,
			Self::U16(_) => ElementType::U16,
			Self::I16(_) => ElementType::I16,
			Self::U32(_) => ElementType::U32,
			Self::I32(_) => ElementType::I32,
			Self::F32(_) => ElementType::F32,
			Self::Str(_) => ElementType::Str,
		}
	}


	/// Convert the value to another element type. Integer conversions wrap, float to
	/// integer conversions saturate. Numbers are formatted when converted to strings.
	///
	/// # Panics
	/// Converting a string to a number is a type error.
	pub fn cast(self, ty: ElementType) -> Self {
		if self.ty() == ty {
			return self;
		}

		let number = match self {
			Self::Str(string) => panic!("cannot store string {:?} as {}", string, ty),
			Self::F32(float) if ty != ElementType::Str => {
				return match ty {
					ElementType::U8 => Self::U8(float as u8),
					ElementType::I8 => Self::I8(float as i8),
					ElementType::U16 => Self::U16(float as u16),
					ElementType::I16 => Self::I16(float as i16),
					ElementType::U32 => Self::U32(float as u32),
					_ => Self::I32(float as i32),
				};
			}
			Self::F32(float) => return Self::Str(format!("{:?}", float).into()),
			Self::U8(int) => int as i64,
			Self::I8(int) => int as i64,
			Self::U16(int) => int as i64,
			Self::I16(int) => int as i64,
			Self::U32(int) => int as i64,
			Self::I32(int) => int as i64,
		};

		match ty {
			ElementType::U8 => Self::U8(number as u8),
			ElementType::I8 => Self::I8(number as i8),
			ElementType::U16 => Self::U16(number as u16),
			ElementType::I16 => Self::I16(number as i16),
			ElementType::U32 => Self::U32(number as u32),
			ElementType::I32 => Self::I32(number as i32),
			ElementType::F32 => Self::F32(number as f32),
			ElementType::Str => Self::Str(number.to_string().into()),
		}
	}
}


impl Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::U8(int) => write!(f, "{}", int),
			Self::I8(int) => write!(f, "{}", int),
			Self::U16(int) => write!(f, "{}", int),
			Self::I16(int) => write!(f, "{}", int),
			Self::U32(int) => write!(f, "{}", int),
			Self::I32(int) => write!(f, "{}", int),
			Self::F32(float) => write!(f, "{:?}", float),
			Self::Str(string) => write!(f, "{}", string),
		}
	}
}


macro_rules! value_from {
	($type: ty, $variant: ident) => {
		impl From<$type> for Value {
			fn from(value: $type) -> Self {
				Self::$variant(value)
			}
		}
	};
}

value_from!(u8, U8);
value_from!(i8, I8);
value_from!(u16, U16);
value_from!(i16, I16);
value_from!(u32, U32);
value_from!(i32, I32);
value_from!(f32, F32);
value_from!(Box<str>, Str);


impl From<&str> for Value {
	fn from(string: &str) -> Self {
		Self::Str(string.into())
	}
}
