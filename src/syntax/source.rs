use std::{
	fmt,
	fs,
	io,
	path::{Path, PathBuf},
};

use crate::{
	fmt::Display,
	symbol::{self, Symbol},
};


/// A script source unit.
#[derive(Debug)]
pub struct Source {
	/// The origin path, may be something fictional like `<stdin>`.
	pub path: Symbol,
	/// The source code.
	pub contents: Box<str>,
}


impl Source {
	/// Create a source unit from in-memory text.
	pub fn new<T>(path: Symbol, contents: T) -> Self
	where
		T: Into<Box<str>>,
	{
		Self { path, contents: contents.into() }
	}


	/// Load the source code from a file path.
	pub fn from_path(path: &Path, interner: &mut symbol::Interner) -> io::Result<Self> {
		let file = fs::File::open(path)?;
		let path = interner.get_or_intern(path.to_string_lossy());
		Self::from_reader(path, file)
	}


	/// Load the source code from a std::io::Read.
	/// The path may be anything, including fictional paths like `<stdin>`.
	pub fn from_reader<R>(path: Symbol, mut reader: R) -> io::Result<Self>
	where
		R: io::Read,
	{
		let mut contents = String::with_capacity(512);
		reader.read_to_string(&mut contents)?;

		Ok(Self { path, contents: contents.into() })
	}
}


/// A human readable position in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePos {
	pub line: u32,
	pub column: u32,
	pub path: Symbol,
}


impl<'a> Display<'a> for SourcePos {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut fmt::Formatter, context: Self::Context) -> fmt::Result {
		write!(
			f,
			"{} (line {}, column {})",
			context.resolve(self.path).unwrap_or("<unknown>"),
			self.line,
			self.column
		)
	}
}


impl fmt::Display for SourcePos {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "line {}, column {}", self.line, self.column)
	}
}


/// A byte range in a source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}


/// Loads the source text of `#"name"` include directives.
/// Loading may block on I/O; this is the only point where tokenization waits.
pub trait IncludeResolver {
	fn resolve(&mut self, name: &str) -> io::Result<Box<str>>;
}


impl<F> IncludeResolver for F
where
	F: FnMut(&str) -> io::Result<Box<str>>,
{
	fn resolve(&mut self, name: &str) -> io::Result<Box<str>> {
		self(name)
	}
}


/// Resolves include names as paths relative to a base directory.
#[derive(Debug, Clone)]
pub struct FsResolver {
	base: PathBuf,
}


impl FsResolver {
	pub fn new<P>(base: P) -> Self
	where
		P: Into<PathBuf>,
	{
		Self { base: base.into() }
	}
}


impl IncludeResolver for FsResolver {
	fn resolve(&mut self, name: &str) -> io::Result<Box<str>> {
		let path = self.base.join(name);
		log::debug!("loading include {}", path.display());
		fs::read_to_string(path).map(Into::into)
	}
}


/// A resolver for sources that may not include anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncludes;


impl IncludeResolver for NoIncludes {
	fn resolve(&mut self, name: &str) -> io::Result<Box<str>> {
		Err(
			io::Error::new(
				io::ErrorKind::NotFound,
				format!("includes are disabled, can't load \"{}\"", name)
			)
		)
	}
}
