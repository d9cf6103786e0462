#[cfg(test)]
mod tests;

use super::SourcePos;
use crate::symbol::{self, Symbol};


/// The construct that introduced a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
	Program,
	Function,
	If,
	Else,
	While,
	For,
	Class,
}


/// What a name was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
	Var,
	Function,
	Class,
}


/// A declaration in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameItem {
	pub name: Symbol,
	pub kind: DeclKind,
	/// Where the declaration was made. Built-ins have no position.
	pub pos: Option<SourcePos>,
}


/// A handle to a declaration, valid while its frame is on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
	pub frame: usize,
	pub item: usize,
}


/// A frame on the stack. Its items are stored contiguously in `Frames::items`, starting at
/// `start`.
#[derive(Debug, Clone, Copy)]
struct Frame {
	kind: FrameKind,
	start: usize,
}


/// A position in the frame stack, used to rewind after a speculative parse.
/// As frames and items are only ever pushed and popped, the two lengths identify the
/// complete state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
	frames: usize,
	items: usize,
}


/// The built-in globals declared in the root frame.
#[derive(Debug, Clone)]
pub struct Globals(Box<[(&'static str, DeclKind)]>);


impl Globals {
	/// A table with the given declarations.
	pub fn new(globals: &[(&'static str, DeclKind)]) -> Self {
		Self(globals.into())
	}


	/// A table with no declarations.
	pub fn empty() -> Self {
		Self(Box::default())
	}


	pub fn iter(&self) -> impl Iterator<Item = &(&'static str, DeclKind)> {
		self.0.iter()
	}
}


impl Default for Globals {
	/// The functions provided by the virtual machine.
	fn default() -> Self {
		use DeclKind::Function;

		Self::new(
			&[
				("print", Function),
				("cls", Function),
				("locate", Function),
				("color", Function),
				("pset", Function),
				("line", Function),
				("rect", Function),
				("sprite", Function),
				("sound", Function),
				("key", Function),
				("mouse", Function),
				("peek", Function),
				("poke", Function),
				("alloc", Function),
				("free", Function),
				("len", Function),
				("str", Function),
				("int", Function),
				("rnd", Function),
				("abs", Function),
				("floor", Function),
				("sin", Function),
				("cos", Function),
				("sqrt", Function),
				("time", Function),
				("wait", Function),
			]
		)
	}
}


/// The lexical scope stack. The root frame is always present, holding the globals.
#[derive(Debug)]
pub struct Frames {
	frames: Vec<Frame>,
	items: Vec<FrameItem>,
	/// The number of built-in declarations at the bottom of the root frame.
	globals: usize,
}


impl Frames {
	/// Create a stack with only the root frame, seeded with the given globals.
	pub fn new(globals: &Globals, interner: &mut symbol::Interner) -> Self {
		let items: Vec<_> = globals
			.iter()
			.map(
				|&(name, kind)| FrameItem {
					name: interner.get_or_intern(name),
					kind,
					pos: None,
				}
			)
			.collect();

		Self {
			frames: vec![Frame { kind: FrameKind::Program, start: 0 }],
			globals: items.len(),
			items,
		}
	}


	/// Enter a new empty scope.
	pub fn start(&mut self, kind: FrameKind) {
		self.frames.push(Frame { kind, start: self.items.len() });
	}


	/// Exit the current scope, dropping its declarations.
	/// Panics if the current scope is the root frame.
	pub fn end(&mut self) -> FrameKind {
		assert!(self.frames.len() > 1, "attempt to end the program frame");

		let frame = self.frames
			.pop()
			.expect("empty frame stack");

		self.items.truncate(frame.start);

		frame.kind
	}


	/// Declare a name in the current scope. Shadowing and redeclaration are allowed.
	pub fn add(&mut self, name: Symbol, kind: DeclKind, pos: SourcePos) -> ItemRef {
		let frame = self.frames.len() - 1;
		let item = self.items.len() - self.current().start;

		self.items.push(FrameItem { name, kind, pos: Some(pos) });

		ItemRef { frame, item }
	}


	/// Find the nearest declaration of a name, searching from the current scope outwards.
	/// Within a scope, the first declaration wins.
	pub fn exists(&self, name: Symbol, kind: Option<DeclKind>) -> Option<&FrameItem> {
		self.frames
			.iter()
			.enumerate()
			.rev()
			.find_map(
				|(ix, frame)| self
					.frame_items(ix, frame)
					.iter()
					.find(
						|item| item.name == name && kind.map_or(true, |kind| item.kind == kind)
					)
			)
	}


	/// Get a declaration by handle.
	pub fn get(&self, item: ItemRef) -> Option<&FrameItem> {
		let frame = self.frames.get(item.frame)?;
		self.frame_items(item.frame, frame).get(item.item)
	}


	/// The kind of the current scope.
	pub fn kind(&self) -> FrameKind {
		self.current().kind
	}


	/// Whether any enclosing scope is a class body.
	pub fn in_class(&self) -> bool {
		self.frames
			.iter()
			.any(|frame| frame.kind == FrameKind::Class)
	}


	/// How many scopes are on the stack, including the root frame.
	pub fn depth(&self) -> usize {
		self.frames.len()
	}


	/// Mark the current state.
	pub fn mark(&self) -> Mark {
		Mark { frames: self.frames.len(), items: self.items.len() }
	}


	/// Discard every scope and declaration made after the mark.
	pub fn rewind(&mut self, mark: Mark) {
		assert!(mark.frames >= 1, "attempt to rewind past the program frame");
		self.frames.truncate(mark.frames);
		self.items.truncate(mark.items);
	}


	/// Drop everything but the root frame and its globals.
	pub fn reset(&mut self) {
		self.frames.truncate(1);
		self.items.truncate(self.globals);
	}


	fn current(&self) -> &Frame {
		self.frames
			.last()
			.expect("empty frame stack")
	}


	fn frame_items(&self, ix: usize, frame: &Frame) -> &[FrameItem] {
		let end = self.frames
			.get(ix + 1)
			.map_or(self.items.len(), |next| next.start);

		&self.items[frame.start .. end]
	}
}
