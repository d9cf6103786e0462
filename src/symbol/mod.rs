mod fmt;

use intaglio::{Symbol as SymbolInner, SymbolTable};


/// An interned identifier, constant name or source path.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Symbol(SymbolInner);


/// The default symbol is reserved, and resolves to "<invalid symbol>".
impl Default for Symbol {
	fn default() -> Self {
		Self(SymbolInner::new(0))
	}
}


/// The string interner shared by the tokenizer, the parser and the diagnostics.
#[derive(Debug)]
pub struct Interner(SymbolTable);


impl Interner {
	/// Create a new interner, holding only the reserved default symbol.
	pub fn new() -> Self {
		let mut table = SymbolTable::new();
		table
			.intern("<invalid symbol>")
			.expect("failed to intern symbol");
		Self(table)
	}


	/// Get the symbol for a string, if it has been interned.
	pub fn get(&self, value: &str) -> Option<Symbol> {
		self.0
			.check_interned(value)
			.map(Symbol)
	}


	/// Get the symbol for a string, interning it if needed.
	pub fn get_or_intern<T>(&mut self, value: T) -> Symbol
	where
		T: AsRef<str>,
	{
		let value = value.as_ref();

		if let Some(symbol) = self.get(value) {
			return symbol;
		}

		Symbol(
			self.0
				.intern(value.to_owned())
				.expect("failed to intern symbol")
		)
	}


	/// Resolve the string for a symbol.
	pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
		self.0.get(symbol.0)
	}


	/// The number of interned strings, excluding the reserved symbol.
	pub fn len(&self) -> usize {
		self.0.len() - 1
	}


	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}


impl Default for Interner {
	fn default() -> Self {
		Self::new()
	}
}
