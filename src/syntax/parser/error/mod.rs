mod fmt;

use super::{SourcePos, Symbol, Token, TokenKind};


/// What the parser was expecting.
#[derive(Debug)]
pub enum Expected {
	Token(TokenKind),
	Message(&'static str),
}


/// A parser error.
#[derive(Debug)]
pub enum Error {
	/// Premature EOF.
	UnexpectedEof,
	/// Unexpected token.
	Unexpected { token: Token, expected: Expected },
	/// Reference to a name that isn't declared in any enclosing scope.
	Undeclared { name: Symbol, pos: SourcePos },
	/// Reference to a class that isn't declared.
	UndeclaredClass { name: Symbol, pos: SourcePos },
	/// `this` or `@field` outside of a class body.
	ThisOutsideClass { pos: SourcePos },
	/// `super` outside of a class body.
	SuperOutsideClass { pos: SourcePos },
	/// Assignment to something that is not a variable, field, member or index.
	InvalidAssignment { pos: SourcePos },
	/// Duplicate parameters in function.
	DuplicateParams { pos: SourcePos },
}


impl Error {
	/// Create an error signaling unexpected EOF.
	pub fn unexpected_eof() -> Self {
		Self::UnexpectedEof
	}


	/// Create an error signaling an unexpected token, and what was expected.
	pub fn unexpected(token: Token, expected: TokenKind) -> Self {
		Self::Unexpected { token, expected: Expected::Token(expected) }
	}


	/// Create an error signaling an unexpected token, and a message.
	pub fn unexpected_msg(token: Token, message: &'static str) -> Self {
		Self::Unexpected { token, expected: Expected::Message(message) }
	}


	pub fn undeclared(name: Symbol, pos: SourcePos) -> Self {
		Self::Undeclared { name, pos }
	}


	pub fn undeclared_class(name: Symbol, pos: SourcePos) -> Self {
		Self::UndeclaredClass { name, pos }
	}


	pub fn this_outside_class(pos: SourcePos) -> Self {
		Self::ThisOutsideClass { pos }
	}


	pub fn super_outside_class(pos: SourcePos) -> Self {
		Self::SuperOutsideClass { pos }
	}


	pub fn invalid_assignment(pos: SourcePos) -> Self {
		Self::InvalidAssignment { pos }
	}


	/// Create an error signaling a function has duplicate parameters.
	pub fn duplicate_params(pos: SourcePos) -> Self {
		Self::DuplicateParams { pos }
	}


	/// Whether the error was caused by name resolution, as opposed to malformed syntax.
	pub fn is_resolution(&self) -> bool {
		matches!(
			self,
			Self::Undeclared { .. }
				| Self::UndeclaredClass { .. }
				| Self::ThisOutsideClass { .. }
				| Self::SuperOutsideClass { .. }
		)
	}
}


impl std::error::Error for Error {}
