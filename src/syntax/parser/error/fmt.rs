use std::fmt::Display as _;

use super::{Error, Expected};
use crate::{
	fmt::Display,
	symbol,
};


impl<'a> Display<'a> for Expected {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Token(token) => {
				"'".fmt(f)?;
				token.fmt(f, context)?;
				"'".fmt(f)
			}

			Self::Message(msg) => msg.fmt(f),
		}
	}
}


impl<'a> Display<'a> for Error {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::UnexpectedEof => "unexpected end of file".fmt(f),

			Self::Unexpected { token, expected } => {
				Display::fmt(&token.pos, f, context)?;
				" - unexpected '".fmt(f)?;
				token.kind.fmt(f, context)?;
				"', expected ".fmt(f)?;
				expected.fmt(f, context)
			}

			Self::Undeclared { name, pos } => {
				Display::fmt(pos, f, context)?;
				" - undeclared identifier '".fmt(f)?;
				name.fmt(f, context)?;
				"'".fmt(f)
			}

			Self::UndeclaredClass { name, pos } => {
				Display::fmt(pos, f, context)?;
				" - undeclared class '".fmt(f)?;
				name.fmt(f, context)?;
				"'".fmt(f)
			}

			Self::ThisOutsideClass { pos } => {
				Display::fmt(pos, f, context)?;
				" - 'this' used outside of a class".fmt(f)
			}

			Self::SuperOutsideClass { pos } => {
				Display::fmt(pos, f, context)?;
				" - 'super' used outside of a class".fmt(f)
			}

			Self::InvalidAssignment { pos } => {
				Display::fmt(pos, f, context)?;
				" - invalid assignment target".fmt(f)
			}

			Self::DuplicateParams { pos } => {
				Display::fmt(pos, f, context)?;
				" - duplicate parameters in function".fmt(f)
			}
		}
	}
}


/// We need this in order to be able to implement std::error::Error.
impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		Display::fmt(self, f, &symbol::Interner::new())
	}
}
