use std::fmt;

use super::{Error, ErrorKind, IncludeFailure};
use crate::{fmt::Display, symbol};


impl fmt::Display for IncludeFailure {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io(error) => write!(f, "{}", error),
			Self::Errors(count) => write!(f, "{} lexical errors", count),
			Self::TooDeep => f.write_str("includes nested too deeply"),
		}
	}
}


impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Unexpected(value) => write!(f, "unexpected '{}'", value.escape_debug()),

			Self::UnterminatedString => f.write_str("unterminated string literal"),

			Self::UnterminatedComment => f.write_str("unterminated block comment"),

			Self::InvalidEscapeSequence(sequence) => {
				write!(f, "invalid escape sequence: {}", sequence)
			}

			Self::InvalidNumber(number) => write!(f, "invalid number: {}", number),

			Self::InvalidConstant => f.write_str("expected constant name after CONST"),

			Self::Include { name, failure } => {
				write!(f, "failed to include \"{}\": {}", name, failure)
			}
		}
	}
}


impl<'a> Display<'a> for Error {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut fmt::Formatter, context: Self::Context) -> fmt::Result {
		Display::fmt(&self.pos, f, context)?;
		write!(f, " - {}.", self.kind)
	}
}


/// We need this in order to be able to implement std::error::Error.
impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} - {}.", self.pos, self.kind)
	}
}
