mod fmt;

use std::io;

use super::SourcePos;


/// Why an include directive failed.
#[derive(Debug)]
pub enum IncludeFailure {
	/// The resolver could not load the source.
	Io(io::Error),
	/// The included source has lexical errors, which are reported separately.
	Errors(usize),
	/// Includes nested too deeply, most likely a source that includes itself.
	TooDeep,
}


/// The kind of lexical error.
#[derive(Debug)]
pub enum ErrorKind {
	/// No lexical rule matches the input.
	Unexpected(char),
	/// String literal missing the closing quote.
	UnterminatedString,
	/// Block comment missing the closing `*/`.
	UnterminatedComment,
	/// Invalid escape sequence in string literal.
	InvalidEscapeSequence(Box<str>),
	/// Invalid number literal, both integer and floating point.
	InvalidNumber(Box<str>),
	/// CONST directive not followed by a name.
	InvalidConstant,
	/// Failed include directive.
	Include {
		name: Box<str>,
		failure: IncludeFailure,
	},
}


/// A lexical error.
#[derive(Debug)]
pub struct Error {
	pub kind: ErrorKind,
	pub pos: SourcePos,
}


impl std::error::Error for Error {}


impl Error {
	pub fn unexpected(input: char, pos: SourcePos) -> Self {
		Self { kind: ErrorKind::Unexpected(input), pos }
	}

	pub fn unterminated_string(pos: SourcePos) -> Self {
		Self { kind: ErrorKind::UnterminatedString, pos }
	}

	pub fn unterminated_comment(pos: SourcePos) -> Self {
		Self { kind: ErrorKind::UnterminatedComment, pos }
	}

	pub fn invalid_escape_sequence(sequence: &str, pos: SourcePos) -> Self {
		Self {
			kind: ErrorKind::InvalidEscapeSequence(sequence.into()),
			pos,
		}
	}

	pub fn invalid_number(number: &str, pos: SourcePos) -> Self {
		Self {
			kind: ErrorKind::InvalidNumber(number.into()),
			pos,
		}
	}

	pub fn invalid_constant(pos: SourcePos) -> Self {
		Self { kind: ErrorKind::InvalidConstant, pos }
	}

	pub fn include(name: &str, failure: IncludeFailure, pos: SourcePos) -> Self {
		Self {
			kind: ErrorKind::Include { name: name.into(), failure },
			pos,
		}
	}
}
