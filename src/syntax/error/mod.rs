mod fmt;

use super::{lexer, parser};


/// Syntax error.
#[derive(Debug)]
pub enum Error {
	Lexer(lexer::Error),
	Parser(parser::Error),
}


impl From<lexer::Error> for Error {
	fn from(error: lexer::Error) -> Self {
		Self::Lexer(error)
	}
}


impl From<parser::Error> for Error {
	fn from(error: parser::Error) -> Self {
		Self::Parser(error)
	}
}


impl std::error::Error for Error {}


/// The errors of a syntax analysis, lexical errors first.
#[derive(Debug, Default)]
pub struct Errors(pub Box<[Error]>);


impl std::ops::Deref for Errors {
	type Target = [Error];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
