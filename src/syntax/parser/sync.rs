use super::{ast, TokenKind};


/// A strategy for synchronizing the token stream.
#[derive(Debug)]
pub enum Strategy {
	/// Don't skip any token.
	Keep,
	/// Skip a single token.
	SkipOne {
		skipped: bool,
	},
	/// Skip until a line end or a block terminator, which is not consumed.
	/// See TokenKind::is_block_terminator for more details.
	Line,
}


impl Strategy {
	/// A dummy strategy to use when EOF was already reached.
	/// The behavior of this strategy is irrelevant, because the parser can't skip beyond
	/// EOF.
	pub fn eof() -> Self {
		Self::Keep
	}


	/// Don't skip any token.
	pub fn keep() -> Self {
		Self::Keep
	}


	/// Skip a single token.
	pub fn skip_one() -> Self {
		Self::SkipOne { skipped: false }
	}


	/// Skip the rest of the line.
	pub fn line() -> Self {
		Self::Line
	}


	/// Indicates whether the stream has been synchronized.
	/// When this method returns false, the token should be skipped.
	pub fn synchronized(&mut self, token: &TokenKind) -> bool {
		match self {
			Self::Keep => true,

			Self::SkipOne { skipped: true } => true,
			Self::SkipOne { skipped } => {
				*skipped = true;
				false
			}

			Self::Line => *token == TokenKind::Eol || token.is_block_terminator(),
		}
	}
}


/// A parser that can be synchronized.
pub trait Synchronizable<E> {
	/// Synchronize using the given strategy.
	fn synchronize(&mut self, error: E, sync: Strategy);
}


/// A result including a synchronization strategy.
pub type Result<T, E> = std::result::Result<T, (E, Strategy)>;


/// Extension trait for adding a sync strategy to a Result.
pub trait WithSync<T, E> {
	/// Use the given sync strategy.
	fn with_sync(self, strategy: Strategy) -> Result<T, E>;
}


impl<T, E> WithSync<T, E> for std::result::Result<T, E> {
	fn with_sync(self, strategy: Strategy) -> Result<T, E> {
		self.map_err(|error| (error, strategy))
	}
}


/// Extension trait for synchronizing from Result.
pub trait ResultExt<T, E> {
	/// Synchronize the parser using the current strategy.
	fn synchronize<P: Synchronizable<E>>(self, parser: &mut P) -> T;
}


impl<T, E> ResultExt<T, E> for Result<T, E>
where
	T: ast::IllFormed,
{
	fn synchronize<P: Synchronizable<E>>(self, parser: &mut P) -> T {
		match self {
			Ok(value) => value,

			Err((error, sync)) => {
				parser.synchronize(error, sync);
				T::ill_formed()
			}
		}
	}
}
