mod error;
mod expr;
mod sync;
#[cfg(test)]
mod tests;

use super::{
	ast,
	frame::{self, DeclKind, FrameKind, Frames},
	lexer::{Keyword, Operator, Token, TokenKind},
	SourcePos,
};
use crate::symbol::Symbol;
pub use error::{Error, Expected};
use sync::{ResultExt, Strategy, Synchronizable, WithSync};


/// A snapshot of the complete parser state, used to rewind after a speculative parse.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
	offset: usize,
	errors: usize,
	frames: frame::Mark,
}


/// The parser for script syntax.
///
/// Name resolution happens while parsing: every identifier must refer to a declaration
/// in an enclosing scope, or to one of the globals. Resolution errors are reported but
/// don't interrupt the production.
#[derive(Debug)]
pub struct Parser<'t, 'f> {
	tokens: &'t [Token],
	offset: usize,
	frames: &'f mut Frames,
	errors: Vec<Error>,
}


impl<'t, 'f> Parser<'t, 'f> {
	/// Create a new parser for the given input.
	pub fn new(tokens: &'t [Token], frames: &'f mut Frames) -> Self {
		Self { tokens, offset: 0, frames, errors: Vec::new() }
	}


	/// Parse the input, producing a top-level block and the collected errors. The block
	/// is only meaningful if there are no errors.
	pub fn parse(mut self) -> (ast::Block, Box<[Error]>) {
		self.frames.reset();

		let mut statements = Vec::new();

		loop {
			statements.extend(self.parse_block().0.into_vec());

			match self.peek() {
				None => break,

				// A block terminator without an opening statement.
				Some(token) => {
					let statement: ast::Statement = Err(Error::unexpected_msg(token.clone(), "statement"))
						.with_sync(Strategy::skip_one())
						.synchronize(&mut self);

					statements.push(statement);
				}
			}
		}

		log::debug!("parsed {} statements, {} errors", statements.len(), self.errors.len());

		(statements.into(), self.errors.into())
	}


	/// The current token, if any.
	fn peek(&self) -> Option<&'t Token> {
		self.tokens.get(self.offset)
	}


	/// The kind of the token `n` positions ahead of the current one.
	fn peek_kind(&self, n: usize) -> Option<&'t TokenKind> {
		self.tokens
			.get(self.offset + n)
			.map(|token| &token.kind)
	}


	/// Whether the current token is of the given kind.
	fn at(&self, kind: &TokenKind) -> bool {
		self.peek_kind(0) == Some(kind)
	}


	/// Step the cursor.
	fn step(&mut self) {
		if self.offset < self.tokens.len() {
			self.offset += 1;
		}
	}


	/// Step the cursor if the current token is of the given kind.
	fn step_if(&mut self, kind: &TokenKind) -> bool {
		let found = self.at(kind);

		if found {
			self.step();
		}

		found
	}


	/// Skip any line ends.
	fn skip_eols(&mut self) {
		while self.step_if(&TokenKind::Eol) { }
	}


	/// Try and eat a token. On failure, the token is not consumed.
	fn eat<F, T>(&mut self, eat: F) -> sync::Result<T, Error>
	where
		F: FnOnce(&'t Token) -> sync::Result<T, Error>,
	{
		let token = self
			.peek()
			.ok_or_else(Error::unexpected_eof)
			.with_sync(Strategy::eof())?;

		let value = eat(token)?;
		self.step();

		Ok(value)
	}


	/// Consume the expected token, or produce an error.
	fn expect(&mut self, expected: TokenKind) -> sync::Result<SourcePos, Error> {
		self.eat(|token| {
			if token.kind == expected {
				Ok(token.pos)
			} else {
				Err(Error::unexpected(token.clone(), expected)).with_sync(Strategy::line())
			}
		})
	}


	/// Consume the `end` keyword closing a block. On failure, the offending token is kept,
	/// as it may terminate an enclosing block.
	fn expect_end(&mut self) -> sync::Result<(), Error> {
		self.eat(|token| match token.kind {
			TokenKind::Keyword(Keyword::End) => Ok(()),
			_ => Err(Error::unexpected(token.clone(), TokenKind::Keyword(Keyword::End)))
				.with_sync(Strategy::keep()),
		})
	}


	/// Parse an identifier.
	fn parse_identifier(&mut self) -> sync::Result<(Symbol, SourcePos), Error> {
		self.eat(|token| match token.kind {
			TokenKind::Identifier(symbol) => Ok((symbol, token.pos)),
			_ => Err(Error::unexpected_msg(token.clone(), "identifier")).with_sync(Strategy::line()),
		})
	}


	/// Record a non-fatal error.
	fn error(&mut self, error: Error) {
		log::trace!("parser error: {:?}", error);
		self.errors.push(error);
	}


	fn checkpoint(&self) -> Checkpoint {
		Checkpoint {
			offset: self.offset,
			errors: self.errors.len(),
			frames: self.frames.mark(),
		}
	}


	fn restore(&mut self, checkpoint: Checkpoint) {
		self.offset = checkpoint.offset;
		self.errors.truncate(checkpoint.errors);
		self.frames.rewind(checkpoint.frames);
	}


	/// Run a production in a new scope. The scope is closed even if the production fails.
	fn in_frame<T, F>(&mut self, kind: FrameKind, parse: F) -> T
	where
		F: FnOnce(&mut Self) -> T,
	{
		self.frames.start(kind);
		let result = parse(self);
		self.frames.end();
		result
	}


	/// Check whether a function head `(params) =>` starts `skip` tokens ahead. The cursor
	/// and all parser state are left untouched.
	fn function_follows(&mut self, skip: usize) -> bool {
		let checkpoint = self.checkpoint();

		self.offset += skip;

		let found = self.parse_params().is_ok() && self.at(&TokenKind::Arrow);

		self.restore(checkpoint);

		found
	}


	/// Parse a block of statements, stopping when a block terminator or EOF is reached.
	fn parse_block(&mut self) -> ast::Block {
		let mut block = Vec::new();

		loop {
			self.skip_eols();

			match self.peek_kind(0) {
				None => break,

				Some(kind) if kind.is_block_terminator() => break,

				Some(_) => {
					let statement = self
						.parse_line()
						.synchronize(self);

					block.push(statement);
				}
			}
		}

		block.into()
	}


	/// Parse a statement, which must be followed by a line end or a block terminator.
	fn parse_line(&mut self) -> sync::Result<ast::Statement, Error> {
		let statement = if self.frames.kind() == FrameKind::Class {
			self.parse_member()?
		} else {
			self.parse_statement()?
		};

		match self.peek() {
			None => (),

			Some(Token { kind: TokenKind::Eol, .. }) => self.step(),

			Some(token) if token.kind.is_block_terminator() => (),

			Some(token) => {
				return Err(Error::unexpected_msg(token.clone(), "end of line"))
					.with_sync(Strategy::line())
			}
		}

		Ok(statement)
	}


	/// Parse a single statement.
	fn parse_statement(&mut self) -> sync::Result<ast::Statement, Error> {
		let token = self
			.peek()
			.ok_or_else(Error::unexpected_eof)
			.with_sync(Strategy::eof())?;

		let pos = token.pos;

		match &token.kind {
			TokenKind::Keyword(Keyword::Let) => {
				self.step();
				self.parse_let(pos)
			}

			// Function definition.
			TokenKind::Identifier(identifier) if self.function_follows(1) => {
				self.step();

				self.frames.add(*identifier, DeclKind::Function, pos);
				let function = self.parse_function()?;

				Ok(ast::Statement::FunctionDef { identifier: *identifier, function, pos })
			}

			TokenKind::Keyword(Keyword::If) => {
				self.step();
				self.parse_if(pos)
			}

			TokenKind::Keyword(Keyword::While) => {
				self.step();

				let condition = self.parse_expression()?;
				let block = self.in_frame(FrameKind::While, Self::parse_block);
				self.expect_end()?;

				Ok(ast::Statement::While { condition, block, pos })
			}

			TokenKind::Keyword(Keyword::For) => {
				self.step();
				self.parse_for(pos)
			}

			TokenKind::Keyword(Keyword::Return) => {
				self.step();

				let exprs = if self.at_statement_end() {
					Box::default()
				} else {
					self.comma_sep(Self::parse_expression)?
				};

				Ok(ast::Statement::Return { exprs, pos })
			}

			TokenKind::Keyword(Keyword::Break) => {
				self.step();
				Ok(ast::Statement::Break { pos })
			}

			TokenKind::Keyword(Keyword::Continue) => {
				self.step();
				Ok(ast::Statement::Continue { pos })
			}

			TokenKind::Keyword(Keyword::Class) => {
				self.step();
				self.parse_class(pos)
			}

			// Assignment or expression.
			_ => {
				let expr = self.parse_expression()?;

				match self.peek() {
					Some(Token { kind: TokenKind::Operator(op), pos, .. }) if op.is_assignment() => {
						self.step();

						if !expr.is_lvalue() {
							self.error(Error::invalid_assignment(*pos));
						}

						let right = self.parse_expression()?;

						Ok(ast::Statement::Assign {
							left: expr,
							op: ast::BinaryOp::from_assignment(*op),
							right,
							pos: *pos,
						})
					}

					_ => Ok(ast::Statement::Expr(expr)),
				}
			}
		}
	}


	/// Parse a `let` statement after the keyword: either a variable or a function.
	fn parse_let(&mut self, pos: SourcePos) -> sync::Result<ast::Statement, Error> {
		let (identifier, _) = self.parse_identifier()?;

		if self.at(&TokenKind::OpenParens) {
			// Declared before the body, to allow recursion.
			self.frames.add(identifier, DeclKind::Function, pos);
			let function = self.parse_function()?;

			Ok(ast::Statement::FunctionDef { identifier, function, pos })
		} else {
			self.expect(TokenKind::Operator(Operator::Assign))?;

			// Declared after the initializer, which may refer to a shadowed variable.
			let init = self.parse_expression()?;
			self.frames.add(identifier, DeclKind::Var, pos);

			Ok(ast::Statement::Let { identifier, init, pos })
		}
	}


	/// Parse an `if` statement after the keyword. An `else if` chain shares a single `end`.
	fn parse_if(&mut self, pos: SourcePos) -> sync::Result<ast::Statement, Error> {
		let condition = self.parse_expression()?;
		let then = self.in_frame(FrameKind::If, Self::parse_block);

		let otherwise = match self.peek() {
			Some(Token { kind: TokenKind::Keyword(Keyword::Else), .. }) => {
				self.step();

				match self.peek() {
					Some(Token { kind: TokenKind::Keyword(Keyword::If), pos, .. }) => {
						self.step();
						let nested = self.parse_if(*pos)?;
						Some(ast::Block::from(vec![nested]))
					}

					_ => {
						let block = self.in_frame(FrameKind::Else, Self::parse_block);
						self.expect_end()?;
						Some(block)
					}
				}
			}

			_ => {
				self.expect_end()?;
				None
			}
		};

		Ok(ast::Statement::If { condition, then, otherwise, pos })
	}


	/// Parse a `for` statement after the keyword.
	fn parse_for(&mut self, pos: SourcePos) -> sync::Result<ast::Statement, Error> {
		let (identifier, identifier_pos) = self.parse_identifier()?;
		self.expect(TokenKind::Operator(Operator::Assign))?;
		let start = self.parse_expression()?;
		self.expect(TokenKind::Keyword(Keyword::To))?;
		let end = self.parse_expression()?;

		let step = if self.step_if(&TokenKind::Keyword(Keyword::Step)) {
			Some(self.parse_expression()?)
		} else {
			None
		};

		let block = self.in_frame(
			FrameKind::For,
			|parser| {
				parser.frames.add(identifier, DeclKind::Var, identifier_pos);
				parser.parse_block()
			}
		);

		self.expect_end()?;

		Ok(ast::Statement::For { identifier, start, end, step, block, pos })
	}


	/// Parse a class declaration after the keyword.
	fn parse_class(&mut self, pos: SourcePos) -> sync::Result<ast::Statement, Error> {
		let (identifier, _) = self.parse_identifier()?;

		let extends = if self.step_if(&TokenKind::Keyword(Keyword::Extends)) {
			self.comma_sep(
				|parser| {
					let (class, pos) = parser.parse_identifier()?;

					if parser.frames.exists(class, Some(DeclKind::Class)).is_none() {
						parser.error(Error::undeclared_class(class, pos));
					}

					Ok(class)
				}
			)?
		} else {
			Box::default()
		};

		self.frames.add(identifier, DeclKind::Class, pos);

		let body = self.in_frame(FrameKind::Class, Self::parse_block);
		self.expect_end()?;

		Ok(ast::Statement::Class { identifier, extends, body, pos })
	}


	/// Parse a class body member: either a field or a method.
	fn parse_member(&mut self) -> sync::Result<ast::Statement, Error> {
		let (identifier, pos) = self.parse_identifier()?;

		if self.at(&TokenKind::OpenParens) {
			let function = self.parse_function()?;

			Ok(ast::Statement::FunctionDef { identifier, function, pos })
		} else {
			self.expect(TokenKind::Operator(Operator::Assign))?;
			let init = self.parse_expression()?;

			Ok(ast::Statement::Field { identifier, init, pos })
		}
	}


	/// Parse a function parameter list, including the parenthesis.
	fn parse_params(&mut self) -> sync::Result<Box<[(Symbol, SourcePos)]>, Error> {
		self.expect(TokenKind::OpenParens)?;
		let params = self.delimited(&TokenKind::CloseParens, Self::parse_identifier)?;
		self.expect(TokenKind::CloseParens)?;

		Ok(params)
	}


	/// Parse a function after its name, starting at the parameter list.
	fn parse_function(&mut self) -> sync::Result<ast::Function, Error> {
		let params = self.parse_params()?;

		for (ix, (param, pos)) in params.iter().enumerate() {
			if params[.. ix].iter().any(|(other, _)| other == param) {
				self.error(Error::duplicate_params(*pos));
			}
		}

		self.expect(TokenKind::Arrow)?;

		let body = self.in_frame(
			FrameKind::Function,
			|parser| {
				for &(param, pos) in params.iter() {
					parser.frames.add(param, DeclKind::Var, pos);
				}

				parser.parse_block()
			}
		);

		self.expect_end()?;

		Ok(ast::Function {
			params: params
				.iter()
				.map(|&(param, _)| param)
				.collect(),
			body,
		})
	}


	/// Whether the cursor is at the end of a statement.
	fn at_statement_end(&self) -> bool {
		match self.peek_kind(0) {
			None | Some(TokenKind::Eol) => true,
			Some(kind) => kind.is_block_terminator(),
		}
	}


	/// Comma-separated items, at least one. Line ends are allowed after commas.
	fn comma_sep<P, R>(&mut self, mut parse: P) -> sync::Result<Box<[R]>, Error>
	where
		P: FnMut(&mut Self) -> sync::Result<R, Error>,
	{
		let mut items = vec![parse(self)?];

		while self.step_if(&TokenKind::Comma) {
			self.skip_eols();
			items.push(parse(self)?);
		}

		Ok(items.into())
	}


	/// Comma-separated items up to, but not including, the closing token. The list may be
	/// empty, have a trailing comma and span multiple lines.
	fn delimited<P, R>(&mut self, close: &TokenKind, mut parse: P) -> sync::Result<Box<[R]>, Error>
	where
		P: FnMut(&mut Self) -> sync::Result<R, Error>,
	{
		let mut items = Vec::new();

		loop {
			self.skip_eols();

			if self.at(close) {
				break;
			}

			items.push(parse(self)?);
			self.skip_eols();

			if !self.step_if(&TokenKind::Comma) {
				break;
			}
		}

		Ok(items.into())
	}
}


impl<'t, 'f> Synchronizable<Error> for Parser<'t, 'f> {
	fn synchronize(&mut self, error: Error, mut sync: Strategy) {
		self.error(error);

		while let Some(token) = self.peek() {
			if sync.synchronized(&token.kind) {
				break;
			}

			self.step();
		}
	}
}
