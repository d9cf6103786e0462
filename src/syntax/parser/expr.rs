use super::{
	ast,
	sync::{self, Strategy, WithSync},
	DeclKind,
	Error,
	Keyword,
	Operator,
	Parser,
	Token,
	TokenKind,
};


impl<'t, 'f> Parser<'t, 'f> {
	/// Parse a single expression.
	///
	/// Operators fold left-associatively within each precedence tier. From lowest to
	/// highest: junction, conditional, term, factor, unary and postfix. This deliberately
	/// replaces the flat left-to-right folding of earlier dialects, where `1 + 2 * 3`
	/// evaluated to 9.
	pub(super) fn parse_expression(&mut self) -> sync::Result<ast::Expr, Error> {
		let parse_factor =
			move |parser: &mut Self| parser.parse_binop(Self::parse_unop, Operator::is_factor);

		let parse_term =
			move |parser: &mut Self| parser.parse_binop(parse_factor, Operator::is_term);

		let parse_conditional =
			move |parser: &mut Self| parser.parse_binop(parse_term, Operator::is_conditional);

		let parse_junction =
			move |parser: &mut Self| parser.parse_binop(parse_conditional, Operator::is_junction);

		parse_junction(self)
	}


	/// Parse a higher precedence expression, optionally followed by operators of this tier.
	fn parse_binop<P, F>(
		&mut self,
		mut parse_higher_prec_op: P,
		mut check: F,
	) -> sync::Result<ast::Expr, Error>
	where
		P: FnMut(&mut Self) -> sync::Result<ast::Expr, Error>,
		F: FnMut(&Operator) -> bool,
	{
		let mut expr = parse_higher_prec_op(self)?;

		while let Some(Token { kind: TokenKind::Operator(op), pos, .. }) = self.peek() {
			if !check(op) {
				break;
			}

			self.step();

			let right = parse_higher_prec_op(self)?;

			expr = ast::Expr::BinaryOp {
				left: expr.into(),
				op: (*op).into(),
				right: right.into(),
				pos: *pos,
			};
		}

		Ok(expr)
	}


	/// Parse a higher precedence expression, optionally starting with a unary operator.
	fn parse_unop(&mut self) -> sync::Result<ast::Expr, Error> {
		match self.peek() {
			Some(Token { kind: TokenKind::Operator(op), pos, .. }) if op.is_unary() => {
				self.step();

				let operand = self.parse_unop()?;

				Ok(ast::Expr::UnaryOp {
					op: (*op).into(),
					operand: operand.into(),
					pos: *pos,
				})
			}

			_ => self.parse_postfix(),
		}
	}


	/// Parse a primary expression followed by any number of calls, subscripts and member
	/// accesses.
	fn parse_postfix(&mut self) -> sync::Result<ast::Expr, Error> {
		let mut expr = self.parse_primary()?;

		while let Some(token) = self.peek() {
			let pos = token.pos;

			expr = match token.kind {
				TokenKind::OpenParens => {
					self.step();
					let args = self.delimited(&TokenKind::CloseParens, Self::parse_expression)?;
					self.expect(TokenKind::CloseParens)?;

					ast::Expr::Call { function: expr.into(), args, pos }
				}

				TokenKind::OpenBracket => {
					self.step();
					self.skip_eols();
					let index = self.parse_expression()?;
					self.skip_eols();
					self.expect(TokenKind::CloseBracket)?;

					ast::Expr::Index { object: expr.into(), index: index.into(), pos }
				}

				TokenKind::Dot => {
					self.step();
					let (field, _) = self.parse_identifier()?;

					ast::Expr::Member { object: expr.into(), field, pos }
				}

				_ => break,
			};
		}

		Ok(expr)
	}


	/// Parse a primary expression.
	fn parse_primary(&mut self) -> sync::Result<ast::Expr, Error> {
		let token = self
			.peek()
			.ok_or_else(Error::unexpected_eof)
			.with_sync(Strategy::eof())?;

		let pos = token.pos;

		match &token.kind {
			// Identifier.
			TokenKind::Identifier(identifier) => {
				self.step();

				if self.frames.exists(*identifier, None).is_none() {
					self.error(Error::undeclared(*identifier, pos));
				}

				Ok(ast::Expr::Identifier { identifier: *identifier, pos })
			}

			// This.
			TokenKind::Keyword(Keyword::This) => {
				self.step();

				if !self.frames.in_class() {
					self.error(Error::this_outside_class(pos));
				}

				Ok(ast::Expr::This { pos })
			}

			// Super.
			TokenKind::Keyword(Keyword::Super) => {
				self.step();

				if !self.frames.in_class() {
					self.error(Error::super_outside_class(pos));
				}

				Ok(ast::Expr::Super { pos })
			}

			// Field shorthand.
			TokenKind::At => {
				self.step();

				let (field, _) = self.parse_identifier()?;

				if !self.frames.in_class() {
					self.error(Error::this_outside_class(pos));
				}

				Ok(ast::Expr::Field { field, pos })
			}

			// Basic literal.
			TokenKind::Literal(literal) => {
				self.step();

				Ok(ast::Expr::Literal { literal: literal.clone().into(), pos })
			}

			// Array literal.
			TokenKind::OpenBracket => {
				self.step();

				let items = self.delimited(&TokenKind::CloseBracket, Self::parse_expression)?;
				self.expect(TokenKind::CloseBracket)?;

				Ok(ast::Expr::Literal { literal: ast::Literal::Array(items), pos })
			}

			// Dict literal.
			TokenKind::OpenBrace => {
				self.step();

				let items = self.delimited(&TokenKind::CloseBrace, Self::parse_dict_item)?;
				self.expect(TokenKind::CloseBrace)?;

				Ok(ast::Expr::Literal { literal: ast::Literal::Dict(items), pos })
			}

			// Function literal.
			TokenKind::OpenParens if self.function_follows(0) => {
				let function = self.parse_function()?;

				Ok(ast::Expr::Literal { literal: ast::Literal::Function(function), pos })
			}

			// Parenthesis.
			TokenKind::OpenParens => {
				self.step();

				let expr = self.parse_expression()?;
				self.expect(TokenKind::CloseParens)?;

				Ok(expr)
			}

			// Instantiation.
			TokenKind::Keyword(Keyword::New) => {
				self.step();

				let (class, class_pos) = self.parse_identifier()?;

				if self.frames.exists(class, Some(DeclKind::Class)).is_none() {
					self.error(Error::undeclared_class(class, class_pos));
				}

				self.expect(TokenKind::OpenParens)?;
				let args = self.delimited(&TokenKind::CloseParens, Self::parse_expression)?;
				self.expect(TokenKind::CloseParens)?;

				Ok(ast::Expr::New { class, args, pos })
			}

			// Some other unexpected token.
			_ => Err(Error::unexpected_msg(token.clone(), "expression")).with_sync(Strategy::line()),
		}
	}


	/// Parse a dict item, either `key: value` or the `:key` shorthand for `key: key`.
	fn parse_dict_item(&mut self) -> sync::Result<(ast::Symbol, ast::Expr), Error> {
		if self.step_if(&TokenKind::Colon) {
			let (key, pos) = self.parse_identifier()?;

			if self.frames.exists(key, None).is_none() {
				self.error(Error::undeclared(key, pos));
			}

			Ok((key, ast::Expr::Identifier { identifier: key, pos }))
		} else {
			let (key, _) = self.parse_identifier()?;
			self.expect(TokenKind::Colon)?;
			self.skip_eols();
			let value = self.parse_expression()?;

			Ok((key, value))
		}
	}
}
