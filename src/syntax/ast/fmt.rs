use std::fmt::Display as _;

use super::{
	lexer::{Keyword, Operator},
	Ast,
	BinaryOp,
	Block,
	Expr,
	Function,
	Literal,
	Statement,
	Symbol,
	UnaryOp,
};
use crate::{
	fmt::{sep_by, Display, Indentation},
	symbol,
	term::color,
};


pub const ILL_FORMED: color::Fg<color::Red, &'static str> = color::Fg(color::Red, "***ill-formed***");


/// The context for displaying AST nodes.
#[derive(Debug, Copy, Clone)]
pub struct Context<'a> {
	interner: &'a symbol::Interner,
	indentation: Indentation,
}


impl<'a> Context<'a> {
	/// Increase the indentation level.
	fn indent(mut self) -> Self {
		self.indentation = self.indentation.increase();
		self
	}
}


impl<'a> From<&'a symbol::Interner> for Context<'a> {
	fn from(interner: &'a symbol::Interner) -> Self {
		Self { interner, indentation: Indentation::default() }
	}
}


/// Print a nested block followed by the `end` keyword at the current indentation.
fn block_end(block: &Block, f: &mut std::fmt::Formatter, context: Context) -> std::fmt::Result {
	"\n".fmt(f)?;

	if !block.is_empty() {
		block.fmt(f, context.indent())?;
		"\n".fmt(f)?;
	}

	context.indentation.fmt(f)?;
	Keyword::End.fmt(f)
}


fn symbols(symbols: &[Symbol], f: &mut std::fmt::Formatter, context: Context) -> std::fmt::Result {
	sep_by(
		symbols.iter(),
		f,
		|symbol, f| symbol.fmt(f, context.interner),
		", ",
	)
}


fn exprs(exprs: &[Expr], f: &mut std::fmt::Formatter, context: Context) -> std::fmt::Result {
	sep_by(
		exprs.iter(),
		f,
		|expr, f| expr.fmt(f, context),
		", ",
	)
}


impl<'a> Display<'a> for Block {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		sep_by(
			self.0.iter(),
			f,
			|statement, f| {
				context.indentation.fmt(f)?;
				statement.fmt(f, context)
			},
			"\n",
		)
	}
}


impl<'a> Display<'a> for Function {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		"(".fmt(f)?;
		symbols(&self.params, f, context)?;
		") ".fmt(f)?;
		color::Fg(color::Yellow, "=>").fmt(f)?;
		block_end(&self.body, f, context)
	}
}


impl<'a> Display<'a> for Literal {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Null => color::Fg(color::Blue, "null").fmt(f),

			Self::Bool(b) => color::Fg(color::Blue, b).fmt(f),

			Self::Int(i) => i.fmt(f),

			Self::Float(n) => write!(f, "{:?}", n),

			Self::String(s) => write!(f, "\"{}\"", color::Bold(s.escape_debug())),

			Self::Array(items) => {
				"[".fmt(f)?;
				exprs(items, f, context)?;
				"]".fmt(f)
			}

			Self::Dict(items) => {
				"{".fmt(f)?;

				sep_by(
					items.iter(),
					f,
					|(key, value), f| {
						key.fmt(f, context.interner)?;
						": ".fmt(f)?;
						value.fmt(f, context)
					},
					", ",
				)?;

				"}".fmt(f)
			}

			Self::Function(function) => function.fmt(f, context),
		}
	}
}


impl std::fmt::Display for UnaryOp {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Minus => Operator::Minus.fmt(f),
			Self::Not => Operator::Not.fmt(f),
		}
	}
}


impl std::fmt::Display for BinaryOp {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Plus => Operator::Plus.fmt(f),
			Self::Minus => Operator::Minus.fmt(f),
			Self::Times => Operator::Times.fmt(f),
			Self::Div => Operator::Div.fmt(f),
			Self::Mod => Operator::Mod.fmt(f),
			Self::Equals => Operator::Equals.fmt(f),
			Self::NotEquals => Operator::NotEquals.fmt(f),
			Self::Greater => Operator::Greater.fmt(f),
			Self::GreaterEquals => Operator::GreaterEquals.fmt(f),
			Self::Lower => Operator::Lower.fmt(f),
			Self::LowerEquals => Operator::LowerEquals.fmt(f),
			Self::And => Operator::And.fmt(f),
			Self::Or => Operator::Or.fmt(f),
			Self::Xor => Operator::Xor.fmt(f),
		}
	}
}


impl<'a> Display<'a> for Expr {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Identifier { identifier, .. } => identifier.fmt(f, context.interner),

			Self::This { .. } => Keyword::This.fmt(f),

			Self::Super { .. } => Keyword::Super.fmt(f),

			Self::Field { field, .. } => {
				"@".fmt(f)?;
				field.fmt(f, context.interner)
			}

			Self::Literal { literal, .. } => literal.fmt(f, context),

			Self::UnaryOp { op, operand, .. } => {
				op.fmt(f)?;
				operand.fmt(f, context)
			}

			// Binary operations are always parenthesized, which shows the grouping.
			Self::BinaryOp { left, op, right, .. } => {
				"(".fmt(f)?;
				left.fmt(f, context)?;
				write!(f, " {} ", op)?;
				right.fmt(f, context)?;
				")".fmt(f)
			}

			Self::Member { object, field, .. } => {
				object.fmt(f, context)?;
				".".fmt(f)?;
				field.fmt(f, context.interner)
			}

			Self::Index { object, index, .. } => {
				object.fmt(f, context)?;
				"[".fmt(f)?;
				index.fmt(f, context)?;
				"]".fmt(f)
			}

			Self::Call { function, args, .. } => {
				function.fmt(f, context)?;
				"(".fmt(f)?;
				exprs(args, f, context)?;
				")".fmt(f)
			}

			Self::New { class, args, .. } => {
				Keyword::New.fmt(f)?;
				" ".fmt(f)?;
				class.fmt(f, context.interner)?;
				"(".fmt(f)?;
				exprs(args, f, context)?;
				")".fmt(f)
			}

			Self::IllFormed => ILL_FORMED.fmt(f),
		}
	}
}


impl<'a> Display<'a> for Statement {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Let { identifier, init, .. } => {
				Keyword::Let.fmt(f)?;
				" ".fmt(f)?;
				identifier.fmt(f, context.interner)?;
				" = ".fmt(f)?;
				init.fmt(f, context)
			}

			Self::Field { identifier, init, .. } => {
				identifier.fmt(f, context.interner)?;
				" = ".fmt(f)?;
				init.fmt(f, context)
			}

			Self::Assign { left, op, right, .. } => {
				left.fmt(f, context)?;

				match op {
					Some(op) => write!(f, " {}= ", op)?,
					None => " = ".fmt(f)?,
				}

				right.fmt(f, context)
			}

			Self::FunctionDef { identifier, function, .. } => {
				identifier.fmt(f, context.interner)?;
				function.fmt(f, context)
			}

			Self::If { condition, then, otherwise, .. } => {
				Keyword::If.fmt(f)?;
				" ".fmt(f)?;
				condition.fmt(f, context)?;
				"\n".fmt(f)?;
				then.fmt(f, context.indent())?;

				if let Some(otherwise) = otherwise {
					"\n".fmt(f)?;
					context.indentation.fmt(f)?;
					Keyword::Else.fmt(f)?;
					"\n".fmt(f)?;
					otherwise.fmt(f, context.indent())?;
				}

				"\n".fmt(f)?;
				context.indentation.fmt(f)?;
				Keyword::End.fmt(f)
			}

			Self::While { condition, block, .. } => {
				Keyword::While.fmt(f)?;
				" ".fmt(f)?;
				condition.fmt(f, context)?;
				block_end(block, f, context)
			}

			Self::For { identifier, start, end, step, block, .. } => {
				Keyword::For.fmt(f)?;
				" ".fmt(f)?;
				identifier.fmt(f, context.interner)?;
				" = ".fmt(f)?;
				start.fmt(f, context)?;
				" ".fmt(f)?;
				Keyword::To.fmt(f)?;
				" ".fmt(f)?;
				end.fmt(f, context)?;

				if let Some(step) = step {
					" ".fmt(f)?;
					Keyword::Step.fmt(f)?;
					" ".fmt(f)?;
					step.fmt(f, context)?;
				}

				block_end(block, f, context)
			}

			Self::Return { exprs: values, .. } => {
				Keyword::Return.fmt(f)?;

				if !values.is_empty() {
					" ".fmt(f)?;
					exprs(values, f, context)?;
				}

				Ok(())
			}

			Self::Break { .. } => Keyword::Break.fmt(f),

			Self::Continue { .. } => Keyword::Continue.fmt(f),

			Self::Class { identifier, extends, body, .. } => {
				Keyword::Class.fmt(f)?;
				" ".fmt(f)?;
				identifier.fmt(f, context.interner)?;

				if !extends.is_empty() {
					" ".fmt(f)?;
					Keyword::Extends.fmt(f)?;
					" ".fmt(f)?;
					symbols(extends, f, context)?;
				}

				block_end(body, f, context)
			}

			Self::Expr(expr) => expr.fmt(f, context),

			Self::IllFormed => ILL_FORMED.fmt(f),
		}
	}
}


impl<'a> Display<'a> for Ast {
	type Context = Context<'a>;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		writeln!(
			f,
			"{}",
			color::Fg(
				color::Magenta,
				context.interner.resolve(self.path).unwrap_or("<unknown>")
			)
		)?;

		self.statements.fmt(f, context)
	}
}
