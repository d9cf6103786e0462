use std::fmt::Display as _;

use super::{Keyword, Literal, Operator, Token, TokenKind};
use crate::{
	fmt::Display,
	symbol,
	term::color,
};


impl std::fmt::Display for Keyword {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		color
			::Fg(
				color::Blue,
				match self {
					Self::Let => "let",
					Self::If => "if",
					Self::Else => "else",
					Self::While => "while",
					Self::For => "for",
					Self::To => "to",
					Self::Step => "step",
					Self::Return => "return",
					Self::Break => "break",
					Self::Continue => "continue",
					Self::Class => "class",
					Self::Extends => "extends",
					Self::New => "new",
					Self::This => "this",
					Self::Super => "super",
					Self::End => "end",
				}
			)
			.fmt(f)
	}
}


impl std::fmt::Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Null => color::Fg(color::Blue, "null").fmt(f),
			Self::True => color::Fg(color::Blue, "true").fmt(f),
			Self::False => color::Fg(color::Blue, "false").fmt(f),
			Self::Int(i) => i.fmt(f),
			Self::Float(n) => write!(f, "{:?}", n),
			Self::String(s) => write!(f, "\"{}\"", color::Bold(s.escape_debug())),
		}
	}
}


impl std::fmt::Display for Operator {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let symbol = match self {
			Self::Plus => "+",
			Self::Minus => "-",
			Self::Times => "*",
			Self::Div => "/",
			Self::Mod => "%",
			Self::Equals => "==",
			Self::NotEquals => "!=",
			Self::Greater => ">",
			Self::GreaterEquals => ">=",
			Self::Lower => "<",
			Self::LowerEquals => "<=",
			Self::And => "&",
			Self::Or => "|",
			Self::Xor => "^",
			Self::Not => "!",
			Self::Assign => return "=".fmt(f),
			Self::PlusAssign => "+=",
			Self::MinusAssign => "-=",
			Self::TimesAssign => "*=",
			Self::DivAssign => "/=",
			Self::ModAssign => "%=",
		};

		color::Fg(color::Yellow, symbol).fmt(f)
	}
}


impl<'a> Display<'a> for TokenKind {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Identifier(symbol) => symbol.fmt(f, context),
			Self::Keyword(keyword) => keyword.fmt(f),
			Self::Operator(op) => op.fmt(f),
			Self::Literal(literal) => literal.fmt(f),
			Self::Comma => ",".fmt(f),
			Self::Colon => ":".fmt(f),
			Self::Dot => ".".fmt(f),
			Self::At => "@".fmt(f),
			Self::Arrow => color::Fg(color::Yellow, "=>").fmt(f),
			Self::OpenParens => "(".fmt(f),
			Self::CloseParens => ")".fmt(f),
			Self::OpenBracket => "[".fmt(f),
			Self::CloseBracket => "]".fmt(f),
			Self::OpenBrace => "{".fmt(f),
			Self::CloseBrace => "}".fmt(f),
			Self::Eol => color::Fg(color::Cyan, "<eol>").fmt(f),
		}
	}
}


impl<'a> Display<'a> for Token {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		write!(f, "{}:{} ", self.pos.line, self.pos.column)?;

		if let Some(indent) = self.indent {
			write!(f, "[{}] ", indent)?;
		}

		self.kind.fmt(f, context)?;

		if self.is_synthesized() {
			color::Fg(color::Magenta, " (synthesized)").fmt(f)?;
		}

		Ok(())
	}
}
