mod fmt;

use super::{SourcePos, Span};
use crate::symbol::Symbol;


/// All reserved words in the language. Reserved words are case insensitive: the keyword
/// is derived from the upper-cased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
	Let,
	If,
	Else,
	While,
	For,
	To,
	Step,
	Return,
	Break,
	Continue,
	Class,
	Extends,
	New,
	This,
	Super,
	End,
}


impl Keyword {
	/// Keywords that open a block at the start of a line.
	pub fn opens_block(&self) -> bool {
		matches!(self, Self::If | Self::While | Self::For | Self::Class)
	}
}


/// Literals for non-composite types.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Null,
	True,
	False,
	Int(i64),
	Float(f64),
	String(Box<str>),
}


/// Operators, including assignment and compound assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	Plus,  // +
	Minus, // -
	Times, // *
	Div,   // /
	Mod,   // %

	Equals,        // ==
	NotEquals,     // !=
	Greater,       // >
	GreaterEquals, // >=
	Lower,         // <
	LowerEquals,   // <=

	And, // &
	Or,  // |
	Xor, // ^
	Not, // !

	Assign,      // =
	PlusAssign,  // +=
	MinusAssign, // -=
	TimesAssign, // *=
	DivAssign,   // /=
	ModAssign,   // %=
}


impl Operator {
	/// Bitwise junction operators (&, |, ^).
	pub fn is_junction(&self) -> bool {
		matches!(self, Self::And | Self::Or | Self::Xor)
	}


	/// Comparison operators (==, !=, >, >=, <, <=).
	pub fn is_conditional(&self) -> bool {
		matches!(
			self,
			Self::Equals
				| Self::NotEquals
				| Self::Greater
				| Self::GreaterEquals
				| Self::Lower
				| Self::LowerEquals
		)
	}


	/// Additive arithmetic operators (+, -).
	pub fn is_term(&self) -> bool {
		matches!(self, Self::Plus | Self::Minus)
	}


	/// Multiplicative arithmetic operators (*, /, %).
	pub fn is_factor(&self) -> bool {
		matches!(self, Self::Times | Self::Div | Self::Mod)
	}


	/// Unary operators (-, !).
	pub fn is_unary(&self) -> bool {
		matches!(self, Self::Minus | Self::Not)
	}


	/// Plain and compound assignment operators.
	pub fn is_assignment(&self) -> bool {
		matches!(
			self,
			Self::Assign
				| Self::PlusAssign
				| Self::MinusAssign
				| Self::TimesAssign
				| Self::DivAssign
				| Self::ModAssign
		)
	}
}


/// All possible kinds of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
	Identifier(Symbol),
	Keyword(Keyword),
	Operator(Operator),
	Literal(Literal),

	Comma, // ,
	Colon, // :
	Dot,   // .
	At,    // @
	Arrow, // =>

	OpenParens,  // (
	CloseParens, // )

	OpenBracket,  // [
	CloseBracket, // ]

	OpenBrace,  // {
	CloseBrace, // }

	/// End of a line. Statements are separated by line ends.
	Eol,
}


impl TokenKind {
	/// Check if the token terminates a statement block.
	pub fn is_block_terminator(&self) -> bool {
		matches!(self, Self::Keyword(Keyword::End) | Self::Keyword(Keyword::Else))
	}
}


/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	pub span: Span,
	pub pos: SourcePos,
	/// The indentation of the physical line, only set on the first token of each line.
	pub indent: Option<u32>,
}


impl Token {
	/// Create an unannotated token.
	pub fn new(kind: TokenKind, span: Span, pos: SourcePos) -> Self {
		Self { kind, span, pos, indent: None }
	}


	/// Create a token that has no source text, placed at the given offset.
	pub fn synthesized(kind: TokenKind, at: usize, pos: SourcePos) -> Self {
		Self {
			kind,
			span: Span { start: at, end: at },
			pos,
			indent: None,
		}
	}


	/// Whether the token was inserted by the tokenizer instead of written in the source.
	pub fn is_synthesized(&self) -> bool {
		self.span.start == self.span.end
	}
}
