pub mod fmt;
pub mod json;

use super::{lexer, SourcePos};
pub use crate::symbol::Symbol;


/// Trait for nodes that may be the result of a failed production. Ill-formed nodes are
/// only present in the AST when there were syntax errors.
pub trait IllFormed {
	fn ill_formed() -> Self;

	fn is_ill_formed(&self) -> bool;
}


/// A block is a list of statements.
#[derive(Debug, Default)]
pub struct Block(pub Box<[Statement]>);


impl From<Box<[Statement]>> for Block {
	fn from(block: Box<[Statement]>) -> Self {
		Self(block)
	}
}


impl From<Vec<Statement>> for Block {
	fn from(block: Vec<Statement>) -> Self {
		Self(block.into_boxed_slice())
	}
}


impl Block {
	pub fn iter(&self) -> std::slice::Iter<Statement> {
		self.0.iter()
	}


	pub fn len(&self) -> usize {
		self.0.len()
	}


	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}


impl IllFormed for Block {
	fn ill_formed() -> Self {
		Self::default()
	}

	fn is_ill_formed(&self) -> bool {
		self.0.iter().any(IllFormed::is_ill_formed)
	}
}


/// A function literal or definition.
#[derive(Debug)]
pub struct Function {
	pub params: Box<[Symbol]>,
	pub body: Block,
}


/// Literals of all types in the language.
#[derive(Debug)]
pub enum Literal {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(Box<str>),
	Array(Box<[Expr]>),
	/// Items are kept in source order.
	Dict(Box<[(Symbol, Expr)]>),
	Function(Function),
}


impl From<lexer::Literal> for Literal {
	fn from(literal: lexer::Literal) -> Self {
		match literal {
			lexer::Literal::Null => Literal::Null,
			lexer::Literal::True => Literal::Bool(true),
			lexer::Literal::False => Literal::Bool(false),
			lexer::Literal::Int(int) => Literal::Int(int),
			lexer::Literal::Float(float) => Literal::Float(float),
			lexer::Literal::String(string) => Literal::String(string),
		}
	}
}


/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
	Minus, // -
	Not,   // !
}


/// Warning, the following instance may panic if used with unmapped operators.
impl From<lexer::Operator> for UnaryOp {
	fn from(op: lexer::Operator) -> Self {
		match op {
			lexer::Operator::Minus => UnaryOp::Minus,
			lexer::Operator::Not => UnaryOp::Not,
			_ => panic!("invalid unary operator"),
		}
	}
}


/// Binary operators.
/// Assignment and member access are not represented as operators, but directly as
/// statements and expressions instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
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
}


/// Warning, the following instance may panic if used with unmapped operators.
impl From<lexer::Operator> for BinaryOp {
	fn from(op: lexer::Operator) -> Self {
		match op {
			lexer::Operator::Plus => BinaryOp::Plus,
			lexer::Operator::Minus => BinaryOp::Minus,
			lexer::Operator::Times => BinaryOp::Times,
			lexer::Operator::Div => BinaryOp::Div,
			lexer::Operator::Mod => BinaryOp::Mod,
			lexer::Operator::Equals => BinaryOp::Equals,
			lexer::Operator::NotEquals => BinaryOp::NotEquals,
			lexer::Operator::Greater => BinaryOp::Greater,
			lexer::Operator::GreaterEquals => BinaryOp::GreaterEquals,
			lexer::Operator::Lower => BinaryOp::Lower,
			lexer::Operator::LowerEquals => BinaryOp::LowerEquals,
			lexer::Operator::And => BinaryOp::And,
			lexer::Operator::Or => BinaryOp::Or,
			lexer::Operator::Xor => BinaryOp::Xor,
			_ => panic!("invalid binary operator"),
		}
	}
}


impl BinaryOp {
	/// The operator applied by a compound assignment, None for plain assignment.
	/// Warning, panics if used with non-assignment operators.
	pub fn from_assignment(op: lexer::Operator) -> Option<Self> {
		match op {
			lexer::Operator::Assign => None,
			lexer::Operator::PlusAssign => Some(BinaryOp::Plus),
			lexer::Operator::MinusAssign => Some(BinaryOp::Minus),
			lexer::Operator::TimesAssign => Some(BinaryOp::Times),
			lexer::Operator::DivAssign => Some(BinaryOp::Div),
			lexer::Operator::ModAssign => Some(BinaryOp::Mod),
			_ => panic!("invalid assignment operator"),
		}
	}
}


/// Expressions of all kinds in the language.
#[derive(Debug)]
pub enum Expr {
	/// A declared variable, function or class.
	Identifier {
		identifier: Symbol,
		pos: SourcePos,
	},
	/// The `this` keyword.
	This {
		pos: SourcePos,
	},
	/// The `super` keyword.
	Super {
		pos: SourcePos,
	},
	/// `@field`, a shorthand for `this.field`.
	Field {
		field: Symbol,
		pos: SourcePos,
	},
	Literal {
		literal: Literal,
		pos: SourcePos,
	},
	UnaryOp {
		op: UnaryOp,
		operand: Box<Expr>,
		pos: SourcePos,
	},
	BinaryOp {
		left: Box<Expr>,
		op: BinaryOp,
		right: Box<Expr>,
		pos: SourcePos,
	},
	/// `object.field`
	Member {
		object: Box<Expr>,
		field: Symbol,
		pos: SourcePos,
	},
	/// `object[index]`
	Index {
		object: Box<Expr>,
		index: Box<Expr>,
		pos: SourcePos,
	},
	Call {
		function: Box<Expr>,
		args: Box<[Expr]>,
		pos: SourcePos,
	},
	/// Class instantiation.
	New {
		class: Symbol,
		args: Box<[Expr]>,
		pos: SourcePos,
	},
	IllFormed,
}


impl Expr {
	/// Whether the expression may be assigned to.
	pub fn is_lvalue(&self) -> bool {
		matches!(
			self,
			Self::Identifier { .. } | Self::Field { .. } | Self::Member { .. } | Self::Index { .. }
		)
	}


	pub fn pos(&self) -> Option<SourcePos> {
		match self {
			Self::Identifier { pos, .. }
			| Self::This { pos }
			| Self::Super { pos }
			| Self::Field { pos, .. }
			| Self::Literal { pos, .. }
			| Self::UnaryOp { pos, .. }
			| Self::BinaryOp { pos, .. }
			| Self::Member { pos, .. }
			| Self::Index { pos, .. }
			| Self::Call { pos, .. }
			| Self::New { pos, .. } => Some(*pos),
			Self::IllFormed => None,
		}
	}
}


impl IllFormed for Expr {
	fn ill_formed() -> Self {
		Self::IllFormed
	}

	fn is_ill_formed(&self) -> bool {
		matches!(self, Self::IllFormed)
	}
}


/// Statements of all kinds in the language.
#[derive(Debug)]
pub enum Statement {
	/// Declares a variable.
	Let {
		identifier: Symbol,
		init: Expr,
		pos: SourcePos,
	},
	/// Declares a field in a class body.
	Field {
		identifier: Symbol,
		init: Expr,
		pos: SourcePos,
	},
	/// Plain (`op` is None) or compound assignment.
	Assign {
		left: Expr,
		op: Option<BinaryOp>,
		right: Expr,
		pos: SourcePos,
	},
	/// Declares a function, or a method in a class body.
	FunctionDef {
		identifier: Symbol,
		function: Function,
		pos: SourcePos,
	},
	/// An `else if` is represented as an `otherwise` block holding a single `If`.
	If {
		condition: Expr,
		then: Block,
		otherwise: Option<Block>,
		pos: SourcePos,
	},
	While {
		condition: Expr,
		block: Block,
		pos: SourcePos,
	},
	/// Numeric for loop. Declares the loop variable.
	For {
		identifier: Symbol,
		start: Expr,
		end: Expr,
		step: Option<Expr>,
		block: Block,
		pos: SourcePos,
	},
	Return {
		exprs: Box<[Expr]>,
		pos: SourcePos,
	},
	Break {
		pos: SourcePos,
	},
	Continue {
		pos: SourcePos,
	},
	Class {
		identifier: Symbol,
		extends: Box<[Symbol]>,
		body: Block,
		pos: SourcePos,
	},
	Expr(Expr),
	IllFormed,
}


impl IllFormed for Statement {
	fn ill_formed() -> Self {
		Self::IllFormed
	}

	fn is_ill_formed(&self) -> bool {
		matches!(self, Self::IllFormed)
	}
}


/// The abstract syntax tree for a source unit.
#[derive(Debug)]
pub struct Ast {
	/// The source path. May be something fictional, like "<stdin>".
	pub path: Symbol,
	/// The top-level statements.
	pub statements: Block,
}
