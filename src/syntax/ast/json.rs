//! JSON rendering of the AST, for tooling that consumes the parse result.

use serde_json::{json, Value};

use super::{Ast, BinaryOp, Block, Expr, Function, Literal, Statement, Symbol, UnaryOp};
use crate::symbol;


/// Render the AST as a JSON document. Every node is an object with a `"node"` tag.
pub fn to_json(ast: &Ast, interner: &symbol::Interner) -> Value {
	let json = Json { interner };

	json!({
		"path": json.symbol(ast.path),
		"statements": json.block(&ast.statements),
	})
}


#[derive(Clone, Copy)]
struct Json<'a> {
	interner: &'a symbol::Interner,
}


impl<'a> Json<'a> {
	fn symbol(self, symbol: Symbol) -> Value {
		match self.interner.resolve(symbol) {
			Some(name) => Value::from(name),
			None => Value::Null,
		}
	}


	fn symbols(self, symbols: &[Symbol]) -> Value {
		symbols
			.iter()
			.map(|&symbol| self.symbol(symbol))
			.collect()
	}


	fn block(self, block: &Block) -> Value {
		block
			.iter()
			.map(|statement| self.statement(statement))
			.collect()
	}


	fn exprs(self, exprs: &[Expr]) -> Value {
		exprs
			.iter()
			.map(|expr| self.expr(expr))
			.collect()
	}


	fn function(self, function: &Function) -> Value {
		json!({
			"params": self.symbols(&function.params),
			"body": self.block(&function.body),
		})
	}


	fn literal(self, literal: &Literal) -> Value {
		match literal {
			Literal::Null => Value::Null,
			Literal::Bool(b) => json!(b),
			Literal::Int(i) => json!(i),
			Literal::Float(n) => json!(n),
			Literal::String(s) => json!(s),
			Literal::Array(items) => json!({ "array": self.exprs(items) }),
			Literal::Dict(items) => {
				let items: Vec<Value> = items
					.iter()
					.map(|(key, value)| json!([self.symbol(*key), self.expr(value)]))
					.collect();

				json!({ "dict": items })
			}
			Literal::Function(function) => json!({ "function": self.function(function) }),
		}
	}


	fn expr(self, expr: &Expr) -> Value {
		match expr {
			Expr::Identifier { identifier, .. } => json!({
				"node": "identifier",
				"name": self.symbol(*identifier),
			}),

			Expr::This { .. } => json!({ "node": "this" }),

			Expr::Super { .. } => json!({ "node": "super" }),

			Expr::Field { field, .. } => json!({
				"node": "field",
				"name": self.symbol(*field),
			}),

			Expr::Literal { literal, .. } => json!({
				"node": "literal",
				"value": self.literal(literal),
			}),

			Expr::UnaryOp { op, operand, .. } => json!({
				"node": "unary",
				"op": unary_op(*op),
				"operand": self.expr(operand),
			}),

			Expr::BinaryOp { left, op, right, .. } => json!({
				"node": "binary",
				"op": binary_op(*op),
				"left": self.expr(left),
				"right": self.expr(right),
			}),

			Expr::Member { object, field, .. } => json!({
				"node": "member",
				"object": self.expr(object),
				"field": self.symbol(*field),
			}),

			Expr::Index { object, index, .. } => json!({
				"node": "index",
				"object": self.expr(object),
				"index": self.expr(index),
			}),

			Expr::Call { function, args, .. } => json!({
				"node": "call",
				"function": self.expr(function),
				"args": self.exprs(args),
			}),

			Expr::New { class, args, .. } => json!({
				"node": "new",
				"class": self.symbol(*class),
				"args": self.exprs(args),
			}),

			Expr::IllFormed => json!({ "node": "ill-formed" }),
		}
	}


	fn statement(self, statement: &Statement) -> Value {
		match statement {
			Statement::Let { identifier, init, pos } => json!({
				"node": "let",
				"line": pos.line,
				"name": self.symbol(*identifier),
				"init": self.expr(init),
			}),

			Statement::Field { identifier, init, pos } => json!({
				"node": "field",
				"line": pos.line,
				"name": self.symbol(*identifier),
				"init": self.expr(init),
			}),

			Statement::Assign { left, op, right, pos } => json!({
				"node": "assign",
				"line": pos.line,
				"op": op.map(binary_op),
				"left": self.expr(left),
				"right": self.expr(right),
			}),

			Statement::FunctionDef { identifier, function, pos } => json!({
				"node": "function",
				"line": pos.line,
				"name": self.symbol(*identifier),
				"function": self.function(function),
			}),

			Statement::If { condition, then, otherwise, pos } => json!({
				"node": "if",
				"line": pos.line,
				"condition": self.expr(condition),
				"then": self.block(then),
				"else": otherwise.as_ref().map(|block| self.block(block)),
			}),

			Statement::While { condition, block, pos } => json!({
				"node": "while",
				"line": pos.line,
				"condition": self.expr(condition),
				"block": self.block(block),
			}),

			Statement::For { identifier, start, end, step, block, pos } => json!({
				"node": "for",
				"line": pos.line,
				"name": self.symbol(*identifier),
				"start": self.expr(start),
				"end": self.expr(end),
				"step": step.as_ref().map(|step| self.expr(step)),
				"block": self.block(block),
			}),

			Statement::Return { exprs, pos } => json!({
				"node": "return",
				"line": pos.line,
				"values": self.exprs(exprs),
			}),

			Statement::Break { pos } => json!({ "node": "break", "line": pos.line }),

			Statement::Continue { pos } => json!({ "node": "continue", "line": pos.line }),

			Statement::Class { identifier, extends, body, pos } => json!({
				"node": "class",
				"line": pos.line,
				"name": self.symbol(*identifier),
				"extends": self.symbols(extends),
				"body": self.block(body),
			}),

			Statement::Expr(expr) => json!({
				"node": "expr",
				"expr": self.expr(expr),
			}),

			Statement::IllFormed => json!({ "node": "ill-formed" }),
		}
	}
}


fn unary_op(op: UnaryOp) -> &'static str {
	match op {
		UnaryOp::Minus => "-",
		UnaryOp::Not => "!",
	}
}


fn binary_op(op: BinaryOp) -> &'static str {
	match op {
		BinaryOp::Plus => "+",
		BinaryOp::Minus => "-",
		BinaryOp::Times => "*",
		BinaryOp::Div => "/",
		BinaryOp::Mod => "%",
		BinaryOp::Equals => "==",
		BinaryOp::NotEquals => "!=",
		BinaryOp::Greater => ">",
		BinaryOp::GreaterEquals => ">=",
		BinaryOp::Lower => "<",
		BinaryOp::LowerEquals => "<=",
		BinaryOp::And => "&",
		BinaryOp::Or => "|",
		BinaryOp::Xor => "^",
	}
}
