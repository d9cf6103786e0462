use assert_matches::assert_matches;

use super::*;
use crate::{
	symbol::Interner,
	syntax::{
		frame::Globals,
		lexer::Tokenizer,
		source::NoIncludes,
		Source,
	},
};


fn parse(input: &str, interner: &mut Interner) -> (ast::Block, Box<[Error]>) {
	let path = interner.get_or_intern("<test>");
	let source = Source::new(path, input);

	let tokens = Tokenizer::new(interner, &mut NoIncludes)
		.tokenize(&source)
		.into_result()
		.expect("lexical errors in test input");

	let mut frames = Frames::new(&Globals::default(), interner);

	Parser::new(&tokens, &mut frames).parse()
}


fn parse_ok(input: &str, interner: &mut Interner) -> ast::Block {
	let (block, errors) = parse(input, interner);
	assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
	block
}


#[test]
fn test_let_and_if() {
	let mut interner = Interner::new();
	let block = parse_ok("let x = 1\nif x == 1\n  x = 2\nend\n", &mut interner);
	let x = interner.get("x").expect("x not interned");

	assert_eq!(block.len(), 2);

	assert_matches!(
		&block.0[0],
		ast::Statement::Let {
			identifier,
			init: ast::Expr::Literal { literal: ast::Literal::Int(1), .. },
			..
		} if *identifier == x
	);

	assert_matches!(
		&block.0[1],
		ast::Statement::If {
			condition: ast::Expr::BinaryOp { op: ast::BinaryOp::Equals, left, right, .. },
			then,
			otherwise: None,
			..
		} => {
			assert_matches!(**left, ast::Expr::Identifier { identifier, .. } if identifier == x);
			assert_matches!(**right, ast::Expr::Literal { literal: ast::Literal::Int(1), .. });
			assert_eq!(then.len(), 1);
			assert_matches!(
				&then.0[0],
				ast::Statement::Assign {
					left: ast::Expr::Identifier { .. },
					op: None,
					right: ast::Expr::Literal { literal: ast::Literal::Int(2), .. },
					..
				}
			);
		}
	);
}


#[test]
fn test_implicit_end() {
	let mut interner = Interner::new();
	let block = parse_ok("let x = 1\nif x\n  x = 2\nx = 3\n", &mut interner);

	assert_eq!(block.len(), 3);
	assert_matches!(&block.0[1], ast::Statement::If { then, .. } if then.len() == 1);
	assert_matches!(&block.0[2], ast::Statement::Assign { .. });
}


#[test]
fn test_precedence() {
	let mut interner = Interner::new();
	let block = parse_ok("let a = 1 + 2 * 3 == 7 & 1\n", &mut interner);

	assert_matches!(
		&block.0[0],
		ast::Statement::Let {
			init: ast::Expr::BinaryOp { op: ast::BinaryOp::And, left, .. },
			..
		} => assert_matches!(
			&**left,
			ast::Expr::BinaryOp { op: ast::BinaryOp::Equals, left, .. } => assert_matches!(
				&**left,
				ast::Expr::BinaryOp { op: ast::BinaryOp::Plus, right, .. } => assert_matches!(
					&**right,
					ast::Expr::BinaryOp { op: ast::BinaryOp::Times, .. }
				)
			)
		)
	);
}


#[test]
fn test_left_associativity() {
	let mut interner = Interner::new();
	let block = parse_ok("let a = 8 - 4 - 2\n", &mut interner);

	assert_matches!(
		&block.0[0],
		ast::Statement::Let {
			init: ast::Expr::BinaryOp { op: ast::BinaryOp::Minus, left, right, .. },
			..
		} => {
			assert_matches!(&**left, ast::Expr::BinaryOp { op: ast::BinaryOp::Minus, .. });
			assert_matches!(&**right, ast::Expr::Literal { literal: ast::Literal::Int(2), .. });
		}
	);
}


#[test]
fn test_undeclared_errors_accumulate() {
	let mut interner = Interner::new();
	let (_, errors) = parse("let x = a\nprint(b)\nlet y = x + c\n", &mut interner);

	assert_eq!(errors.len(), 3);
	assert!(errors.iter().all(|error| matches!(error, Error::Undeclared { .. })));
}


#[test]
fn test_scoping() {
	let mut interner = Interner::new();

	// The loop variable is gone after the loop.
	let (_, errors) = parse("for i = 1 to 10 step 2\n  print(i)\nend\nprint(i)\n", &mut interner);
	assert_eq!(errors.len(), 1);
	assert_matches!(errors[0], Error::Undeclared { pos, .. } if pos.line == 4);

	// Functions may be recursive, and parameters are local.
	let (_, errors) = parse("let f(n) => return f(n - 1) end\nprint(n)\n", &mut interner);
	assert_eq!(errors.len(), 1);
	assert_matches!(errors[0], Error::Undeclared { pos, .. } if pos.line == 2);
}


#[test]
fn test_function_definition_vs_call() {
	let mut interner = Interner::new();
	let block = parse_ok("add(a, b) => return a + b end\nprint(add(1, 2))\n", &mut interner);

	assert_matches!(
		&block.0[0],
		ast::Statement::FunctionDef { function: ast::Function { params, body }, .. } => {
			assert_eq!(params.len(), 2);
			assert_matches!(&body.0[0], ast::Statement::Return { exprs, .. } if exprs.len() == 1);
		}
	);

	assert_matches!(
		&block.0[1],
		ast::Statement::Expr(ast::Expr::Call { args, .. }) if args.len() == 1
	);
}


#[test]
fn test_function_literal_and_parenthesis() {
	let mut interner = Interner::new();
	let block = parse_ok("let f = (x) =>\n  return x * 2\nend\nlet y = (1 + 2) * 3\n", &mut interner);

	assert_matches!(
		&block.0[0],
		ast::Statement::Let {
			init: ast::Expr::Literal { literal: ast::Literal::Function(_), .. },
			..
		}
	);

	assert_matches!(
		&block.0[1],
		ast::Statement::Let {
			init: ast::Expr::BinaryOp { op: ast::BinaryOp::Times, .. },
			..
		}
	);
}


#[test]
fn test_else_if_chain() {
	let mut interner = Interner::new();
	let input = "let x = 1\nif x == 1\n  x = 2\nelse if x == 2\n  x = 3\nelse\n  x = 4\nend\n";
	let block = parse_ok(input, &mut interner);

	assert_matches!(
		&block.0[1],
		ast::Statement::If { otherwise: Some(otherwise), .. } => assert_matches!(
			&otherwise.0[..],
			[ast::Statement::If { otherwise: Some(last), .. }] if last.len() == 1
		)
	);
}


#[test]
fn test_class() {
	let mut interner = Interner::new();
	let input = "\
class Point
  x = 0
  y = 0
  move(dx) =>
    @x += dx
    this.y = super.y
  end
end
class Point3 extends Point
  z = 0
end
let p = new Point3()
p.move(1)
";

	let block = parse_ok(input, &mut interner);

	assert_eq!(block.len(), 4);

	assert_matches!(
		&block.0[0],
		ast::Statement::Class { body, extends, .. } => {
			assert!(extends.is_empty());
			assert_matches!(
				&body.0[..],
				[
					ast::Statement::Field { .. },
					ast::Statement::Field { .. },
					ast::Statement::FunctionDef { .. },
				]
			);
		}
	);

	assert_matches!(&block.0[1], ast::Statement::Class { extends, .. } if extends.len() == 1);
	assert_matches!(&block.0[2], ast::Statement::Let { init: ast::Expr::New { .. }, .. });
}


#[test]
fn test_class_errors() {
	let mut interner = Interner::new();
	let (_, errors) = parse("let a = this\nlet b = @x\nlet c = super.f\nlet d = new Foo()\n", &mut interner);

	assert_matches!(
		&errors[..],
		[
			Error::ThisOutsideClass { .. },
			Error::ThisOutsideClass { .. },
			Error::SuperOutsideClass { .. },
			Error::UndeclaredClass { .. },
		]
	);
	assert!(errors.iter().all(Error::is_resolution));

	let (_, errors) = parse("let a = (1\n", &mut interner);
	assert!(!errors.is_empty());
	assert!(!errors.iter().any(Error::is_resolution));
}


#[test]
fn test_collections() {
	let mut interner = Interner::new();
	let input = "let x = 1\nlet d = {\n  a: [1, 2,\n    3],\n  :x,\n}\nprint(d[\"a\"][0], d.a)\n";
	let block = parse_ok(input, &mut interner);

	assert_matches!(
		&block.0[1],
		ast::Statement::Let {
			init: ast::Expr::Literal { literal: ast::Literal::Dict(items), .. },
			..
		} => {
			assert_eq!(items.len(), 2);
			assert_matches!(&items[0].1, ast::Expr::Literal { literal: ast::Literal::Array(array), .. } if array.len() == 3);
			assert_matches!(&items[1].1, ast::Expr::Identifier { .. });
		}
	);
}


#[test]
fn test_invalid_assignment() {
	let mut interner = Interner::new();
	let (_, errors) = parse("print(1) = 2\n", &mut interner);

	assert_matches!(&errors[..], [Error::InvalidAssignment { .. }]);
}


#[test]
fn test_duplicate_params() {
	let mut interner = Interner::new();
	let (_, errors) = parse("let f(a, a) => return a end\n", &mut interner);

	assert_matches!(&errors[..], [Error::DuplicateParams { .. }]);
}


#[test]
fn test_syntax_error_recovery() {
	let mut interner = Interner::new();
	let (block, errors) = parse("let x = )\nlet y = 2\nend\nprint(y)\n", &mut interner);

	assert_matches!(
		&errors[..],
		[
			Error::Unexpected { expected: Expected::Message("expression"), .. },
			Error::Unexpected { expected: Expected::Message("statement"), .. },
		]
	);

	assert_matches!(
		&block.0[..],
		[
			ast::Statement::IllFormed,
			ast::Statement::Let { .. },
			ast::Statement::IllFormed,
			ast::Statement::Expr(_),
		]
	);
}


#[test]
fn test_missing_end() {
	let mut interner = Interner::new();
	let (_, errors) = parse("while true print(1)", &mut interner);

	assert_matches!(&errors[..], [Error::UnexpectedEof]);
}
