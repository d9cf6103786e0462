use std::io;

use assert_matches::assert_matches;

use super::*;
use crate::syntax::source::NoIncludes;


fn source(input: &str, interner: &mut symbol::Interner) -> Source {
	Source::new(interner.get_or_intern("<test>"), input)
}


fn tokenize(input: &str, interner: &mut symbol::Interner) -> Tokens {
	let source = source(input, interner);
	Tokenizer::new(interner, &mut NoIncludes).tokenize(&source)
}


fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
	tokens
		.iter()
		.map(|token| token.kind.clone())
		.collect()
}


fn synthesized(tokens: &[Token]) -> usize {
	tokens
		.iter()
		.filter(|token| token.is_synthesized())
		.count()
}


#[test]
fn test_simple_tokens() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("let x = 0x1F + 2.5 * 0b11 // comment\n", &mut interner)
		.into_result()
		.expect("lexical errors");

	let x = interner.get("x").expect("x not interned");

	assert_eq!(
		kinds(&tokens),
		[
			TokenKind::Keyword(Keyword::Let),
			TokenKind::Identifier(x),
			TokenKind::Operator(Operator::Assign),
			TokenKind::Literal(Literal::Int(31)),
			TokenKind::Operator(Operator::Plus),
			TokenKind::Literal(Literal::Float(2.5)),
			TokenKind::Operator(Operator::Times),
			TokenKind::Literal(Literal::Int(3)),
			TokenKind::Eol,
		]
	);

	assert_eq!(tokens[0].indent, Some(0));
	assert_eq!(tokens[1].indent, None);
	assert_eq!(tokens[3].span, Span { start: 8, end: 12 });
	assert_eq!(tokens[3].pos.column, 8);
}


#[test]
fn test_reserved_words_are_case_insensitive() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("WHILE True\n  Break\nEnd\nwhile_x", &mut interner)
		.into_result()
		.expect("lexical errors");

	assert_matches!(
		&kinds(&tokens)[..],
		[
			TokenKind::Keyword(Keyword::While),
			TokenKind::Literal(Literal::True),
			TokenKind::Eol,
			TokenKind::Keyword(Keyword::Break),
			TokenKind::Eol,
			TokenKind::Keyword(Keyword::End),
			TokenKind::Eol,
			TokenKind::Identifier(_),
		]
	);
}


#[test]
fn test_strings_and_comments() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("\"a\\tb\\\"c\" /* multi\nline */ == \"\"", &mut interner)
		.into_result()
		.expect("lexical errors");

	assert_eq!(
		kinds(&tokens),
		[
			TokenKind::Literal(Literal::String("a\tb\"c".into())),
			TokenKind::Operator(Operator::Equals),
			TokenKind::Literal(Literal::String("".into())),
		]
	);
}


#[test]
fn test_retokenize_after_reset() {
	let mut interner = symbol::Interner::new();
	let source = source("CONST N 5\nif x\n  let y = N\nz\n", &mut interner);
	let mut resolver = NoIncludes;
	let mut tokenizer = Tokenizer::new(&mut interner, &mut resolver);

	let first = tokenizer.tokenize(&source);
	tokenizer.reset();
	let second = tokenizer.tokenize(&source);

	assert!(first.errors.is_empty());
	assert_eq!(first.tokens, second.tokens);
}


#[test]
fn test_constant_substitution() {
	let mut interner = symbol::Interner::new();
	let source = source("CONST FOO 1 2 3\nFOO\n  FOO\n", &mut interner);
	let mut resolver = NoIncludes;
	let mut tokenizer = Tokenizer::new(&mut interner, &mut resolver);

	let tokens = tokenizer
		.tokenize(&source)
		.into_result()
		.expect("lexical errors");

	let int = |i| TokenKind::Literal(Literal::Int(i));

	assert_eq!(
		kinds(&tokens),
		[int(1), int(2), int(3), TokenKind::Eol, int(1), int(2), int(3), TokenKind::Eol]
	);

	// Each copy is annotated on its own.
	assert_eq!(tokens[0].indent, Some(0));
	assert_eq!(tokens[4].indent, Some(1));
	assert_eq!(tokens[5].indent, None);

	let foo = interner_symbol(&tokenizer, "FOO");
	let recorded = tokenizer.constant(foo).expect("constant not recorded");

	assert_eq!(recorded.len(), 3);
	assert!(recorded.iter().all(|token| token.indent.is_none()));
}


/// Find the symbol of an interned name through the tokenizer's interner.
fn interner_symbol(tokenizer: &Tokenizer, name: &str) -> Symbol {
	tokenizer.interner
		.get(name)
		.expect("name not interned")
}


#[test]
fn test_constant_referencing_constant() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("CONST A 2\nCONST B A A\nB\n", &mut interner)
		.into_result()
		.expect("lexical errors");

	let two = TokenKind::Literal(Literal::Int(2));

	assert_eq!(kinds(&tokens), [two.clone(), two, TokenKind::Eol]);
}


#[test]
fn test_invalid_constant() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("CONST 1 2\nx\n", &mut interner);

	assert_matches!(&tokens.errors[..], [Error { kind: ErrorKind::InvalidConstant, .. }]);
	assert_matches!(&kinds(&tokens.tokens)[..], [TokenKind::Identifier(_), TokenKind::Eol]);
}


#[test]
fn test_implicit_end() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("if x\n  y\nz\n", &mut interner)
		.into_result()
		.expect("lexical errors");

	assert_eq!(synthesized(&tokens), 2);
	assert_matches!(
		&kinds(&tokens)[..],
		[
			TokenKind::Keyword(Keyword::If),
			TokenKind::Identifier(_),
			TokenKind::Eol,
			TokenKind::Identifier(_),
			TokenKind::Eol,
			TokenKind::Keyword(Keyword::End),
			TokenKind::Eol,
			TokenKind::Identifier(_),
			TokenKind::Eol,
		]
	);
	assert!(tokens[5].is_synthesized());
}


#[test]
fn test_nested_implicit_ends() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("while a\n  if b\n    c\nd\n", &mut interner)
		.into_result()
		.expect("lexical errors");

	// Two levels closed at once, one pair each.
	assert_eq!(synthesized(&tokens), 4);
}


#[test]
fn test_explicit_end() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("if x\n  y\nend\nz\n", &mut interner)
		.into_result()
		.expect("lexical errors");

	assert_eq!(synthesized(&tokens), 0);

	// Single line blocks are closed on the same line.
	let tokens = tokenize("f(a) => return a end\n  g\n", &mut interner)
		.into_result()
		.expect("lexical errors");

	assert_eq!(synthesized(&tokens), 0);
}


#[test]
fn test_else_continues_block() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("if x\n  y\nelse\n  z\nw\n", &mut interner)
		.into_result()
		.expect("lexical errors");

	let ends: Vec<_> = tokens
		.iter()
		.filter(|token| token.kind == TokenKind::Keyword(Keyword::End))
		.collect();

	assert_eq!(ends.len(), 1);
	assert_eq!(ends[0].pos.line, 5);
}


#[test]
fn test_end_of_input_closes_blocks() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("x() =>\n  y", &mut interner)
		.into_result()
		.expect("lexical errors");

	assert_matches!(
		&kinds(&tokens)[tokens.len() - 3 ..],
		[TokenKind::Eol, TokenKind::Keyword(Keyword::End), TokenKind::Eol]
	);
	assert_eq!(synthesized(&tokens), 3);
}


#[test]
fn test_blank_lines_are_ignored() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("if x\n\n  y\n\n  z\nw\n", &mut interner)
		.into_result()
		.expect("lexical errors");

	assert_eq!(synthesized(&tokens), 2);
}


#[test]
fn test_errors_skip_one_character() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("let $x = 1 ~\n\"open", &mut interner);

	assert_matches!(
		&tokens.errors[..],
		[
			Error { kind: ErrorKind::Unexpected('$'), .. },
			Error { kind: ErrorKind::Unexpected('~'), .. },
			Error { kind: ErrorKind::UnterminatedString, pos: SourcePos { line: 2, .. } },
		]
	);

	assert_eq!(tokens.tokens.len(), 5);
	assert!(tokens.into_result().is_err());
}


#[test]
fn test_invalid_literals() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("\"a\\qb\" 99999999999999999999 /* open", &mut interner);

	assert_matches!(
		&tokens.errors[..],
		[
			Error { kind: ErrorKind::InvalidEscapeSequence(sequence), .. },
			Error { kind: ErrorKind::InvalidNumber(_), .. },
			Error { kind: ErrorKind::UnterminatedComment, .. },
		] if &**sequence == "\\q"
	);
}


#[test]
fn test_include() {
	let mut interner = symbol::Interner::new();
	let source = source("#\"lib\"\nlet x = K\n", &mut interner);

	let mut resolver = |name: &str| -> io::Result<Box<str>> {
		match name {
			"lib" => Ok("CONST K 7\nlet y = 1\n".into()),
			_ => Err(io::Error::new(io::ErrorKind::NotFound, "not found")),
		}
	};

	let tokens = Tokenizer::new(&mut interner, &mut resolver)
		.tokenize(&source)
		.into_result()
		.expect("lexical errors");

	let lib = interner.get("lib").expect("include path not interned");

	// The included unit's tokens come first, with their own path.
	assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Let));
	assert_eq!(tokens[0].pos.path, lib);

	// The constant defined by the include is visible afterwards.
	assert_eq!(
		tokens[tokens.len() - 2].kind,
		TokenKind::Literal(Literal::Int(7))
	);
}


#[test]
fn test_include_with_implicit_blocks() {
	let mut interner = symbol::Interner::new();
	let source = source("#\"lib\"\nx\n", &mut interner);

	let mut resolver = |_: &str| -> io::Result<Box<str>> { Ok("if a\n  b\n".into()) };

	let tokens = Tokenizer::new(&mut interner, &mut resolver)
		.tokenize(&source)
		.into_result()
		.expect("lexical errors");

	// The block closed at the end of the included unit is not closed again.
	assert_eq!(synthesized(&tokens), 2);
}


#[test]
fn test_include_inside_implicit_block() {
	let mut interner = symbol::Interner::new();
	let source = source("let a = 1\nif a == 1\n  #\"lib\"\n  a = 2\nprint(a)\n", &mut interner);

	let mut resolver = |_: &str| -> io::Result<Box<str>> { Ok("let z = 1\n".into()) };

	let tokens = Tokenizer::new(&mut interner, &mut resolver)
		.tokenize(&source)
		.into_result()
		.expect("lexical errors");

	// The included line is nested at the include's own level.
	let included = tokens
		.iter()
		.filter(|token| token.kind == TokenKind::Keyword(Keyword::Let))
		.nth(1)
		.expect("missing included let");

	assert_eq!(included.indent, Some(1));

	// The block is closed only once the indentation drops.
	assert_eq!(synthesized(&tokens), 2);
	assert_matches!(
		&kinds(&tokens)[..],
		[
			..,
			TokenKind::Keyword(Keyword::End),
			TokenKind::Eol,
			TokenKind::Identifier(_),
			TokenKind::OpenParens,
			TokenKind::Identifier(_),
			TokenKind::CloseParens,
			TokenKind::Eol,
		]
	);
}


#[test]
fn test_failed_include() {
	let mut interner = symbol::Interner::new();
	let tokens = tokenize("#\"missing\"\nx\n", &mut interner);

	assert_matches!(
		&tokens.errors[..],
		[
			Error {
				kind: ErrorKind::Include { failure: IncludeFailure::Io(_), .. },
				pos: SourcePos { line: 1, column: 0, .. },
			}
		]
	);

	assert_eq!(
		tokens.errors[0].to_string(),
		"line 1, column 0 - failed to include \"missing\": includes are disabled, can't load \"missing\"."
	);

	// Nothing from the include is spliced in.
	assert_matches!(&kinds(&tokens.tokens)[..], [TokenKind::Eol, TokenKind::Identifier(_), TokenKind::Eol]);
}


#[test]
fn test_recursive_include() {
	let mut interner = symbol::Interner::new();
	let source = source("#\"self\"\n", &mut interner);

	let mut resolver = |_: &str| -> io::Result<Box<str>> { Ok("#\"self\"\n".into()) };

	let tokens = Tokenizer::new(&mut interner, &mut resolver).tokenize(&source);

	assert_matches!(
		tokens.errors.first(),
		Some(Error { kind: ErrorKind::Include { failure: IncludeFailure::TooDeep, .. }, .. })
	);

	assert_matches!(
		tokens.errors.last(),
		Some(Error { kind: ErrorKind::Include { failure: IncludeFailure::Errors(_), .. }, .. })
	);

	assert_eq!(tokens.errors.len(), MAX_INCLUDE_DEPTH as usize + 1);
}
