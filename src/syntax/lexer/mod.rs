mod error;
pub mod indent;
mod rules;
#[cfg(test)]
mod tests;
mod token;

use std::collections::HashMap;

use crate::symbol::{self, Symbol};
use indent::Line;
use rules::{Rule, Rules};
use super::{IncludeResolver, Source, SourcePos, Span};
pub use error::{Error, ErrorKind, IncludeFailure};
pub use token::{Keyword, Literal, Operator, Token, TokenKind};


/// How many include directives may be nested.
pub const MAX_INCLUDE_DEPTH: u32 = 16;


/// The result of tokenizing a source unit. Tokens are kept even when there are errors,
/// so that callers can inspect them.
#[derive(Debug)]
pub struct Tokens {
	pub tokens: Box<[Token]>,
	pub errors: Box<[Error]>,
}


impl Tokens {
	/// The tokens, but only if there were no lexical errors.
	pub fn into_result(self) -> Result<Box<[Token]>, Box<[Error]>> {
		if self.errors.is_empty() {
			Ok(self.tokens)
		} else {
			Err(self.errors)
		}
	}
}


/// The tokenizer for script source code.
///
/// Named constants survive between calls to `tokenize`, so that a sequence of sources
/// may share them. Use `reset` to start afresh.
pub struct Tokenizer<'a> {
	rules: Rules,
	interner: &'a mut symbol::Interner,
	resolver: &'a mut dyn IncludeResolver,
	constants: HashMap<Symbol, Box<[Token]>>,
}


impl<'a> Tokenizer<'a> {
	pub fn new(
		interner: &'a mut symbol::Interner,
		resolver: &'a mut dyn IncludeResolver,
	) -> Self {
		Self {
			rules: Rules::new(),
			interner,
			resolver,
			constants: HashMap::new(),
		}
	}


	/// Forget all named constants.
	pub fn reset(&mut self) {
		self.constants.clear();
	}


	/// Get the recorded tokens of a named constant.
	pub fn constant(&self, name: Symbol) -> Option<&[Token]> {
		self.constants
			.get(&name)
			.map(AsRef::as_ref)
	}


	/// Tokenize a source unit. The scan always completes, skipping unmatched characters.
	pub fn tokenize(&mut self, source: &Source) -> Tokens {
		let mut errors = Vec::new();

		let tokens = self.scan(source.path, &source.contents, 0, &mut errors);
		let tokens = indent::add_indent_ends(tokens);

		log::debug!("tokenized {} tokens, {} errors", tokens.len(), errors.len());

		Tokens { tokens: tokens.into(), errors: errors.into() }
	}


	/// Run the rule table over the text, producing tokens before the indentation pass.
	fn scan(
		&mut self,
		path: Symbol,
		text: &str,
		depth: u32,
		errors: &mut Vec<Error>,
	) -> Vec<Token> {
		let lines = indent::lines(text);
		let mut unit = Unit::new(path, text, &lines);
		let mut offset = 0;

		while offset < text.len() {
			let rest = &text[offset ..];

			match self.rules.matching(rest) {
				Some((rule, len)) => {
					let span = Span { start: offset, end: offset + len };
					self.visit(rule, &rest[.. len], span, &mut unit, depth, errors);
					offset += len;
				}

				None => {
					// Skip a single character and carry on, to report as many errors as possible.
					let c = rest.chars().next().unwrap_or_default();
					errors.push(Error::unexpected(c, unit.pos(offset)));
					offset += c.len_utf8().max(1);
				}
			}
		}

		unit.finish(&mut self.constants)
	}


	/// Produce the token for a matched lexeme.
	fn visit(
		&mut self,
		rule: Rule,
		lexeme: &str,
		span: Span,
		unit: &mut Unit,
		depth: u32,
		errors: &mut Vec<Error>,
	) {
		let pos = unit.pos(span.start);
		let token = |kind| Token::new(kind, span, pos);

		match rule {
			Rule::Whitespace | Rule::LineComment | Rule::BlockComment => (),

			Rule::UnterminatedComment => errors.push(Error::unterminated_comment(pos)),

			Rule::UnterminatedString => errors.push(Error::unterminated_string(pos)),

			Rule::Eol => unit.append(token(TokenKind::Eol), &mut self.constants, errors),

			Rule::Include => {
				let name = &lexeme[2 .. lexeme.len() - 1];
				self.include(name, span, unit, depth, errors);
			}

			Rule::Number => match parse_number(lexeme) {
				Some(literal) => unit.append(token(TokenKind::Literal(literal)), &mut self.constants, errors),
				None => errors.push(Error::invalid_number(lexeme, pos)),
			},

			Rule::String => match unescape(&lexeme[1 .. lexeme.len() - 1]) {
				Ok(string) => unit.append(
					token(TokenKind::Literal(Literal::String(string.into()))),
					&mut self.constants,
					errors
				),
				Err(sequence) => errors.push(Error::invalid_escape_sequence(sequence, pos)),
			},

			Rule::Reserved => match reserved(lexeme) {
				Some(kind) => unit.append(token(kind), &mut self.constants, errors),
				None => unit.begin_constant(pos),
			},

			Rule::Identifier => {
				let symbol = self.interner.get_or_intern(lexeme);
				unit.append(token(TokenKind::Identifier(symbol)), &mut self.constants, errors)
			}

			Rule::Symbol => unit.append(token(symbol(lexeme)), &mut self.constants, errors),
		}
	}


	/// Tokenize an included source and splice its tokens at the current position.
	fn include(
		&mut self,
		name: &str,
		span: Span,
		unit: &mut Unit,
		depth: u32,
		errors: &mut Vec<Error>,
	) {
		let pos = unit.pos(span.start);

		if depth >= MAX_INCLUDE_DEPTH {
			errors.push(Error::include(name, IncludeFailure::TooDeep, pos));
			return;
		}

		let text = match self.resolver.resolve(name) {
			Ok(text) => text,
			Err(error) => {
				errors.push(Error::include(name, IncludeFailure::Io(error), pos));
				return;
			}
		};

		log::debug!("including \"{}\" at depth {}", name, depth + 1);

		let path = self.interner.get_or_intern(name);

		// The included unit starts with an empty constant table.
		let outer = std::mem::take(&mut self.constants);
		let mut nested_errors = Vec::new();
		let tokens = self.scan(path, &text, depth + 1, &mut nested_errors);
		let nested = std::mem::replace(&mut self.constants, outer);

		if nested_errors.is_empty() {
			self.constants.extend(nested);
			let shift = unit.indent(span.start);
			unit.splice(indent::add_indent_ends(tokens), shift);
		} else {
			let count = nested_errors.len();
			errors.extend(nested_errors);
			errors.push(Error::include(name, IncludeFailure::Errors(count), pos));
		}
	}
}


impl<'a> std::fmt::Debug for Tokenizer<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_struct("Tokenizer")
			.field("rules", &self.rules)
			.field("constants", &self.constants.len())
			.finish()
	}
}


/// What is being captured after a CONST directive.
#[derive(Debug)]
enum Directive {
	None,
	/// Expecting the constant name.
	Name(SourcePos),
	/// Recording the constant's tokens until the end of the line.
	Body(Symbol, Vec<Token>),
}


/// The state for tokenizing a single source unit.
struct Unit<'t> {
	path: Symbol,
	text: &'t str,
	lines: &'t [Line],
	tokens: Vec<Token>,
	directive: Directive,
	/// The last physical line whose first token has been annotated with the indentation.
	annotated: Option<usize>,
}


impl<'t> Unit<'t> {
	fn new(path: Symbol, text: &'t str, lines: &'t [Line]) -> Self {
		Self {
			path,
			text,
			lines,
			tokens: Vec::new(),
			directive: Directive::None,
			annotated: None,
		}
	}


	/// The physical line containing the offset.
	fn line(&self, offset: usize) -> usize {
		self.lines
			.partition_point(|line| line.start <= offset)
			.saturating_sub(1)
	}


	/// The human readable position of an offset.
	fn pos(&self, offset: usize) -> SourcePos {
		let line = self.line(offset);
		let start = self.lines.get(line).map_or(0, |line| line.start);

		SourcePos {
			line: line as u32 + 1,
			column: self.text[start .. offset].chars().count() as u32,
			path: self.path,
		}
	}


	fn begin_constant(&mut self, pos: SourcePos) {
		self.directive = Directive::Name(pos);
	}


	/// Append a token, expanding constants and capturing CONST directives.
	fn append(
		&mut self,
		token: Token,
		constants: &mut HashMap<Symbol, Box<[Token]>>,
		errors: &mut Vec<Error>,
	) {
		match std::mem::replace(&mut self.directive, Directive::None) {
			Directive::Name(pos) => match token.kind {
				TokenKind::Identifier(name) => self.directive = Directive::Body(name, Vec::new()),
				TokenKind::Eol => errors.push(Error::invalid_constant(pos)),
				_ => {
					errors.push(Error::invalid_constant(pos));
					// Drop the rest of the line.
					self.directive = Directive::Body(Symbol::default(), Vec::new());
				}
			},

			Directive::Body(name, mut body) => {
				if token.kind == TokenKind::Eol {
					define(constants, name, body);
				} else {
					match expansion(&token, constants) {
						Some(tokens) => body.extend_from_slice(tokens),
						None => body.push(token),
					}
					self.directive = Directive::Body(name, body);
				}
			}

			Directive::None => {
				let line = self.line(token.span.start);

				match expansion(&token, constants) {
					Some(tokens) => {
						for copy in tokens {
							self.push(copy.clone(), line);
						}
					}

					None => self.push(token, line),
				}
			}
		}
	}


	/// Push a token to the output, annotating the first token of each physical line.
	fn push(&mut self, mut token: Token, line: usize) {
		token.indent = None;

		if self.annotated != Some(line) {
			token.indent = self.lines.get(line).map(|line| line.indent);
			self.annotated = Some(line);
		}

		self.tokens.push(token);
	}


	/// The indentation of the physical line containing the offset.
	fn indent(&self, offset: usize) -> u32 {
		self.lines
			.get(self.line(offset))
			.map_or(0, |line| line.indent)
	}


	/// Splice already tokenized input, such as included units, nesting its indentation
	/// `shift` levels deeper.
	fn splice(&mut self, tokens: Vec<Token>, shift: u32) {
		self.tokens.extend(
			tokens
				.into_iter()
				.map(
					|mut token| {
						token.indent = token.indent.map(|indent| indent + shift);
						token
					}
				)
		);
	}


	/// Complete the unit, defining a constant left open by the end of input.
	fn finish(self, constants: &mut HashMap<Symbol, Box<[Token]>>) -> Vec<Token> {
		if let Directive::Body(name, body) = self.directive {
			define(constants, name, body);
		}

		self.tokens
	}
}


/// Record a constant. The dummy name is used for malformed directives, which are dropped.
fn define(constants: &mut HashMap<Symbol, Box<[Token]>>, name: Symbol, body: Vec<Token>) {
	if name != Symbol::default() {
		log::trace!("defined constant with {} tokens", body.len());
		constants.insert(name, body.into());
	}
}


/// The tokens a constant reference expands to, if the token is one.
fn expansion<'c>(
	token: &Token,
	constants: &'c HashMap<Symbol, Box<[Token]>>,
) -> Option<&'c [Token]> {
	match &token.kind {
		TokenKind::Identifier(name) => constants.get(name).map(AsRef::as_ref),
		_ => None,
	}
}


/// The token for a reserved word, or None for the CONST directive.
fn reserved(word: &str) -> Option<TokenKind> {
	let keyword = TokenKind::Keyword;
	let literal = TokenKind::Literal;

	let kind = match word.to_ascii_uppercase().as_str() {
		"LET" => keyword(Keyword::Let),
		"IF" => keyword(Keyword::If),
		"ELSE" => keyword(Keyword::Else),
		"WHILE" => keyword(Keyword::While),
		"FOR" => keyword(Keyword::For),
		"TO" => keyword(Keyword::To),
		"STEP" => keyword(Keyword::Step),
		"RETURN" => keyword(Keyword::Return),
		"BREAK" => keyword(Keyword::Break),
		"CONTINUE" => keyword(Keyword::Continue),
		"CLASS" => keyword(Keyword::Class),
		"EXTENDS" => keyword(Keyword::Extends),
		"NEW" => keyword(Keyword::New),
		"THIS" => keyword(Keyword::This),
		"SUPER" => keyword(Keyword::Super),
		"END" => keyword(Keyword::End),
		"TRUE" => literal(Literal::True),
		"FALSE" => literal(Literal::False),
		"NULL" => literal(Literal::Null),
		"CONST" => return None,
		other => unreachable!("unhandled reserved word {}", other),
	};

	Some(kind)
}


/// The token for a symbol lexeme.
fn symbol(lexeme: &str) -> TokenKind {
	let operator = TokenKind::Operator;

	match lexeme {
		"=>" => TokenKind::Arrow,
		"==" => operator(Operator::Equals),
		"!=" => operator(Operator::NotEquals),
		">=" => operator(Operator::GreaterEquals),
		"<=" => operator(Operator::LowerEquals),
		"+=" => operator(Operator::PlusAssign),
		"-=" => operator(Operator::MinusAssign),
		"*=" => operator(Operator::TimesAssign),
		"/=" => operator(Operator::DivAssign),
		"%=" => operator(Operator::ModAssign),
		"+" => operator(Operator::Plus),
		"-" => operator(Operator::Minus),
		"*" => operator(Operator::Times),
		"/" => operator(Operator::Div),
		"%" => operator(Operator::Mod),
		"=" => operator(Operator::Assign),
		"<" => operator(Operator::Lower),
		">" => operator(Operator::Greater),
		"!" => operator(Operator::Not),
		"&" => operator(Operator::And),
		"|" => operator(Operator::Or),
		"^" => operator(Operator::Xor),
		"(" => TokenKind::OpenParens,
		")" => TokenKind::CloseParens,
		"{" => TokenKind::OpenBrace,
		"}" => TokenKind::CloseBrace,
		"[" => TokenKind::OpenBracket,
		"]" => TokenKind::CloseBracket,
		"," => TokenKind::Comma,
		"." => TokenKind::Dot,
		":" => TokenKind::Colon,
		"@" => TokenKind::At,
		other => unreachable!("unhandled symbol {}", other),
	}
}


/// Parse a number literal. Returns None if the number doesn't fit its type.
fn parse_number(lexeme: &str) -> Option<Literal> {
	let radix = |prefix: &str, radix| {
		lexeme
			.strip_prefix(prefix)
			.or_else(|| lexeme.strip_prefix(&prefix.to_ascii_uppercase()))
			.map(|digits| i64::from_str_radix(digits, radix).ok().map(Literal::Int))
	};

	if let Some(literal) = radix("0x", 16).or_else(|| radix("0b", 2)) {
		return literal;
	}

	if lexeme.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
		lexeme
			.parse()
			.ok()
			.map(Literal::Float)
	} else {
		lexeme
			.parse()
			.ok()
			.map(Literal::Int)
	}
}


/// Process the escape sequences in a string literal's contents.
/// On failure, returns the invalid sequence.
fn unescape(contents: &str) -> Result<String, &str> {
	let mut string = String::with_capacity(contents.len());
	let mut chars = contents.char_indices();

	while let Some((ix, c)) = chars.next() {
		if c != '\\' {
			string.push(c);
			continue;
		}

		let escaped = match chars.next() {
			Some((_, 'n')) => '\n',
			Some((_, 't')) => '\t',
			Some((_, 'r')) => '\r',
			Some((_, '0')) => '\0',
			Some((_, '\\')) => '\\',
			Some((_, '"')) => '"',
			Some((end, other)) => return Err(&contents[ix .. end + other.len_utf8()]),
			None => return Err(&contents[ix ..]),
		};

		string.push(escaped);
	}

	Ok(string)
}
