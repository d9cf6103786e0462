use super::{Keyword, Token, TokenKind};


/// A physical line in a source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
	/// Byte offset of the first character.
	pub start: usize,
	/// Number of leading tabs or double-space groups.
	pub indent: u32,
}


/// Split the text into physical lines, computing each line's indentation.
pub fn lines(text: &str) -> Box<[Line]> {
	let mut lines = Vec::new();
	let mut start = 0;

	for line in text.split('\n') {
		lines.push(Line { start, indent: indent_of(line) });
		start += line.len() + 1;
	}

	lines.into()
}


/// Count the leading tabs and pairs of spaces. A trailing odd space doesn't count.
pub fn indent_of(line: &str) -> u32 {
	let mut indent = 0;
	let mut spaces = 0;

	for c in line.chars() {
		match c {
			'\t' => {
				indent += 1;
				spaces = 0;
			}

			' ' => {
				spaces += 1;
				if spaces == 2 {
					indent += 1;
					spaces = 0;
				}
			}

			_ => break,
		}
	}

	indent
}


/// A block that has been opened but not yet closed.
#[derive(Debug)]
struct Open {
	indent: u32,
	/// Whether the block body is indented deeper than the opening line, in which case
	/// dedenting closes it.
	implicit: bool,
}


/// Rewrite indentation-delimited blocks into explicitly terminated ones.
///
/// A block is opened by a line starting with `if`, `while`, `for` or `class`, or ending
/// with `=>`. When the next line is indented deeper, the block may be closed implicitly:
/// the first subsequent line indented at or below the opening line gets a synthesized
/// `end` and line end inserted before it, one pair per closed block. Lines starting with
/// `end` or `else` only close blocks indented deeper than themselves, as they belong to
/// the block at their own level. Blank lines are passed through unchanged.
pub fn add_indent_ends(tokens: Vec<Token>) -> Vec<Token> {
	let lines = logical_lines(&tokens);
	let mut output = Vec::with_capacity(tokens.len());
	let mut open: Vec<Open> = Vec::new();

	for (ix, line) in lines.iter().enumerate() {
		let first = &line[0];

		let indent = match first.indent {
			Some(indent) if first.kind != TokenKind::Eol => indent,
			// Blank lines and continuation tokens don't affect the indentation.
			_ => {
				output.extend_from_slice(line);
				continue;
			}
		};

		let closes_own_level = !matches!(
			first.kind,
			TokenKind::Keyword(Keyword::End) | TokenKind::Keyword(Keyword::Else)
		);

		while let Some(top) = open.last() {
			let dedented = top.indent > indent || (closes_own_level && top.indent == indent);

			if top.implicit && dedented {
				let indent = top.indent;
				open.pop();
				push_end(&mut output, first.span.start, first, indent);
			} else {
				break;
			}
		}

		if first.kind == TokenKind::Keyword(Keyword::End) {
			open.pop();
		}

		if opens_block(line) {
			let implicit = lines[ix + 1 ..]
				.iter()
				.find_map(|next| line_indent(next))
				.map_or(false, |next| next > indent);

			open.push(Open { indent, implicit });
		}

		output.extend_from_slice(line);
	}

	if let Some(last) = tokens.last() {
		// Implicit blocks are closed at the end of the input. A missing explicit `end` is
		// left for the parser to report.
		while let Some(&Open { implicit: true, indent }) = open.last() {
			open.pop();

			if output.last().map_or(false, |token| token.kind != TokenKind::Eol) {
				output.push(Token::synthesized(TokenKind::Eol, last.span.end, last.pos));
			}

			push_end(&mut output, last.span.end, last, indent);
		}
	}

	output
}


/// Push a synthesized `end` followed by a line end. The `end` is annotated with the
/// indentation of the block it closes, so that running the pass again over its own output
/// (as happens for included units) closes nothing twice.
fn push_end(output: &mut Vec<Token>, at: usize, near: &Token, indent: u32) {
	let mut end = Token::synthesized(TokenKind::Keyword(Keyword::End), at, near.pos);
	end.indent = Some(indent);

	output.push(end);
	output.push(Token::synthesized(TokenKind::Eol, at, near.pos));
}


/// Split the token stream after every line end.
fn logical_lines(tokens: &[Token]) -> Vec<&[Token]> {
	tokens
		.split_inclusive(|token| token.kind == TokenKind::Eol)
		.collect()
}


/// The indentation of a line that counts for comparison, if any.
fn line_indent(line: &[Token]) -> Option<u32> {
	let first = line.first()?;

	if first.kind == TokenKind::Eol {
		None
	} else {
		first.indent
	}
}


/// Check whether a line opens a block that it doesn't close itself.
fn opens_block(line: &[Token]) -> bool {
	let mut content = line
		.iter()
		.filter(|token| token.kind != TokenKind::Eol);

	let first = content.next();
	let last = content.last().or(first);

	let opener = match (first, last) {
		(Some(Token { kind: TokenKind::Keyword(keyword), .. }), _) if keyword.opens_block() => true,
		(_, Some(Token { kind: TokenKind::Arrow, .. })) => true,
		_ => false,
	};

	let closed = matches!(
		last,
		Some(Token { kind: TokenKind::Keyword(Keyword::End), .. })
	);

	opener && !closed
}
