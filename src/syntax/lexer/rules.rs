use regex::Regex;


/// The kind of lexeme a rule recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Rule {
	Whitespace,
	Eol,
	LineComment,
	BlockComment,
	UnterminatedComment,
	Include,
	Number,
	String,
	UnterminatedString,
	Reserved,
	Identifier,
	Symbol,
}


/// The ordered rule table. Rules are tried in order at the cursor and the first match
/// wins, so longer lexemes must precede their prefixes.
#[derive(Debug)]
pub(super) struct Rules(Box<[(Regex, Rule)]>);


impl Rules {
	pub fn new() -> Self {
		let table = [
			(r"^[ \t\r]+", Rule::Whitespace),
			(r"^\n", Rule::Eol),
			(r"^//[^\n]*", Rule::LineComment),
			(r"^/\*(?s:.*?)\*/", Rule::BlockComment),
			(r"^/\*(?s:.*)", Rule::UnterminatedComment),
			(r#"^#"[^"\n]*""#, Rule::Include),
			(
				r"^(?:0[xX][0-9a-fA-F]+|0[bB][01]+|[0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?)",
				Rule::Number,
			),
			(r#"^"(?:[^"\\\n]|\\.)*""#, Rule::String),
			(r#"^"(?:[^"\\\n]|\\.)*"#, Rule::UnterminatedString),
			(
				r"(?i)^(?:let|if|else|while|for|to|step|return|break|continue|class|extends|new|this|super|end|true|false|null|const)\b",
				Rule::Reserved,
			),
			(r"^[A-Za-z_][A-Za-z0-9_]*", Rule::Identifier),
			(
				r"^(?:=>|==|!=|>=|<=|\+=|-=|\*=|/=|%=|[-+*/%=<>!&|^(){}\[\],.:@])",
				Rule::Symbol,
			),
		];

		Self(
			table
				.iter()
				.map(
					|&(pattern, rule)| (
						Regex::new(pattern).expect("invalid lexical rule"),
						rule
					)
				)
				.collect()
		)
	}


	/// Find the first rule matching at the start of the input, returning the rule and the
	/// length of the lexeme. Empty matches are ignored.
	pub fn matching(&self, input: &str) -> Option<(Rule, usize)> {
		self.0
			.iter()
			.find_map(
				|(regex, rule)| regex
					.find(input)
					.filter(|found| found.start() == 0 && found.end() > 0)
					.map(|found| (*rule, found.end()))
			)
	}
}


impl Default for Rules {
	fn default() -> Self {
		Self::new()
	}
}
