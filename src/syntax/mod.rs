pub mod ast;
mod error;
mod fmt;
pub mod frame;
pub mod lexer;
pub mod parser;
mod source;

use crate::symbol;
pub use ast::Ast;
pub use error::{Error, Errors};
pub use fmt::AnalysisDisplayContext;
pub use frame::{DeclKind, Frames, Globals};
use lexer::Tokenizer;
use parser::Parser;
pub use source::{FsResolver, IncludeResolver, NoIncludes, Source, SourcePos, Span};


/// Syntactical analysis.
#[derive(Debug)]
pub struct Analysis {
	/// The produced AST, possibly partial if there were errors.
	pub ast: Ast,
	/// Syntax errors.
	pub errors: Errors,
}


impl Analysis {
	/// Perform syntax analysis in the given source. The parser runs even if there are
	/// lexical errors, in order to report as many errors as possible.
	pub fn analyze(
		source: &Source,
		interner: &mut symbol::Interner,
		resolver: &mut dyn IncludeResolver,
		globals: &Globals,
	) -> Self {
		let lexer::Tokens { tokens, errors: lexical } = Tokenizer::new(interner, resolver)
			.tokenize(source);

		let mut frames = Frames::new(globals, interner);
		let (statements, syntactic) = Parser::new(&tokens, &mut frames).parse();

		let errors: Vec<Error> = lexical
			.into_vec()
			.into_iter()
			.map(Error::from)
			.chain(
				syntactic
					.into_vec()
					.into_iter()
					.map(Error::from)
			)
			.collect();

		log::debug!("analyzed {} tokens, {} errors", tokens.len(), errors.len());

		Analysis {
			ast: Ast {
				path: source.path,
				statements,
			},
			errors: Errors(errors.into()),
		}
	}


	/// The AST, but only if there were no errors.
	pub fn into_result(self) -> Result<Ast, Errors> {
		if self.errors.is_empty() {
			Ok(self.ast)
		} else {
			Err(self.errors)
		}
	}
}
