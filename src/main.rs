mod args;

use std::{
	io,
	path::{Path, PathBuf},
};

use retrovm::{
	fmt,
	symbol,
	syntax::{self, lexer::Tokenizer, AnalysisDisplayContext},
	term::color,
};

use args::{Args, Command};


/// Maximum number of reported errors.
const MAX_ERRORS: usize = 20;


fn main() -> ! {
	let command = match args::parse(std::env::args_os()) {
		Ok(command) => command,
		Err(error) => {
			eprint!("{}", error);
			std::process::exit(1)
		}
	};

	let result = match command {
		Command::Run(args) => run(args),
		Command::Help(msg) | Command::Version(msg) => {
			println!("{}", msg);
			std::process::exit(0)
		},
	};

	let exit_code = match result {
		Ok(code) => code,
		Err(error) => {
			eprintln!("{}: {}", color::Fg(color::Red, "Error"), error);
			1
		}
	};

	std::process::exit(exit_code)
}


fn init_logger(verbosity: u64) {
	let mut builder = env_logger::Builder::from_default_env();
	builder.format_timestamp(None);

	// An explicit RUST_LOG takes precedence over the flags.
	if std::env::var_os("RUST_LOG").is_none() {
		let level = match verbosity {
			0 => log::LevelFilter::Warn,
			1 => log::LevelFilter::Info,
			2 => log::LevelFilter::Debug,
			_ => log::LevelFilter::Trace,
		};

		builder.filter(None, level);
	}

	builder.init();
}


fn separator() {
	println!("{}", color::Fg(color::Yellow, "--------------------------------------------------"));
}


fn run(args: Args) -> io::Result<i32> {
	init_logger(args.verbosity);

	let mut interner = symbol::Interner::new();

	let source = match &args.script {
		Some(path) => syntax::Source::from_path(path, &mut interner)?,
		None => {
			let path = interner.get_or_intern("<stdin>");
			syntax::Source::from_reader(path, io::stdin().lock())?
		}
	};

	let include_dir = args.include
		.clone()
		.or_else(
			|| args.script
				.as_deref()
				.and_then(Path::parent)
				.map(Path::to_path_buf)
		)
		.unwrap_or_else(|| PathBuf::from("."));

	let mut resolver = syntax::FsResolver::new(include_dir);
	let globals = syntax::Globals::default();

	// ----------------------------------------------------------------------------------------
	if args.print_tokens {
		let tokens = Tokenizer::new(&mut interner, &mut resolver).tokenize(&source);

		separator();
		for token in tokens.tokens.iter() {
			println!("{}", fmt::Show(token, &interner));
		}
		separator();
	}

	// ----------------------------------------------------------------------------------------
	let analysis = syntax::Analysis::analyze(&source, &mut interner, &mut resolver, &globals);

	eprint!(
		"{}",
		fmt::Show(
			&analysis.errors,
			AnalysisDisplayContext {
				max_errors: Some(MAX_ERRORS),
				interner: &interner,
			}
		)
	);

	if args.print_ast && !args.check {
		separator();
		println!(
			"{}",
			fmt::Show(
				&analysis.ast,
				syntax::ast::fmt::Context::from(&interner)
			)
		);
		separator();
	}

	if args.print_json && !args.check {
		let json = syntax::ast::json::to_json(&analysis.ast, &interner);
		println!("{:#}", json);
	}

	if analysis.errors.is_empty() {
		Ok(0)
	} else {
		Ok(2)
	}
}
