use std::{ffi::OsString, path::PathBuf};

use clap::{clap_app, crate_authors, crate_version, crate_description};


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
	Help(Box<str>),
	Version(Box<str>),
	Run(Args)
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Args {
	/// The script path. Read from stdin if absent.
	pub script: Option<PathBuf>,
	/// Directory where includes are resolved. Defaults to the script's directory.
	pub include: Option<PathBuf>,
	/// Only report errors.
	pub check: bool,
	/// Print the tokens.
	pub print_tokens: bool,
	/// Print the AST.
	pub print_ast: bool,
	/// Print the AST as JSON.
	pub print_json: bool,
	/// Number of verbosity flags.
	pub verbosity: u64,
}


pub fn parse<A, T>(args: A) -> clap::Result<Command>
where
	A: IntoIterator<Item = T>,
	T: Into<OsString> + Clone
{
	let app = clap_app!(
		retrovm =>
			(version: crate_version!())
			(author: crate_authors!())
			(about: crate_description!())
			(@arg script: "The script to analyze, defaults to stdin")
			(@arg include: -I --include +takes_value "Directory for resolving includes")
			(@arg check: --check "Only report errors")
			(@arg tokens: --tokens "Print the tokens")
			(@arg ast: --ast "Print the AST")
			(@arg json: --json "Print the AST as JSON")
			(@arg verbose: -v ... "Increase the log verbosity")
	);

	match app.get_matches_from_safe(args) {
		Ok(matches) => Ok(
			Command::Run(
				Args {
					script: matches.value_of_os("script").map(PathBuf::from),
					include: matches.value_of_os("include").map(PathBuf::from),
					check: matches.is_present("check"),
					print_tokens: matches.is_present("tokens"),
					print_ast: matches.is_present("ast"),
					print_json: matches.is_present("json"),
					verbosity: matches.occurrences_of("verbose"),
				}
			)
		),

		Err(error) => match error.kind {
			clap::ErrorKind::HelpDisplayed => Ok(
				Command::Help(error.message.into_boxed_str())
			),
			clap::ErrorKind::VersionDisplayed => Ok(
				Command::Version(error.message.into_boxed_str())
			),
			_ => Err(error)
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;


	#[test]
	fn test_parse_args() {
		let command = parse(["retrovm", "-vv", "--ast", "-I", "lib", "game.rvm"])
			.expect("invalid arguments");

		assert_eq!(
			command,
			Command::Run(
				Args {
					script: Some("game.rvm".into()),
					include: Some("lib".into()),
					check: false,
					print_tokens: false,
					print_ast: true,
					print_json: false,
					verbosity: 2,
				}
			)
		);
	}


	#[test]
	fn test_stdin_by_default() {
		let command = parse(["retrovm", "--check"]).expect("invalid arguments");

		assert!(matches!(command, Command::Run(Args { script: None, check: true, .. })));
	}
}
