use std::fmt::Display as _;

use super::{Interner, Symbol};
use crate::{
	fmt::Display,
	term::color,
};


impl<'a> Display<'a> for Symbol {
	type Context = &'a Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		match context.resolve(*self) {
			Some(name) if *self != Self::default() => color::Fg(color::Green, name).fmt(f),
			_ => color::Fg(color::Red, "<invalid symbol>").fmt(f),
		}
	}
}
