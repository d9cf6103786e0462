use assert_matches::assert_matches;

use super::*;


fn pos(line: u32) -> SourcePos {
	SourcePos { line, column: 0, path: Symbol::default() }
}


#[test]
fn test_globals() {
	let mut interner = symbol::Interner::new();
	let frames = Frames::new(&Globals::default(), &mut interner);
	let print = interner.get("print").expect("print not interned");

	assert_matches!(
		frames.exists(print, Some(DeclKind::Function)),
		Some(FrameItem { pos: None, .. })
	);
	assert_matches!(frames.exists(print, Some(DeclKind::Var)), None);
	assert_eq!(frames.kind(), FrameKind::Program);
	assert_eq!(frames.depth(), 1);
}


#[test]
fn test_shadowing() {
	let mut interner = symbol::Interner::new();
	let mut frames = Frames::new(&Globals::empty(), &mut interner);
	let x = interner.get_or_intern("x");

	frames.add(x, DeclKind::Var, pos(1));
	frames.start(FrameKind::Function);
	let inner = frames.add(x, DeclKind::Function, pos(2));

	assert_matches!(frames.exists(x, None), Some(FrameItem { kind: DeclKind::Function, .. }));
	assert_eq!(frames.get(inner).map(|item| item.pos), Some(Some(pos(2))));

	// Filtering by kind reaches the outer declaration.
	assert_matches!(
		frames.exists(x, Some(DeclKind::Var)),
		Some(FrameItem { pos: Some(SourcePos { line: 1, .. }), .. })
	);

	assert_eq!(frames.end(), FrameKind::Function);

	assert_matches!(frames.exists(x, None), Some(FrameItem { kind: DeclKind::Var, .. }));
	assert_eq!(frames.get(inner), None);
}


#[test]
fn test_redeclaration_first_match() {
	let mut interner = symbol::Interner::new();
	let mut frames = Frames::new(&Globals::empty(), &mut interner);
	let x = interner.get_or_intern("x");

	frames.add(x, DeclKind::Var, pos(1));
	frames.add(x, DeclKind::Var, pos(2));

	assert_matches!(
		frames.exists(x, None),
		Some(FrameItem { pos: Some(SourcePos { line: 1, .. }), .. })
	);
}


#[test]
fn test_in_class() {
	let mut interner = symbol::Interner::new();
	let mut frames = Frames::new(&Globals::empty(), &mut interner);

	assert!(!frames.in_class());

	frames.start(FrameKind::Class);
	frames.start(FrameKind::Function);
	frames.start(FrameKind::If);

	assert!(frames.in_class());
	assert_eq!(frames.depth(), 4);

	frames.end();
	frames.end();
	frames.end();

	assert!(!frames.in_class());
}


#[test]
fn test_rewind_and_reset() {
	let mut interner = symbol::Interner::new();
	let mut frames = Frames::new(&Globals::default(), &mut interner);
	let x = interner.get_or_intern("x");
	let print = interner.get_or_intern("print");

	let mark = frames.mark();

	frames.start(FrameKind::While);
	frames.add(x, DeclKind::Var, pos(1));
	frames.start(FrameKind::For);

	frames.rewind(mark);

	assert_eq!(frames.mark(), mark);
	assert_eq!(frames.exists(x, None), None);

	frames.add(x, DeclKind::Var, pos(2));
	frames.start(FrameKind::Else);
	frames.reset();

	assert_eq!(frames.depth(), 1);
	assert_eq!(frames.exists(x, None), None);
	assert!(frames.exists(print, None).is_some());
}


#[test]
#[should_panic(expected = "program frame")]
fn test_end_root_frame() {
	let mut interner = symbol::Interner::new();
	let mut frames = Frames::new(&Globals::empty(), &mut interner);

	frames.end();
}
