use std::rc::Rc;

use assert_matches::assert_matches;

use super::*;


fn manager(capacity: usize) -> MemoryManager {
	MemoryManager::new(Config { capacity, collect_interval: 100 })
}


#[test]
fn test_exact_reuse() {
	let mut mem = manager(1024);

	let first = mem.alloc(ElementType::U8, 16, &[]).expect("out of memory");
	mem.free(first);
	let second = mem.alloc(ElementType::U8, 16, &[]).expect("out of memory");

	assert_eq!(second.offset(), first.offset());
	assert_eq!(second.len(), 16);
	assert_ne!(second, first);
	assert_eq!(mem.tracked(), 1);
}


#[test]
fn test_split_reuse() {
	let mut mem = manager(1024);

	let first = mem.alloc(ElementType::U8, 16, &[]).expect("out of memory");
	mem.alloc(ElementType::U8, 4, &[]).expect("out of memory");
	mem.free(first);

	let small = mem.alloc(ElementType::U8, 8, &[]).expect("out of memory");
	assert_eq!(small.offset(), 0);
	assert_eq!(small.len(), 8);
	assert_eq!(mem.tracked(), 3);
	assert_eq!(mem.dump().blocks[2], DumpBlock { offset: 8, len: 8, ty: ElementType::U8, active: false });

	// The remainder is reused before the high-water mark moves.
	let remainder = mem.alloc(ElementType::U8, 8, &[]).expect("out of memory");
	assert_eq!(remainder.offset(), 8);
	assert_eq!(mem.high_water(), 20);
	assert_eq!(mem.tracked(), 3);
}


#[test]
fn test_high_water_monotonicity() {
	let mut mem = manager(4096);
	let mut high_water = 0;
	let mut previous = None;

	for i in 1 ..= 12 {
		// Growing sizes, so that freed blocks are never large enough for reuse.
		let block = mem.alloc(ElementType::U16, i * 4, &[]).expect("out of memory");

		if i % 2 == 0 {
			if let Some(previous) = previous.take() {
				mem.free(previous);
			}
		}
		previous = Some(block);

		assert!(mem.high_water() >= high_water);
		high_water = mem.high_water();

		let mut active: Vec<_> = mem
			.dump()
			.blocks
			.into_iter()
			.filter(|block| block.active)
			.map(|block| (block.offset, block.offset + block.len))
			.collect();

		active.sort_unstable();
		assert!(active.windows(2).all(|pair| pair[0].1 <= pair[1].0));
	}
}


#[test]
fn test_initial_values() {
	let mut mem = manager(1024);
	let values: Vec<_> = (1 ..= 8).map(Value::U8).collect();

	let block = mem.alloc(ElementType::U8, 8, &values).expect("out of memory");
	assert_eq!(mem.view(&block).iter().collect::<Vec<_>>(), values);

	mem.free(block);

	// Reused ranges aren't zeroed, only the initial values are written.
	let block = mem.alloc(ElementType::I16, 4, &[Value::I32(-1)]).expect("out of memory");
	assert_eq!(block.offset(), 0);

	let view = mem.view(&block);

	assert_eq!(view.len(), 4);
	assert_eq!(view.get(0), Value::I16(-1));
	assert_eq!(view.get(1), Value::I16(0x0403));

	// Empty allocations are rounded up too.
	let empty = mem.alloc(ElementType::U8, 0, &[]).expect("out of memory");
	assert_eq!(empty.len(), 4);
}


#[test]
fn test_out_of_memory() {
	let mut mem = manager(64);

	mem.alloc(ElementType::U32, 16, &[]).expect("out of memory");

	assert_eq!(
		mem.alloc(ElementType::U8, 1, &[]),
		Err(OutOfMemory { requested: 4, available: 0 })
	);
}


#[test]
fn test_oversized_counts() {
	let mut mem = manager(64);

	mem.alloc(ElementType::U8, 16, &[]).expect("out of memory");

	assert_eq!(
		mem.alloc(ElementType::U8, usize::MAX, &[]),
		Err(OutOfMemory { requested: usize::MAX, available: 48 })
	);

	assert_matches!(
		mem.alloc(ElementType::F32, usize::MAX / 2, &[]),
		Err(OutOfMemory { requested: usize::MAX, .. })
	);

	assert_eq!(mem.tracked(), 1);
}


#[test]
fn test_tick_cadence() {
	let mut mem = manager(1024);

	let block = mem.alloc(ElementType::U8, 4, &[]).expect("out of memory");
	mem.alloc(ElementType::U8, 4, &[]).expect("out of memory");

	assert_eq!(mem.tick(50), None);

	mem.free(block);
	assert_eq!(mem.tracked(), 2);

	assert_eq!(mem.tick(100), Some(1));
	assert_eq!(mem.tracked(), 1);
	assert_eq!(mem.tick(150), None);
	assert_eq!(mem.tick(200), Some(0));
}


#[test]
fn test_collect_lowers_high_water() {
	let mut mem = manager(1024);

	mem.alloc(ElementType::U8, 4, &[]).expect("out of memory");
	let top = mem.alloc(ElementType::U8, 4, &[]).expect("out of memory");
	mem.free(top);

	assert_eq!(mem.high_water(), 8);
	assert_eq!(mem.collect(), 1);
	assert_eq!(mem.high_water(), 4);
}


#[test]
#[should_panic(expected = "freed memory block")]
fn test_use_after_free() {
	let mut mem = manager(1024);

	let block = mem.alloc(ElementType::U8, 4, &[]).expect("out of memory");
	mem.free(block);
	mem.view(&block);
}


#[test]
#[should_panic(expected = "freed memory block")]
fn test_stale_handle_after_reuse() {
	let mut mem = manager(1024);

	let block = mem.alloc(ElementType::U8, 4, &[]).expect("out of memory");
	mem.free(block);
	mem.alloc(ElementType::U8, 4, &[]).expect("out of memory");
	mem.free(block);
}


#[test]
fn test_typed_access() {
	let mut mem = manager(1024);
	let block = mem.alloc(ElementType::U8, 16, &[]).expect("out of memory");

	let mut view = mem.view_mut(&block);
	view.store_u32(0, 0xDEAD_BEEF, Endian::Little);
	view.store_f32(4, 1.5, Endian::Big);
	view.store_str(8, "hello world", 8);

	let view = mem.view(&block);
	assert_eq!(view.load_u8(0), 0xEF);
	assert_eq!(view.load_u32(0, Endian::Big), 0xEFBE_ADDE);
	assert_eq!(view.load_i16(2, Endian::Little), 0xDEADu16 as i16);
	assert_eq!(view.load_f32(4, Endian::Big), 1.5);
	assert_eq!(&*view.load_str(8, 8), "hello w");
	assert_eq!(view.bytes()[15], 0);

	// Block offsets are relative to the block.
	let other = mem.alloc(ElementType::U8, 4, &[Value::U8(9)]).expect("out of memory");
	assert_eq!(other.offset(), 16);
	assert_eq!(mem.view(&other).load_u8(0), 9);
}


#[test]
#[should_panic(expected = "out of bounds")]
fn test_out_of_bounds() {
	let mut mem = manager(1024);
	let block = mem.alloc(ElementType::U8, 16, &[]).expect("out of memory");

	mem.view(&block).load_u32(14, Endian::Little);
}


#[test]
fn test_fill_and_copy_within() {
	let mut mem = manager(1024);
	let block = mem.alloc(ElementType::I16, 8, &[]).expect("out of memory");

	let mut view = mem.view_mut(&block);
	view.fill(0 .. 4, Value::I32(7));
	view.set(1, Value::I16(-3));
	view.copy_within(0 .. 2, 6);

	let view = mem.view(&block);
	assert_eq!(view.get(0), Value::I16(7));
	assert_eq!(view.get(5), Value::I16(0));
	assert_eq!(view.get(6), Value::I16(7));
	assert_eq!(view.get(7), Value::I16(-3));
}


#[test]
fn test_casts() {
	assert_eq!(Value::I32(-1).cast(ElementType::U16), Value::U16(u16::MAX));
	assert_eq!(Value::F32(-1.5).cast(ElementType::U8), Value::U8(0));
	assert_eq!(Value::F32(2.75).cast(ElementType::I32), Value::I32(2));
	assert_eq!(Value::U8(7).cast(ElementType::Str), Value::from("7"));
	assert_eq!(Value::U8(7).cast(ElementType::F32), Value::F32(7.0));

	assert_eq!(ElementType::from_name("STRING"), Some(ElementType::Str));
	assert_eq!(ElementType::from_name("u64"), None);
	assert_eq!(ElementType::Str.size(), 64);
}


#[test]
fn test_bounded_stack() {
	let mut mem = manager(1024);
	let mut stack = Stack::new(&mut mem, 4, StackMode::Bounded).expect("out of memory");

	let pushed = stack.push(&mut mem, (1 ..= 5).map(Value::U8));

	assert_eq!(pushed, 4);
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::U8(4))));
	assert_eq!(stack.len(), 3);
}


#[test]
fn test_rolling_stack() {
	let mut mem = manager(1024);
	let mut stack = Stack::new(&mut mem, 4, StackMode::Rolling).expect("out of memory");

	let pushed = stack.push(&mut mem, (1 ..= 5).map(Value::U8));

	assert_eq!(pushed, 5);
	assert_eq!(stack.used(), 4);
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::U8(5))));
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::U8(4))));
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::U8(3))));
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::U8(2))));
	assert_eq!(stack.pop(&mem), None);
}


#[test]
fn test_rolling_stack_evicts_whole_items() {
	let mut mem = manager(1024);
	let mut stack = Stack::new(&mut mem, 8, StackMode::Rolling).expect("out of memory");

	stack.push(&mut mem, [Value::U32(1), Value::U16(2), Value::U16(3)]);
	stack.push(&mut mem, [Value::U8(4)]);

	// The oldest item was evicted as a whole.
	assert_eq!(stack.len(), 3);
	assert_eq!(stack.used(), 5);
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::U8(4))));
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::U16(3))));
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::U16(2))));
}


#[test]
fn test_stack_records() {
	let mut mem = manager(1024);
	let layout = Rc::new(
		Layout::new([
			("frequency", ElementType::F32),
			("volume", ElementType::U8),
			("name", ElementType::Str),
		])
	);

	assert_eq!(layout.size(), 69);
	assert_eq!(layout.fields()[2].offset, 5);

	let mut sound = Struct::new(layout.clone());
	assert!(sound.set("frequency", Value::F32(440.0)));
	assert!(sound.set("volume", Value::I32(300)));
	assert!(sound.set("name", Value::from("beep")));
	assert!(!sound.set("missing", Value::U8(0)));
	assert_eq!(sound.get("volume"), Some(&Value::U8(44)));

	let mut stack = Stack::new(&mut mem, 128, StackMode::Bounded).expect("out of memory");
	let pushed = stack.push(
		&mut mem,
		[
			Item::from(Value::I16(-2)),
			Item::from(sound.clone()),
			Item::from(Value::from("dropped")),
		]
	);

	assert_eq!(pushed, 2);
	assert_eq!(stack.pop(&mem), Some(Item::Record(sound)));
	assert_eq!(stack.pop(&mem), Some(Item::Value(Value::I16(-2))));
	assert!(stack.is_empty());

	stack.free(&mut mem);
	assert_eq!(mem.used(), 0);
}


#[test]
fn test_dump() {
	let mut mem = manager(1024);

	let block = mem.alloc(ElementType::U16, 2, &[]).expect("out of memory");
	mem.alloc(ElementType::Str, 1, &[]).expect("out of memory");
	mem.free(block);

	let dump = serde_json::to_value(mem.dump()).expect("failed to serialize dump");

	assert_eq!(dump["capacity"], 1024);
	assert_eq!(dump["high_water"], 264);
	assert_eq!(dump["used"], 256);
	assert_matches!(dump["blocks"].as_array(), Some(blocks) if blocks.len() == 2);
	assert_eq!(dump["blocks"][0]["ty"], "u16");
	assert_eq!(dump["blocks"][0]["active"], false);
	assert_eq!(dump["blocks"][1]["ty"], "str");
}
