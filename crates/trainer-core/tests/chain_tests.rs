//! Pointer chain resolution against realistic layouts.

use trainer_core::process::{MockProcess, MockProcessProvider};
use trainer_core::{GameRegistry, GameSession, MemoryAccessor, PointerWidth};

const BASE: u64 = 0x400000;

/// Lay out `offsets` so that hop `i` dereferences into `nodes[i]`, with `value`
/// stored at the final address. Returns the process and the final address.
fn build_chain(offsets: &[u64], nodes: &[u64], value: i32) -> (MockProcess, u64) {
    assert_eq!(nodes.len() + 1, offsets.len());

    let mut builder = MockProcess::builder().base(BASE).with_size(0x1000);
    let mut address = BASE + offsets[0];
    for (node, offset) in nodes.iter().zip(&offsets[1..]) {
        builder = builder.write_u32((address - BASE) as usize, *node as u32);
        address = node + offset;
    }
    builder = builder.write_i32((address - BASE) as usize, value);
    (builder.build(), address)
}

fn flatout_nodes() -> Vec<u64> {
    (0..7).map(|i| 0x900000 + i * 0x1000).collect()
}

#[test]
fn test_builtin_flatout_chain_resolves_through_eight_hops() {
    let registry = GameRegistry::builtin();
    let game = registry.get("FlatOut 2").unwrap();
    let money = game.feature("money").unwrap();

    let (process, final_address) = build_chain(&money.offsets, &flatout_nodes(), 25_000);
    let accessor = MemoryAccessor::from_process(process, &game.process_name, game.pointer_width);

    assert_eq!(accessor.resolve_chain(&money.offsets), Some(final_address));
    assert_eq!(final_address, 0x906000 + 0xE58);
    assert_eq!(accessor.read_int(&money.offsets), Some(25_000));
}

#[test]
fn test_builtin_flatout_apply_money() {
    let registry = GameRegistry::builtin();
    let game = registry.get("FlatOut 2").unwrap();
    let offsets = game.feature("money").unwrap().offsets.clone();

    let (process, final_address) = build_chain(&offsets, &flatout_nodes(), 1000);
    let provider = MockProcessProvider::new();
    provider.spawn("FLATOUT2.EXE", process.clone());

    let session = GameSession::attach(&provider, game).unwrap();
    assert_eq!(session.apply_feature("money").map(|a| a.value), Ok(1_501_000));
    assert_eq!(process.peek_i32(final_address), Some(1_501_000));
}

#[test]
fn test_pointer_update_between_calls_is_followed() {
    use trainer_core::WriteMemory;

    let offsets = [0x10, 0x4, 0x8];
    let (process, first_address) = build_chain(&offsets, &[0x400100, 0x400200], 10);
    let accessor = MemoryAccessor::from_process(process.clone(), "Game.exe", PointerWidth::X86);
    assert_eq!(accessor.resolve_chain(&offsets), Some(first_address));
    assert_eq!(accessor.read_int(&offsets), Some(10));

    // Game reallocates: second-level pointer now targets a new block
    process.write_bytes(0x400280 + 0x8, &99i32.to_le_bytes()).unwrap();
    process.write_bytes(0x400104, &0x400280u32.to_le_bytes()).unwrap();

    assert_eq!(accessor.resolve_chain(&offsets), Some(0x400288));
    assert_eq!(accessor.read_int(&offsets), Some(99));
}
