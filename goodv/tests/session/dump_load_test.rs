#[path = "../common/mod.rs"]
mod common;

use goodv::test_support::{connected_sim_tag, SimTag};
use goodv::{titxt, Error};

#[test]
fn frl_dump_covers_register_fram_and_sram() {
    let mut sim = SimTag::frl();
    sim.fill_pattern();

    let (mut tag, _shared) = connected_sim_tag(sim).unwrap();
    let dump = tag.dump_titxt().unwrap();

    assert!(dump.starts_with("@f867"));
    assert!(dump.contains("@f868"));
    assert!(dump.contains("@1c00"));
    assert!(dump.trim_end().ends_with('q'));

    let ops = titxt::parse(&dump).unwrap();
    let lens: Vec<usize> = ops
        .iter()
        .map(|op| match op {
            titxt::Op::Write { data, .. } => data.len(),
            titxt::Op::Exec { .. } => 0,
        })
        .collect();
    assert_eq!(lens, vec![1, 0xF3 * 8, 0x1000]);
}

#[test]
fn frl_dump_loads_back_losslessly() {
    let mut sim = SimTag::frl();
    sim.fill_pattern();
    let fram = sim.mem[0xF868..0x10000].to_vec();
    let sram = sim.mem[0x1C00..0x2C00].to_vec();

    let (mut tag, shared) = connected_sim_tag(sim).unwrap();
    let dump = tag.dump_titxt().unwrap();

    // Wipe the simulated tag, then restore it from the dump.
    {
        let mut sim = shared.sim_mut();
        for b in sim.mem.iter_mut() {
            *b = 0;
        }
    }
    tag.load_titxt(&dump).unwrap();

    let sim = shared.sim();
    assert_eq!(&sim.mem[0xF868..0x10000], &fram[..]);
    assert_eq!(&sim.mem[0x1C00..0x2C00], &sram[..]);
    assert_eq!(sim.control, 0x7F);
}

#[test]
fn tal_dump_covers_config_fram_rom_and_sram() {
    let mut sim = SimTag::tal();
    sim.fill_pattern();

    let (mut tag, _shared) = connected_sim_tag(sim).unwrap();
    let dump = tag.dump_titxt().unwrap();

    assert!(dump.starts_with("@1a00"));
    assert!(dump.contains("@f800"));
    assert!(dump.contains("@4400"));
    assert!(dump.contains("@1c00"));

    let ops = titxt::parse(&dump).unwrap();
    let lens: Vec<usize> = ops
        .iter()
        .map(|op| match op {
            titxt::Op::Write { data, .. } => data.len(),
            titxt::Op::Exec { .. } => 0,
        })
        .collect();
    assert_eq!(lens, vec![64, 2048, 0x2000, 0x1000]);
}

#[test]
fn generic_dump_renders_unreadable_regions_empty() {
    // A mock that answers every read with a failure status: the region
    // renders as nothing rather than partial data.
    let (mut tag, _shared) = common::fixtures::connected_mock_tag(
        common::fixtures::generic_id(),
        vec![vec![0x01]; 16],
    )
    .unwrap();

    let dump = tag.dump_titxt().unwrap();
    assert_eq!(dump, "\nq");
}

#[test]
fn load_applies_one_write_per_run() {
    let mut sim = SimTag::frl();
    sim.fill_pattern();
    let untouched = sim.mem[0xF86A..0xF870].to_vec();

    let (mut tag, shared) = connected_sim_tag(sim).unwrap();
    tag.load_titxt("@F868 AA BB q").unwrap();

    let sim = shared.sim();
    assert_eq!(&sim.mem[0xF868..0xF86A], &[0xAA, 0xBB]);
    // The rest of the block was read-modify-written, not zeroed.
    assert_eq!(&sim.mem[0xF86A..0xF870], &untouched[..]);
}

#[test]
fn load_without_terminator_writes_nothing() {
    let (mut tag, shared) = connected_sim_tag(SimTag::frl()).unwrap();
    let baseline = shared.sim().sent.len();

    match tag.load_titxt("@F868 AA BB") {
        Err(Error::TitxtFormat(_)) => {}
        other => panic!("expected TitxtFormat, got: {:?}", other),
    }
    // The document never parsed, so nothing reached the transport.
    assert_eq!(shared.sim().sent.len(), baseline);
}

#[test]
fn load_with_execute_runs_the_hook() {
    let mut sim = SimTag::frl();
    sim.fill_pattern();

    let (mut tag, shared) = connected_sim_tag(sim).unwrap();
    tag.load_titxt("@4400 x").unwrap();

    // The trigger read of the illegal block went out.
    let sim = shared.sim();
    assert!(sim.sent.contains(&vec![0x02, 0xC0, 0x07, 0xBE, 0xBA]));
}
