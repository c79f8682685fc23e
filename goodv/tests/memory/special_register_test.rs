use goodv::test_support::{connected_sim_tag, SimTag};

#[test]
fn control_register_reads_through_the_block_alias() {
    let (mut tag, shared) = connected_sim_tag(SimTag::frl()).unwrap();
    let baseline = shared.sim().sent.len();

    let data = tag.read(0xF867, 1).unwrap();
    assert_eq!(data, vec![0x7F]);

    // One read of block 0xFF, nothing through the block grid.
    let sim = shared.sim();
    assert_eq!(sim.sent.len() - baseline, 1);
    assert_eq!(sim.sent[baseline], vec![0x02, 0x20, 0xFF]);
}

#[test]
fn control_register_read_spills_into_fram() {
    let mut sim = SimTag::frl();
    sim.fill_pattern();
    let fram = sim.mem[0xF868..0xF870].to_vec();

    let (mut tag, _shared) = connected_sim_tag(sim).unwrap();
    let data = tag.read(0xF867, 9).unwrap();
    assert_eq!(data[0], 0x7F);
    assert_eq!(&data[1..], &fram[..]);
}

#[test]
fn control_register_write_rederives_geometry() {
    let (mut tag, shared) = connected_sim_tag(SimTag::frl()).unwrap();
    assert_eq!(tag.block_len(), 8);

    // Clear bit 0: 4-byte blocks; bit 1 set: page 0.
    tag.write(0xF867, &[0x02]).unwrap();
    assert_eq!(tag.block_len(), 4);
    assert_eq!(tag.page(), 0);
    assert_eq!(shared.sim().control, 0x02);

    // Subsequent block writes carry 4 data bytes.
    tag.write(0xF868, &[1, 2, 3, 4]).unwrap();
    let sim = shared.sim();
    let last = sim.sent.last().unwrap();
    assert_eq!(last, &vec![0x02, 0x21, 0x00, 1, 2, 3, 4]);
}

#[test]
fn control_register_write_carries_the_key_byte() {
    let (mut tag, shared) = connected_sim_tag(SimTag::frl()).unwrap();
    let baseline = shared.sim().sent.len();
    tag.write(0xF867, &[0x7F]).unwrap();

    let sim = shared.sim();
    // Write of [0x95, value, 0...] to block 0xFF, then the readback.
    let write = &sim.sent[baseline];
    assert_eq!(&write[..5], &[0x02, 0x21, 0xFF, 0x95, 0x7F]);
    assert_eq!(sim.sent[baseline + 1], vec![0x02, 0x20, 0xFF]);
}

#[test]
fn multibyte_write_at_the_register_spills_into_fram() {
    let mut sim = SimTag::frl();
    sim.fill_pattern();
    let untouched = sim.mem[0xF86A..0xF870].to_vec();

    let (mut tag, shared) = connected_sim_tag(sim).unwrap();
    tag.write(0xF867, &[0x7F, 0xAA, 0xBB]).unwrap();

    let sim = shared.sim();
    assert_eq!(sim.control, 0x7F);
    assert_eq!(&sim.mem[0xF868..0xF86A], &[0xAA, 0xBB]);
    // The rest of the first block was merged, not zero filled.
    assert_eq!(&sim.mem[0xF86A..0xF870], &untouched[..]);
}
