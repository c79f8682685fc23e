use goodv::test_support::{connected_sim_tag, SimTag};

#[test]
fn same_page_reads_issue_no_control_writes() {
    let mut sim = SimTag::frl_paged();
    sim.fill_pattern();

    let (mut tag, shared) = connected_sim_tag(sim).unwrap();
    assert_eq!(tag.block_len(), 4);
    assert_eq!(tag.page(), 0);

    tag.read(0xF868, 4).unwrap();
    tag.read(0xF86C, 12).unwrap();
    assert_eq!(shared.sim().control_writes(), 0);
}

#[test]
fn page_switch_happens_once_and_restores_the_bit() {
    let mut sim = SimTag::frl_paged();
    sim.fill_pattern();
    let high = sim.mem[0xFC34..0xFC38].to_vec();
    let low = sim.mem[0xF868..0xF86C].to_vec();

    let (mut tag, shared) = connected_sim_tag(sim).unwrap();

    // Crossing the page boundary costs exactly one control write.
    assert_eq!(tag.read(0xFC34, 4).unwrap(), high);
    assert_eq!(tag.page(), 1);
    assert_eq!(shared.sim().control_writes(), 1);

    // Staying on page 1 costs nothing more.
    tag.read(0xFC38, 4).unwrap();
    assert_eq!(shared.sim().control_writes(), 1);

    // Switching back costs one more and restores the original bit.
    assert_eq!(tag.read(0xF868, 4).unwrap(), low);
    assert_eq!(tag.page(), 0);
    assert_eq!(shared.sim().control_writes(), 2);
    assert_eq!(shared.sim().control, 0x02);
}

#[test]
fn page_one_wraparound_reads_the_high_half() {
    let mut sim = SimTag::frl_paged();
    sim.fill_pattern();
    let expected = sim.mem[0xFC34..0xFC44].to_vec();

    let (mut tag, _shared) = connected_sim_tag(sim).unwrap();
    // 0xFC34 maps past the block count, wrapping to page 1 block 0.
    assert_eq!(tag.read(0xFC34, 16).unwrap(), expected);
}

#[test]
fn eight_byte_mode_never_pages() {
    let mut sim = SimTag::frl();
    sim.fill_pattern();

    let (mut tag, shared) = connected_sim_tag(sim).unwrap();
    tag.read(0xFC34, 8).unwrap();
    tag.read(0xF868, 8).unwrap();
    assert_eq!(shared.sim().control_writes(), 0);
}

#[test]
fn close_resets_paged_tags_to_page_zero() {
    let mut sim = SimTag::frl_paged();
    sim.fill_pattern();

    let (mut tag, shared) = connected_sim_tag(sim).unwrap();
    tag.read(0xFC34, 4).unwrap();
    assert_eq!(tag.page(), 1);

    tag.close().unwrap();
    let sim = shared.sim();
    assert!(!sim.connected);
    // Back on page 0: the inverted page bit is set again.
    assert_eq!(sim.control & 0x02, 0x02);
}

#[test]
fn close_skips_the_reset_in_eight_byte_mode() {
    let (tag, shared) = connected_sim_tag(SimTag::frl()).unwrap();
    let baseline = shared.sim().sent.len();
    tag.close().unwrap();
    assert_eq!(shared.sim().sent.len(), baseline);
    assert!(!shared.sim().connected);
}
