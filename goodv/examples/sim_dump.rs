//! Dump a simulated RF430FRL152H as TI-TXT.
//!
//! Usage:
//!   cargo run -p goodv --example sim_dump

use anyhow::Result;
use goodv::tag::Tag;
use goodv::test_support::SimTag;

fn main() -> Result<()> {
    env_logger::init();

    let mut sim = SimTag::frl();
    sim.fill_pattern();
    let id = sim.tag_id();

    let mut tag = Tag::new(Box::new(sim), id).connect()?;
    println!("{}", tag.describe()?);
    println!("{}", tag.dump_titxt()?);
    tag.close()?;

    Ok(())
}
