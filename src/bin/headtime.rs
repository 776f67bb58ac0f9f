use std::fs::File;
use std::io::{self, BufReader, Read};

use anyhow::Context;
use chrono::FixedOffset;
use clap::Parser;

use aribts::clock::ClockRecovery;
use aribts::constants::{PAT_PID, TOT_PID};
use aribts::packet::PacketReader;
use aribts::psi::parse_tot_tdt;
use aribts::resolver::Signaling;
use aribts::section::SectionAssembler;

/// Prints the wall-clock time of the stream head
#[derive(Parser)]
struct Opt {
    /// Input transport stream ("-" = standard input)
    #[clap(short, long, default_value = "-")]
    input: String,

    /// Service id to follow (defaults to the first program in the PAT)
    #[clap(short, long, alias = "SID")]
    sid: Option<u16>,
}

fn open_input(path: &str) -> anyhow::Result<Box<dyn Read>> {
    Ok(if path == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(path).with_context(|| format!("opening {path}"))?)
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::parse();
    let mut reader = PacketReader::new(BufReader::new(open_input(&opt.input)?));

    let mut pat_asm = SectionAssembler::new();
    let mut pmt_asm = SectionAssembler::new();
    let mut tot_asm = SectionAssembler::new();
    let mut signaling = Signaling::new(opt.sid);
    let mut clock = ClockRecovery::new();

    while let Some(packet) = reader.next_packet()? {
        match packet.pid() {
            PAT_PID => {
                pat_asm.push(&packet);
                while let Some(section) = pat_asm.pop() {
                    signaling.handle_pat(&section);
                }
            }
            TOT_PID => {
                tot_asm.push(&packet);
                while let Some(section) = tot_asm.pop() {
                    if let Ok((_, time)) = parse_tot_tdt(&section) {
                        clock.observe_tot(time);
                    }
                }
            }
            pid if signaling.is_pmt_pid(pid) => {
                pmt_asm.push(&packet);
                while let Some(section) = pmt_asm.pop() {
                    signaling.handle_pmt(&section);
                }
            }
            pid if signaling.pcr_pid == Some(pid) => {
                if let Some(pcr) = packet.pcr() {
                    clock.observe_pcr(pcr);
                }
                if let Some(head) = clock.head_time() {
                    let jst = FixedOffset::east_opt(9 * 3600).context("offset")?;
                    let head = head
                        .and_local_timezone(jst)
                        .single()
                        .context("head time out of range")?;
                    println!("{}", head.format("%Y-%m-%d %H:%M:%S%:z"));
                    return Ok(());
                }
            }
            _ => {}
        }
    }
    anyhow::bail!("stream ended before a TOT/PCR pair anchored the clock");
}
