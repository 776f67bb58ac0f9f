use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use anyhow::Context;
use clap::Parser;

use aribts::constants::{NIT_PID, PAT_PID};
use aribts::packet::PacketReader;
use aribts::psi::parse_pat;
use aribts::rewrite::{Repacketizer, strip_pmt_subtitles};
use aribts::section::SectionAssembler;

/// Passes a transport stream through with every PMT rewritten so caption
/// elementary streams lose their descriptors (`ES_info_length = 0`); all
/// other packets are copied unchanged
#[derive(Parser)]
struct Opt {
    /// Input transport stream ("-" = standard input)
    #[clap(short, long, default_value = "-")]
    input: String,

    /// Output transport stream ("-" = standard output)
    #[clap(short, long, default_value = "-")]
    output: String,

    /// Only rewrite the PMT of this service (default: every program)
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

fn open_output(path: &str) -> anyhow::Result<Box<dyn Write>> {
    Ok(if path == "-" {
        Box::new(io::stdout().lock())
    } else {
        Box::new(File::create(path).with_context(|| format!("creating {path}"))?)
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::parse();
    let mut reader = PacketReader::new(BufReader::new(open_input(&opt.input)?));
    let mut out = BufWriter::new(open_output(&opt.output)?);

    let mut pat_asm = SectionAssembler::new();
    let mut pmt_asms: HashMap<u16, SectionAssembler> = HashMap::new();
    let mut repacketizer = Repacketizer::new();

    while let Some(packet) = reader.next_packet()? {
        let pid = packet.pid();
        if pid == PAT_PID {
            pat_asm.push(&packet);
            while let Some(section) = pat_asm.pop() {
                let Ok(pat) = parse_pat(&section) else {
                    continue;
                };
                for entry in &pat.programs {
                    let selected = opt.sid.is_none() || opt.sid == Some(entry.program_number);
                    if selected && entry.pmt_pid != NIT_PID {
                        pmt_asms.entry(entry.pmt_pid).or_default();
                    }
                }
            }
            out.write_all(packet.bytes())?;
        } else if let Some(asm) = pmt_asms.get_mut(&pid) {
            asm.push(&packet);
            while let Some(section) = asm.pop() {
                let stripped = strip_pmt_subtitles(&section);
                for frame in repacketizer.packetize(&packet, &stripped) {
                    out.write_all(frame.bytes())?;
                }
            }
        } else {
            out.write_all(packet.bytes())?;
        }
    }

    out.flush()?;
    Ok(())
}
