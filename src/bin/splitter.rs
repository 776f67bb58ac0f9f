use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};

use anyhow::Context;
use clap::Parser;

use aribts::constants::PAT_PID;
use aribts::packet::PacketReader;
use aribts::resolver::Signaling;
use aribts::rewrite::{Repacketizer, filter_pat};
use aribts::section::SectionAssembler;

/// Emits a transport stream reduced to one program: a rewritten
/// single-entry PAT, the original PMT, every PID the PMT references, and
/// any extra PIDs given on the command line
#[derive(Parser)]
struct Opt {
    /// Input transport stream ("-" = standard input)
    #[clap(short, long, default_value = "-")]
    input: String,

    /// Output transport stream ("-" = standard output)
    #[clap(short, long, default_value = "-")]
    output: String,

    /// Service id to keep
    #[clap(short, long, alias = "SID")]
    sid: u16,

    /// Extra PIDs passed through unchanged
    #[clap(short, long, alias = "PID")]
    pid: Vec<u16>,
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
    let mut pmt_asm = SectionAssembler::new();
    let mut signaling = Signaling::new(Some(opt.sid));
    let mut repacketizer = Repacketizer::new();

    while let Some(packet) = reader.next_packet()? {
        let pid = packet.pid();
        if pid == PAT_PID {
            pat_asm.push(&packet);
            while let Some(section) = pat_asm.pop() {
                signaling.handle_pat(&section);
                let filtered = filter_pat(&section, opt.sid);
                for frame in repacketizer.packetize(&packet, &filtered) {
                    out.write_all(frame.bytes())?;
                }
            }
        } else if signaling.is_pmt_pid(pid) {
            pmt_asm.push(&packet);
            while let Some(section) = pmt_asm.pop() {
                signaling.handle_pmt(&section);
            }
            out.write_all(packet.bytes())?;
        } else if signaling.referenced_pids.contains(&pid) || opt.pid.contains(&pid) {
            out.write_all(packet.bytes())?;
        }
    }

    out.flush()?;
    Ok(())
}
