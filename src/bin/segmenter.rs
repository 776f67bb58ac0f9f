use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use log::info;

use aribts::constants::{EIT_PF_ACTUAL_TABLE_ID, EIT_PID};
use aribts::packet::PacketReader;
use aribts::psi::parse_eit_pf;
use aribts::section::SectionAssembler;

/// Splits a transport stream into one file per EIT-present event
#[derive(Parser)]
struct Opt {
    /// Input transport stream ("-" = standard input)
    #[clap(short, long, default_value = "-")]
    input: String,

    /// Directory receiving the `YYYYMMDDHHMMSS.ts` segments
    #[clap(short, long, alias = "output_path")]
    output_path: PathBuf,

    /// Service id to follow
    #[clap(short, long, alias = "SID")]
    sid: u16,
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
    fs::create_dir_all(&opt.output_path)
        .with_context(|| format!("creating {}", opt.output_path.display()))?;
    let mut reader = PacketReader::new(BufReader::new(open_input(&opt.input)?));

    let mut eit_asm = SectionAssembler::new();
    let mut current: Option<NaiveDateTime> = None;
    let mut segment: Option<BufWriter<File>> = None;

    while let Some(packet) = reader.next_packet()? {
        if packet.pid() == EIT_PID {
            eit_asm.push(&packet);
            while let Some(section) = eit_asm.pop() {
                if section.table_id() != EIT_PF_ACTUAL_TABLE_ID {
                    continue;
                }
                let Ok((_, eit)) = parse_eit_pf(&section) else {
                    continue;
                };
                if eit.section_number != 0 || eit.service_id != opt.sid {
                    continue;
                }
                let Some(start_time) = eit.start_time else {
                    continue;
                };
                // a new present event opens the next segment
                if current != Some(start_time) {
                    current = Some(start_time);
                    if let Some(mut old) = segment.take() {
                        old.flush()?;
                    }
                    let name = format!("{}.ts", start_time.format("%Y%m%d%H%M%S"));
                    let path = opt.output_path.join(name);
                    info!("segment boundary at {start_time}, writing {}", path.display());
                    segment = Some(BufWriter::new(
                        File::create(&path).with_context(|| format!("creating {}", path.display()))?,
                    ));
                }
            }
        }
        if let Some(out) = segment.as_mut() {
            out.write_all(packet.bytes())?;
        }
    }

    if let Some(mut out) = segment.take() {
        out.flush()?;
    }
    Ok(())
}
