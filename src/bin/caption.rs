use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use image::{GrayImage, Luma};
use log::{info, warn};
use rusttype::{Font, GlyphId, Point, Scale};

use aribts::arib::CaptionDecoder;
use aribts::constants::{PAT_PID, TOT_PID};
use aribts::clock::ClockRecovery;
use aribts::packet::PacketReader;
use aribts::pes::PesAssembler;
use aribts::psi::parse_tot_tdt;
use aribts::render::GlyphRasterizer;
use aribts::resolver::Signaling;
use aribts::section::SectionAssembler;

/// Renders every caption unit of a service to a transparent PNG, named
/// after the reconstructed wall-clock of its presentation timestamp
#[derive(Parser)]
struct Opt {
    /// Input transport stream ("-" = standard input)
    #[clap(short, long, default_value = "-")]
    input: String,

    /// Directory receiving `YYYYMMDDHHMMSS.ffffff.png` images
    #[clap(short, long, alias = "output_path")]
    output_path: PathBuf,

    /// Service id to follow (defaults to the first program in the PAT)
    #[clap(short, long, alias = "SID")]
    sid: Option<u16>,

    /// TrueType font used for text glyphs
    #[clap(short, long)]
    font: PathBuf,
}

/// Coverage maps from a TrueType face.
struct TtfRasterizer {
    font: Font<'static>,
}

impl GlyphRasterizer for TtfRasterizer {
    fn rasterize(&mut self, text: &str, width: u32, height: u32) -> Option<GrayImage> {
        if text
            .chars()
            .all(|ch| self.font.glyph(ch).id() == GlyphId(0))
        {
            return None;
        }
        let mut image = GrayImage::new(width, height);
        let scale = Scale {
            x: height as f32,
            y: height as f32,
        };
        let ascent = self.font.v_metrics(scale).ascent;
        let start = Point { x: 0.0, y: ascent };
        for glyph in self.font.layout(text, scale, start) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, v| {
                    let x = gx as i32 + bb.min.x;
                    let y = gy as i32 + bb.min.y;
                    if (0..width as i32).contains(&x) && (0..height as i32).contains(&y) {
                        let level = (v * 255.0) as u8;
                        if level > image.get_pixel(x as u32, y as u32).0[0] {
                            image.put_pixel(x as u32, y as u32, Luma([level]));
                        }
                    }
                });
            }
        }
        Some(image)
    }
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
    let font_data = fs::read(&opt.font).with_context(|| format!("reading {}", opt.font.display()))?;
    let font = Font::try_from_vec(font_data).context("font data is not a usable TrueType face")?;
    let mut rasterizer = TtfRasterizer { font };

    let mut reader = PacketReader::new(BufReader::new(open_input(&opt.input)?));
    let mut pat_asm = SectionAssembler::new();
    let mut pmt_asm = SectionAssembler::new();
    let mut tot_asm = SectionAssembler::new();
    let mut pes_asm = PesAssembler::new();
    let mut signaling = Signaling::new(opt.sid);
    let mut clock = ClockRecovery::new();

    while let Some(packet) = reader.next_packet()? {
        let pid = packet.pid();
        if pid == PAT_PID {
            pat_asm.push(&packet);
            while let Some(section) = pat_asm.pop() {
                signaling.handle_pat(&section);
            }
        } else if pid == TOT_PID {
            tot_asm.push(&packet);
            while let Some(section) = tot_asm.pop() {
                if let Ok((_, time)) = parse_tot_tdt(&section) {
                    clock.observe_tot(time);
                }
            }
        } else if signaling.is_pmt_pid(pid) {
            pmt_asm.push(&packet);
            while let Some(section) = pmt_asm.pop() {
                signaling.handle_pmt(&section);
            }
        } else if signaling.pcr_pid == Some(pid) {
            if let Some(pcr) = packet.pcr() {
                clock.observe_pcr(pcr);
            }
        } else if signaling.subtitle_pid == Some(pid) {
            pes_asm.push(&packet);
            while let Some(unit) = pes_asm.pop() {
                if !clock.ready() {
                    continue; // no anchor yet, the unit cannot be timestamped
                }
                let Some(pts) = unit.pts() else { continue };

                let mut decoder = CaptionDecoder::new(&mut rasterizer);
                match decoder.decode(&unit) {
                    Ok(()) => {}
                    Err(e) if e.is_recoverable() => {
                        warn!("caption unit skipped: {e}");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }
                let Some(image) = decoder.compose() else {
                    continue; // nothing visible in this unit
                };
                let Some(at) = clock.wall_clock(pts) else {
                    continue;
                };
                let name = format!("{}.png", at.format("%Y%m%d%H%M%S%.6f"));
                let path = opt.output_path.join(&name);
                info!("writing {}", path.display());
                image
                    .save(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        }
    }
    Ok(())
}
