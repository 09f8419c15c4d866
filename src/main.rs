//! Demo host for the slicefx stages.
//!
//! Stands in for a pipeline host: decodes an image, splits it into
//! planar channels, then drives one filter stage band by band the way
//! a streaming host delivers slices of a decoded frame.
//! Run with `--help` for usage.

// Copyright (C) 2026 slicefx contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Error;
use clap::{Parser, ValueEnum};
use image::io::Reader as ImageReader;
use image::save_buffer;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use sha2::{Digest, Sha256};

use slicefx::{
    FrameGeometry, Invert, PlaneMut, Puzzle, PuzzleConfig, SliceDirection, SliceFilter,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Stage {
    /// Tile-puzzle shuffle of the first plane
    Puzzle,
    /// Bitwise color inversion of all planes
    Negative,
}

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    /// Input file
    input: PathBuf,

    /// Which filter stage to apply
    #[arg(short = 'f', long, value_enum, default_value = "puzzle")]
    stage: Stage,

    /// Puzzle grid as "<xs>:<ys>" (defaults to 5:5 when absent or malformed)
    #[arg(short = 'g', long)]
    grid: Option<String>,

    /// Random seed for a reproducible puzzle layout
    #[arg(long)]
    seed: Option<String>,

    /// Rows delivered per slice call
    #[arg(long, default_value_t = 16)]
    band_height: usize,

    /// Output file
    #[arg(short = 'o', long)]
    output: PathBuf,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let im = ImageReader::new(BufReader::new(File::open(&args.input)?))
        .with_guessed_format()?
        .decode()?
        .into_rgb8();
    let width = im.width() as usize;
    let height = im.height() as usize;

    // Deinterleave into the planar layout the stages operate on.
    let mut channels: [Vec<u8>; 3] = std::array::from_fn(|_| vec![0u8; width * height]);
    for (i, px) in im.pixels().enumerate() {
        for (c, channel) in channels.iter_mut().enumerate() {
            channel[i] = px.0[c];
        }
    }

    let mut stage: Box<dyn SliceFilter> = match args.stage {
        Stage::Negative => Box::new(Invert),
        Stage::Puzzle => {
            let config = PuzzleConfig::from_args(args.grid.as_deref());
            let rng = if let Some(seed) = &args.seed {
                let mut hasher = Sha256::new();
                hasher.update(seed);
                Xoshiro256StarStar::from_seed(hasher.finalize().into())
            } else {
                Xoshiro256StarStar::from_entropy()
            };
            Box::new(Puzzle::with_rng(config, rng)?)
        }
    };

    stage.configure(FrameGeometry { width, height })?;

    // Deliver the frame top to bottom in row bands, rebuilding the
    // plane views for every call as a real host would.
    let band = args.band_height.max(1);
    let mut y = 0;
    while y < height {
        let h = band.min(height - y);
        let [r, g, b] = &mut channels;
        let mut planes = [
            PlaneMut::from_raw(r, height, width, width)?,
            PlaneMut::from_raw(g, height, width, width)?,
            PlaneMut::from_raw(b, height, width, width)?,
        ];
        stage.filter_slice(&mut planes, y, h, SliceDirection::TopDown)?;
        y += h;
    }
    stage.end_frame()?;

    // Reinterleave and save.
    let mut out = vec![0u8; width * height * 3];
    for i in 0..width * height {
        for (c, channel) in channels.iter().enumerate() {
            out[i * 3 + c] = channel[i];
        }
    }
    save_buffer(
        &args.output,
        &out,
        width as u32,
        height as u32,
        image::ColorType::Rgb8,
    )?;

    Ok(())
}
