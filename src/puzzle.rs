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

use std::str::FromStr;

use ndarray::ArrayViewMut1;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use thiserror::Error;
use tracing::{debug, warn};

use crate::filter::{FilterError, SliceDirection, SliceFilter};
use crate::plane::{FrameGeometry, PlaneMut};
use crate::shuffle::shuffle_in_place;

/// Grid dimensions of the puzzle: `xs` columns by `ys` rows of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleConfig {
    pub xs: usize,
    pub ys: usize,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self { xs: 5, ys: 5 }
    }
}

/// The argument string did not hold two positive integers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected \"<xs>:<ys>\" with two positive integers, got {0:?}")]
pub struct ConfigParseError(String);

impl FromStr for PuzzleConfig {
    type Err = ConfigParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ConfigParseError(s.to_owned());
        let (xs, ys) = s.split_once(':').ok_or_else(err)?;
        let xs: usize = xs.trim().parse().map_err(|_| err())?;
        let ys: usize = ys.trim().parse().map_err(|_| err())?;
        if xs == 0 || ys == 0 {
            return Err(err());
        }
        Ok(Self { xs, ys })
    }
}

impl PuzzleConfig {
    /// Parses an optional `"<xs>:<ys>"` argument string. An absent or
    /// malformed argument falls back to the default 5x5 grid rather
    /// than failing; stage construction never aborts over it.
    pub fn from_args(args: Option<&str>) -> Self {
        match args {
            None => Self::default(),
            Some(s) => s.parse().unwrap_or_else(|err| {
                warn!(%err, "falling back to the default puzzle grid");
                Self::default()
            }),
        }
    }
}

/// Tile-shuffling stage.
///
/// Holds one pseudorandom permutation per grid axis. Both are rebuilt
/// from the stage's generator every time the host (re)configures the
/// frame geometry, so each stream start gets a fresh layout while a
/// fixed generator seed reproduces the same one. Only the column
/// permutation drives the slice transform; the row permutation is kept
/// as part of the layout state and exposed read-only.
pub struct Puzzle {
    xs: usize,
    ys: usize,
    xoffsets: Vec<usize>,
    yoffsets: Vec<usize>,
    rng: Xoshiro256StarStar,
    ready: bool,
}

fn identity_vec(n: usize) -> Result<Vec<usize>, FilterError> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)?;
    v.extend(0..n);
    Ok(v)
}

/// Element-wise exchange of two equally long runs within one row.
/// A true swap with a local temporary per element; the runs end up
/// holding each other's original contents even when they alias.
fn swap_run(row: &mut ArrayViewMut1<'_, u8>, src: usize, dst: usize, len: usize) {
    for k in 0..len {
        row.swap(src + k, dst + k);
    }
}

impl Puzzle {
    /// Creates a stage with an entropy-seeded generator.
    pub fn new(config: PuzzleConfig) -> Result<Self, FilterError> {
        Self::with_rng(config, Xoshiro256StarStar::from_entropy())
    }

    /// Creates a stage with a caller-supplied generator, for
    /// reproducible layouts.
    pub fn with_rng(config: PuzzleConfig, rng: Xoshiro256StarStar) -> Result<Self, FilterError> {
        Ok(Self {
            xs: config.xs,
            ys: config.ys,
            xoffsets: identity_vec(config.xs)?,
            yoffsets: identity_vec(config.ys)?,
            rng,
            ready: false,
        })
    }

    /// Column permutation of the current layout.
    pub fn xoffsets(&self) -> &[usize] {
        &self.xoffsets
    }

    /// Row permutation of the current layout.
    pub fn yoffsets(&self) -> &[usize] {
        &self.yoffsets
    }
}

impl SliceFilter for Puzzle {
    fn name(&self) -> &'static str {
        "puzzle"
    }

    fn description(&self) -> &'static str {
        "Scramble the video into a tile puzzle"
    }

    fn configure(&mut self, geometry: FrameGeometry) -> Result<(), FilterError> {
        for (i, v) in self.yoffsets.iter_mut().enumerate() {
            *v = i;
        }
        for (i, v) in self.xoffsets.iter_mut().enumerate() {
            *v = i;
        }
        shuffle_in_place(&mut self.yoffsets, &mut self.rng);
        shuffle_in_place(&mut self.xoffsets, &mut self.rng);
        self.ready = true;
        debug!(
            width = geometry.width,
            height = geometry.height,
            xs = self.xs,
            ys = self.ys,
            "rebuilt puzzle layout"
        );
        Ok(())
    }

    fn filter_slice(
        &mut self,
        planes: &mut [PlaneMut<'_>],
        y: usize,
        h: usize,
        _direction: SliceDirection,
    ) -> Result<(), FilterError> {
        debug_assert!(self.ready, "puzzle slice before geometry configuration");

        // Only the first plane is scrambled; chroma and alpha pass
        // through untouched.
        let Some(plane) = planes.first_mut() else {
            return Ok(());
        };

        let block = plane.cols() / self.xs;
        if block == 0 {
            // Grid wider than the plane: nothing to do for this frame.
            return Ok(());
        }

        let mut band = plane.band_mut(y, h);
        for mut row in band.rows_mut() {
            for item in 0..self.xs {
                let src = block * item;
                let dst = block * self.xoffsets[item];
                // The last sample of each run stays put so the divider
                // column keeps its width.
                swap_run(&mut row, src, dst, block - 1);
                row[src] = u8::MAX;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(seq: &[usize]) -> bool {
        let mut seen = vec![false; seq.len()];
        for &v in seq {
            if v >= seq.len() || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }

    fn configured(xs: usize, ys: usize, seed: u64) -> Puzzle {
        let mut p = Puzzle::with_rng(
            PuzzleConfig { xs, ys },
            Xoshiro256StarStar::seed_from_u64(seed),
        )
        .unwrap();
        p.configure(FrameGeometry {
            width: 640,
            height: 480,
        })
        .unwrap();
        p
    }

    fn run_slice(p: &mut Puzzle, data: &mut [u8], rows: usize, cols: usize) {
        let mut planes = [PlaneMut::from_raw(data, rows, cols, cols).unwrap()];
        p.filter_slice(&mut planes, 0, rows, SliceDirection::TopDown)
            .unwrap();
    }

    #[test]
    fn config_parses_grid_argument() {
        assert_eq!(
            "3:4".parse::<PuzzleConfig>().unwrap(),
            PuzzleConfig { xs: 3, ys: 4 }
        );
        assert_eq!(
            " 7 : 2 ".parse::<PuzzleConfig>().unwrap(),
            PuzzleConfig { xs: 7, ys: 2 }
        );
        assert!("".parse::<PuzzleConfig>().is_err());
        assert!("3".parse::<PuzzleConfig>().is_err());
        assert!("a:b".parse::<PuzzleConfig>().is_err());
        assert!("0:4".parse::<PuzzleConfig>().is_err());
    }

    #[test]
    fn config_falls_back_to_default() {
        let default = PuzzleConfig { xs: 5, ys: 5 };
        assert_eq!(PuzzleConfig::from_args(None), default);
        assert_eq!(PuzzleConfig::from_args(Some("")), default);
        assert_eq!(PuzzleConfig::from_args(Some("banana")), default);
        assert_eq!(
            PuzzleConfig::from_args(Some("3:4")),
            PuzzleConfig { xs: 3, ys: 4 }
        );
    }

    #[test]
    fn configure_builds_valid_permutations() {
        for (xs, ys) in [(1, 1), (2, 3), (5, 5), (16, 9), (97, 41)] {
            let p = configured(xs, ys, 7);
            assert_eq!(p.xoffsets().len(), xs);
            assert_eq!(p.yoffsets().len(), ys);
            assert!(is_permutation(p.xoffsets()));
            assert!(is_permutation(p.yoffsets()));
        }
    }

    #[test]
    fn reconfigure_keeps_permutations_valid() {
        let mut p = configured(8, 8, 11);
        p.configure(FrameGeometry {
            width: 1920,
            height: 1080,
        })
        .unwrap();
        assert!(is_permutation(p.xoffsets()));
        assert!(is_permutation(p.yoffsets()));
    }

    #[test]
    fn deterministic_under_fixed_seed() {
        let a = configured(12, 7, 42);
        let b = configured(12, 7, 42);
        assert_eq!(a.xoffsets(), b.xoffsets());
        assert_eq!(a.yoffsets(), b.yoffsets());
    }

    #[test]
    fn swap_run_is_a_true_exchange() {
        let mut data = [1u8, 2, 3, 4, 5, 6];
        let mut row = ArrayViewMut1::from(&mut data[..]);
        swap_run(&mut row, 0, 3, 3);
        assert_eq!(data, [4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn swap_run_self_target_is_identity() {
        let mut data = [1u8, 2, 3, 4];
        let mut row = ArrayViewMut1::from(&mut data[..]);
        swap_run(&mut row, 1, 1, 3);
        assert_eq!(data, [1, 2, 3, 4]);
    }

    #[test]
    fn two_block_pass_matches_sequential_exchange() {
        // xs = 2 over an 8-wide plane, layout [1, 0]. Item 0 swaps the
        // blocks, item 1 swaps them back, so the net result is the
        // original row with item 1's marker carrying item 0's swapped-in
        // divider: only the second block start shows the marker.
        let mut p = configured(2, 1, 0);
        p.xoffsets.copy_from_slice(&[1, 0]);

        let mut data = vec![10u8, 11, 12, 13, 20, 21, 22, 23];
        run_slice(&mut p, &mut data, 1, 8);
        assert_eq!(data, [10, 11, 12, 13, 255, 21, 22, 23]);
    }

    #[test]
    fn identity_layout_leaves_content_and_draws_dividers() {
        let mut p = configured(2, 1, 0);
        p.xoffsets.copy_from_slice(&[0, 1]);

        let original: Vec<u8> = (0..3 * 8).map(|v| v as u8).collect();
        let mut data = original.clone();
        run_slice(&mut p, &mut data, 3, 8);

        let block = 8 / 2;
        for row in 0..3 {
            for col in 0..8 {
                let idx = row * 8 + col;
                if col % block == 0 {
                    // Marker at the first sample of every block.
                    assert_eq!(data[idx], u8::MAX);
                } else {
                    assert_eq!(data[idx], original[idx]);
                }
            }
        }
    }

    #[test]
    fn right_edge_remainder_is_untouched() {
        // Width 10 with xs = 3: block = 3, one trailing column spare.
        let mut p = configured(3, 1, 5);
        p.xoffsets.copy_from_slice(&[0, 1, 2]);

        let original: Vec<u8> = (0..2 * 10).map(|v| v as u8).collect();
        let mut data = original.clone();
        run_slice(&mut p, &mut data, 2, 10);

        for row in 0..2 {
            assert_eq!(data[row * 10 + 9], original[row * 10 + 9]);
        }
    }

    #[test]
    fn degenerate_grid_is_a_no_op() {
        let mut p = configured(9, 9, 13);
        let original: Vec<u8> = (0..4 * 4).map(|v| v as u8).collect();
        let mut data = original.clone();
        run_slice(&mut p, &mut data, 4, 4);
        assert_eq!(data, original);
    }

    #[test]
    fn chroma_planes_pass_through() {
        let mut p = configured(2, 2, 3);
        let mut luma = vec![0u8; 4 * 8];
        let mut chroma = vec![128u8; 4 * 8];
        let mut planes = [
            PlaneMut::from_raw(&mut luma, 4, 8, 8).unwrap(),
            PlaneMut::from_raw(&mut chroma, 4, 8, 8).unwrap(),
        ];
        p.filter_slice(&mut planes, 0, 4, SliceDirection::TopDown)
            .unwrap();
        assert!(chroma.iter().all(|&s| s == 128));
    }
}
