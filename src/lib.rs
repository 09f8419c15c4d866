//! Per-slice video frame transforms.
//!
//! This crate implements two in-place transform stages for a streaming
//! video pipeline, applied once per decoded frame:
//!
//! * [`Invert`] maps every sample of every plane to its bitwise
//!   complement.
//! * [`Puzzle`] permutes fixed-width column blocks of the first plane,
//!   using a pseudorandom block layout that is rebuilt whenever the
//!   frame geometry is (re)configured.
//!
//! The host pipeline owns the frame buffers and the filter graph; each
//! stage only sees borrowed [`PlaneMut`] views and a horizontal row band
//! per call, delivered top to bottom until the frame is complete. Both
//! stages implement the [`SliceFilter`] contract the host drives.

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
//

mod filter;
mod invert;
mod plane;
mod puzzle;
mod shuffle;

pub use crate::filter::{FilterError, SliceDirection, SliceFilter};
pub use crate::invert::Invert;
pub use crate::plane::{FrameGeometry, PlaneMut};
pub use crate::puzzle::{ConfigParseError, Puzzle, PuzzleConfig};
pub use crate::shuffle::{random_permutation, shuffle_in_place};
