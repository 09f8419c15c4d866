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

use std::collections::TryReserveError;

use thiserror::Error;

use crate::plane::{FrameGeometry, PlaneMut};

/// Errors a filter stage can surface to the host.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Storage for the permutation state could not be obtained.
    /// Fatal; stage construction aborts.
    #[error("permutation storage allocation failed")]
    Allocation(#[from] TryReserveError),

    /// A host-provided buffer, stride and extent combination does not
    /// describe a valid plane view.
    #[error("invalid plane shape: {0}")]
    PlaneShape(#[from] ndarray::ShapeError),
}

/// Delivery direction hint passed along with each row band.
///
/// Present for host compatibility; the stages in this crate behave
/// identically either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceDirection {
    TopDown,
    BottomUp,
}

/// Contract between the pipeline host and one transform stage.
///
/// The host calls [`configure`](Self::configure) once per stream
/// geometry change, then [`filter_slice`](Self::filter_slice) for each
/// contiguous row band of a frame in delivery order, and
/// [`end_frame`](Self::end_frame) when the frame is complete. Calls
/// are serialized per instance; a stage holds no locks and never
/// retains the plane views it is handed.
pub trait SliceFilter {
    /// Stage name, consumed by the host's graph builder.
    fn name(&self) -> &'static str;

    /// Human-readable description of the stage.
    fn description(&self) -> &'static str;

    /// Geometry callback: the negotiated frame size is known or has
    /// changed. On failure the stage keeps its previous valid state.
    fn configure(&mut self, geometry: FrameGeometry) -> Result<(), FilterError>;

    /// Transforms the row band `[y, y + h)` in place. The band is
    /// fully processed before this returns; partial completion does
    /// not exist at this layer.
    fn filter_slice(
        &mut self,
        planes: &mut [PlaneMut<'_>],
        y: usize,
        h: usize,
        direction: SliceDirection,
    ) -> Result<(), FilterError>;

    /// Frame boundary: all bands of the current frame were delivered.
    /// Stages here buffer nothing, so the default is an acknowledgment.
    fn end_frame(&mut self) -> Result<(), FilterError> {
        Ok(())
    }
}
