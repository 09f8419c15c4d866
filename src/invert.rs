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

use crate::filter::{FilterError, SliceDirection, SliceFilter};
use crate::plane::{FrameGeometry, PlaneMut};

/// Color negation stage: every sample of every presented plane becomes
/// its bitwise complement. Stateless and involutive.
#[derive(Debug, Default, Clone, Copy)]
pub struct Invert;

impl SliceFilter for Invert {
    fn name(&self) -> &'static str {
        "negative"
    }

    fn description(&self) -> &'static str {
        "Invert colors of the source video"
    }

    fn configure(&mut self, _geometry: FrameGeometry) -> Result<(), FilterError> {
        Ok(())
    }

    fn filter_slice(
        &mut self,
        planes: &mut [PlaneMut<'_>],
        y: usize,
        h: usize,
        _direction: SliceDirection,
    ) -> Result<(), FilterError> {
        for plane in planes.iter_mut() {
            plane.band_mut(y, h).mapv_inplace(|s| !s);
        }
        Ok(())
    }
}
