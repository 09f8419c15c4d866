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

use ndarray::prelude::*;
use ndarray::ShapeBuilder;

use crate::filter::FilterError;

/// Negotiated frame dimensions, supplied by the host when the stream
/// format becomes known (and again on any mid-stream change).
///
/// The host guarantees `width >= 1` and `height >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
}

/// Mutable view over one color plane of a host-owned frame buffer.
///
/// Rows are `stride` samples apart; only the first `cols` samples of
/// each row belong to the image. A view is built by the host for a
/// single slice call and dropped afterwards; filters never hold on to
/// one across calls.
pub struct PlaneMut<'a> {
    view: ArrayViewMut2<'a, u8>,
}

impl<'a> PlaneMut<'a> {
    /// Wraps a raw plane buffer. `data` must cover `rows` rows of
    /// `cols` samples spaced `stride` apart, otherwise this fails with
    /// [`FilterError::PlaneShape`].
    pub fn from_raw(
        data: &'a mut [u8],
        rows: usize,
        cols: usize,
        stride: usize,
    ) -> Result<Self, FilterError> {
        let view = ArrayViewMut2::from_shape((rows, cols).strides((stride, 1)), data)?;
        Ok(Self { view })
    }

    pub fn rows(&self) -> usize {
        self.view.nrows()
    }

    pub fn cols(&self) -> usize {
        self.view.ncols()
    }

    /// Mutable view of the row band `[y, y + h)`.
    ///
    /// Panics if the band lies outside the plane; band bounds are part
    /// of the host's delivery contract.
    pub fn band_mut(&mut self, y: usize, h: usize) -> ArrayViewMut2<'_, u8> {
        self.view.slice_mut(s![y..y + h, ..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_respects_stride_padding() {
        // 3 rows of 4 samples, stride 6: two padding bytes per row.
        let mut data = vec![1u8; 6 * 2 + 4];
        let mut plane = PlaneMut::from_raw(&mut data, 3, 4, 6).unwrap();
        assert_eq!(plane.rows(), 3);
        assert_eq!(plane.cols(), 4);

        plane.band_mut(0, 3).fill(9);
        for row in 0..2 {
            assert_eq!(&data[row * 6..row * 6 + 4], &[9, 9, 9, 9]);
            assert_eq!(&data[row * 6 + 4..row * 6 + 6], &[1, 1]);
        }
        assert_eq!(&data[12..16], &[9, 9, 9, 9]);
    }

    #[test]
    fn from_raw_rejects_short_buffer() {
        let mut data = vec![0u8; 10];
        assert!(PlaneMut::from_raw(&mut data, 4, 4, 4).is_err());
    }

    #[test]
    fn band_covers_requested_rows_only() {
        let mut data = vec![0u8; 4 * 4];
        let mut plane = PlaneMut::from_raw(&mut data, 4, 4, 4).unwrap();
        plane.band_mut(1, 2).fill(7);
        assert_eq!(&data[0..4], &[0, 0, 0, 0]);
        assert_eq!(&data[4..12], &[7; 8]);
        assert_eq!(&data[12..16], &[0, 0, 0, 0]);
    }
}
