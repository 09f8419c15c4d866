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

use rand::Rng;

/// Uniformly shuffles `arr` in place.
///
/// Iterative Fisher-Yates: for each position `i`, draw `j` uniformly
/// from `[i, len)` and swap. Every permutation of `arr` is equally
/// likely. Slices of length 0 or 1 are left untouched.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(arr: &mut [T], rng: &mut R) {
    if arr.len() <= 1 {
        return;
    }
    for i in 0..arr.len() - 1 {
        let j = rng.gen_range(i..arr.len());
        arr.swap(i, j);
    }
}

/// Produces a uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    shuffle_in_place(&mut indices, rng);
    indices
}
