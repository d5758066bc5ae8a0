//! Neighborhood footprints for local-maximum tests

use crate::config::{Neighborhood, NeighborhoodShape};

/// Relative (frame, bin) offsets covered by a neighborhood, excluding the center
///
/// Offsets are ordered nearest first so a dominated bin is usually rejected
/// after a handful of comparisons.
///
/// # Example
///
/// ```
/// use stratum_fingerprint::config::{Neighborhood, NeighborhoodShape};
/// use stratum_fingerprint::features::peaks::neighborhood::neighborhood_offsets;
///
/// let cross = neighborhood_offsets(Neighborhood { shape: NeighborhoodShape::Diamond, radius: 1 });
/// assert_eq!(cross.len(), 4);
/// let square = neighborhood_offsets(Neighborhood { shape: NeighborhoodShape::Square, radius: 1 });
/// assert_eq!(square.len(), 8);
/// ```
pub fn neighborhood_offsets(neighborhood: Neighborhood) -> Vec<(isize, isize)> {
    let r = neighborhood.radius as isize;
    let mut offsets = Vec::new();

    for dt in -r..=r {
        for df in -r..=r {
            if dt == 0 && df == 0 {
                continue;
            }
            let inside = match neighborhood.shape {
                NeighborhoodShape::Diamond => dt.abs() + df.abs() <= r,
                NeighborhoodShape::Square => true,
            };
            if inside {
                offsets.push((dt, df));
            }
        }
    }

    offsets.sort_by_key(|&(dt, df)| (dt.abs().max(df.abs()), dt.abs() + df.abs()));
    offsets
}
