use hourglass_data::Vec2;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Clone, Debug, Default)]
/// Uniform cell list over the silo used to find overlap candidates.
///
/// Implements a grid-based spatial hash using offset-indexed particle lists
/// (compressed sparse rows): `cell_offsets[i]..cell_offsets[i+1]` are the
/// slots of `particle_indices` that fall in cell `i`.
///
/// Positions outside the grid are clamped into the border cells, so particles
/// that fell through the outlet are still found by queries. Clamping is
/// monotone, which keeps every pair within the query radius in the scanned
/// cell range.
///
/// # Examples
/// ```
/// use hourglass_core::spatial_hash::SpatialHash;
/// use hourglass_data::Vec2;
///
/// let mut grid = SpatialHash::new(0.03, Vec2::new(0.0, -0.1), Vec2::new(0.3, 0.7));
/// let positions = vec![Vec2::new(0.1, 0.1), Vec2::new(0.11, 0.1), Vec2::new(0.25, 0.6)];
/// grid.build_parallel(&positions);
///
/// let mut nearby = Vec::new();
/// grid.query_into(&Vec2::new(0.1, 0.1), 0.02, &mut nearby);
/// assert!(nearby.contains(&0) && nearby.contains(&1));
/// ```
pub struct SpatialHash {
    pub cell_size: f64,
    pub origin: Vec2,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub particle_indices: Vec<usize>,
}

impl SpatialHash {
    /// Creates an empty grid covering the rectangle `min..max`.
    pub fn new(cell_size: f64, min: Vec2, max: Vec2) -> Self {
        let cols = (((max.x - min.x) / cell_size).ceil() as usize).max(1);
        let rows = (((max.y - min.y) / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            origin: min,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            particle_indices: Vec::new(),
        }
    }

    #[inline]
    fn clamp_col(&self, x: f64) -> usize {
        let cx = ((x - self.origin.x) / self.cell_size).floor() as i64;
        cx.clamp(0, self.cols as i64 - 1) as usize
    }

    #[inline]
    fn clamp_row(&self, y: f64) -> usize {
        let cy = ((y - self.origin.y) / self.cell_size).floor() as i64;
        cy.clamp(0, self.rows as i64 - 1) as usize
    }

    /// Flat cell index for a position, clamped into the grid.
    #[inline]
    pub fn get_cell_idx(&self, position: &Vec2) -> usize {
        self.clamp_row(position.y) * self.cols + self.clamp_col(position.x)
    }

    pub fn build_parallel(&mut self, positions: &[Vec2]) {
        let cell_count = self.cols * self.rows;

        let atomic_counts: Vec<AtomicUsize> =
            (0..cell_count).map(|_| AtomicUsize::new(0)).collect();
        positions.par_iter().for_each(|p| {
            atomic_counts[self.get_cell_idx(p)].fetch_add(1, AtomicOrdering::Relaxed);
        });
        let counts: Vec<usize> = atomic_counts.into_iter().map(|a| a.into_inner()).collect();

        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate() {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.particle_indices.resize(positions.len(), 0);
        let mut current_offsets = self.cell_offsets[..cell_count].to_vec();
        for (particle_idx, p) in positions.iter().enumerate() {
            let cell_idx = self.get_cell_idx(p);
            self.particle_indices[current_offsets[cell_idx]] = particle_idx;
            current_offsets[cell_idx] += 1;
        }
    }

    pub fn query_callback<F>(&self, center: &Vec2, radius: f64, mut callback: F)
    where
        F: FnMut(usize),
    {
        let (min_cx, max_cx) = (
            self.clamp_col(center.x - radius),
            self.clamp_col(center.x + radius),
        );
        let (min_cy, max_cy) = (
            self.clamp_row(center.y - radius),
            self.clamp_row(center.y + radius),
        );

        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = cy * self.cols + cx;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];
                for &particle_idx in &self.particle_indices[start..end] {
                    callback(particle_idx);
                }
            }
        }
    }

    #[inline]
    pub fn query_into(&self, center: &Vec2, radius: f64, result: &mut Vec<usize>) {
        result.clear();
        self.query_callback(center, radius, |idx| result.push(idx));
    }

    pub fn count_nearby(&self, center: &Vec2, radius: f64) -> usize {
        let mut count = 0;
        self.query_callback(center, radius, |_| count += 1);
        count
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn grid() -> SpatialHash {
        SpatialHash::new(0.05, Vec2::new(0.0, 0.0), Vec2::new(0.3, 0.7))
    }

    #[test]
    fn test_spatial_hash_query_finds_nearby() {
        let mut sh = grid();
        sh.build_parallel(&[
            Vec2::new(0.01, 0.01),
            Vec2::new(0.02, 0.02),
            Vec2::new(0.2, 0.5),
        ]);
        assert_eq!(sh.count_nearby(&Vec2::new(0.015, 0.015), 0.02), 2);
    }

    #[test]
    fn test_spatial_hash_clamps_fallen_particles() {
        let mut sh = grid();
        sh.build_parallel(&[Vec2::new(0.15, -0.5), Vec2::new(0.16, -0.5)]);
        let mut found = Vec::new();
        sh.query_into(&Vec2::new(0.15, -0.5), 0.02, &mut found);
        found.sort_unstable();
        assert_eq!(found, vec![0, 1]);
    }

    #[test]
    fn test_spatial_hash_rebuild_clears() {
        let mut sh = grid();
        sh.build_parallel(&[Vec2::new(0.01, 0.01)]);
        sh.build_parallel(&[]);
        assert_eq!(sh.count_nearby(&Vec2::new(0.01, 0.01), 1.0), 0);
    }

    #[test]
    fn test_cell_index_in_range() {
        let sh = grid();
        for p in [
            Vec2::new(-1.0, -1.0),
            Vec2::new(0.1, 0.3),
            Vec2::new(5.0, 5.0),
        ] {
            assert!(sh.get_cell_idx(&p) < sh.cols * sh.rows);
        }
    }
}
