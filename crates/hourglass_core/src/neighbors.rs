//! Overlap-neighbour detection.
//!
//! Both strategies return, for every particle, the ascending list of other
//! particles whose circles overlap it at the current positions. The grid only
//! prunes candidates, so its sets are identical to the naive ones.

use crate::geometry::overlap;
use crate::spatial_hash::SpatialHash;
use hourglass_data::{Particle, Vec2};
use rayon::prelude::*;

/// Maps `0..len` through `f`, on the rayon pool when `parallel` is set.
/// Output order is index order either way.
pub(crate) fn collect_indexed<T, F>(len: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}

#[inline]
fn in_contact(a: &Particle, b: &Particle) -> bool {
    overlap(&a.position, &b.position, a.radius(), b.radius()) > 0.0
}

/// O(n²) pairwise scan.
pub fn naive_neighbor_sets(particles: &[Particle], parallel: bool) -> Vec<Vec<usize>> {
    collect_indexed(particles.len(), parallel, |i| {
        let me = &particles[i];
        particles
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != i && in_contact(me, other))
            .map(|(j, _)| j)
            .collect()
    })
}

/// Cell-list scan. Rebuilds `grid` from the current positions.
pub fn grid_neighbor_sets(
    particles: &[Particle],
    grid: &mut SpatialHash,
    max_radius: f64,
    parallel: bool,
) -> Vec<Vec<usize>> {
    let positions: Vec<Vec2> = particles.iter().map(|p| p.position).collect();
    grid.build_parallel(&positions);
    let grid = &*grid;

    collect_indexed(particles.len(), parallel, |i| {
        let me = &particles[i];
        let mut found = Vec::new();
        grid.query_callback(&me.position, me.radius() + max_radius, |j| {
            if j != i && in_contact(me, &particles[j]) {
                found.push(j);
            }
        });
        found.sort_unstable();
        found
    })
}

/// Largest radius in the population, zero when empty.
pub fn max_radius(particles: &[Particle]) -> f64 {
    particles.iter().map(Particle::radius).fold(0.0, f64::max)
}
