//! Breadth-first sector search

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::core::types::SectorId;
use crate::presence::galaxy::SectorGraph;

/// Every sector reachable from `start` in at most `max_jumps` warps
///
/// Returned in BFS order with hop distance. Each sector appears once.
/// Sectors at exactly `max_jumps` are included but not expanded; sectors
/// missing from the graph are included but have no exits.
pub fn sectors_within(graph: &impl SectorGraph, start: SectorId, max_jumps: u32) -> Vec<(SectorId, u32)> {
    let mut found = Vec::new();
    let mut visited = AHashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(start);
    queue.push_back((start, 0));

    while let Some((sector_id, distance)) = queue.pop_front() {
        found.push((sector_id, distance));

        if distance >= max_jumps {
            continue;
        }
        let Some(sector) = graph.sector(sector_id) else {
            continue;
        };
        for &warp in &sector.warps {
            if visited.insert(warp) {
                queue.push_back((warp, distance + 1));
            }
        }
    }

    tracing::debug!(%start, max_jumps, visited = found.len(), "Sector search");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::galaxy::Galaxy;

    fn ring(n: u32) -> Galaxy {
        let mut galaxy = Galaxy::new();
        for i in 0..n {
            galaxy.connect(SectorId(i), SectorId((i + 1) % n));
        }
        galaxy
    }

    #[test]
    fn test_zero_jumps_is_just_start() {
        assert_eq!(sectors_within(&ring(5), SectorId(0), 0), vec![(SectorId(0), 0)]);
    }

    #[test]
    fn test_ring_visits_each_sector_once() {
        let found = sectors_within(&ring(6), SectorId(0), 10);
        assert_eq!(found.len(), 6);
        let far = found.iter().find(|(s, _)| *s == SectorId(3)).unwrap();
        assert_eq!(far.1, 3);
    }

    #[test]
    fn test_respects_radius() {
        let found = sectors_within(&ring(10), SectorId(0), 2);
        let ids: Vec<u32> = found.iter().map(|(s, _)| s.0).collect();
        assert_eq!(found.len(), 5);
        assert!(ids.contains(&8) && ids.contains(&2));
        assert!(found.iter().all(|(_, d)| *d <= 2));
    }

    #[test]
    fn test_unknown_start_is_still_reported() {
        let found = sectors_within(&Galaxy::new(), SectorId(42), 3);
        assert_eq!(found, vec![(SectorId(42), 0)]);
    }
}
