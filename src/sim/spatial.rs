//! Uniform grid hash over static obstacles
//!
//! Each obstacle is registered in every cell its box covers. A query gathers
//! the candidates from the cells under the query box, then keeps only real
//! overlaps, so callers never see false positives.

use rustc_hash::FxHashMap;

use super::geometry::Aabb;

/// Static obstacles plus their grid index
#[derive(Debug, Clone)]
pub struct ObstacleSet {
    cell_size: f32,
    obstacles: Vec<Aabb>,
    cells: FxHashMap<(i32, i32), Vec<usize>>,
}

impl ObstacleSet {
    /// Build the index for `obstacles` (order is preserved)
    pub fn new(obstacles: Vec<Aabb>, cell_size: f32) -> Self {
        let mut set = Self {
            cell_size,
            obstacles,
            cells: FxHashMap::default(),
        };
        for idx in 0..set.obstacles.len() {
            let (lo, hi) = set.cell_range(&set.obstacles[idx]);
            for ix in lo.0..=hi.0 {
                for iy in lo.1..=hi.1 {
                    set.cells.entry((ix, iy)).or_default().push(idx);
                }
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Aabb> {
        self.obstacles.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aabb> {
        self.obstacles.iter()
    }

    fn cell_key(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_size).floor() as i32,
            (y / self.cell_size).floor() as i32,
        )
    }

    fn cell_range(&self, rect: &Aabb) -> ((i32, i32), (i32, i32)) {
        (
            self.cell_key(rect.min.x, rect.min.y),
            self.cell_key(rect.max.x, rect.max.y),
        )
    }

    /// Indices of obstacles overlapping `rect`, ascending, written to `buf`.
    /// `buf` is cleared first.
    pub fn query_into(&self, rect: &Aabb, buf: &mut Vec<usize>) {
        buf.clear();
        let (lo, hi) = self.cell_range(rect);
        for ix in lo.0..=hi.0 {
            for iy in lo.1..=hi.1 {
                if let Some(ids) = self.cells.get(&(ix, iy)) {
                    buf.extend_from_slice(ids);
                }
            }
        }
        buf.sort_unstable();
        buf.dedup();
        let obstacles = &self.obstacles;
        buf.retain(|&idx| obstacles.get(idx).is_some_and(|o| o.overlaps(rect)));
    }

    pub fn query(&self, rect: &Aabb) -> Vec<usize> {
        let mut buf = Vec::new();
        self.query_into(rect, &mut buf);
        buf
    }

    /// Whether anything overlaps `rect`
    pub fn any_overlap(&self, rect: &Aabb) -> bool {
        let (lo, hi) = self.cell_range(rect);
        for ix in lo.0..=hi.0 {
            for iy in lo.1..=hi.1 {
                if let Some(ids) = self.cells.get(&(ix, iy)) {
                    if ids.iter().any(|&idx| self.obstacles[idx].overlaps(rect)) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Aabb {
        Aabb::from_min_max(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    #[test]
    fn test_query_matches_brute_force() {
        let walls: Vec<Aabb> = (0..20)
            .map(|i| {
                let x = (i * 37 % 400) as f32;
                let y = (i * 53 % 300) as f32;
                rect(x, y, x + 40.0, y + 20.0)
            })
            .collect();
        let set = ObstacleSet::new(walls.clone(), 64.0);

        for area in [
            rect(0.0, 0.0, 50.0, 50.0),
            rect(100.0, 100.0, 300.0, 120.0),
            rect(-50.0, -50.0, -1.0, -1.0),
            rect(390.0, 250.0, 460.0, 330.0),
        ] {
            let expected: Vec<usize> = walls
                .iter()
                .enumerate()
                .filter(|(_, w)| w.overlaps(&area))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(set.query(&area), expected);
            assert_eq!(set.any_overlap(&area), !expected.is_empty());
        }
    }

    #[test]
    fn test_large_obstacle_spans_cells() {
        let set = ObstacleSet::new(vec![rect(0.0, 0.0, 500.0, 10.0)], 64.0);
        assert_eq!(set.query(&rect(450.0, 5.0, 460.0, 8.0)), vec![0]);
        // No duplicate even though the area spans several shared cells
        assert_eq!(set.query(&rect(0.0, 0.0, 300.0, 10.0)), vec![0]);
    }

    #[test]
    fn test_touching_is_not_returned() {
        let set = ObstacleSet::new(vec![rect(60.0, 0.0, 80.0, 600.0)], 64.0);
        assert!(set.query(&rect(40.0, 280.0, 60.0, 300.0)).is_empty());
    }
}
