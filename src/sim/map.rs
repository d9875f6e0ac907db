//! Arena bounds and the sparse spatial map
//!
//! The map is the only record of what is where. It keeps an insertion-ordered
//! index next to the hash lookup so that enumerating robots is deterministic.

use std::collections::HashMap;

use rand::Rng;

use super::state::{Coord, EntityKind};

/// The playable interior; walls sit on row 0, row `rows + 1`, column 0 and column `cols + 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub rows: i32,
    pub cols: i32,
}

impl Arena {
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Whether `coord` is a playable interior cell
    pub fn contains(&self, coord: Coord) -> bool {
        (1..=self.rows).contains(&coord.row) && (1..=self.cols).contains(&coord.col)
    }

    /// Whether `coord` is at least `margin` cells away from every wall
    pub fn contains_with_margin(&self, coord: Coord, margin: i32) -> bool {
        (1 + margin..=self.rows - margin).contains(&coord.row)
            && (1 + margin..=self.cols - margin).contains(&coord.col)
    }

    pub fn center(&self) -> Coord {
        Coord::new((self.rows + 1) / 2, (self.cols + 1) / 2)
    }

    /// Minimum per-axis teleport distance
    pub fn teleport_span(&self) -> (i32, i32) {
        (self.rows / 3, self.cols / 3)
    }

    /// Uniformly random interior cell at least `margin` from the walls
    pub fn random_cell<R: Rng>(&self, rng: &mut R, margin: i32) -> Option<Coord> {
        let (rows, cols) = (1 + margin..=self.rows - margin, 1 + margin..=self.cols - margin);
        if rows.is_empty() || cols.is_empty() {
            return None;
        }
        Some(Coord::new(rng.random_range(rows), rng.random_range(cols)))
    }

    /// All interior cells at least `margin` from the walls, row-major
    pub fn cells(&self, margin: i32) -> Vec<Coord> {
        let mut cells = Vec::new();
        for row in 1 + margin..=self.rows - margin {
            for col in 1 + margin..=self.cols - margin {
                cells.push(Coord::new(row, col));
            }
        }
        cells
    }

    /// Border cells, row-major
    pub fn wall_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::new();
        for row in 0..=self.rows + 1 {
            for col in 0..=self.cols + 1 {
                let coord = Coord::new(row, col);
                if !self.contains(coord) {
                    cells.push(coord);
                }
            }
        }
        cells
    }
}

/// Coordinate -> occupant, at most one occupant per cell
#[derive(Debug, Clone, Default)]
pub struct SpatialMap {
    cells: HashMap<Coord, EntityKind>,
    /// Occupied coordinates in first-placement order
    order: Vec<Coord>,
    /// Cells changed since the last `take_dirty`
    dirty: Vec<Coord>,
}

impl SpatialMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupant_at(&self, coord: Coord) -> Option<EntityKind> {
        self.cells.get(&coord).copied()
    }

    pub fn is_empty_at(&self, coord: Coord) -> bool {
        !self.cells.contains_key(&coord)
    }

    /// Put `kind` at `coord`, replacing any previous occupant
    pub fn place(&mut self, coord: Coord, kind: EntityKind) {
        debug_assert!(kind != EntityKind::Wall, "walls are never stored");
        if self.cells.insert(coord, kind).is_none() {
            self.order.push(coord);
        }
        self.dirty.push(coord);
    }

    /// Empty `coord`
    pub fn clear(&mut self, coord: Coord) {
        if self.cells.remove(&coord).is_some() {
            self.order.retain(|c| *c != coord);
            self.dirty.push(coord);
        }
    }

    /// Remove every occupant (the caller repaints everything)
    pub fn clear_all(&mut self) {
        self.cells.clear();
        self.order.clear();
        self.dirty.clear();
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.cells.values().filter(|k| **k == kind).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Coordinates holding `kind`, in placement order
    pub fn coordinates_of(&self, kind: EntityKind) -> Vec<Coord> {
        self.order
            .iter()
            .copied()
            .filter(|c| self.cells.get(c) == Some(&kind))
            .collect()
    }

    /// Every occupied cell, in placement order
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, EntityKind)> + '_ {
        self.order.iter().map(|c| (*c, self.cells[c]))
    }

    /// Drain the cells changed since the last call, each reported once
    pub fn take_dirty(&mut self) -> Vec<Coord> {
        let mut dirty = std::mem::take(&mut self.dirty);
        dirty.sort();
        dirty.dedup();
        dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_place_overwrites_and_clear_removes() {
        let mut map = SpatialMap::new();
        let c = Coord::new(2, 3);
        map.place(c, EntityKind::Robot);
        map.place(c, EntityKind::Junk);
        assert_eq!(map.occupant_at(c), Some(EntityKind::Junk));
        assert_eq!(map.len(), 1);

        map.clear(c);
        assert_eq!(map.occupant_at(c), None);
        assert!(map.is_empty());
        assert!(map.coordinates_of(EntityKind::Junk).is_empty());
    }

    #[test]
    fn test_coordinates_of_keeps_placement_order() {
        let mut map = SpatialMap::new();
        let a = Coord::new(5, 5);
        let b = Coord::new(1, 1);
        let c = Coord::new(3, 9);
        map.place(a, EntityKind::Robot);
        map.place(b, EntityKind::Obstacle);
        map.place(c, EntityKind::Robot);
        assert_eq!(map.coordinates_of(EntityKind::Robot), vec![a, c]);

        // Overwriting keeps the original slot
        map.place(a, EntityKind::Junk);
        map.place(a, EntityKind::Robot);
        assert_eq!(map.coordinates_of(EntityKind::Robot), vec![a, c]);
        assert_eq!(map.count(EntityKind::Robot), 2);
        assert_eq!(map.count(EntityKind::Obstacle), 1);
    }

    #[test]
    fn test_dirty_cells_reported_once() {
        let mut map = SpatialMap::new();
        let c = Coord::new(2, 2);
        map.place(c, EntityKind::Robot);
        map.clear(c);
        map.place(Coord::new(1, 1), EntityKind::Junk);
        assert_eq!(map.take_dirty(), vec![Coord::new(1, 1), c]);
        assert!(map.take_dirty().is_empty());

        // Clearing an empty cell changes nothing
        map.clear(Coord::new(4, 4));
        assert!(map.take_dirty().is_empty());
    }

    #[test]
    fn test_arena_bounds() {
        let arena = Arena::new(5, 5);
        assert!(arena.contains(Coord::new(1, 1)));
        assert!(arena.contains(Coord::new(5, 5)));
        assert!(!arena.contains(Coord::new(0, 3)));
        assert!(!arena.contains(Coord::new(3, 6)));
        assert_eq!(arena.center(), Coord::new(3, 3));
        assert_eq!(arena.cells(1).len(), 9);
        assert_eq!(arena.wall_cells().len(), 7 * 7 - 25);
        assert!(arena.contains_with_margin(Coord::new(2, 4), 1));
        assert!(!arena.contains_with_margin(Coord::new(1, 3), 1));
    }

    proptest! {
        #[test]
        fn prop_index_matches_cells(ops in prop::collection::vec((1i32..6, 1i32..6, 0u8..4), 0..60)) {
            let mut map = SpatialMap::new();
            for (row, col, op) in ops {
                let c = Coord::new(row, col);
                match op {
                    0 => map.place(c, EntityKind::Robot),
                    1 => map.place(c, EntityKind::Junk),
                    2 => map.place(c, EntityKind::Obstacle),
                    _ => map.clear(c),
                }
            }
            let listed: Vec<_> = map.occupied().collect();
            prop_assert_eq!(listed.len(), map.len());
            for (c, kind) in listed {
                prop_assert_eq!(map.occupant_at(c), Some(kind));
            }
            let robots = map.coordinates_of(EntityKind::Robot);
            prop_assert_eq!(robots.len(), map.count(EntityKind::Robot));
        }
    }
}
