//! Mapping of member loads onto analysis nodes and elements

use log::{debug, trace};

use super::{BlanketLoad, LoadMaps};
use crate::blanket::PeripheralCell;
use crate::compile::SegmentLoads;
use crate::geometry::MM_PER_M;

/// Accumulates the per-category load maps while elements are emitted
#[derive(Debug, Clone, Default)]
pub struct LoadMapper {
    maps: LoadMaps,
}

impl LoadMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the loads attached to one segment.
    ///
    /// Point loads land on `start_node` / `end_node`, UDLs on `element`.
    pub fn map_segment(
        &mut self,
        loads: &SegmentLoads<'_>,
        start_node: usize,
        end_node: usize,
        element: usize,
    ) {
        for load in &loads.point_start {
            self.maps
                .category_mut(load.category)
                .add_point(start_node, load.components);
        }
        for load in &loads.point_end {
            self.maps
                .category_mut(load.category)
                .add_point(end_node, load.components);
        }
        for load in &loads.udl {
            self.maps
                .category_mut(load.category)
                .add_udl(element, load.components);
        }
    }

    /// Distribute a blanket pressure one-way onto the cell edges parallel to
    /// each cell's longer side. Returns the number of UDLs written.
    pub fn apply_blanket(&mut self, load: &BlanketLoad, cells: &[PeripheralCell]) -> usize {
        let mut written = 0;
        for cell in cells {
            let (x_extent, z_extent) = cell.extents();
            let (edges, short) = if x_extent >= z_extent {
                ([&cell.front, &cell.back], z_extent)
            } else {
                ([&cell.left, &cell.right], x_extent)
            };
            let intensity = load.pressure.abs() * (short / MM_PER_M) / 2.0;
            trace!(
                "Blanket '{}': {:.3} per metre on {} + {} elements",
                load.name,
                intensity,
                edges[0].len(),
                edges[1].len()
            );
            for label in edges.into_iter().flatten() {
                self.maps
                    .category_mut(load.category)
                    .add_udl(*label, [0.0, -intensity, 0.0, 0.0, 0.0, 0.0]);
                written += 1;
            }
        }
        debug!("Blanket '{}' wrote {} UDLs over {} cells", load.name, written, cells.len());
        written
    }

    pub fn maps(&self) -> &LoadMaps {
        &self.maps
    }

    pub fn into_maps(self) -> LoadMaps {
        self.maps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{LoadAggregate, LoadCategory, UserLoad};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_point_loads_follow_flags() {
        let dead = UserLoad::downward("B1", LoadCategory::Dead, 0.0, 100.0);
        let dead2 = UserLoad::downward("B1", LoadCategory::Dead, 0.0, 50.0);
        let live_end = UserLoad::downward("B1", LoadCategory::Live, 6.0, 20.0);
        let udl = UserLoad::downward_udl("B1", LoadCategory::Equipment, 0.0, 6.0, 3.0);
        let flags = SegmentLoads {
            point_start: vec![&dead, &dead2],
            point_end: vec![&live_end],
            udl: vec![&udl],
        };

        let mut mapper = LoadMapper::new();
        mapper.map_segment(&flags, 4, 7, 2);
        let maps = mapper.into_maps();

        assert_eq!(
            maps.dead.point[&4],
            LoadAggregate::Summed([0.0, -150.0, 0.0, 0.0, 0.0, 0.0])
        );
        assert_eq!(maps.live.point[&7].total()[1], -20.0);
        assert_eq!(maps.equipment.udl[&2].total()[1], -3.0);
        assert!(maps.wind.is_empty());
    }

    #[test]
    fn test_wind_contributions_stay_separate() {
        let w1 = UserLoad::point("C1", LoadCategory::Wind, 5.0, [2.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let w2 = UserLoad::point("C1", LoadCategory::Wind, 5.0, [0.0, 0.0, 3.0, 0.0, 0.0, 0.0]);
        let mut mapper = LoadMapper::new();
        mapper.map_segment(
            &SegmentLoads {
                point_end: vec![&w1],
                ..Default::default()
            },
            1,
            2,
            1,
        );
        mapper.map_segment(
            &SegmentLoads {
                point_start: vec![&w2],
                ..Default::default()
            },
            2,
            3,
            2,
        );
        assert_eq!(mapper.maps().wind.point[&2].entries(), 2);
    }

    #[test]
    fn test_blanket_one_way_distribution() {
        // 6 m along X by 2 m along Z: front/back carry the load
        let cell = PeripheralCell {
            front: vec![1],
            back: vec![2],
            left: vec![3],
            right: vec![4],
            bounds: [0.0, 0.0, 6000.0, 2000.0],
        };
        let blanket = BlanketLoad {
            name: "Floor".to_string(),
            category: LoadCategory::Live,
            from_member: "B1".to_string(),
            to_member: "B2".to_string(),
            distance: 0.0,
            width: 6.0,
            pressure: 5.0,
        };

        let mut mapper = LoadMapper::new();
        assert_eq!(mapper.apply_blanket(&blanket, &[cell]), 2);
        let live = &mapper.maps().live;
        assert_abs_diff_eq!(live.udl[&1].total()[1], -5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(live.udl[&2].total()[1], -5.0, epsilon = 1e-12);
        assert!(!live.udl.contains_key(&3));
    }
}
