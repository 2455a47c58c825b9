//! Node- and element-keyed load maps

use std::collections::BTreeMap;

use serde::Serialize;

use super::{AggregationRule, LoadCategory};

/// Loads accumulated on one target
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoadAggregate {
    /// Component-wise sum of every contribution
    Summed([f64; 6]),
    /// One entry per contribution, in arrival order
    Sequence(Vec<[f64; 6]>),
}

impl LoadAggregate {
    pub fn new(rule: AggregationRule, components: [f64; 6]) -> Self {
        match rule {
            AggregationRule::Sum => LoadAggregate::Summed(components),
            AggregationRule::Append => LoadAggregate::Sequence(vec![components]),
        }
    }

    /// Combine another contribution following this aggregate's variant
    pub fn merge(&mut self, components: [f64; 6]) {
        match self {
            LoadAggregate::Summed(total) => {
                for (t, c) in total.iter_mut().zip(components.iter()) {
                    *t += c;
                }
            }
            LoadAggregate::Sequence(list) => list.push(components),
        }
    }

    /// Number of stored entries
    pub fn entries(&self) -> usize {
        match self {
            LoadAggregate::Summed(_) => 1,
            LoadAggregate::Sequence(list) => list.len(),
        }
    }

    /// Sum over all entries
    pub fn total(&self) -> [f64; 6] {
        match self {
            LoadAggregate::Summed(total) => *total,
            LoadAggregate::Sequence(list) => {
                let mut total = [0.0; 6];
                for entry in list {
                    for (t, c) in total.iter_mut().zip(entry.iter()) {
                        *t += c;
                    }
                }
                total
            }
        }
    }
}

/// Point loads by node label and UDLs by element label for one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLoads {
    pub point: BTreeMap<usize, LoadAggregate>,
    pub udl: BTreeMap<usize, LoadAggregate>,
    #[serde(skip)]
    rule: AggregationRule,
}

impl CategoryLoads {
    pub fn new(category: LoadCategory) -> Self {
        Self {
            point: BTreeMap::new(),
            udl: BTreeMap::new(),
            rule: category.rule(),
        }
    }

    pub fn add_point(&mut self, node: usize, components: [f64; 6]) {
        Self::add(&mut self.point, self.rule, node, components);
    }

    pub fn add_udl(&mut self, element: usize, components: [f64; 6]) {
        Self::add(&mut self.udl, self.rule, element, components);
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty() && self.udl.is_empty()
    }

    fn add(
        map: &mut BTreeMap<usize, LoadAggregate>,
        rule: AggregationRule,
        target: usize,
        components: [f64; 6],
    ) {
        map.entry(target)
            .and_modify(|agg| agg.merge(components))
            .or_insert_with(|| LoadAggregate::new(rule, components));
    }
}

/// All mapped loads, one block per category
#[derive(Debug, Clone, Serialize)]
pub struct LoadMaps {
    pub dead: CategoryLoads,
    pub live: CategoryLoads,
    pub wind: CategoryLoads,
    pub direct_piping: CategoryLoads,
    pub equipment: CategoryLoads,
}

impl Default for LoadMaps {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadMaps {
    pub fn new() -> Self {
        Self {
            dead: CategoryLoads::new(LoadCategory::Dead),
            live: CategoryLoads::new(LoadCategory::Live),
            wind: CategoryLoads::new(LoadCategory::Wind),
            direct_piping: CategoryLoads::new(LoadCategory::DirectPiping),
            equipment: CategoryLoads::new(LoadCategory::Equipment),
        }
    }

    pub fn category(&self, category: LoadCategory) -> &CategoryLoads {
        match category {
            LoadCategory::Dead => &self.dead,
            LoadCategory::Live => &self.live,
            LoadCategory::Wind => &self.wind,
            LoadCategory::DirectPiping => &self.direct_piping,
            LoadCategory::Equipment => &self.equipment,
        }
    }

    pub fn category_mut(&mut self, category: LoadCategory) -> &mut CategoryLoads {
        match category {
            LoadCategory::Dead => &mut self.dead,
            LoadCategory::Live => &mut self.live,
            LoadCategory::Wind => &mut self.wind,
            LoadCategory::DirectPiping => &mut self.direct_piping,
            LoadCategory::Equipment => &mut self.equipment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FY100: [f64; 6] = [0.0, 100.0, 0.0, 0.0, 0.0, 0.0];
    const FY50: [f64; 6] = [0.0, 50.0, 0.0, 0.0, 0.0, 0.0];

    #[test]
    fn test_dead_loads_sum() {
        let mut maps = LoadMaps::new();
        maps.category_mut(LoadCategory::Dead).add_point(3, FY100);
        maps.category_mut(LoadCategory::Dead).add_point(3, FY50);

        let agg = &maps.dead.point[&3];
        assert_eq!(agg.entries(), 1);
        assert_eq!(*agg, LoadAggregate::Summed([0.0, 150.0, 0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_wind_loads_append() {
        let mut maps = LoadMaps::new();
        maps.category_mut(LoadCategory::Wind).add_point(3, FY100);
        maps.category_mut(LoadCategory::Wind).add_point(3, FY50);

        let agg = &maps.wind.point[&3];
        assert_eq!(*agg, LoadAggregate::Sequence(vec![FY100, FY50]));
        assert_eq!(agg.total()[1], 150.0);
    }

    #[test]
    fn test_udl_keyed_by_element() {
        let mut loads = CategoryLoads::new(LoadCategory::Equipment);
        loads.add_udl(1, FY100);
        loads.add_udl(2, FY50);
        assert_eq!(loads.udl.len(), 2);
        assert!(loads.point.is_empty());
        assert!(!loads.is_empty());
    }

    #[test]
    fn test_serialized_shapes() {
        let summed = serde_json::to_value(LoadAggregate::Summed(FY50)).unwrap();
        assert_eq!(summed, serde_json::json!([0.0, 50.0, 0.0, 0.0, 0.0, 0.0]));
        let seq = serde_json::to_value(LoadAggregate::Sequence(vec![FY50])).unwrap();
        assert_eq!(seq, serde_json::json!([[0.0, 50.0, 0.0, 0.0, 0.0, 0.0]]));
    }
}
