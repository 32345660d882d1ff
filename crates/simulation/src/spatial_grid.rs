use std::collections::HashMap;

use bevy::prelude::*;

use crate::buildings::BuildingId;

const BUCKET_SIZE: i32 = 8; // sub-tile cells per spatial bucket side

/// Bucketed index of building anchors on the sub-tile lattice. Unbounded:
/// buckets are created on demand and dropped when they empty out.
#[derive(Debug, Clone, Default)]
pub struct SpatialGrid {
    buckets: HashMap<IVec2, Vec<(BuildingId, IVec2)>>,
}

impl SpatialGrid {
    #[inline]
    fn bucket_of(cell: IVec2) -> IVec2 {
        IVec2::new(cell.x.div_euclid(BUCKET_SIZE), cell.y.div_euclid(BUCKET_SIZE))
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    pub fn insert(&mut self, id: BuildingId, anchor: IVec2) {
        self.buckets
            .entry(Self::bucket_of(anchor))
            .or_default()
            .push((id, anchor));
    }

    pub fn remove(&mut self, id: BuildingId, anchor: IVec2) {
        let bucket = Self::bucket_of(anchor);
        if let Some(entries) = self.buckets.get_mut(&bucket) {
            entries.retain(|(e, _)| *e != id);
            if entries.is_empty() {
                self.buckets.remove(&bucket);
            }
        }
    }

    /// Ids whose anchor lies within Euclidean distance `radius` (in cells) of
    /// `center`, in no particular order.
    pub fn query_radius(&self, center: IVec2, radius: f32) -> Vec<BuildingId> {
        if radius < 0.0 {
            return Vec::new();
        }
        let reach = radius.ceil() as i32;
        let min_b = Self::bucket_of(center - IVec2::splat(reach));
        let max_b = Self::bucket_of(center + IVec2::splat(reach));
        let radius_sq = radius * radius;

        let mut result = Vec::new();
        for by in min_b.y..=max_b.y {
            for bx in min_b.x..=max_b.x {
                let Some(entries) = self.buckets.get(&IVec2::new(bx, by)) else {
                    continue;
                };
                result.extend(
                    entries
                        .iter()
                        .filter(|(_, anchor)| {
                            (*anchor - center).as_vec2().length_squared() <= radius_sq
                        })
                        .map(|(id, _)| *id),
                );
            }
        }
        result
    }

    pub fn entity_count(&self) -> usize {
        self.buckets.values().map(|v| v.len()).sum()
    }
}
