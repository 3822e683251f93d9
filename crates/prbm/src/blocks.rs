//! Reduction of vertex positions to unique block positions.

use std::collections::hash_set;
use std::collections::{BTreeMap, HashSet};

use glam::{IVec3, Vec3};

/// Inclusive height filter; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeightRange {
    pub min_y: Option<i32>,
    pub max_y: Option<i32>,
}

impl HeightRange {
    /// Accepts every height.
    pub const ALL: Self = Self {
        min_y: None,
        max_y: None,
    };

    #[must_use]
    pub fn new(min_y: Option<i32>, max_y: Option<i32>) -> Self {
        Self { min_y, max_y }
    }

    #[must_use]
    pub fn contains(&self, y: i32) -> bool {
        self.min_y.is_none_or(|min| y >= min) && self.max_y.is_none_or(|max| y <= max)
    }
}

/// `2^31`, the first float above the `i32` range.
const BLOCK_LIMIT: f32 = 2_147_483_648.0;

/// Block containing a world-space point.
///
/// Each component is floored independently, so `-0.5` lands in block `-1`.
/// Returns `None` for non-finite input and for points whose block lies
/// outside `i32` coordinates.
#[must_use]
pub fn block_of(position: Vec3) -> Option<IVec3> {
    let floored = position.floor();
    // NaN fails both comparisons.
    let in_range = floored.cmpge(Vec3::splat(-BLOCK_LIMIT)).all()
        && floored.cmplt(Vec3::splat(BLOCK_LIMIT)).all();
    in_range.then(|| floored.as_ivec3())
}

/// Vertical distribution of a block set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightStats {
    pub min_y: i32,
    pub max_y: i32,
    /// Number of blocks at each occupied Y level.
    pub counts_by_y: BTreeMap<i32, usize>,
}

impl HeightStats {
    /// `max_y - min_y`.
    #[must_use]
    pub fn range(&self) -> u32 {
        self.max_y.abs_diff(self.min_y)
    }
}

/// Deduplicated set of block positions.
///
/// Iteration order is unspecified; use [`BlockSet::into_sorted`] when a
/// stable order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSet {
    blocks: HashSet<IVec3>,
}

impl BlockSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce positions after applying `transform` to each one.
    pub fn from_positions<I, F>(positions: I, transform: F) -> Self
    where
        I: IntoIterator<Item = Vec3>,
        F: Fn(Vec3) -> Vec3,
    {
        let mut set = Self::new();
        for position in positions {
            set.insert_vertex(transform(position));
        }
        set
    }

    /// Insert the block containing `position`. Returns `true` if the block
    /// was not present yet.
    pub fn insert_vertex(&mut self, position: Vec3) -> bool {
        match block_of(position) {
            Some(block) => self.blocks.insert(block),
            None => {
                tracing::trace!(?position, "skipping vertex outside block range");
                false
            }
        }
    }

    pub fn insert(&mut self, block: IVec3) -> bool {
        self.blocks.insert(block)
    }

    #[must_use]
    pub fn contains(&self, block: IVec3) -> bool {
        self.blocks.contains(&block)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, IVec3> {
        self.blocks.iter()
    }

    /// Drop blocks outside `range`.
    pub fn retain_height(&mut self, range: HeightRange) {
        self.blocks.retain(|b| range.contains(b.y));
    }

    /// Height range and per-level counts, or `None` for an empty set.
    #[must_use]
    pub fn height_stats(&self) -> Option<HeightStats> {
        let mut counts_by_y = BTreeMap::new();
        for block in &self.blocks {
            *counts_by_y.entry(block.y).or_insert(0) += 1;
        }
        let (&min_y, _) = counts_by_y.first_key_value()?;
        let (&max_y, _) = counts_by_y.last_key_value()?;
        Some(HeightStats {
            min_y,
            max_y,
            counts_by_y,
        })
    }

    /// Blocks ordered by X, then Y, then Z.
    #[must_use]
    pub fn into_sorted(self) -> Vec<IVec3> {
        let mut blocks: Vec<IVec3> = self.blocks.into_iter().collect();
        blocks.sort_unstable_by_key(|b| (b.x, b.y, b.z));
        blocks
    }
}

impl FromIterator<IVec3> for BlockSet {
    fn from_iter<T: IntoIterator<Item = IVec3>>(iter: T) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}

impl Extend<IVec3> for BlockSet {
    fn extend<T: IntoIterator<Item = IVec3>>(&mut self, iter: T) {
        self.blocks.extend(iter);
    }
}

impl IntoIterator for BlockSet {
    type Item = IVec3;
    type IntoIter = hash_set::IntoIter<IVec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a BlockSet {
    type Item = &'a IVec3;
    type IntoIter = hash_set::Iter<'a, IVec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_of_floors() {
        assert_eq!(block_of(Vec3::new(10.5, 64.0, 20.9)), Some(IVec3::new(10, 64, 20)));
        assert_eq!(block_of(Vec3::new(-0.5, -1.0, -1.01)), Some(IVec3::new(-1, -1, -2)));
    }

    #[test]
    fn test_block_of_non_finite() {
        assert_eq!(block_of(Vec3::new(f32::NAN, 0.0, 0.0)), None);
        assert_eq!(block_of(Vec3::new(0.0, f32::INFINITY, 0.0)), None);
    }

    #[test]
    fn test_block_of_out_of_range() {
        assert_eq!(block_of(Vec3::new(3.0e9, 0.0, 0.0)), None);
        assert_eq!(block_of(Vec3::new(0.0, 0.0, -4.0e9)), None);
        assert_eq!(block_of(Vec3::new(2_147_483_648.0, 0.0, 0.0)), None);
        assert_eq!(
            block_of(Vec3::new(-2_147_483_648.0, 0.0, 0.0)),
            Some(IVec3::new(i32::MIN, 0, 0))
        );

        let set = BlockSet::from_positions(
            [Vec3::new(3.0e9, 0.0, 0.0), Vec3::new(4.0e9, 0.0, 0.0)],
            |p| p,
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_height_stats() {
        let set: BlockSet = [
            IVec3::new(0, 64, 0),
            IVec3::new(1, 64, 0),
            IVec3::new(0, 70, 3),
            IVec3::new(0, -2, 3),
        ]
        .into_iter()
        .collect();
        let stats = set.height_stats().unwrap();

        assert_eq!(stats.min_y, -2);
        assert_eq!(stats.max_y, 70);
        assert_eq!(stats.range(), 72);
        assert_eq!(
            stats.counts_by_y.into_iter().collect::<Vec<_>>(),
            vec![(-2, 1), (64, 2), (70, 1)]
        );
    }

    #[test]
    fn test_height_stats_empty() {
        assert_eq!(BlockSet::new().height_stats(), None);

        let single: BlockSet = [IVec3::new(5, 12, 5)].into_iter().collect();
        assert_eq!(single.height_stats().unwrap().range(), 0);
    }

    #[test]
    fn test_deduplicates() {
        let positions = [
            Vec3::new(10.0, 64.0, 20.0),
            Vec3::new(10.5, 64.0, 20.5),
            Vec3::new(11.0, 65.0, 21.0),
        ];
        let set = BlockSet::from_positions(positions, |p| p);

        assert_eq!(set.len(), 2);
        assert!(set.contains(IVec3::new(10, 64, 20)));
        assert!(set.contains(IVec3::new(11, 65, 21)));
    }

    #[test]
    fn test_transform_is_applied_before_flooring() {
        let set = BlockSet::from_positions([Vec3::new(0.5, 3.0, 0.5)], |p| {
            p + Vec3::new(-16.0, 0.0, 32.0)
        });
        assert_eq!(set.into_sorted(), vec![IVec3::new(-16, 3, 32)]);
    }

    #[test]
    fn test_insert_vertex_reports_new_blocks() {
        let mut set = BlockSet::new();
        assert!(set.insert_vertex(Vec3::new(1.2, 2.0, 3.0)));
        assert!(!set.insert_vertex(Vec3::new(1.8, 2.9, 3.5)));
        assert!(!set.insert_vertex(Vec3::NAN));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_height_range() {
        let range = HeightRange::new(Some(60), Some(100));
        assert!(range.contains(60));
        assert!(range.contains(100));
        assert!(!range.contains(59));
        assert!(!range.contains(101));
        assert!(HeightRange::ALL.contains(i32::MIN));
        assert!(HeightRange::new(None, Some(16)).contains(-64));
    }

    #[test]
    fn test_retain_height() {
        let mut set: BlockSet = [IVec3::new(0, 10, 0), IVec3::new(0, 70, 0), IVec3::new(1, 120, 0)]
            .into_iter()
            .collect();
        set.retain_height(HeightRange::new(Some(60), Some(100)));
        assert_eq!(set.into_sorted(), vec![IVec3::new(0, 70, 0)]);
    }

    #[test]
    fn test_sorted_order() {
        let set: BlockSet = [IVec3::new(1, 0, 0), IVec3::new(0, 5, 1), IVec3::new(0, 5, 0)]
            .into_iter()
            .collect();
        assert_eq!(
            set.into_sorted(),
            vec![IVec3::new(0, 5, 0), IVec3::new(0, 5, 1), IVec3::new(1, 0, 0)]
        );
    }
}
