//! Binary space partitioning of the grid into leaf regions, one room per leaf.

use slotmap::{SlotMap, new_key_type};

use super::grid::Grid;
use super::layout::{Rect, Room, carve_room};
use super::seed::GenRng;

new_key_type! {
    pub struct RegionId;
}

/// Regions wider or taller than this always try to split.
pub const MAX_LEAF_SIZE: usize = 20;
pub const MIN_LEAF_SIZE: usize = 6;
pub const MIN_ROOM_SIZE: usize = 4;

const SPLIT_CHANCE: (u32, u32) = (3, 4);
const ASPECT_RATIO_LIMIT: f64 = 1.25;

#[derive(Clone, Debug)]
pub struct Region {
    pub rect: Rect,
    pub parent: Option<RegionId>,
    pub children: Option<(RegionId, RegionId)>,
    /// Index into the attempt's room list; set on leaves only.
    pub room: Option<usize>,
}

impl Region {
    fn new(rect: Rect, parent: Option<RegionId>) -> Self {
        Self { rect, parent, children: None, room: None }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct RegionTree {
    regions: SlotMap<RegionId, Region>,
    root: RegionId,
}

impl RegionTree {
    fn new(bounds: Rect) -> Self {
        let mut regions = SlotMap::with_key();
        let root = regions.insert(Region::new(bounds, None));
        Self { regions, root }
    }

    pub fn root(&self) -> RegionId {
        self.root
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn leaves(&self) -> impl Iterator<Item = (RegionId, &Region)> + '_ {
        self.regions.iter().filter(|(_, region)| region.is_leaf())
    }

    /// Longest root-to-leaf chain, counted in edges.
    pub fn depth(&self) -> usize {
        self.leaves().map(|(id, _)| self.depth_of(id)).max().unwrap_or(0)
    }

    fn depth_of(&self, id: RegionId) -> usize {
        let mut depth = 0;
        let mut cursor = self.regions.get(id).and_then(|region| region.parent);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.regions.get(parent).and_then(|region| region.parent);
        }
        depth
    }

    fn split(&mut self, id: RegionId, rng: &mut GenRng) -> Option<(RegionId, RegionId)> {
        let region = self.regions.get(id)?;
        if !region.is_leaf() {
            return None;
        }
        let rect = region.rect;

        let mut divide_height = rng.coin_flip();
        let (width, height) = (rect.width as f64, rect.height as f64);
        if rect.width > rect.height && width / height >= ASPECT_RATIO_LIMIT {
            divide_height = false;
        } else if rect.height > rect.width && height / width >= ASPECT_RATIO_LIMIT {
            divide_height = true;
        }

        let span = if divide_height { rect.height } else { rect.width };
        let max_cut = span.saturating_sub(MIN_LEAF_SIZE);
        if max_cut <= MIN_LEAF_SIZE {
            return None;
        }
        let cut = rng.range_inclusive(MIN_LEAF_SIZE, max_cut);

        let (first, second) = if divide_height {
            (
                Rect { height: cut, ..rect },
                Rect { y: rect.y + cut, height: rect.height - cut, ..rect },
            )
        } else {
            (
                Rect { width: cut, ..rect },
                Rect { x: rect.x + cut, width: rect.width - cut, ..rect },
            )
        };
        let left = self.regions.insert(Region::new(first, Some(id)));
        let right = self.regions.insert(Region::new(second, Some(id)));
        if let Some(parent) = self.regions.get_mut(id) {
            parent.children = Some((left, right));
        }
        Some((left, right))
    }
}

#[derive(Clone, Debug)]
pub struct Partition {
    pub tree: RegionTree,
    pub rooms: Vec<Room>,
}

/// Splits the whole grid until a full pass makes no split, then carves one room per leaf.
pub(super) fn partition(grid: &mut Grid, rng: &mut GenRng) -> Partition {
    let bounds = Rect { x: 0, y: 0, width: grid.width(), height: grid.height() };
    let mut tree = RegionTree::new(bounds);

    let mut pending = vec![tree.root()];
    let mut did_split = true;
    while did_split {
        did_split = false;
        let mut index = 0;
        while index < pending.len() {
            let id = pending[index];
            index += 1;
            let Some(region) = tree.get(id) else {
                continue;
            };
            if !region.is_leaf() {
                continue;
            }
            let rect = region.rect;
            let oversized = rect.width > MAX_LEAF_SIZE || rect.height > MAX_LEAF_SIZE;
            if (oversized || rng.chance(SPLIT_CHANCE.0, SPLIT_CHANCE.1))
                && let Some((left, right)) = tree.split(id, rng)
            {
                pending.push(left);
                pending.push(right);
                did_split = true;
            }
        }
    }

    let mut rooms = Vec::new();
    let root = tree.root();
    create_rooms(&mut tree, root, grid, rng, &mut rooms);
    Partition { tree, rooms }
}

fn create_rooms(
    tree: &mut RegionTree,
    id: RegionId,
    grid: &mut Grid,
    rng: &mut GenRng,
    rooms: &mut Vec<Room>,
) {
    let Some(region) = tree.regions.get(id) else {
        return;
    };
    if let Some((left, right)) = region.children {
        create_rooms(tree, left, grid, rng, rooms);
        create_rooms(tree, right, grid, rng, rooms);
        return;
    }

    let leaf = region.rect;
    debug_assert!(leaf.width >= MIN_ROOM_SIZE + 2 && leaf.height >= MIN_ROOM_SIZE + 2);
    let width = rng.range_inclusive(MIN_ROOM_SIZE, leaf.width - 2);
    let height = rng.range_inclusive(MIN_ROOM_SIZE, leaf.height - 2);
    let x = leaf.x + rng.range_inclusive(1, leaf.width - width - 1);
    let y = leaf.y + rng.range_inclusive(1, leaf.height - height - 1);

    let room = Room::new(Rect { x, y, width, height });
    carve_room(grid, &room);
    if let Some(region) = tree.regions.get_mut(id) {
        region.room = Some(rooms.len());
    }
    rooms.push(room);
}
