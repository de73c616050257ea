use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::{Aabb, Vec2};
use fxhash::FxHashMap;
use smallvec::SmallVec;

#[derive(Debug, Clone)]
pub struct Config {
    pub node_capacity: usize,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            node_capacity: 20,
            max_depth: 5,
        }
    }
}

const ROOT: u32 = 0;
const NO_NODE: u32 = u32::MAX;

const TOP_LEFT: usize = 0;
const TOP_RIGHT: usize = 1;
const BOTTOM_RIGHT: usize = 2;
const BOTTOM_LEFT: usize = 3;

/// A square region of the tree. Nodes live in the arena owned by
/// [`QuadTree`] and reference their children by index; `pos` is the
/// minimum corner of the region.
struct Node {
    pos: Vec2,
    width: f32,
    items: FxHashMap<u32, Aabb>,
    children: [u32; 4],
    next_free: u32,
}

impl Node {
    fn new(pos: Vec2, width: f32) -> Self {
        Self {
            pos,
            width,
            items: FxHashMap::default(),
            children: [NO_NODE; 4],
            next_free: NO_NODE,
        }
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.children[TOP_LEFT] == NO_NODE
    }

    #[inline]
    fn contains(&self, bb: &Aabb) -> bool {
        self.pos.x < bb.min.x
            && bb.max.x < self.pos.x + self.width
            && self.pos.y < bb.min.y
            && bb.max.y < self.pos.y + self.width
    }

    #[inline]
    fn intersects(&self, bb: &Aabb) -> bool {
        bb.max.x > self.pos.x
            && self.pos.x + self.width > bb.min.x
            && bb.max.y > self.pos.y
            && self.pos.y + self.width > bb.min.y
    }

    /// The single quadrant that strictly contains `bb`, or `None` when the
    /// box crosses a center line. Ties always count as straddling.
    fn quad_for(&self, bb: &Aabb) -> Option<usize> {
        let center = self.pos + Vec2::new(self.width * 0.5, self.width * 0.5);
        if bb.max.x < center.x {
            if bb.max.y < center.y {
                Some(BOTTOM_LEFT)
            } else if bb.min.y > center.y {
                Some(TOP_LEFT)
            } else {
                None
            }
        } else if bb.min.x > center.x {
            if bb.max.y < center.y {
                Some(BOTTOM_RIGHT)
            } else if bb.min.y > center.y {
                Some(TOP_RIGHT)
            } else {
                None
            }
        } else {
            None
        }
    }
}

/// Adaptive region quadtree over `(id, Aabb)` pairs.
///
/// Each item is stored in exactly one node: the smallest region that
/// strictly contains its box, or the node where the box straddles a
/// quadrant boundary. Leaves subdivide past `node_capacity` items (until
/// `max_depth`) and an underfull parent of four leaves merges them back on
/// removal.
pub struct QuadTree {
    nodes: Vec<Node>,
    free_head: u32,
    live_nodes: usize,
    len: usize,
    node_capacity: usize,
    max_depth: usize,
}

impl QuadTree {
    pub fn new(pos: Vec2, width: f32) -> Self {
        Self::new_with_config(pos, width, Config::default())
    }

    pub fn new_with_config(pos: Vec2, width: f32, config: Config) -> Self {
        let node_capacity = config.node_capacity.max(1);
        Self {
            nodes: vec![Node::new(pos, width)],
            free_head: NO_NODE,
            live_nodes: 1,
            len: 0,
            node_capacity,
            max_depth: config.max_depth,
        }
    }

    /// Number of items currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live tree nodes (1 when the root is a lone leaf).
    pub fn node_count(&self) -> usize {
        self.live_nodes
    }

    /// The root region as a box. Only boxes strictly inside it can be
    /// indexed.
    pub fn bounds(&self) -> Aabb {
        let root = &self.nodes[ROOT as usize];
        Aabb::new(root.pos, root.pos + Vec2::new(root.width, root.width))
    }

    /// Places `id` into the smallest region that strictly contains `bb`.
    ///
    /// Boxes outside the root region are rejected with
    /// [`QuadtreeError::OutOfBounds`]; the id is then absent from the
    /// index and queries will not return it.
    pub fn insert(&mut self, id: u32, bb: Aabb) -> QuadtreeResult<()> {
        validate_aabb(&bb)?;
        if !self.nodes[ROOT as usize].contains(&bb) {
            let bounds = self.bounds();
            return Err(QuadtreeError::OutOfBounds {
                min_x: bb.min.x,
                min_y: bb.min.y,
                max_x: bb.max.x,
                max_y: bb.max.y,
                bounds_min_x: bounds.min.x,
                bounds_min_y: bounds.min.y,
                bounds_max_x: bounds.max.x,
                bounds_max_y: bounds.max.y,
            });
        }
        self.insert_at(ROOT, id, bb, 0);
        self.len += 1;
        Ok(())
    }

    fn insert_at(&mut self, mut node_idx: u32, id: u32, bb: Aabb, mut depth: usize) {
        loop {
            debug_assert!(self.nodes[node_idx as usize].contains(&bb));
            if self.nodes[node_idx as usize].is_leaf() {
                let over_capacity =
                    self.nodes[node_idx as usize].items.len() >= self.node_capacity;
                if !over_capacity || depth > self.max_depth {
                    self.nodes[node_idx as usize].items.insert(id, bb);
                    return;
                }
                self.subdivide(node_idx);
                continue;
            }
            match self.nodes[node_idx as usize].quad_for(&bb) {
                Some(q) => {
                    node_idx = self.nodes[node_idx as usize].children[q];
                    depth += 1;
                }
                None => {
                    self.nodes[node_idx as usize].items.insert(id, bb);
                    return;
                }
            }
        }
    }

    /// Removes `id` from the node owning `bb`, then merge-checks the
    /// immediate parent (one level only, never recursively upward).
    ///
    /// `bb` must be the box `id` was last inserted or updated with;
    /// descending with any other box is a contract violation
    /// (`debug_assert` in debug builds, a no-op removal in release). A box
    /// outside the root region was never indexed and is ignored.
    pub fn remove(&mut self, id: u32, bb: &Aabb) {
        if !self.nodes[ROOT as usize].contains(bb) {
            return;
        }
        let mut node_idx = ROOT;
        let mut parent = NO_NODE;
        loop {
            debug_assert!(self.nodes[node_idx as usize].contains(bb));
            if self.nodes[node_idx as usize].is_leaf() {
                if self.nodes[node_idx as usize].items.remove(&id).is_some() {
                    self.len -= 1;
                }
                if parent != NO_NODE {
                    self.merge(parent);
                }
                return;
            }
            match self.nodes[node_idx as usize].quad_for(bb) {
                Some(q) => {
                    parent = node_idx;
                    node_idx = self.nodes[node_idx as usize].children[q];
                }
                None => {
                    if self.nodes[node_idx as usize].items.remove(&id).is_some() {
                        self.len -= 1;
                    }
                    return;
                }
            }
        }
    }

    /// Re-places `id` under a new box: a remove followed by an insert, not
    /// an atomic move. An out-of-bounds `new_bb` leaves the id absent from
    /// the index and surfaces the error.
    pub fn update(&mut self, id: u32, old_bb: &Aabb, new_bb: Aabb) -> QuadtreeResult<()> {
        self.remove(id, old_bb);
        self.insert(id, new_bb)
    }

    /// Collects every id whose stored box intersects `bb`. An id is stored
    /// in exactly one node, so the result carries no duplicates; order is
    /// unspecified.
    pub fn query(&self, bb: &Aabb, out: &mut Vec<u32>) {
        self.query_with(bb, |id| out.push(id));
    }

    pub fn query_with<F>(&self, bb: &Aabb, mut f: F)
    where
        F: FnMut(u32),
    {
        let mut stack: SmallVec<[u32; 64]> = SmallVec::new();
        stack.push(ROOT);
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            // Local items may sit anywhere inside the region, straddlers
            // included, so they are always tested.
            for (&id, item_bb) in &node.items {
                if item_bb.intersects(bb) {
                    f(id);
                }
            }
            if !node.is_leaf() {
                for &child in &node.children {
                    if self.nodes[child as usize].intersects(bb) {
                        stack.push(child);
                    }
                }
            }
        }
    }

    fn subdivide(&mut self, node_idx: u32) {
        debug_assert!(self.nodes[node_idx as usize].is_leaf());
        let pos = self.nodes[node_idx as usize].pos;
        let half = self.nodes[node_idx as usize].width * 0.5;

        let mut children = [NO_NODE; 4];
        children[TOP_LEFT] = self.alloc_node(pos + Vec2::new(0.0, half), half);
        children[TOP_RIGHT] = self.alloc_node(pos + Vec2::new(half, half), half);
        children[BOTTOM_RIGHT] = self.alloc_node(pos + Vec2::new(half, 0.0), half);
        children[BOTTOM_LEFT] = self.alloc_node(pos, half);

        let items = std::mem::take(&mut self.nodes[node_idx as usize].items);
        self.nodes[node_idx as usize].children = children;
        for (id, bb) in items {
            match self.nodes[node_idx as usize].quad_for(&bb) {
                Some(q) => {
                    self.nodes[children[q] as usize].items.insert(id, bb);
                }
                None => {
                    self.nodes[node_idx as usize].items.insert(id, bb);
                }
            }
        }
    }

    fn merge(&mut self, node_idx: u32) {
        debug_assert!(!self.nodes[node_idx as usize].is_leaf());
        let children = self.nodes[node_idx as usize].children;
        let mut total = self.nodes[node_idx as usize].items.len();
        for &child in &children {
            if !self.nodes[child as usize].is_leaf() {
                return;
            }
            total += self.nodes[child as usize].items.len();
        }
        if total > self.node_capacity {
            return;
        }
        for &child in &children {
            let items = std::mem::take(&mut self.nodes[child as usize].items);
            self.nodes[node_idx as usize].items.extend(items);
            self.release_node(child);
        }
        self.nodes[node_idx as usize].children = [NO_NODE; 4];
    }

    fn alloc_node(&mut self, pos: Vec2, width: f32) -> u32 {
        self.live_nodes += 1;
        if self.free_head != NO_NODE {
            let idx = self.free_head;
            let node = &mut self.nodes[idx as usize];
            self.free_head = node.next_free;
            node.pos = pos;
            node.width = width;
            node.next_free = NO_NODE;
            debug_assert!(node.items.is_empty());
            debug_assert!(node.children[TOP_LEFT] == NO_NODE);
            idx
        } else {
            self.nodes.push(Node::new(pos, width));
            (self.nodes.len() - 1) as u32
        }
    }

    fn release_node(&mut self, node_idx: u32) {
        let free_head = self.free_head;
        let node = &mut self.nodes[node_idx as usize];
        node.items.clear();
        node.children = [NO_NODE; 4];
        node.next_free = free_head;
        self.free_head = node_idx;
        self.live_nodes -= 1;
    }

    /// Walks the whole arena verifying the structural invariants: a node
    /// is a leaf or owns all four children, every stored box is strictly
    /// contained in its node, and boxes held locally on an internal node
    /// straddle a quadrant boundary. Diagnostic surface for tests.
    pub fn check_invariants(&self) -> bool {
        let mut stack: SmallVec<[u32; 64]> = SmallVec::new();
        stack.push(ROOT);
        let mut seen = 0usize;
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx as usize];
            let child_count = node
                .children
                .iter()
                .filter(|&&child| child != NO_NODE)
                .count();
            if child_count != 0 && child_count != 4 {
                return false;
            }
            seen += node.items.len();
            for bb in node.items.values() {
                if !node.contains(bb) {
                    return false;
                }
                if !node.is_leaf() && node.quad_for(bb).is_some() {
                    return false;
                }
            }
            if !node.is_leaf() {
                stack.extend(node.children.iter().copied());
            }
        }
        seen == self.len
    }
}

fn validate_aabb(bb: &Aabb) -> QuadtreeResult<()> {
    if !(bb.min.x.is_finite() && bb.min.y.is_finite() && bb.max.x.is_finite() && bb.max.y.is_finite())
        || bb.min.x > bb.max.x
        || bb.min.y > bb.max.y
    {
        return Err(QuadtreeError::InvalidAabb {
            min_x: bb.min.x,
            min_y: bb.min.y,
            max_x: bb.max.x,
            max_y: bb.max.y,
        });
    }
    Ok(())
}
