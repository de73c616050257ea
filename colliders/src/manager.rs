use crate::error::{ColliderError, ColliderResult};
use crate::queue::ShapeSender;
use collisions::{test_pair, CircleRectCollideInfo};
use common::shapes::{Aabb, Mat3, ShapeEnum, Vec2};
use crossbeam_channel::{bounded, Receiver, Sender};
use fxhash::{FxHashMap, FxHashSet};
use quadtree::quadtree::{Config, QuadTree};

const DEFAULT_QUEUE_CAPACITY: usize = 1024;

type CollisionCallback = Box<dyn FnMut(&CircleRectCollideInfo)>;

/// Broad-phase collision manager.
///
/// Owns the shapes, assigns ids from a monotonically increasing counter
/// (never reused), keeps the quadtree in sync with every transform, and
/// resolves collisions for everything that changed once per tick.
/// Everything here runs on the single tick thread; the only cross-thread
/// surface is the bounded ingestion queue behind [`ShapeSender`].
pub struct ColliderManager {
    colliders: FxHashMap<u32, ShapeEnum>,
    quadtree: QuadTree,
    changed: FxHashSet<u32>,
    counter: u32,
    callbacks: Vec<CollisionCallback>,
    ingress_tx: Sender<ShapeEnum>,
    ingress_rx: Receiver<ShapeEnum>,
    dropped_ingress: u64,
    candidates: Vec<u32>,
}

impl ColliderManager {
    /// Manager over the square region from `(-scale, -scale)` with side
    /// `2 * scale`.
    pub fn new(scale: f32) -> Self {
        Self::new_with_config(scale, Config::default(), DEFAULT_QUEUE_CAPACITY)
    }

    pub fn new_with_config(scale: f32, config: Config, queue_capacity: usize) -> Self {
        let (ingress_tx, ingress_rx) = bounded(queue_capacity.max(1));
        Self {
            colliders: FxHashMap::default(),
            quadtree: QuadTree::new_with_config(Vec2::new(-scale, -scale), 2.0 * scale, config),
            changed: FxHashSet::default(),
            counter: 0,
            callbacks: Vec::new(),
            ingress_tx,
            ingress_rx,
            dropped_ingress: 0,
            candidates: Vec::new(),
        }
    }

    /// Registers a shape and returns its id. An AABB outside the indexed
    /// region fails the whole add; the shape is not stored and the id is
    /// consumed but never handed out.
    pub fn add_entity(&mut self, shape: ShapeEnum) -> ColliderResult<u32> {
        self.counter += 1;
        let id = self.counter;
        self.quadtree.insert(id, shape.bounding_box())?;
        self.colliders.insert(id, shape);
        self.changed.insert(id);
        log::debug!("registered collider {}", id);
        Ok(id)
    }

    /// Applies a homogeneous transform to a registered shape, recomputes
    /// its AABB and re-places it in the index. The id is marked changed
    /// for the next tick either way; a transform that carries the shape
    /// outside the indexed region leaves it registered but absent from
    /// queries, and the error surfaces.
    pub fn transform_entity(&mut self, id: u32, transformation: &Mat3) -> ColliderResult<()> {
        let shape = self
            .colliders
            .get_mut(&id)
            .ok_or(ColliderError::UnknownCollider { id })?;
        let old_bb = shape.bounding_box();
        shape.transform(transformation);
        let new_bb = shape.bounding_box();
        self.changed.insert(id);
        self.quadtree.update(id, &old_bb, new_bb)?;
        Ok(())
    }

    pub fn delete_entity(&mut self, id: u32) -> ColliderResult<()> {
        let shape = self
            .colliders
            .remove(&id)
            .ok_or(ColliderError::UnknownCollider { id })?;
        self.quadtree.remove(id, &shape.bounding_box());
        self.changed.remove(&id);
        log::debug!("removed collider {}", id);
        Ok(())
    }

    /// Ids of all indexed shapes whose AABB intersects `bb`.
    pub fn query(&self, bb: &Aabb) -> Vec<u32> {
        let mut out = Vec::new();
        self.quadtree.query(bb, &mut out);
        out
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Subscribes to every circle-vs-rectangle overlap. Callbacks fire
    /// synchronously during [`Self::tick`], in registration order, once
    /// per detected pair.
    pub fn on_circle_rect_collision<F>(&mut self, callback: F)
    where
        F: FnMut(&CircleRectCollideInfo) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Producer handle for enqueueing shapes from other threads. Items
    /// present when a tick starts are registered before that tick's
    /// collision resolution.
    pub fn shape_sender(&self) -> ShapeSender {
        ShapeSender::new(self.ingress_tx.clone())
    }

    /// Shapes from the ingestion queue the index refused. Never silently
    /// folded into a success path.
    pub fn dropped_ingress(&self) -> u64 {
        self.dropped_ingress
    }

    /// Resolves collisions for every id that changed since the previous
    /// tick. The changed set is taken up front, so changes made by
    /// collision callbacks land in the next tick, never lost and never
    /// double-processed. Always returns `true`; the surrounding loop owns
    /// termination.
    pub fn tick(&mut self, time: f32) -> bool {
        self.drain_ingress();

        let changed = std::mem::take(&mut self.changed);
        log::trace!("tick at {}: {} changed colliders", time, changed.len());

        let mut candidates = std::mem::take(&mut self.candidates);
        for id in changed {
            let Some(shape) = self.colliders.get(&id) else {
                continue;
            };
            candidates.clear();
            self.quadtree.query(&shape.bounding_box(), &mut candidates);
            for &other in &candidates {
                if other == id {
                    continue;
                }
                let Some(other_shape) = self.colliders.get(&other) else {
                    continue;
                };
                if let Some(info) = test_pair(id, shape, other, other_shape) {
                    for callback in &mut self.callbacks {
                        callback(&info);
                    }
                }
            }
        }
        self.candidates = candidates;
        true
    }

    fn drain_ingress(&mut self) {
        while let Ok(shape) = self.ingress_rx.try_recv() {
            if let Err(err) = self.add_entity(shape) {
                self.dropped_ingress += 1;
                log::warn!("dropped enqueued shape: {}", err);
            }
        }
    }
}
