//! Arena-backed storage for the two mirrored zone sequences.
//!
//! Each arena slot holds one mirrored pair: the Real World zone and the
//! Upside Down zone at the same ordinal. Both halves keep their own
//! forward/backward links, one list per world. Because the two halves of a
//! pair share a slot, the mirror of a zone is always the other half of its
//! own slot: mirror references are reciprocal by construction, and every
//! structural edit splices both lists at the same ordinal.

use crate::state::{EnemyKind, RealZone, UpsideZone, World};

use super::{MapError, PairId};

/// Receives the position repairs caused by removing a pair.
///
/// Implemented by the roster so that no player is left standing on a
/// removed zone.
pub trait PositionRepair {
    /// Every reference to `removed` must be redirected to `head`
    /// (`None` when the map has become empty).
    fn relocate(&mut self, removed: PairId, head: Option<PairId>);
}

/// No players to repair (map edited before the roster exists).
impl PositionRepair for () {
    fn relocate(&mut self, _removed: PairId, _head: Option<PairId>) {}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Links {
    prev: Option<PairId>,
    next: Option<PairId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct PairNode {
    real: RealZone,
    upside: UpsideZone,
    /// Links within each world's sequence, indexed by [`world_slot`].
    links: [Links; 2],
}

const fn world_slot(world: World) -> usize {
    match world {
        World::Real => 0,
        World::UpsideDown => 1,
    }
}

const WORLDS: [World; 2] = [World::Real, World::UpsideDown];

/// The paired zone sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneStore {
    nodes: Vec<Option<PairNode>>,
    vacant: Vec<PairId>,
    heads: [Option<PairId>; 2],
    len: usize,
}

impl ZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs (the length of either sequence).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First pair of the given world's sequence.
    pub fn head(&self, world: World) -> Option<PairId> {
        self.heads[world_slot(world)]
    }

    /// Pair following `id` in the given world.
    pub fn next(&self, world: World, id: PairId) -> Option<PairId> {
        self.node(id)?.links[world_slot(world)].next
    }

    /// Pair preceding `id` in the given world.
    pub fn prev(&self, world: World, id: PairId) -> Option<PairId> {
        self.node(id)?.links[world_slot(world)].prev
    }

    /// Iterates the pairs of one world from head to tail.
    pub fn iter(&self, world: World) -> PairIter<'_> {
        PairIter {
            store: self,
            world,
            cursor: self.head(world),
        }
    }

    /// Pair at the one-based `ordinal` of the given world.
    pub fn at(&self, world: World, ordinal: usize) -> Option<PairId> {
        ordinal
            .checked_sub(1)
            .and_then(|skip| self.iter(world).nth(skip))
    }

    /// One-based ordinal of `id` in the given world.
    pub fn ordinal_of(&self, world: World, id: PairId) -> Option<usize> {
        self.iter(world)
            .position(|candidate| candidate == id)
            .map(|index| index + 1)
    }

    /// Whether `id` names a live pair.
    pub fn contains(&self, id: PairId) -> bool {
        self.node(id).is_some()
    }

    pub fn real(&self, id: PairId) -> Option<&RealZone> {
        self.node(id).map(|node| &node.real)
    }

    pub fn real_mut(&mut self, id: PairId) -> Option<&mut RealZone> {
        self.node_mut(id).map(|node| &mut node.real)
    }

    pub fn upside(&self, id: PairId) -> Option<&UpsideZone> {
        self.node(id).map(|node| &node.upside)
    }

    pub fn upside_mut(&mut self, id: PairId) -> Option<&mut UpsideZone> {
        self.node_mut(id).map(|node| &mut node.upside)
    }

    /// Enemy slot of the zone `id` in `world`.
    pub fn enemy_mut(&mut self, world: World, id: PairId) -> Option<&mut Option<EnemyKind>> {
        let node = self.node_mut(id)?;
        Some(match world {
            World::Real => &mut node.real.enemy,
            World::UpsideDown => &mut node.upside.enemy,
        })
    }

    /// Number of Upside Down zones holding the strongest enemy.
    pub fn strongest_count(&self) -> usize {
        self.iter(World::UpsideDown)
            .filter_map(|id| self.upside(id))
            .filter(|zone| zone.enemy == Some(EnemyKind::Strongest))
            .count()
    }

    /// Inserts a mirrored pair so that it lands at the one-based `position`.
    ///
    /// `position` ranges over `1..=len + 1`; `1` makes the pair the new head,
    /// anything else splices it after the pair at `position - 1`.
    pub fn insert(
        &mut self,
        position: usize,
        real: RealZone,
        upside: UpsideZone,
    ) -> Result<PairId, MapError> {
        let max = self.len + 1;
        if !(1..=max).contains(&position) {
            return Err(MapError::InvalidPosition { position, max });
        }

        // Resolve both splice points before allocating so a failure leaves
        // the lists untouched.
        let after = WORLDS.map(|world| {
            if position == 1 {
                None
            } else {
                self.at(world, position - 1)
            }
        });

        let id = self.allocate(PairNode {
            real,
            upside,
            links: [Links::default(); 2],
        })?;

        for world in WORLDS {
            let slot = world_slot(world);
            let next = match after[slot] {
                Some(prev) => self.next(world, prev),
                None => self.heads[slot],
            };

            if let Some(node) = self.node_mut(id) {
                node.links[slot] = Links {
                    prev: after[slot],
                    next,
                };
            }
            match after[slot] {
                Some(prev) => self.set_next(world, prev, Some(id)),
                None => self.heads[slot] = Some(id),
            }
            if let Some(next) = next {
                self.set_prev(world, next, Some(id));
            }
        }

        self.len += 1;
        Ok(id)
    }

    /// Removes the pair at the one-based `position` from both sequences.
    ///
    /// Neighbours are re-linked first, then `repair` redirects every player
    /// that stood on the removed pair to the new head.
    pub fn remove(
        &mut self,
        position: usize,
        repair: &mut impl PositionRepair,
    ) -> Result<(RealZone, UpsideZone), MapError> {
        if self.is_empty() {
            return Err(MapError::EmptyMap);
        }
        let id = self
            .at(World::Real, position)
            .ok_or(MapError::InvalidPosition {
                position,
                max: self.len,
            })?;

        for world in WORLDS {
            let slot = world_slot(world);
            let Links { prev, next } = match self.node(id) {
                Some(node) => node.links[slot],
                None => Links::default(),
            };
            match prev {
                Some(prev) => self.set_next(world, prev, next),
                None => self.heads[slot] = next,
            }
            if let Some(next) = next {
                self.set_prev(world, next, prev);
            }
        }

        let node = self
            .nodes
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(MapError::InvalidPosition {
                position,
                max: self.len,
            })?;
        self.len -= 1;
        if self.vacant.try_reserve(1).is_ok() {
            self.vacant.push(id);
        }

        repair.relocate(id, self.head(World::Real));
        Ok((node.real, node.upside))
    }

    /// Drops every pair.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Verifies the structural invariants of both sequences.
    ///
    /// Both worlds must list the same pairs in the same order, every
    /// backward link must mirror the forward link before it, and the walk
    /// length must match `len`.
    pub fn is_consistent(&self) -> bool {
        let real: Vec<PairId> = self.iter(World::Real).take(self.len + 1).collect();
        let upside: Vec<PairId> = self.iter(World::UpsideDown).take(self.len + 1).collect();
        if real != upside || real.len() != self.len {
            return false;
        }

        WORLDS.iter().all(|&world| {
            let mut prev = None;
            for &id in &real {
                if self.prev(world, id) != prev {
                    return false;
                }
                prev = Some(id);
            }
            prev.is_none_or(|tail| self.next(world, tail).is_none())
        })
    }

    fn node(&self, id: PairId) -> Option<&PairNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: PairId) -> Option<&mut PairNode> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    fn set_next(&mut self, world: World, id: PairId, next: Option<PairId>) {
        if let Some(node) = self.node_mut(id) {
            node.links[world_slot(world)].next = next;
        }
    }

    fn set_prev(&mut self, world: World, id: PairId, prev: Option<PairId>) {
        if let Some(node) = self.node_mut(id) {
            node.links[world_slot(world)].prev = prev;
        }
    }

    fn allocate(&mut self, node: PairNode) -> Result<PairId, MapError> {
        if let Some(id) = self.vacant.pop() {
            self.nodes[id.index()] = Some(node);
            return Ok(id);
        }
        self.nodes
            .try_reserve(1)
            .map_err(|_| MapError::AllocationFailure)?;
        let raw = u32::try_from(self.nodes.len()).map_err(|_| MapError::AllocationFailure)?;
        self.nodes.push(Some(node));
        Ok(PairId(raw))
    }
}

/// Iterator over the pairs of one world, head to tail.
#[derive(Clone, Debug)]
pub struct PairIter<'a> {
    store: &'a ZoneStore,
    world: World,
    cursor: Option<PairId>,
}

impl Iterator for PairIter<'_> {
    type Item = PairId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.store.next(self.world, current);
        Some(current)
    }
}
