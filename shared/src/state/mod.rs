//! The entity registry: every component table plus the spatial index over
//! entity bounds.

mod entity_components;
mod tables;

pub use entity_components::EntityComponents;
pub use tables::{ComponentKind, ComponentStore, ComponentTables};

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec2;
use log::{debug, trace};

use crate::{
    components::{Team, Transform, POINT_EXTENT},
    quadtree::{Aabb2, Quadtree, QuadtreeConfig, QuadtreeItem},
    simulation::SimulationError,
    types::PlayerNumber,
    EntityId,
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct IndexedEntity {
    id: EntityId,
    bounds: Aabb2,
}

impl QuadtreeItem for IndexedEntity {
    type Id = EntityId;

    fn id(&self) -> EntityId {
        self.id
    }
}

fn overlaps_bounds(region: &Aabb2, item: &IndexedEntity) -> bool {
    region.min_bias_overlaps(&item.bounds)
}

type EntityIndex = Quadtree<IndexedEntity, fn(&Aabb2, &IndexedEntity) -> bool>;

/// Room around the playfield that is still indexed, so entities slightly
/// outside it (bullets leaving the map) can be found.
const INDEX_MARGIN: f32 = 2.0;

pub struct StateDb {
    pub(crate) tables: ComponentTables,
    next_entity_id: u64,
    committed_next_entity_id: u64,
    world_bounds: Aabb2,
    index: EntityIndex,
    indexed_bounds: BTreeMap<EntityId, Aabb2>,
    pending_deletions: BTreeSet<EntityId>,
}

impl StateDb {
    pub fn new(world_bounds: Aabb2, quadtree_capacity: usize) -> Self {
        let index_bounds = Aabb2::new(
            world_bounds.min - Vec2::splat(INDEX_MARGIN),
            world_bounds.max + Vec2::splat(INDEX_MARGIN),
        );
        let comparator: fn(&Aabb2, &IndexedEntity) -> bool = overlaps_bounds;

        Self {
            tables: ComponentTables::new(),
            next_entity_id: 0,
            committed_next_entity_id: 0,
            world_bounds,
            index: Quadtree::new(
                QuadtreeConfig {
                    max_items: quadtree_capacity,
                    aabb: index_bounds,
                },
                comparator,
            ),
            indexed_bounds: BTreeMap::new(),
            pending_deletions: BTreeSet::new(),
        }
    }

    /// Read-only view of every component table.
    pub fn tables(&self) -> &ComponentTables {
        &self.tables
    }

    pub fn world_bounds(&self) -> Aabb2 {
        self.world_bounds
    }

    /// Allocates an id and files every present component under it. The new
    /// entity is indexed for spatial queries at the next
    /// [`post_frame_update`](Self::post_frame_update).
    pub fn register(&mut self, components: EntityComponents) -> Result<EntityId, SimulationError> {
        let id = EntityId::from_u64(self.next_entity_id);
        self.next_entity_id += 1;

        let tables = &mut self.tables;
        if let Some(value) = components.entity_type {
            tables.entity_types.add(id, value)?;
        }
        if let Some(value) = components.transform {
            tables.transforms.add(id, value)?;
        }
        if let Some(value) = components.hitbox {
            tables.hitboxes.add(id, value)?;
        }
        if let Some(value) = components.damageable {
            tables.damageables.add(id, value)?;
        }
        if let Some(value) = components.damager {
            tables.damagers.add(id, value)?;
        }
        if let Some(value) = components.shooter {
            tables.shooters.add(id, value)?;
        }
        if let Some(value) = components.bullet {
            tables.bullets.add(id, value)?;
        }
        if let Some(value) = components.turret {
            tables.turrets.add(id, value)?;
        }
        if let Some(value) = components.explosion {
            tables.explosions.add(id, value)?;
        }
        if let Some(value) = components.emitter {
            tables.emitters.add(id, value)?;
        }
        if let Some(value) = components.builder {
            tables.builders.add(id, value)?;
        }
        if let Some(value) = components.inventory {
            tables.inventories.add(id, value)?;
        }
        if let Some(value) = components.player_number {
            tables.player_numbers.add(id, value)?;
        }
        if let Some(value) = components.team {
            tables.teams.add(id, value)?;
        }
        if let Some(value) = components.obscurable {
            tables.obscurables.add(id, value)?;
        }
        if components.wall {
            tables.walls.add(id, ())?;
        }
        if components.moveable {
            tables.moveables.add(id, ())?;
        }
        if components.playfield_clamped {
            tables.playfield_clamped.add(id, ())?;
        }
        if components.obscuring {
            tables.obscurings.add(id, ())?;
        }
        if components.targetable {
            tables.targetables.add(id, ())?;
        }
        if components.harvestable {
            tables.harvestables.add(id, ())?;
        }

        trace!("registered entity {}", id);
        Ok(id)
    }

    /// Schedules the entity for removal at the end of the frame. Marking the
    /// same entity twice has no further effect.
    pub fn mark_for_deletion(&mut self, id: EntityId) {
        self.pending_deletions.insert(id);
    }

    pub fn is_marked_for_deletion(&self, id: &EntityId) -> bool {
        self.pending_deletions.contains(id)
    }

    /// End-of-frame bookkeeping: removes marked entities from every table
    /// and the index, then re-indexes entities whose bounds changed.
    pub fn post_frame_update(&mut self) {
        for id in std::mem::take(&mut self.pending_deletions) {
            for store in self.tables.stores_mut() {
                store.remove_entity(&id);
            }
            self.index.remove(&id);
            self.indexed_bounds.remove(&id);
            trace!("deleted entity {}", id);
        }

        self.refresh_index();
    }

    /// Makes the current state the baseline that later rollbacks return to.
    pub fn commit_prediction(&mut self) {
        for store in self.tables.stores_mut() {
            store.commit();
        }
        self.committed_next_entity_id = self.next_entity_id;
    }

    /// Restores the state of the last commit, including the id counter, so
    /// replayed frames hand out the same ids.
    pub fn rollback_prediction(&mut self) {
        for store in self.tables.stores_mut() {
            store.rollback();
        }
        self.next_entity_id = self.committed_next_entity_id;
        self.pending_deletions.clear();
        self.refresh_index();
        debug!("rolled back to entity counter {}", self.next_entity_id);
    }

    /// Ids of every indexed entity whose bounds overlap `region`, ascending.
    pub fn query_by_world_pos(&self, region: &Aabb2) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.index.query(region).iter().map(|item| item.id).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// The tank controlled by `player_number`, if it is still alive.
    pub fn get_player_id(&self, player_number: PlayerNumber) -> Option<EntityId> {
        self.tables
            .player_numbers
            .iter()
            .find(|(_, number)| **number == player_number)
            .map(|(id, _)| id)
    }

    /// Whether any entity on `team` is left. The level is complete once no
    /// enemy remains.
    pub fn has_team_members(&self, team: Team) -> bool {
        self.tables.teams.iter().any(|(_, member)| *member == team)
    }

    /// The kinds of component the entity currently has.
    pub fn component_kinds(&self, id: &EntityId) -> Vec<ComponentKind> {
        self.tables
            .stores()
            .into_iter()
            .filter(|(_, store)| store.contains(id))
            .map(|(kind, _)| kind)
            .collect()
    }

    pub fn entity_exists(&self, id: &EntityId) -> bool {
        self.tables.stores().iter().any(|(_, store)| store.contains(id))
    }

    /// Number of distinct entities holding at least one component.
    pub fn entity_count(&self) -> usize {
        let mut ids = BTreeSet::new();
        for (_, store) in self.tables.stores() {
            ids.extend(store.entity_ids());
        }
        ids.len()
    }

    /// Bounds the entity is indexed under, if it has a transform.
    pub fn entity_bounds(&self, id: &EntityId) -> Option<Aabb2> {
        self.tables
            .transforms
            .get(id)
            .map(|transform| entity_bounds(&self.tables, id, transform))
    }

    pub fn index_depth(&self) -> usize {
        self.index.depth()
    }

    // Brings the index in line with the transform table: drops entities that
    // lost their transform and re-inserts those whose bounds moved.
    fn refresh_index(&mut self) {
        let stale: Vec<EntityId> = self
            .indexed_bounds
            .keys()
            .filter(|id| !self.tables.transforms.has(id))
            .copied()
            .collect();
        for id in stale {
            self.index.remove(&id);
            self.indexed_bounds.remove(&id);
        }

        for (id, transform) in self.tables.transforms.iter() {
            let bounds = entity_bounds(&self.tables, &id, transform);
            if self.indexed_bounds.get(&id) == Some(&bounds) {
                continue;
            }
            self.index.insert(IndexedEntity { id, bounds });
            self.indexed_bounds.insert(id, bounds);
        }
    }
}

fn entity_bounds(tables: &ComponentTables, id: &EntityId, transform: &Transform) -> Aabb2 {
    if let Some(hitbox) = tables.hitboxes.get(id) {
        return hitbox.aabb(transform.position);
    }
    if let Some(damageable) = tables.damageables.get(id) {
        return damageable.aabb(transform.position);
    }
    Aabb2::new(
        transform.position - Vec2::splat(POINT_EXTENT),
        transform.position + Vec2::splat(POINT_EXTENT),
    )
}
