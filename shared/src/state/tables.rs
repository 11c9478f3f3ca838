use crate::{
    component_table::ComponentTable,
    components::{
        Builder, Bullet, Damageable, Damager, Emitter, EntityType, Explosion, Hitbox, Inventory,
        Obscurable, Shooter, Team, Transform, Turret,
    },
    types::PlayerNumber,
    EntityId,
};

/// The parts of a [`ComponentTable`] the registry needs without knowing the
/// component type.
pub trait ComponentStore {
    fn contains(&self, id: &EntityId) -> bool;
    fn entity_ids(&self) -> Vec<EntityId>;
    fn remove_entity(&mut self, id: &EntityId) -> bool;
    fn commit(&mut self);
    fn rollback(&mut self);
}

impl<T: Clone> ComponentStore for ComponentTable<T> {
    fn contains(&self, id: &EntityId) -> bool {
        self.has(id)
    }

    fn entity_ids(&self) -> Vec<EntityId> {
        self.ids()
    }

    fn remove_entity(&mut self, id: &EntityId) -> bool {
        self.delete(id)
    }

    fn commit(&mut self) {
        ComponentTable::commit(self)
    }

    fn rollback(&mut self) {
        ComponentTable::rollback(self)
    }
}

// Declares one table per component kind, so that every table is visited by
// commit, rollback and the deletion sweep without listing them by hand.
macro_rules! component_tables {
    ($($kind:ident => $field:ident: $value:ty),* $(,)?) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ComponentKind {
            $($kind,)*
        }

        impl ComponentKind {
            pub const ALL: &'static [ComponentKind] = &[$(ComponentKind::$kind,)*];
        }

        #[derive(Debug, PartialEq)]
        pub struct ComponentTables {
            $(pub(crate) $field: ComponentTable<$value>,)*
        }

        impl ComponentTables {
            pub(crate) fn new() -> Self {
                Self {
                    $($field: ComponentTable::new(stringify!($field)),)*
                }
            }

            $(
                pub fn $field(&self) -> &ComponentTable<$value> {
                    &self.$field
                }
            )*

            pub(crate) fn stores(&self) -> [(ComponentKind, &dyn ComponentStore); ComponentKind::ALL.len()] {
                [$((ComponentKind::$kind, &self.$field as &dyn ComponentStore),)*]
            }

            pub(crate) fn stores_mut(&mut self) -> [&mut dyn ComponentStore; ComponentKind::ALL.len()] {
                [$(&mut self.$field as &mut dyn ComponentStore,)*]
            }
        }
    };
}

component_tables! {
    Transform => transforms: Transform,
    Hitbox => hitboxes: Hitbox,
    Damageable => damageables: Damageable,
    Damager => damagers: Damager,
    Shooter => shooters: Shooter,
    Bullet => bullets: Bullet,
    Turret => turrets: Turret,
    Explosion => explosions: Explosion,
    Emitter => emitters: Emitter,
    Builder => builders: Builder,
    Inventory => inventories: Inventory,
    PlayerNumber => player_numbers: PlayerNumber,
    Team => teams: Team,
    EntityType => entity_types: EntityType,
    Wall => walls: (),
    Moveable => moveables: (),
    PlayfieldClamped => playfield_clamped: (),
    Obscurable => obscurables: Obscurable,
    Obscuring => obscurings: (),
    Targetable => targetables: (),
    Harvestable => harvestables: (),
}
