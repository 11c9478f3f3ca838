use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    #[default]
    Neutral,
    Friendly,
    Enemy,
}

impl Team {
    /// Neutral entities are nobody's target.
    pub fn is_hostile_to(self, other: Team) -> bool {
        matches!(
            (self, other),
            (Team::Friendly, Team::Enemy) | (Team::Enemy, Team::Friendly)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Player,
    Tree,
    Wall,
    Turret,
    Bullet,
    Explosion,
    Builder,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Obscurable {
    pub hidden: bool,
}
