//! Enemy registry: liveness tracking and archetype baseline merging.

use ember_arena_core::{ArenaPoint, EnemyArchetype, EnemyId, EnemyOverrides};

/// One live enemy tracked by the registry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) archetype: EnemyArchetype,
    pub(crate) position: ArenaPoint,
    pub(crate) hp: u32,
    pub(crate) max_hp: u32,
    pub(crate) speed: f32,
    pub(crate) touch_damage: u32,
    pub(crate) exp_reward: u32,
}

/// Record of an enemy removed by lethal damage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DeathRecord {
    pub(crate) id: EnemyId,
    pub(crate) exp_reward: u32,
    pub(crate) position: ArenaPoint,
}

/// Membership-only registry of live enemies.
///
/// The wave sequencer polls the live count to decide when a wave cleared;
/// behavioural ownership (movement, attacks) stays with the host engine.
#[derive(Clone, Debug, Default)]
pub(crate) struct EnemyRegistry {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl EnemyRegistry {
    pub(crate) fn spawn(
        &mut self,
        archetype: EnemyArchetype,
        overrides: EnemyOverrides,
        position: ArenaPoint,
    ) -> EnemyId {
        let id = EnemyId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let hp = overrides.hp.unwrap_or(archetype.base_hp());
        self.enemies.push(Enemy {
            id,
            archetype,
            position,
            hp,
            max_hp: hp,
            speed: overrides.speed.unwrap_or(archetype.base_speed()),
            touch_damage: overrides.touch_damage.unwrap_or(archetype.base_touch_damage()),
            exp_reward: overrides.exp.unwrap_or(archetype.base_exp()),
        });
        id
    }

    /// Applies damage; lethal hits remove the enemy and yield a death record.
    pub(crate) fn hit(&mut self, id: EnemyId, damage: u32) -> Option<DeathRecord> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        let enemy = &mut self.enemies[index];
        enemy.hp = enemy.hp.saturating_sub(damage);
        if enemy.hp > 0 {
            return None;
        }

        let record = DeathRecord {
            id: enemy.id,
            exp_reward: enemy.exp_reward,
            position: enemy.position,
        };
        let _ = self.enemies.remove(index);
        Some(record)
    }

    pub(crate) fn live_count(&self) -> u32 {
        self.enemies.len() as u32
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.enemies.clear();
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_layer_over_archetype_baselines() {
        let mut registry = EnemyRegistry::default();
        let id = registry.spawn(
            EnemyArchetype::Basic,
            EnemyOverrides {
                hp: Some(12),
                speed: None,
                touch_damage: Some(3),
                exp: None,
            },
            ArenaPoint::new(10.0, 10.0),
        );

        let enemy = registry.iter().find(|enemy| enemy.id == id).expect("enemy");
        assert_eq!(enemy.hp, 12);
        assert_eq!(enemy.touch_damage, 3);
        assert_eq!(enemy.speed, EnemyArchetype::Basic.base_speed());
        assert_eq!(enemy.exp_reward, EnemyArchetype::Basic.base_exp());
    }

    #[test]
    fn lethal_hit_removes_enemy_and_reports_reward() {
        let mut registry = EnemyRegistry::default();
        let id = registry.spawn(
            EnemyArchetype::Bit,
            EnemyOverrides::default(),
            ArenaPoint::new(40.0, 60.0),
        );
        assert_eq!(registry.live_count(), 1);

        assert!(registry.hit(id, 3).is_none());
        let record = registry.hit(id, 99).expect("lethal hit");
        assert_eq!(record.exp_reward, EnemyArchetype::Bit.base_exp());
        assert_eq!(record.position, ArenaPoint::new(40.0, 60.0));
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn hits_on_unknown_enemies_are_ignored() {
        let mut registry = EnemyRegistry::default();
        assert!(registry.hit(EnemyId::new(7), 5).is_none());
    }
}
