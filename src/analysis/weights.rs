use serde::{Deserialize, Serialize};

/// Share of the blend reserved for counter picks once an enemy pick is known.
pub const COUNTER_SHARE: f64 = 0.40;

/// Blend weights for one recommendation call. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub meta: f64,
    pub player: f64,
    pub counter: f64,
}

impl Weights {
    /// Weights from the priority slider (0 = personal pool, 100 = meta).
    ///
    /// Without a meaningful pool the player axis collapses to 5% whatever the
    /// slider says. A known enemy pick carves out a fixed counter share and
    /// shrinks the other two proportionally.
    pub fn compute(priority: i64, has_enemy: bool, has_pool: bool) -> Self {
        let p = priority.clamp(0, 100) as f64 / 100.0;

        let (base_meta, base_player) = if has_pool {
            (0.05 + p * 0.90, 0.95 - p * 0.90)
        } else {
            (0.95, 0.05)
        };

        let (meta, player, counter) = if has_enemy {
            (
                base_meta * (1.0 - COUNTER_SHARE),
                base_player * (1.0 - COUNTER_SHARE),
                COUNTER_SHARE,
            )
        } else {
            (base_meta, base_player, 0.0)
        };

        let total = meta + player + counter;
        Weights {
            meta: meta / total,
            player: player / total,
            counter: counter / total,
        }
    }

    pub fn blend(&self, meta_score: f64, player_score: f64, counter_score: f64) -> f64 {
        self.meta * meta_score + self.player * player_score + self.counter * counter_score
    }

    pub fn sum(&self) -> f64 {
        self.meta + self.player + self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn weights_always_sum_to_one() {
        for priority in -20..=120 {
            for has_enemy in [false, true] {
                for has_pool in [false, true] {
                    let w = Weights::compute(priority, has_enemy, has_pool);
                    assert!(close(w.sum(), 1.0), "{priority} {has_enemy} {has_pool}");
                    assert!(w.meta >= 0.0 && w.player >= 0.0 && w.counter >= 0.0);
                }
            }
        }
    }

    #[test]
    fn slider_endpoints() {
        let pool_heavy = Weights::compute(0, false, true);
        assert!(close(pool_heavy.meta, 0.05));
        assert!(close(pool_heavy.player, 0.95));

        let meta_heavy = Weights::compute(100, false, true);
        assert!(close(meta_heavy.meta, 0.95));
        assert!(close(meta_heavy.player, 0.05));

        let mid = Weights::compute(50, false, true);
        assert!(close(mid.meta, 0.5));
        assert!(close(mid.player, 0.5));
        assert_eq!(mid.counter, 0.0);
    }

    #[test]
    fn out_of_range_priority_is_clamped() {
        assert_eq!(Weights::compute(-5, false, true), Weights::compute(0, false, true));
        assert_eq!(Weights::compute(250, true, true), Weights::compute(100, true, true));
    }

    #[test]
    fn missing_pool_forces_meta_split() {
        for priority in [0, 37, 100] {
            let w = Weights::compute(priority, false, false);
            assert!(close(w.meta, 0.95));
            assert!(close(w.player, 0.05));
        }
    }

    #[test]
    fn enemy_pick_carves_out_counter_share() {
        let w = Weights::compute(50, true, true);
        assert!(close(w.counter, 0.4));
        assert!(close(w.meta, 0.3));
        assert!(close(w.player, 0.3));

        let no_pool = Weights::compute(50, true, false);
        assert!(close(no_pool.meta, 0.57));
        assert!(close(no_pool.player, 0.03));
        assert!(close(no_pool.counter, 0.4));
    }

    #[test]
    fn raising_priority_moves_mass_from_player_to_meta() {
        for has_enemy in [false, true] {
            let mut previous = Weights::compute(0, has_enemy, true);
            for priority in 1..=100 {
                let w = Weights::compute(priority, has_enemy, true);
                assert!(w.meta > previous.meta);
                assert!(w.player < previous.player);
                assert!(close(w.counter, previous.counter));
                previous = w;
            }
        }
    }

    #[test]
    fn blend_applies_weights() {
        let w = Weights::compute(50, true, true);
        assert!(close(w.blend(100.0, 50.0, 90.0), 30.0 + 15.0 + 36.0));
    }
}
