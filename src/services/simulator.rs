//! Update Simulator
//!
//! Random-walk perturbation of good-quality points. One call produces the
//! next tree from the current one; the input tree is never modified.
//!
//! ```text
//! value_new = value_old + (r - 0.5) * k      r ~ U[0, 1)
//!
//! fixed:         k = magnitude
//! proportional:  k = ratio * |value_old|
//! ```

use chrono::{DateTime, Local};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use crate::domain::config::{NoiseMode, SimulationConfig, ValueClamp};
use crate::domain::variable::{Group, Point, VariableTree};
use crate::services::events::TickSummary;

/// Random-walk generator for point values
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Policy used by [`Simulator::step`]
    noise: NoiseMode,
    clamp: Option<ValueClamp>,
    rng: ChaCha8Rng,
}

impl Simulator {
    /// Create a simulator seeded from OS entropy
    pub fn new(noise: NoiseMode) -> Self {
        Self {
            noise,
            clamp: None,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create a reproducible simulator
    pub fn seeded(noise: NoiseMode, seed: u64) -> Self {
        Self {
            noise,
            clamp: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let simulator = match config.seed {
            Some(seed) => Self::seeded(config.noise, seed),
            None => Self::new(config.noise),
        };
        simulator.with_clamp(config.clamp)
    }

    /// Same configuration on an independent ChaCha stream
    ///
    /// With a configured seed, different streams never replay each other's
    /// noise; stream 0 is what [`Simulator::from_config`] uses.
    pub fn from_config_stream(config: &SimulationConfig, stream: u64) -> Self {
        let mut simulator = Self::from_config(config);
        simulator.rng.set_stream(stream);
        simulator
    }

    pub fn with_clamp(mut self, clamp: Option<ValueClamp>) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn noise(&self) -> NoiseMode {
        self.noise
    }

    /// Next tree using the configured noise policy
    pub fn step(&mut self, tree: &VariableTree, now: DateTime<Local>) -> (VariableTree, TickSummary) {
        let noise = self.noise;
        self.step_with(tree, noise, now)
    }

    /// Next tree using an explicit noise policy for this call only
    ///
    /// Every point gets `now` as its timestamp; only good points change value.
    pub fn step_with(
        &mut self,
        tree: &VariableTree,
        noise: NoiseMode,
        now: DateTime<Local>,
    ) -> (VariableTree, TickSummary) {
        let mut summary = TickSummary::default();

        let groups = tree
            .groups()
            .iter()
            .map(|group| {
                let children = group
                    .children
                    .iter()
                    .map(|point| {
                        summary.touched += 1;
                        let value = if point.quality.is_good() {
                            summary.perturbed += 1;
                            self.perturb(point.value, noise)
                        } else {
                            point.value
                        };
                        Point {
                            value,
                            timestamp: Some(now),
                            ..point.clone()
                        }
                    })
                    .collect();

                Arc::new(Group {
                    id: group.id.clone(),
                    name: group.name.clone(),
                    children,
                    expanded: group.expanded,
                })
            })
            .collect();

        summary.revision = tree.revision() + 1;
        (VariableTree::from_shared(groups, summary.revision), summary)
    }

    fn perturb(&mut self, value: f64, noise: NoiseMode) -> f64 {
        let r: f64 = self.rng.r#gen();
        let next = value + (r - 0.5) * noise.span(value);
        match &self.clamp {
            Some(clamp) => clamp.apply(next),
            None => next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variable::{Quality, seed_tree};

    fn single(value: f64, quality: Quality) -> VariableTree {
        VariableTree::new(vec![Group::new(
            "g",
            "G",
            vec![Point::new("p", "P", value, "", quality)],
        )])
        .expect("tree")
    }

    fn value_of(tree: &VariableTree) -> f64 {
        tree.point("g", "p").expect("point").value
    }

    #[test]
    fn fixed_mode_moves_good_points_by_at_most_half_span() {
        let mut sim = Simulator::seeded(NoiseMode::Fixed { magnitude: 2.0 }, 1);
        let mut tree = seed_tree();

        for _ in 0..200 {
            let (next, _) = sim.step(&tree, Local::now());
            for (old, new) in tree.points().zip(next.points()) {
                if old.quality == Quality::Good {
                    assert!((new.value - old.value).abs() <= 1.0 + 1e-9);
                }
            }
            tree = next;
        }
    }

    #[test]
    fn non_good_points_are_frozen() {
        let seed = seed_tree();
        let mut sim = Simulator::seeded(NoiseMode::fixed(), 2);
        let mut tree = seed.clone();

        for i in 0..50 {
            let noise = if i % 2 == 0 { NoiseMode::fixed() } else { NoiseMode::proportional() };
            tree = sim.step_with(&tree, noise, Local::now()).0;
        }

        for (initial, current) in seed.points().zip(tree.points()) {
            if initial.quality != Quality::Good {
                assert_eq!(initial.value, current.value, "{} drifted", initial.id);
            }
        }
    }

    #[test]
    fn bad_zero_point_stays_zero() {
        let mut sim = Simulator::seeded(NoiseMode::fixed(), 3);
        let mut tree = single(0.0, Quality::Bad);

        for _ in 0..100 {
            tree = sim.step(&tree, Local::now()).0;
        }

        assert_eq!(value_of(&tree), 0.0);
    }

    #[test]
    fn every_point_gets_the_tick_timestamp() {
        let now = Local::now();
        let mut sim = Simulator::seeded(NoiseMode::proportional(), 4);
        let (next, summary) = sim.step(&seed_tree(), now);

        assert!(next.points().all(|p| p.timestamp == Some(now)));
        assert_eq!(summary.touched, 6);
        assert_eq!(summary.perturbed, 4);
    }

    #[test]
    fn proportional_first_step_is_bounded() {
        for seed in 0..100 {
            let mut sim = Simulator::seeded(NoiseMode::Proportional { ratio: 0.05 }, seed);
            let (next, _) = sim.step(&single(100.0, Quality::Good), Local::now());
            assert!((value_of(&next) - 100.0).abs() <= 2.5 + 1e-9);
        }
    }

    #[test]
    fn proportional_walk_stays_within_random_walk_bound() {
        let mut sim = Simulator::seeded(NoiseMode::Proportional { ratio: 0.05 }, 42);
        let mut tree = single(100.0, Quality::Good);

        for _ in 0..1000 {
            tree = sim.step(&tree, Local::now()).0;
        }

        let bound = 2.5 * (1000f64).sqrt() * 6.0;
        let value = value_of(&tree);
        assert!(value >= 100.0 - bound && value <= 100.0 + bound, "value {value}");
    }

    #[test]
    fn clamp_bounds_perturbed_values() {
        let mut sim = Simulator::seeded(NoiseMode::Fixed { magnitude: 50.0 }, 5)
            .with_clamp(Some(ValueClamp { min: -1.0, max: 1.0 }));
        let mut tree = single(0.0, Quality::Good);

        for _ in 0..100 {
            tree = sim.step(&tree, Local::now()).0;
            let value = value_of(&tree);
            assert!((-1.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn step_does_not_touch_input_tree() {
        let before = seed_tree();
        let copy = before.clone();
        let mut sim = Simulator::seeded(NoiseMode::fixed(), 6);

        let (next, _) = sim.step(&before, Local::now());

        assert_eq!(before, copy);
        assert_eq!(next.revision(), before.revision() + 1);
    }

    #[test]
    fn same_seed_same_walk() {
        let mut a = Simulator::seeded(NoiseMode::fixed(), 9);
        let mut b = Simulator::seeded(NoiseMode::fixed(), 9);
        let now = Local::now();

        let (ta, _) = a.step(&seed_tree(), now);
        let (tb, _) = b.step(&seed_tree(), now);

        assert_eq!(ta, tb);
    }

    #[test]
    fn separate_streams_do_not_replay_each_other() {
        let config = SimulationConfig {
            seed: Some(9),
            ..SimulationConfig::default()
        };
        let mut task = Simulator::from_config(&config);
        let mut manual = Simulator::from_config_stream(&config, 1);
        let now = Local::now();

        let (ta, _) = task.step(&seed_tree(), now);
        let (tm, _) = manual.step(&seed_tree(), now);
        assert_ne!(ta, tm);

        // Streams themselves are reproducible
        let (again, _) = Simulator::from_config_stream(&config, 1).step(&seed_tree(), now);
        assert_eq!(tm, again);
    }
}
