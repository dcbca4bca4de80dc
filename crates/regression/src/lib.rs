//! Seeded fixtures for deterministic regression tests.

use gameplay::{Health, Item};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

pub const DEFAULT_SEED: u64 = 42;

pub const ITEM_NAMES: [&str; 12] = [
    "arrow", "Apple", "bandage", "Bread", "compass", "dagger", "Elixir", "flint", "Gem", "helmet",
    "iron ore", "Iron Sword",
];

/// Catalog items in a seed-dependent order.
pub fn shuffled_items(seed: u64) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut items: Vec<Item> = ITEM_NAMES
        .iter()
        .enumerate()
        .map(|(id, name)| Item::new(id as u32, *name))
        .collect();
    items.shuffle(&mut rng);
    items
}

/// Runs a random damage/heal/regen sequence and records health after each step.
pub fn sample_health_trace(seed: u64, steps: usize) -> serde_json::Value {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut health = Health::new();
    let mut samples = Vec::with_capacity(steps);
    for _ in 0..steps {
        match rng.gen_range(0..3) {
            0 => {
                health.take_damage(rng.gen_range(0.0..40.0));
            }
            1 => health.heal(rng.gen_range(0.0..25.0)),
            _ => health.update(rng.gen_range(0.0..2.0)),
        }
        samples.push(health.current_health());
    }
    json!({ "seed": seed, "samples": samples, "deaths": health.deaths() })
}
