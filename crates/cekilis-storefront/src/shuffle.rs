//! Display-order randomisation applied to every fetched catalog page.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Permutes an index slice in place. Implementations must only reorder.
pub trait Shuffle: Send + Sync {
    fn shuffle_indices(&self, order: &mut [usize]);
}

/// Uniform Fisher-Yates shuffle on the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShuffle;

impl Shuffle for RandomShuffle {
    fn shuffle_indices(&self, order: &mut [usize]) {
        order.shuffle(&mut rand::thread_rng());
    }
}

/// Reproducible shuffle for tests and demos.
#[derive(Debug)]
pub struct SeededShuffle {
    rng: Mutex<StdRng>,
}

impl SeededShuffle {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Shuffle for SeededShuffle {
    fn shuffle_indices(&self, order: &mut [usize]) {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        order.shuffle(&mut *rng);
    }
}

/// Keeps store order.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityShuffle;

impl Shuffle for IdentityShuffle {
    fn shuffle_indices(&self, _order: &mut [usize]) {}
}

/// Reorder `items` by a permutation drawn from `shuffle`.
pub fn shuffled<T>(shuffle: &dyn Shuffle, items: Vec<T>) -> Vec<T> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    shuffle.shuffle_indices(&mut order);
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots.get_mut(index).and_then(Option::take))
        .collect()
}
