use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::modules::support::ports::RandomSource;

/// 线程本地随机源
///
/// 每次调用使用当前线程的 RNG，请求之间不共享状态
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// 固定种子随机源（用于测试和可复现的演示）
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..len),
            // 锁中毒时状态仍可用
            Err(poisoned) => poisoned.into_inner().gen_range(0..len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::support::ports::choose;

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);

        let seq_a: Vec<usize> = (0..10).map(|_| a.pick_index(7)).collect();
        let seq_b: Vec<usize> = (0..10).map(|_| b.pick_index(7)).collect();

        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|i| *i < 7));
    }

    #[test]
    fn test_choose_from_empty() {
        let items: Vec<u8> = Vec::new();
        assert!(choose(&ThreadRandom, &items).is_none());
    }
}
