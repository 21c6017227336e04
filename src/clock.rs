//! Simulated clock and CPU-burst sampling. The PRNG is owned by the
//! simulator, never global (`rand::thread_rng()`), so tests can pin a seed
//! for determinism — `hypervisor::scheduler`'s RNG-backed load balancing
//! uses the same injected-RNG shape for real entropy; here the seed is
//! explicit rather than sourced from the OS, since reproducibility matters
//! more than randomness.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Wraps the simulator's seeded RNG so call sites never reach for
/// `rand::thread_rng()`.
pub struct SimRng(StdRng);

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        SimRng(StdRng::seed_from_u64(seed))
    }

    pub fn inner(&mut self) -> &mut StdRng {
        &mut self.0
    }
}

/// Samples a CPU-burst length for a freshly dispatched process. Swappable
/// so tests can force deterministic bursts instead of a real distribution.
pub trait BurstModel {
    fn sample(&self, rng: &mut SimRng, process_name: &str) -> u32;
}

/// The name-keyed burst-length distribution table. First matching
/// substring wins; order matters.
pub struct DefaultBurstModel;

impl BurstModel for DefaultBurstModel {
    fn sample(&self, rng: &mut SimRng, process_name: &str) -> u32 {
        let range = if process_name.contains("io_bound") {
            2..=6
        } else if process_name.contains("cpu_bound") {
            8..=15
        } else if process_name.contains("short") {
            1..=4
        } else {
            3..=10
        };
        rng.inner().gen_range(range)
    }
}

/// Forces every burst to a fixed length, used only by tests.
pub struct FixedBurstModel(pub u32);

impl BurstModel for FixedBurstModel {
    fn sample(&self, _rng: &mut SimRng, _process_name: &str) -> u32 {
        self.0
    }
}
