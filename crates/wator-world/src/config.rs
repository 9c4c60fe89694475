//! Simulation parameters.

use core::str::FromStr;

use crate::{ConfigError, ConfigResult};

/// Options recognized by the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatorConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub initial_fish_count: usize,
    pub initial_shark_count: usize,
    pub fish_breed_ticks: u32,
    pub shark_breed_ticks: u32,
    pub shark_starve_ticks: u32,
    pub worker_count: usize,
    /// Fixed seed for placement and movement order; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for WatorConfig {
    fn default() -> Self {
        Self {
            grid_width: 400,
            grid_height: 400,
            initial_fish_count: 10_000,
            initial_shark_count: 4_000,
            fish_breed_ticks: 3,
            shark_breed_ticks: 8,
            shark_starve_ticks: 3,
            worker_count: 4,
            seed: None,
        }
    }
}

impl WatorConfig {
    /// Defaults overridden by `WATOR_*` environment variables.
    ///
    /// Unset variables keep their default; set but unparseable ones are an error.
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();

        env_override("WATOR_WIDTH", &mut config.grid_width)?;
        env_override("WATOR_HEIGHT", &mut config.grid_height)?;
        env_override("WATOR_FISH", &mut config.initial_fish_count)?;
        env_override("WATOR_SHARKS", &mut config.initial_shark_count)?;
        env_override("WATOR_FISH_BREED", &mut config.fish_breed_ticks)?;
        env_override("WATOR_SHARK_BREED", &mut config.shark_breed_ticks)?;
        env_override("WATOR_SHARK_STARVE", &mut config.shark_starve_ticks)?;
        env_override("WATOR_WORKERS", &mut config.worker_count)?;

        if let Ok(value) = std::env::var("WATOR_SEED") {
            let seed = value
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: "WATOR_SEED",
                    value,
                })?;
            config.seed = Some(seed);
        }

        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        for (name, ticks) in [
            ("fish_breed_ticks", self.fish_breed_ticks),
            ("shark_breed_ticks", self.shark_breed_ticks),
            ("shark_starve_ticks", self.shark_starve_ticks),
        ] {
            if ticks == 0 {
                return Err(ConfigError::ZeroTimer { name });
            }
        }

        if self.worker_count == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        let capacity = self.grid_width.saturating_mul(self.grid_height);
        let requested = self
            .initial_fish_count
            .saturating_add(self.initial_shark_count);
        if requested > capacity {
            return Err(ConfigError::Overpopulated {
                requested,
                capacity,
            });
        }

        Ok(())
    }

    /// Worker count clamped to `1..=grid_width`.
    pub fn effective_workers(&self) -> usize {
        self.worker_count.clamp(1, self.grid_width.max(1))
    }

    pub const fn rules(&self) -> BreedRules {
        BreedRules {
            fish_breed: self.fish_breed_ticks,
            shark_breed: self.shark_breed_ticks,
            shark_starve: self.shark_starve_ticks,
        }
    }
}

/// Timer values an agent is reset to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BreedRules {
    pub fish_breed: u32,
    pub shark_breed: u32,
    pub shark_starve: u32,
}

fn env_override<T: FromStr>(var: &'static str, slot: &mut T) -> ConfigResult<()> {
    if let Ok(value) = std::env::var(var) {
        *slot = value
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { var, value })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> WatorConfig {
        WatorConfig {
            grid_width: 4,
            grid_height: 4,
            initial_fish_count: 10,
            initial_shark_count: 6,
            worker_count: 2,
            ..WatorConfig::default()
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(WatorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_full_grid_is_valid() {
        assert_eq!(small().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_overpopulation() {
        let config = WatorConfig {
            initial_shark_count: 7,
            ..small()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Overpopulated {
                requested: 17,
                capacity: 16
            })
        );
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let config = WatorConfig {
            grid_height: 0,
            initial_fish_count: 0,
            initial_shark_count: 0,
            ..small()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDimension { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_timer() {
        let config = WatorConfig {
            shark_starve_ticks: 0,
            ..small()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroTimer {
                name: "shark_starve_ticks"
            })
        );
    }

    #[test]
    fn test_rejects_zero_workers() {
        let config = WatorConfig {
            worker_count: 0,
            ..small()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWorkers));
    }

    #[test]
    fn test_workers_clamped_to_width() {
        let config = WatorConfig {
            worker_count: 64,
            ..small()
        };
        assert_eq!(config.effective_workers(), 4);
        assert_eq!(small().effective_workers(), 2);
    }
}
