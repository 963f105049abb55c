use rand::Rng;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::courier::{Courier, CourierError};
use crate::domain::kernel::Location;

// ============================================================================
// Simulation Configuration
// ============================================================================
//
// Defaults are usable as-is; every field can be overridden through a
// DISPATCH_* environment variable.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Number of couriers in the fleet
    pub courier_count: usize,
    /// Ticks to run before shutting down
    pub total_ticks: u64,
    /// Pause between ticks
    pub tick_interval_ms: u64,
    /// Orders submitted at the start of every tick
    pub orders_per_tick: usize,
    /// Upper bound for generated order volumes
    pub max_order_volume: i32,
    /// Fixed seed for reproducible runs
    pub seed: Option<u64>,
    /// Port for /metrics and /health; disabled when unset
    pub metrics_port: Option<u16>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            courier_count: 5,
            total_ticks: 30,
            tick_interval_ms: 500,
            orders_per_tick: 1,
            max_order_volume: 15,
            seed: None,
            metrics_port: None,
        }
    }
}

/// Vehicle kinds handed out round-robin when building the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Pedestrian,
    Bicycle,
    Car,
}

impl Transport {
    const ROTATION: [Transport; 3] = [Transport::Pedestrian, Transport::Bicycle, Transport::Car];

    pub fn speed(self) -> i32 {
        match self {
            Transport::Pedestrian => 1,
            Transport::Bicycle => 2,
            Transport::Car => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Pedestrian => "pedestrian",
            Transport::Bicycle => "bicycle",
            Transport::Car => "car",
        }
    }
}

impl SimulationConfig {
    /// Defaults overridden by DISPATCH_* environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = parse(&lookup, "DISPATCH_COURIERS")? {
            config.courier_count = v;
        }
        if let Some(v) = parse(&lookup, "DISPATCH_TICKS")? {
            config.total_ticks = v;
        }
        if let Some(v) = parse(&lookup, "DISPATCH_TICK_INTERVAL_MS")? {
            config.tick_interval_ms = v;
        }
        if let Some(v) = parse(&lookup, "DISPATCH_ORDERS_PER_TICK")? {
            config.orders_per_tick = v;
        }
        if let Some(v) = parse(&lookup, "DISPATCH_MAX_ORDER_VOLUME")? {
            config.max_order_volume = v;
        }
        config.seed = parse(&lookup, "DISPATCH_SEED")?;
        config.metrics_port = parse(&lookup, "DISPATCH_METRICS_PORT")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.courier_count == 0 {
            return Err(ConfigError::Invalid {
                key: "courier_count",
                value: self.courier_count.to_string(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "tick_interval_ms",
                value: self.tick_interval_ms.to_string(),
            });
        }
        if self.max_order_volume <= 0 {
            return Err(ConfigError::Invalid {
                key: "max_order_volume",
                value: self.max_order_volume.to_string(),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Couriers at random grid positions. Transport cycles pedestrian,
    /// bicycle, car; cars carry an extra trunk.
    pub fn build_fleet<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Courier>, CourierError> {
        (0..self.courier_count)
            .map(|i| -> Result<Courier, CourierError> {
                let transport = Transport::ROTATION[i % Transport::ROTATION.len()];
                let name = format!("courier-{}-{}", i + 1, transport.as_str());
                let mut courier = Courier::new(name, transport.speed(), Location::random(rng))?;
                if transport == Transport::Car {
                    courier.add_storage_place("Trunk", 20)?;
                }
                Ok(courier)
            })
            .collect()
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.courier_count, 5);
        assert_eq!(config.tick_interval(), Duration::from_millis(500));
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = SimulationConfig::from_lookup(lookup_from(&[
            ("DISPATCH_COURIERS", "3"),
            ("DISPATCH_TICKS", "12"),
            ("DISPATCH_SEED", "42"),
            ("DISPATCH_METRICS_PORT", " 9100 "),
        ]))
        .unwrap();

        assert_eq!(config.courier_count, 3);
        assert_eq!(config.total_ticks, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.metrics_port, Some(9100));
        assert_eq!(config.orders_per_tick, 1);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = SimulationConfig::from_lookup(lookup_from(&[("DISPATCH_TICKS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DISPATCH_TICKS", .. }));
    }

    #[test]
    fn test_validation_rejects_zero_tick_interval() {
        let err = SimulationConfig::from_lookup(lookup_from(&[("DISPATCH_TICK_INTERVAL_MS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "tick_interval_ms", .. }));

        let config = SimulationConfig { tick_interval_ms: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_fleet() {
        let err = SimulationConfig::from_lookup(lookup_from(&[("DISPATCH_COURIERS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "courier_count", .. }));
    }

    #[test]
    fn test_build_fleet_rotates_transport() {
        let config = SimulationConfig { courier_count: 4, ..Default::default() };
        let mut rng = SmallRng::seed_from_u64(1);

        let fleet = config.build_fleet(&mut rng).unwrap();

        let speeds: Vec<i32> = fleet.iter().map(|c| c.speed()).collect();
        assert_eq!(speeds, vec![1, 2, 3, 1]);
        assert_eq!(fleet[2].places().len(), 2);
        assert_eq!(fleet[2].places()[1].name(), "Trunk");
        assert_eq!(fleet[0].places().len(), 1);
        assert_eq!(fleet[3].name(), "courier-4-pedestrian");
    }
}
