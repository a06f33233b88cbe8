use sculk_core::constants::MAX_GROWTH_RATE_RADIUS;
use sculk_core::{SculkError, SubstrateTag};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning parameters of a spreader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreaderConfig {
    /// Selects the world-generation profile: no chunk gating, no merging,
    /// and a horizontal leash around the origin.
    pub world_generation: bool,
    /// Blocks the spread may convert into sculk.
    pub substrate: SubstrateTag,
    /// Charge spent when sculk places a growth.
    pub growth_spawn_cost: u32,
    /// Distance from the origin inside which no growths are placed.
    pub no_growth_radius: u32,
    /// One in this many ticks a sculk or vein cursor loses charge.
    pub charge_decay_rate: u32,
    /// One in this many decay ticks applies the distance penalty.
    pub additional_decay_rate: u32,
}

impl SpreaderConfig {
    /// Profile for spreading in a running world.
    pub const fn live() -> Self {
        Self {
            world_generation: false,
            substrate: SubstrateTag::Live,
            growth_spawn_cost: 10,
            no_growth_radius: 4,
            charge_decay_rate: 10,
            additional_decay_rate: 5,
        }
    }

    /// Profile for spreading while the world is generated.
    pub const fn world_gen() -> Self {
        Self {
            world_generation: true,
            substrate: SubstrateTag::WorldGen,
            growth_spawn_cost: 50,
            no_growth_radius: 1,
            charge_decay_rate: 5,
            additional_decay_rate: 10,
        }
    }

    /// Reject values that would make random draws or the decay curve
    /// ill-defined.
    pub fn validate(&self) -> Result<(), SculkError> {
        if self.charge_decay_rate == 0 {
            return Err(SculkError::ZeroChargeDecayRate);
        }
        if self.additional_decay_rate == 0 {
            return Err(SculkError::ZeroAdditionalDecayRate);
        }
        if self.growth_spawn_cost == 0 {
            return Err(SculkError::ZeroGrowthSpawnCost);
        }
        if self.no_growth_radius >= MAX_GROWTH_RATE_RADIUS {
            return Err(SculkError::NoGrowthRadiusTooLarge(
                self.no_growth_radius,
                MAX_GROWTH_RATE_RADIUS,
            ));
        }
        Ok(())
    }

    /// Clamp out-of-range values into the nearest valid ones, logging what
    /// was wrong. Configs built in code never pass through the loader.
    pub fn sanitized(self) -> Self {
        if let Err(e) = self.validate() {
            log::warn!("spreader config out of range ({e}), clamping");
        }
        Self {
            growth_spawn_cost: self.growth_spawn_cost.max(1),
            no_growth_radius: self.no_growth_radius.min(MAX_GROWTH_RATE_RADIUS - 1),
            charge_decay_rate: self.charge_decay_rate.max(1),
            additional_decay_rate: self.additional_decay_rate.max(1),
            ..self
        }
    }
}

impl Default for SpreaderConfig {
    fn default() -> Self {
        Self::live()
    }
}

/// Base profile named in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    Live,
    WorldGen,
}

/// On-disk form: a profile plus optional overrides of its values.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    profile: Profile,
    #[serde(default)]
    substrate: Option<SubstrateTag>,
    #[serde(default)]
    growth_spawn_cost: Option<u32>,
    #[serde(default)]
    no_growth_radius: Option<u32>,
    #[serde(default)]
    charge_decay_rate: Option<u32>,
    #[serde(default)]
    additional_decay_rate: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse spreader config RON: {0}")]
    ParseError(String),
    #[error("Invalid spreader config: {0}")]
    Invalid(#[from] SculkError),
}

fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a spreader config from RON, e.g.
/// `(profile: Live, charge_decay_rate: 12)`.
pub fn load_config_from_str(ron_str: &str) -> Result<SpreaderConfig, ConfigError> {
    let file: ConfigFile = ron_options()
        .from_str(ron_str)
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    let base = match file.profile {
        Profile::Live => SpreaderConfig::live(),
        Profile::WorldGen => SpreaderConfig::world_gen(),
    };
    let config = SpreaderConfig {
        world_generation: base.world_generation,
        substrate: file.substrate.unwrap_or(base.substrate),
        growth_spawn_cost: file.growth_spawn_cost.unwrap_or(base.growth_spawn_cost),
        no_growth_radius: file.no_growth_radius.unwrap_or(base.no_growth_radius),
        charge_decay_rate: file.charge_decay_rate.unwrap_or(base.charge_decay_rate),
        additional_decay_rate: file
            .additional_decay_rate
            .unwrap_or(base.additional_decay_rate),
    };
    config.validate()?;
    Ok(config)
}

/// Parse any RON-encoded value with the same options as spreader configs.
pub(crate) fn from_ron_str<T: serde::de::DeserializeOwned>(ron_str: &str) -> Result<T, ConfigError> {
    ron_options()
        .from_str(ron_str)
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_validate() {
        assert!(SpreaderConfig::live().validate().is_ok());
        assert!(SpreaderConfig::world_gen().validate().is_ok());
    }

    #[test]
    fn test_load_profile_defaults() {
        let config = load_config_from_str("(profile: WorldGen)").expect("should parse");
        assert_eq!(config, SpreaderConfig::world_gen());
    }

    #[test]
    fn test_load_with_overrides() {
        let config = load_config_from_str(
            "(profile: Live, charge_decay_rate: 3, substrate: WorldGen)",
        )
        .expect("should parse");
        assert!(!config.world_generation);
        assert_eq!(config.charge_decay_rate, 3);
        assert_eq!(config.substrate, SubstrateTag::WorldGen);
        assert_eq!(config.growth_spawn_cost, 10);
    }

    #[test]
    fn test_zero_rate_rejected() {
        let result = load_config_from_str("(profile: Live, additional_decay_rate: 0)");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(SculkError::ZeroAdditionalDecayRate))
        ));
    }

    #[test]
    fn test_radius_too_large_rejected() {
        let mut config = SpreaderConfig::live();
        config.no_growth_radius = 24;
        assert_eq!(
            config.validate(),
            Err(SculkError::NoGrowthRadiusTooLarge(24, 24))
        );
    }

    #[test]
    fn test_sanitized_clamps_into_range() {
        let config = SpreaderConfig {
            charge_decay_rate: 0,
            additional_decay_rate: 0,
            growth_spawn_cost: 0,
            no_growth_radius: 40,
            ..SpreaderConfig::live()
        }
        .sanitized();
        assert!(config.validate().is_ok());
        assert_eq!(config.charge_decay_rate, 1);
        assert_eq!(config.additional_decay_rate, 1);
        assert_eq!(config.growth_spawn_cost, 1);
        assert_eq!(config.no_growth_radius, 23);
        assert_eq!(SpreaderConfig::world_gen().sanitized(), SpreaderConfig::world_gen());
    }

    #[test]
    fn test_bundled_configs() {
        let live = load_config_from_str(include_str!("../../../data/spreader/live.ron"))
            .expect("live config should parse");
        assert_eq!(live, SpreaderConfig::live());
        let world_gen = load_config_from_str(include_str!("../../../data/spreader/world_gen.ron"))
            .expect("world-gen config should parse");
        assert_eq!(world_gen, SpreaderConfig::world_gen());
    }

    #[test]
    fn test_parse_error() {
        let result = load_config_from_str("(profile: Sideways)");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
