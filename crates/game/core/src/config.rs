/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Rounds simulated before an encounter times out.
    pub round_cap: u32,
    /// Weight of the hit-point ratio in the utility harmonic mean.
    pub utility_hp_weight: f64,
    /// Weight of the resource ratio in the utility harmonic mean.
    pub utility_resource_weight: f64,
    /// Target a dying character must reach to fight back to its feet.
    pub fight_for_life_dc: i32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per kind is enough for every category-list family.
    pub const MAX_EFFECTS_PER_FAMILY: usize = 4;
    pub const MAX_ROSTER: usize = 64;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROUND_CAP: u32 = 20;
    pub const DEFAULT_UTILITY_HP_WEIGHT: f64 = 3.0;
    pub const DEFAULT_UTILITY_RESOURCE_WEIGHT: f64 = 1.0;
    pub const DEFAULT_FIGHT_FOR_LIFE_DC: i32 = 10;

    /// Guard against division by an exhausted ratio.
    pub const UTILITY_EPSILON: f64 = 1e-6;

    pub fn new() -> Self {
        Self {
            round_cap: Self::DEFAULT_ROUND_CAP,
            utility_hp_weight: Self::DEFAULT_UTILITY_HP_WEIGHT,
            utility_resource_weight: Self::DEFAULT_UTILITY_RESOURCE_WEIGHT,
            fight_for_life_dc: Self::DEFAULT_FIGHT_FOR_LIFE_DC,
        }
    }

    pub fn with_round_cap(round_cap: u32) -> Self {
        Self {
            round_cap,
            ..Self::new()
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
