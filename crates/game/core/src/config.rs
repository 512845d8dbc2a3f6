/// Game configuration constants.
///
/// Every rule number the engine relies on lives here so the map builder,
/// combat engine and match engine agree on a single source of truth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig;

impl GameConfig {
    // ===== roster =====
    /// Maximum number of players taking part in one match.
    pub const MAX_PLAYERS: usize = 4;
    /// Longest display name accepted at setup (characters).
    pub const MAX_NAME_LEN: usize = 63;
    /// Name used when a player submits an empty name.
    pub const DEFAULT_PLAYER_NAME: &'static str = "Player";
    /// Prefix given to the player who claims the special variant.
    pub const SPECIAL_VARIANT_PREFIX: &'static str = "Eleven_";

    // ===== stats =====
    pub const STAT_MIN: i32 = 1;
    pub const STAT_MAX: i32 = 20;
    pub const TRADEOFF_DELTA: i32 = 3;
    pub const SPECIAL_ATTACK_BONUS: i32 = 4;
    pub const SPECIAL_DEFENSE_BONUS: i32 = 4;
    pub const SPECIAL_LUCK_PENALTY: i32 = 7;

    // ===== inventory =====
    pub const INVENTORY_SLOTS: usize = 3;

    // ===== map =====
    /// Number of mirrored pairs created by a generation pass.
    pub const GENERATED_PAIRS: usize = 15;
    /// Minimum number of pairs required to close the map.
    pub const MIN_CLOSED_PAIRS: usize = 15;

    // ===== combat =====
    /// Player encounter HP is `BASE_HP + defense`.
    pub const BASE_HP: i32 = 10;
    /// Percent chance (on a d100) that a defeated enemy leaves its zone for good.
    pub const DESPAWN_CHANCE: u32 = 50;
    /// Flat damage of the offensive instrument when used in combat.
    pub const INSTRUMENT_DAMAGE: i32 = 5;

    // ===== history =====
    /// Number of recent winners kept by the match record.
    pub const RECENT_WINNERS: usize = 3;
}
