//! Status lines for the turn menu.

use crate::map::GameMap;
use crate::state::Player;

/// Name, world, stats and inventory of `player`.
pub fn player_status(player: &Player, map: &GameMap) -> String {
    let ordinal = player
        .position
        .and_then(|pair| map.store().ordinal_of(player.world, pair));
    let place = match ordinal {
        Some(ordinal) => format!("{}, zone {ordinal}", player.world),
        None => player.world.to_string(),
    };
    format!(
        "Player: {}\nWorld: {place}\n{}\nInventory: {}",
        player.name, player.stats, player.inventory
    )
}

/// Tags of the zone `player` stands on, in their current world.
pub fn zone_status(player: &Player, map: &GameMap) -> String {
    let zone = player
        .position
        .and_then(|pair| Some((map.store().ordinal_of(player.world, pair)?, pair)))
        .and_then(|(ordinal, pair)| Some((ordinal, map.zone(player.world, pair)?)));
    match zone {
        Some((ordinal, zone)) => format!("{} zone [{ordinal}]: {zone}", player.world),
        None => format!("{}: no zone", player.world),
    }
}
