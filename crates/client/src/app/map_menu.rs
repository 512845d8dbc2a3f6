//! Map builder submenu. Stays open until the map is closed.

use std::io::{BufRead, Write};

use otherside_core::state::{enemy_label, item_label};
use otherside_core::{EnemyKind, GameConfig, ItemKind, MapBuilder, World};

use crate::console::ConsoleResult;

use super::{App, refusal};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MapChoice {
    Generate,
    Insert,
    Delete,
    List,
    Inspect,
    Close,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub(super) fn map_menu(&mut self) -> ConsoleResult<()> {
        while !self.state.map.is_closed() {
            let choice = self.console.choose(
                &format!("\n=== MAP BUILDER ({} zones) ===", self.state.map.len()),
                1,
                &[
                    (
                        format!("Generate a random map ({} zones)", GameConfig::GENERATED_PAIRS),
                        MapChoice::Generate,
                    ),
                    ("Insert a zone".to_owned(), MapChoice::Insert),
                    ("Delete a zone".to_owned(), MapChoice::Delete),
                    ("List the zones of a world".to_owned(), MapChoice::List),
                    ("Inspect a zone".to_owned(), MapChoice::Inspect),
                    ("Close the map".to_owned(), MapChoice::Close),
                ],
            )?;

            match choice {
                MapChoice::Generate => self.generate_map()?,
                MapChoice::Insert => self.insert_zone()?,
                MapChoice::Delete => self.delete_zone()?,
                MapChoice::List => self.list_zones()?,
                MapChoice::Inspect => self.inspect_zone()?,
                MapChoice::Close => self.close_map()?,
            }
        }
        Ok(())
    }

    fn generate_map(&mut self) -> ConsoleResult<()> {
        let result = MapBuilder::new(&mut self.state.map).generate(&mut self.rng);
        match result {
            Ok(pairs) => self.console.say(format!("Map generated with {pairs} zones.")),
            Err(err) => self
                .console
                .say(format!("Generation failed: {}.", refusal(&err))),
        }
    }

    fn insert_zone(&mut self) -> ConsoleResult<()> {
        let max = self.state.map.len() as i64 + 1;
        let position = self
            .console
            .read_int(&format!("Position (1-{max}): "), 1..=max)?;

        let builder = MapBuilder::new(&mut self.state.map);
        let real_choices = enemy_options(builder.real_enemy_choices());
        let upside_choices = enemy_options(builder.upside_enemy_choices());

        let real_enemy = self
            .console
            .choose("Real World enemy:", 0, &real_choices)?;
        let upside_enemy = self
            .console
            .choose("Upside Down enemy:", 0, &upside_choices)?;
        let item = self.console.choose("Item:", 0, &item_options())?;

        let result = MapBuilder::new(&mut self.state.map).insert(
            position as usize,
            real_enemy,
            item,
            upside_enemy,
            &mut self.rng,
        );
        match result {
            Ok(_) => self.console.say(format!("Zone inserted at {position}.")),
            Err(err) => self.console.say(format!("Insert failed: {}.", refusal(&err))),
        }
    }

    fn delete_zone(&mut self) -> ConsoleResult<()> {
        if self.state.map.is_empty() {
            return self.console.say("There are no zones to delete.");
        }
        let max = self.state.map.len() as i64;
        let position = self
            .console
            .read_int(&format!("Position (1-{max}): "), 1..=max)?;

        let result =
            MapBuilder::new(&mut self.state.map).delete(position as usize, &mut self.state.roster);
        match result {
            Ok(removed) => self.console.say(format!("Deleted:\n{removed}")),
            Err(err) => self.console.say(format!("Delete failed: {}.", refusal(&err))),
        }
    }

    fn list_zones(&mut self) -> ConsoleResult<()> {
        let world = self.console.choose(
            "Which world?",
            0,
            &[
                (World::Real.to_string(), World::Real),
                (World::UpsideDown.to_string(), World::UpsideDown),
            ],
        )?;

        let zones = MapBuilder::new(&mut self.state.map).list(world);
        if zones.is_empty() {
            return self.console.say("The map is empty.");
        }
        self.console.say(format!("--- {world} ---"))?;
        for (ordinal, zone) in zones {
            self.console.say(format!("[{ordinal}] {zone}"))?;
        }
        Ok(())
    }

    fn inspect_zone(&mut self) -> ConsoleResult<()> {
        if self.state.map.is_empty() {
            return self.console.say("The map is empty.");
        }
        let max = self.state.map.len() as i64;
        let position = self
            .console
            .read_int(&format!("Position (1-{max}): "), 1..=max)?;

        let result = MapBuilder::new(&mut self.state.map).inspect(position as usize);
        match result {
            Ok(pair) => self.console.say(pair.to_string()),
            Err(err) => self.console.say(format!("Inspect failed: {}.", refusal(&err))),
        }
    }

    fn close_map(&mut self) -> ConsoleResult<()> {
        let result = MapBuilder::new(&mut self.state.map).close();
        match result {
            Ok(()) => {
                tracing::info!(zones = self.state.map.len(), "map closed");
                self.console.say("Map closed. No more edits.")
            }
            Err(err) => self.console.say(format!("The map cannot close yet: {}.", refusal(&err))),
        }
    }
}

fn enemy_options(choices: Vec<Option<EnemyKind>>) -> Vec<(String, Option<EnemyKind>)> {
    choices
        .into_iter()
        .map(|enemy| (enemy_label(enemy).to_owned(), enemy))
        .collect()
}

fn item_options() -> Vec<(String, Option<ItemKind>)> {
    use strum::IntoEnumIterator;

    core::iter::once(None)
        .chain(ItemKind::iter().map(Some))
        .map(|item| (item_label(item).to_owned(), item))
        .collect()
}
