//! REPL session
//!
//! Holds everything a command can touch: the API client (and through it the
//! one shared cache), the location-area pagination cursor and the Pokedex.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use tracing::{debug, warn};

use crate::api::{Fetcher, HttpFetcher, PokeApi};
use crate::error::Result;
use crate::models::Pokemon;
use crate::repl::clean_input;
use crate::repl::commands::{catch_probability, Command};

/// Caught pokemon by name.
pub type Pokedex = BTreeMap<String, Pokemon>;

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session<F = HttpFetcher> {
    api: PokeApi<F>,
    next: Option<String>,
    previous: Option<String>,
    pokedex: Pokedex,
    catch_delay: Duration,
    roll: fn() -> f64,
}

fn random_roll() -> f64 {
    rand::random()
}

impl<F: Fetcher> Session<F> {
    pub fn new(api: PokeApi<F>) -> Self {
        Self {
            next: Some(api.first_page_url()),
            previous: None,
            pokedex: Pokedex::new(),
            catch_delay: Duration::from_secs(1),
            roll: random_roll,
            api,
        }
    }

    /// Pause between throwing the ball and the outcome.
    pub fn with_catch_delay(mut self, delay: Duration) -> Self {
        self.catch_delay = delay;
        self
    }

    /// Replaces the source of catch rolls, uniform in `[0, 1)`.
    pub fn with_roll(mut self, roll: fn() -> f64) -> Self {
        self.roll = roll;
        self
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn api(&self) -> &PokeApi<F> {
        &self.api
    }

    // == Execute ==
    /// Runs one input line.
    ///
    /// A failing command is reported on `out` and the session continues.
    /// Only failing to write that report is returned.
    pub async fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let words = clean_input(line);
        let Some((name, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };
        let Some(command) = Command::parse(name) else {
            writeln!(out, "Unknown command")?;
            return Ok(Flow::Continue);
        };
        let argument = args.first().map(String::as_str).unwrap_or_default();
        debug!(command = command.name(), argument, "executing command");

        match self.dispatch(command, argument, out).await {
            Ok(flow) => Ok(flow),
            Err(err) => {
                warn!(command = command.name(), error = %err, "command failed");
                writeln!(out, "error executing {} command: {}", command.name(), err)?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn dispatch<W: Write>(
        &mut self,
        command: Command,
        argument: &str,
        out: &mut W,
    ) -> Result<Flow> {
        match command {
            Command::Help => help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => self.map(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore => self.explore(argument, out).await?,
            Command::Catch => self.catch(argument, out).await?,
            Command::Inspect => self.inspect(argument, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }
        Ok(Flow::Continue)
    }

    // == Handlers ==
    async fn map<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.next.clone() else {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        };
        self.show_page(&url, out).await
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.previous.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };
        self.show_page(&url, out).await
    }

    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        let page = self.api.location_areas(url).await?;
        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        self.next = page.next;
        self.previous = page.previous;
        Ok(())
    }

    async fn explore<W: Write>(&self, area: &str, out: &mut W) -> Result<()> {
        if area.is_empty() {
            writeln!(out, "Please specify an area to explore")?;
            return Ok(());
        }
        writeln!(out, "Exploring {}...", area)?;
        let info = self.api.location_area(area).await?;

        writeln!(out, "Found Pokemon:")?;
        for encounter in &info.pokemon_encounters {
            writeln!(out, "- {}", encounter.pokemon.name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        if name.is_empty() {
            writeln!(out, "Please specify a Pokemon to catch")?;
            return Ok(());
        }
        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        out.flush()?;
        let pokemon = self.api.pokemon(name).await?;

        tokio::time::sleep(self.catch_delay).await;

        let chance = catch_probability(pokemon.base_experience.unwrap_or_default());
        if (self.roll)() < chance {
            writeln!(out, "{} was caught!", name)?;
            self.pokedex.insert(name.to_string(), pokemon);
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "You haven't caught this pokemon yet!")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "Your pokedex is empty, better catch some pokemon!")?;
            return Ok(());
        }
        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}

fn help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for command in Command::ALL {
        writeln!(out, "{}: {}", command.name(), command.description())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const BASE: &str = "http://pokeapi.test/api/v2";

    /// Serves canned bodies and records requested URLs.
    #[derive(Clone, Default)]
    struct FakeFetcher {
        bodies: HashMap<String, String>,
        requested: Arc<Mutex<Vec<String>>>,
    }

    impl FakeFetcher {
        fn with_body(mut self, path: &str, body: &str) -> Self {
            self.bodies.insert(format!("{BASE}{path}"), body.to_string());
            self
        }
    }

    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self
                .bodies
                .get(url)
                .map(|body| body.as_bytes().to_vec())
                .unwrap_or_default())
        }
    }

    const PIKACHU: &str = r#"{
        "id": 25, "name": "pikachu", "base_experience": 112, "height": 4, "weight": 60,
        "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": ""}}],
        "types": [{"slot": 1, "type": {"name": "electric", "url": ""}}]
    }"#;

    fn session(fetcher: FakeFetcher) -> Session<FakeFetcher> {
        let api = PokeApi::new(fetcher, Cache::new(Duration::from_secs(60)), BASE);
        Session::new(api).with_catch_delay(Duration::ZERO)
    }

    async fn run(session: &mut Session<FakeFetcher>, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = session.execute(line, &mut out).await.unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut session = session(FakeFetcher::default());
        let (flow, out) = run(&mut session, "fly away").await;

        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, "Unknown command\n");
    }

    #[tokio::test]
    async fn test_blank_line_is_ignored() {
        let mut session = session(FakeFetcher::default());
        let (flow, out) = run(&mut session, "   ").await;

        assert_eq!(flow, Flow::Continue);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let mut session = session(FakeFetcher::default());
        let (_, out) = run(&mut session, "HELP").await;

        assert!(out.starts_with("Welcome to the Pokedex!\n"));
        for command in Command::ALL {
            assert!(out.contains(&format!("{}: ", command.name())));
        }
    }

    #[tokio::test]
    async fn test_exit() {
        let mut session = session(FakeFetcher::default());
        let (flow, out) = run(&mut session, "exit").await;

        assert_eq!(flow, Flow::Exit);
        assert_eq!(out, "Closing the Pokedex... Goodbye!\n");
    }

    #[tokio::test]
    async fn test_map_pages_forward_and_back() {
        let fetcher = FakeFetcher::default()
            .with_body(
                "/location-area",
                r#"{"count": 4, "next": "http://pokeapi.test/api/v2/location-area?offset=2",
                    "previous": null,
                    "results": [{"name": "area-1", "url": ""}, {"name": "area-2", "url": ""}]}"#,
            )
            .with_body(
                "/location-area?offset=2",
                r#"{"count": 4, "next": null,
                    "previous": "http://pokeapi.test/api/v2/location-area",
                    "results": [{"name": "area-3", "url": ""}, {"name": "area-4", "url": ""}]}"#,
            );
        let requested = fetcher.requested.clone();
        let mut session = session(fetcher);

        let (_, out) = run(&mut session, "mapb").await;
        assert_eq!(out, "you're on the first page\n");

        let (_, out) = run(&mut session, "map").await;
        assert_eq!(out, "area-1\narea-2\n");

        let (_, out) = run(&mut session, "map").await;
        assert_eq!(out, "area-3\narea-4\n");

        let (_, out) = run(&mut session, "map").await;
        assert_eq!(out, "you're on the last page\n");

        let (_, out) = run(&mut session, "mapb").await;
        assert_eq!(out, "area-1\narea-2\n");

        // Going back was served from the cache
        assert_eq!(requested.lock().unwrap().len(), 2);
        assert_eq!(session.api().cache().stats().hits, 1);
    }

    #[tokio::test]
    async fn test_explore() {
        let fetcher = FakeFetcher::default().with_body(
            "/location-area/eterna-forest-area",
            r#"{"pokemon_encounters": [
                {"pokemon": {"name": "caterpie", "url": ""}},
                {"pokemon": {"name": "budew", "url": ""}}
            ]}"#,
        );
        let mut session = session(fetcher);

        let (_, out) = run(&mut session, "explore eterna-forest-area").await;

        assert_eq!(
            out,
            "Exploring eterna-forest-area...\nFound Pokemon:\n- caterpie\n- budew\n"
        );
    }

    #[tokio::test]
    async fn test_explore_without_area() {
        let mut session = session(FakeFetcher::default());
        let (_, out) = run(&mut session, "explore").await;

        assert_eq!(out, "Please specify an area to explore\n");
    }

    #[tokio::test]
    async fn test_failed_command_reports_and_continues() {
        // Unknown URL yields an empty body, which does not decode
        let mut session = session(FakeFetcher::default());
        let (flow, out) = run(&mut session, "explore nowhere").await;

        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("error executing explore command: failed to decode"));
    }

    #[tokio::test]
    async fn test_catch_and_inspect() {
        let fetcher = FakeFetcher::default().with_body("/pokemon/pikachu", PIKACHU);
        let mut session = session(fetcher).with_roll(|| 0.0);

        let (_, out) = run(&mut session, "inspect pikachu").await;
        assert_eq!(out, "You haven't caught this pokemon yet!\n");

        let (_, out) = run(&mut session, "catch Pikachu").await;
        assert_eq!(out, "Throwing a Pokeball at pikachu...\npikachu was caught!\n");
        assert!(session.pokedex().contains_key("pikachu"));

        let (_, out) = run(&mut session, "inspect pikachu").await;
        assert_eq!(
            out,
            "Name: pikachu\nHeight: 4\nWeight: 60\nStats:\n  -hp: 35\nTypes:\n  - electric\n"
        );

        let (_, out) = run(&mut session, "pokedex").await;
        assert_eq!(out, "Your Pokedex:\n - pikachu\n");
    }

    #[tokio::test]
    async fn test_catch_escape() {
        let fetcher = FakeFetcher::default().with_body("/pokemon/pikachu", PIKACHU);
        let mut session = session(fetcher).with_roll(|| 0.99);

        let (_, out) = run(&mut session, "catch pikachu").await;

        assert!(out.ends_with("pikachu escaped!\n"));
        assert!(session.pokedex().is_empty());
    }

    #[tokio::test]
    async fn test_empty_pokedex() {
        let mut session = session(FakeFetcher::default());
        let (_, out) = run(&mut session, "pokedex").await;

        assert_eq!(out, "Your pokedex is empty, better catch some pokemon!\n");
    }
}
