//! Command table
//!
//! Every command the REPL understands, with its help text.

/// A REPL command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// All commands, in the order `help` lists them.
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    /// Looks a command up by the word typed at the prompt.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the next location areas",
            Command::MapBack => "Displays the previous location areas",
            Command::Explore => "Explore an area, usage: explore <area_name>",
            Command::Catch => "Catch a pokemon, usage: catch <pokemon>",
            Command::Inspect => "Inspect a pokemon in your pokedex, usage: inspect <pokemon>",
            Command::Pokedex => "See pokemon you've caught in your pokedex",
        }
    }
}

/// Chance of a catch succeeding, from the pokemon's base experience.
pub fn catch_probability(base_experience: u32) -> f64 {
    match base_experience {
        0..=49 => 0.9,
        50..=149 => 0.75,
        150..=249 => 0.7,
        301.. => 0.6,
        _ => 0.8,
    }
}
