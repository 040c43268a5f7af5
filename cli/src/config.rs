use std::fs;
use std::path::Path;

use anyhow::Context;
use minewager_core::{CellCount, Coins, Coord, SessionConfig};

/// Command-line settings, applied over the config file.
#[derive(clap::Args, Debug, Default)]
pub(crate) struct Overrides {
    /// Starting coin balance
    #[arg(long)]
    coins: Option<Coins>,

    /// Board side length
    #[arg(long)]
    size: Option<Coord>,

    /// Smallest accepted bet
    #[arg(long)]
    min_bet: Option<Coins>,

    /// Mine count offered for the first round
    #[arg(long)]
    mines: Option<CellCount>,

    /// Upper bound on the coin balance
    #[arg(long)]
    max_coins: Option<Coins>,
}

impl Overrides {
    fn apply(&self, config: &mut SessionConfig) {
        if let Some(coins) = self.coins {
            config.starting_coins = coins;
        }
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(min_bet) = self.min_bet {
            config.min_bet = min_bet;
        }
        if let Some(mines) = self.mines {
            config.default_mines = mines;
        }
        if let Some(cap) = self.max_coins {
            config.max_coins_cap = Some(cap);
        }
    }
}

/// Defaults, then the TOML file at `path`, then `overrides`.
pub(crate) fn load(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<SessionConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            parse(&text).with_context(|| format!("Could not parse {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate().context("Invalid session settings")?;
    log::debug!("Session config: {config:?}");
    Ok(config)
}

fn parse(text: &str) -> anyhow::Result<SessionConfig> {
    Ok(toml::from_str(text)?)
}
