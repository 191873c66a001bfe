use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "gripfire")]
#[command(about = "Doom-style terminal fire driven by a grip-strength sensor")]
pub struct Cli {
    /// Grip sensor endpoint returning {"grip": lbs, "max": lbs}
    #[arg(long, default_value = "http://gripper.local/data")]
    pub url: String,

    /// Fire buffer width in pixels
    #[arg(long, default_value_t = 90)]
    pub width: usize,

    /// Fire buffer height in pixels
    #[arg(long, default_value_t = 40)]
    pub height: usize,

    /// Reading (lbs) at which the flames hit max intensity
    #[arg(long, default_value_t = 150.0)]
    pub hard_cap: f64,

    /// Minimum source intensity, so an idle flame stays visible
    #[arg(long, default_value_t = 5)]
    pub idle_floor: u8,

    /// Sensor poll period in milliseconds
    #[arg(long, default_value_t = 200)]
    pub poll_ms: u64,

    /// Seed for the decay RNG (reproducible flames)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub width: usize,
    pub height: usize,
    pub hard_cap: f64,
    pub idle_floor: u8,
    pub poll_every: Duration,
    pub seed: Option<u64>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            url: cli.url,
            // A fire needs a source row plus at least one row to burn in.
            width: cli.width.max(1),
            height: cli.height.max(2),
            hard_cap: cli.hard_cap,
            idle_floor: cli.idle_floor,
            poll_every: Duration::from_millis(cli.poll_ms.max(1)),
            seed: cli.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_gripper_rig() {
        let cfg: Config = Cli::parse_from(["gripfire"]).into();
        assert_eq!(cfg.width, 90);
        assert_eq!(cfg.height, 40);
        assert_eq!(cfg.hard_cap, 150.0);
        assert_eq!(cfg.idle_floor, 5);
        assert_eq!(cfg.poll_every, Duration::from_millis(200));
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn degenerate_dimensions_are_bumped() {
        let cfg: Config = Cli::parse_from(["gripfire", "--width", "0", "--height", "1"]).into();
        assert_eq!(cfg.width, 1);
        assert_eq!(cfg.height, 2);
    }
}
