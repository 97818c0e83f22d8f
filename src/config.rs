use anyhow::anyhow;
use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "CAMP Rust",
    about = "Collect-all maze pathfinding with A* implemented in Rust.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to an optional YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to the maze file")]
    pub maze_path: Option<String>,

    #[arg(long, help = "Path to write the solved move sequence as YAML")]
    pub output_path: Option<String>,

    #[arg(long, help = "Cap on frontier pops before giving up on a solve")]
    pub max_expansions: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub maze_path: String,
    pub output_path: Option<String>,
    pub max_expansions: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            maze_path: "maps/example.map".to_string(),
            output_path: None,
            max_expansions: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(maze_path) = &cli.maze_path {
            self.maze_path = maze_path.clone();
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }
        if let Some(max_expansions) = cli.max_expansions {
            self.max_expansions = Some(max_expansions);
        }
        self.validate()?;

        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_expansions == Some(0) {
            return Err(anyhow!("max_expansions must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_yaml() {
        let config =
            Config::from_yaml_str("maze_path: maps/other.map\nmax_expansions: 5000\n").unwrap();
        assert_eq!(config.maze_path, "maps/other.map");
        assert_eq!(config.max_expansions, Some(5000));
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config = Config::from_yaml_str("output_path: result/moves.yaml\n").unwrap();
        assert_eq!(config.maze_path, Config::default().maze_path);
        assert_eq!(config.output_path, Some("result/moves.yaml".to_string()));
    }

    #[test]
    fn test_validate_rejects_zero_expansion_cap() {
        let config = Config {
            max_expansions: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
