//! Command-line configuration.

use algoviz_core::{EngineConfig, PlaybackSpeed};

use crate::error::{Result, VisError};

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable fixing the input seed.
pub const SEED_VAR: &str = "ALGOVIZ_SEED";

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the catalog
    List,
    /// Play one algorithm in the terminal
    Play { id: String, size: Option<usize> },
    /// Run the HTTP/WebSocket server
    Serve,
}

/// Host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisConfig {
    pub port: u16,
    pub seed: Option<u64>,
    pub speed_ms: u64,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed: None,
            speed_ms: PlaybackSpeed::DEFAULT_MS,
        }
    }
}

impl VisConfig {
    /// Engine settings derived from this configuration.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            speed_ms: self.speed_ms,
        }
    }

    /// Apply the seed variable's value, ignoring anything unparseable.
    pub fn with_seed_var(mut self, value: Option<&str>) -> Self {
        if let Some(raw) = value {
            match raw.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!(value = raw, "ignoring invalid {SEED_VAR}"),
            }
        }
        self
    }
}

/// Parse positional arguments, program name excluded.
///
/// ```text
/// list
/// play <id> [size] [speed_ms]
/// serve [port] [speed_ms]
/// ```
///
/// No arguments means `serve`.
pub fn parse_args<I>(args: I) -> Result<(Command, VisConfig)>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut config = VisConfig::default();

    let command = match args.next().as_deref() {
        None | Some("serve") => {
            config.port = args.next().and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT);
            Command::Serve
        }
        Some("list") => Command::List,
        Some("play") => {
            let id = args
                .next()
                .ok_or_else(|| VisError::Usage("play needs an algorithm id".into()))?;
            let size = args.next().and_then(|s| s.parse().ok());
            Command::Play { id, size }
        }
        Some(other) => return Err(VisError::Usage(format!("unknown command: {other}"))),
    };

    if let Some(ms) = args.next().and_then(|s| s.parse().ok()) {
        config.speed_ms = PlaybackSpeed::from_millis(ms).millis();
    }

    Ok((command, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_serves_on_default_port() {
        let (command, config) = parse_args(args(&[])).unwrap();
        assert_eq!(command, Command::Serve);
        assert_eq!(config, VisConfig::default());
    }

    #[test]
    fn serve_reads_port_and_speed() {
        let (_, config) = parse_args(args(&["serve", "8080", "200"])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.speed_ms, 200);

        let (_, config) = parse_args(args(&["serve", "not-a-port"])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn play_reads_id_size_and_clamped_speed() {
        let (command, config) = parse_args(args(&["play", "bubble-sort", "12", "5"])).unwrap();
        assert_eq!(
            command,
            Command::Play {
                id: "bubble-sort".into(),
                size: Some(12)
            }
        );
        assert_eq!(config.speed_ms, PlaybackSpeed::MIN_MS);
    }

    #[test]
    fn bad_commands_are_usage_errors() {
        assert!(matches!(parse_args(args(&["play"])), Err(VisError::Usage(_))));
        assert!(matches!(parse_args(args(&["dance"])), Err(VisError::Usage(_))));
    }

    #[test]
    fn seed_variable() {
        let config = VisConfig::default().with_seed_var(Some(" 42 "));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.engine(), EngineConfig::seeded(42));

        let config = VisConfig::default().with_seed_var(Some("forty-two"));
        assert_eq!(config.seed, None);
    }
}
