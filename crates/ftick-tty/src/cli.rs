use std::path::PathBuf;

use clap::Parser;
use ftick_core::{FrameLoop, TickerConfig, frame_loop::DEFAULT_FPS};

use crate::app;
use crate::error::{HostError, Result};
use crate::logging;
use crate::messages::{MessageSource, load_messages_file};

#[derive(Debug, Parser)]
#[command(
    name = "ftick",
    about = "Scroll one message lane through several synchronized terminal windows",
    version
)]
pub struct Cli {
    /// Messages to scroll. Without any, the dashboard lane is shown.
    pub messages: Vec<String>,

    /// Scroll speed, cells per second.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Blank cells between consecutive messages.
    #[arg(long)]
    pub gap: Option<f64>,

    /// Number of windows across the screen.
    #[arg(long)]
    pub windows: Option<usize>,

    /// Copies of the message list per ring.
    #[arg(long)]
    pub repeats: Option<usize>,

    /// TOML or JSON ticker config. Flags override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read messages from a file, one per line.
    #[arg(long, value_name = "FILE", conflicts_with = "messages")]
    pub messages_file: Option<PathBuf>,

    /// Frames per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Write logs here. Filter with FTICK_LOG.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Config file (or the terminal preset) with flag overrides applied.
    pub fn ticker_config(&self) -> Result<TickerConfig> {
        let mut config = match &self.config {
            Some(path) => TickerConfig::from_file(path)?,
            None => TickerConfig::cells(),
        };
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(gap) = self.gap {
            config.gap = gap;
        }
        if let Some(windows) = self.windows {
            config.window_count = windows;
        }
        if let Some(repeats) = self.repeats {
            config.repeats = repeats;
        }
        Ok(config.validated()?)
    }

    pub fn message_source(&self) -> Result<MessageSource> {
        if let Some(path) = &self.messages_file {
            return Ok(MessageSource::Fixed(load_messages_file(path)?));
        }
        if self.messages.is_empty() {
            Ok(MessageSource::Dashboard)
        } else {
            Ok(MessageSource::Fixed(self.messages.clone()))
        }
    }

    pub fn frame_loop(&self) -> Result<FrameLoop> {
        if self.fps == 0 {
            return Err(HostError::invalid("fps must be > 0"));
        }
        Ok(FrameLoop::from_fps(self.fps))
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_file.as_deref())?;
    let config = cli.ticker_config()?;
    let source = cli.message_source()?;
    let frame_loop = cli.frame_loop()?;
    tracing::info!(
        speed = config.speed,
        gap = config.gap,
        windows = config.window_count,
        live = source.is_live(),
        "starting ticker"
    );
    app::run(config, source, frame_loop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftick_core::ConfigError;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ftick").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_terminal_preset_and_dashboard() {
        let cli = parse(&[]);
        assert_eq!(cli.ticker_config().unwrap(), TickerConfig::cells());
        assert_eq!(cli.message_source().unwrap(), MessageSource::Dashboard);
        assert_eq!(cli.frame_loop().unwrap().interval(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn flags_override_preset() {
        let cli = parse(&["--speed", "20", "--gap", "2", "--windows", "5", "--repeats", "3"]);
        let config = cli.ticker_config().unwrap();
        assert_eq!(config.speed, 20.0);
        assert_eq!(config.gap, 2.0);
        assert_eq!(config.window_count, 5);
        assert_eq!(config.repeats, 3);
    }

    #[test]
    fn positional_messages_are_fixed() {
        let cli = parse(&["HELLO", "WORLD"]);
        assert_eq!(
            cli.message_source().unwrap(),
            MessageSource::Fixed(vec!["HELLO".into(), "WORLD".into()])
        );
    }

    #[test]
    fn invalid_override_is_a_config_error() {
        let cli = parse(&["--windows", "0"]);
        let err = cli.ticker_config().unwrap_err();
        assert!(matches!(err, HostError::Config(ConfigError::Validation(_))));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn oversized_counts_are_config_errors() {
        for args in [["--windows", "1000000000"], ["--repeats", "1000000000"]] {
            let err = parse(&args).ticker_config().unwrap_err();
            assert!(matches!(err, HostError::Config(ConfigError::Validation(_))), "{err:?}");
            assert_eq!(err.exit_code(), 2);
        }
    }

    #[test]
    fn zero_fps_is_rejected() {
        let cli = parse(&["--fps", "0"]);
        assert!(matches!(cli.frame_loop(), Err(HostError::InvalidArgument { .. })));
    }

    #[test]
    fn messages_file_conflicts_with_positional_messages() {
        let result = Cli::try_parse_from(["ftick", "--messages-file", "m.txt", "HELLO"]);
        assert!(result.is_err());
    }
}
