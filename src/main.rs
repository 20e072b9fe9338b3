use clap::{Parser, Subcommand};
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use retro_actions::{ActionSpaceLoader, ActionSpaces, DuplicateActionPolicy, HarnessSettings};
use std::path::PathBuf;
use tracing::{debug, info, warn, Subscriber};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    prelude::*,
    reload, EnvFilter, Registry,
};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Inspect and validate per-game action spaces for emulator agents
#[derive(Parser, Debug)]
#[command(name = "retro-actions", version)]
struct Cli {
    /// Settings file (defaults to the per-user config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Action configuration, overrides the settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drop duplicate actions instead of rejecting the configuration
    #[arg(long)]
    dedupe: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the configuration and report what it contains
    Validate,
    /// List games with their gamepad and action count
    Games,
    /// Print every action of a game
    Show { game: String },
    /// Print the mask behind one action index
    Decode { game: String, index: usize },
    /// Write a default settings file if none exists
    InitSettings,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;
    let Cli {
        settings,
        config,
        dedupe,
        command,
    } = Cli::parse();

    // settings pick the final level; until then log at the default one
    let log_filter = setup_logging(std::io::stderr);

    let settings_path = settings.unwrap_or_else(HarnessSettings::default_path);
    let session = Session {
        settings_path,
        config,
        dedupe,
        log_filter,
    };

    match command {
        Command::Validate => {
            let spaces = session.spaces().await?;
            println!(
                "ok: {} gamepads, {} games",
                spaces.registry().len(),
                spaces.game_count()
            );
        }
        Command::Games => {
            let spaces = session.spaces().await?;
            for space in spaces.spaces() {
                println!(
                    "{:<48} {:<10} {:>3} actions",
                    space.game_id(),
                    space.gamepad(),
                    space.len()
                );
            }
        }
        Command::Show { game } => {
            let spaces = session.spaces().await?;
            let space = spaces.get_action_space(&game)?;
            let layout = spaces.layout_for(&game)?;
            println!("{} ({})", space.game_id(), layout.name());
            for (index, mask) in space.iter() {
                println!("{:>3}  {}  [{}]", index, mask, mask.labels(layout).join(", "));
            }
        }
        Command::Decode { game, index } => {
            let spaces = session.spaces().await?;
            let mask = spaces.decode_index(&game, index)?;
            let layout = spaces.layout_for(&game)?;
            println!("{}  [{}]", mask, mask.labels(layout).join(", "));
        }
        Command::InitSettings => {
            HarnessSettings::ensure_default(&session.settings_path)?;
            println!("{}", session.settings_path.display());
        }
    }

    Ok(())
}

type LogFilterHandle = reload::Handle<EnvFilter, Registry>;

struct Session {
    settings_path: PathBuf,
    config: Option<PathBuf>,
    dedupe: bool,
    log_filter: LogFilterHandle,
}

impl Session {
    /// Reads the settings, applies the command line overrides and loads the spaces
    async fn spaces(&self) -> Result<ActionSpaces> {
        let mut settings = HarnessSettings::load(&self.settings_path)?;
        if let Err(e) = self.log_filter.reload(log_filter(&settings.log_level)) {
            warn!("Could not apply log level '{}': {}", settings.log_level, e);
        }
        debug!("Using settings from {}", self.settings_path.display());

        if self.config.is_some() {
            settings.action_config = self.config.clone();
        }
        if self.dedupe {
            settings.duplicate_policy = DuplicateActionPolicy::Dedupe;
        }

        load_spaces(&settings).await
    }
}

async fn load_spaces(settings: &HarnessSettings) -> Result<ActionSpaces> {
    let loader: ActionSpaceLoader = settings.loader();
    match &settings.action_config {
        Some(path) => {
            info!("Loading action configuration from {}", path.display());
            ActionSpaces::from_file_async(&loader, path)
                .await
                .wrap_err_with(|| format!("Invalid action configuration {}", path.display()))
        }
        None => {
            info!("Loading bundled action configuration");
            ActionSpaces::bundled(&loader)
                .map_err(|e| eyre!("Bundled action configuration is invalid: {}", e))
        }
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    Ok(())
}

fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn logging_subscriber<W>(make_writer: W) -> (impl Subscriber + Send + Sync + 'static, LogFilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(log_filter(DEFAULT_LOG_LEVEL));
    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(make_writer),
    );
    (subscriber, handle)
}

fn setup_logging<W>(make_writer: W) -> LogFilterHandle
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (subscriber, handle) = logging_subscriber(make_writer);
    subscriber.init();
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn settings_fallback_warning_is_logged_before_level_is_applied() {
        std::env::remove_var("RUST_LOG");
        let captured = Captured::default();
        let writer = captured.clone();
        let (subscriber, handle) = logging_subscriber(move || writer.clone());

        let dir = tempfile::tempdir().unwrap();
        tracing::subscriber::with_default(subscriber, || {
            let settings = HarnessSettings::load(&dir.path().join("settings.toml")).unwrap();
            assert_eq!(settings, HarnessSettings::default());

            handle.reload(log_filter("error")).unwrap();
            warn!("filtered after narrowing");
        });

        let text = captured.text();
        assert!(text.contains("does not exist, using defaults"), "{}", text);
        assert!(!text.contains("filtered after narrowing"), "{}", text);
    }
}
