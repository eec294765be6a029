use std::{
    fs,
    io::{self, BufRead, BufReader, IsTerminal, Write},
    ops::ControlFlow,
    path::PathBuf,
};

mod command;
mod dispatch;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use command::Command;
use dispatch::{Dispatcher, Outcome};
use terminal::Colorize;
use tracing::instrument;
use vfs::{Clock, Config, Error, Store, SystemClock};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from this file instead of standard input
    script: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = self.load_config()?;
        let mut shell = Shell::new(Store::new(), &config);
        let (mut out, mut err) = (io::stdout(), io::stderr());

        if let Some(path) = &self.script {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            shell.run(BufReader::new(file), &mut out, &mut err, false)
        } else {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            shell.run(stdin.lock(), &mut out, &mut err, interactive)
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        self.config.as_ref().map_or_else(
            || Ok(Config::default()),
            |path| Config::load(path).map_err(|e| anyhow::anyhow!("{e}")),
        )
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout belongs to the shell
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// The read-eval-print loop.
///
/// Confirmations, listings and empty-listing warnings go to `out`; every
/// other error goes to `err`. Neither kind of error stops the loop.
pub struct Shell<C = SystemClock> {
    dispatcher: Dispatcher<C>,
    prompt: String,
}

impl<C: Clock> Shell<C> {
    pub fn new(store: Store<C>, config: &Config) -> Self {
        Self {
            dispatcher: Dispatcher::new(store, config.timestamps),
            prompt: config.prompt().to_string(),
        }
    }

    /// Runs commands from `input` until `exit` or end of input.
    ///
    /// The prompt is only printed when `interactive` is set.
    pub fn run<R, W, E>(
        &mut self,
        input: R,
        out: &mut W,
        err: &mut E,
        interactive: bool,
    ) -> anyhow::Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut lines = input.lines();
        loop {
            if interactive {
                write!(out, "{}", self.prompt)?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read command")?;

            if self.handle_line(&line, out, err)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    #[instrument(level = "trace", skip(self, out, err))]
    fn handle_line<W: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<ControlFlow<()>> {
        let args: Vec<&str> = line.split_whitespace().collect();

        let command = match Command::parse(&args) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(ControlFlow::Continue(())),
            Err(e) => {
                writeln!(err, "{}", format!("Error: {e}").error())?;
                return Ok(ControlFlow::Continue(()));
            }
        };

        tracing::debug!(?command, "Dispatching");

        match self.dispatcher.execute(command) {
            Ok(Outcome::Exit) => return Ok(ControlFlow::Break(())),
            Ok(Outcome::Message(message)) => writeln!(out, "{}", message.success())?,
            Ok(Outcome::Listing(text)) => writeln!(out, "{text}")?,
            Err(e @ Error::Empty { .. }) => writeln!(out, "{}", format!("Warning: {e}").warning())?,
            Err(e) => writeln!(err, "{}", format!("Error: {e}").error())?,
        }

        Ok(ControlFlow::Continue(()))
    }
}
