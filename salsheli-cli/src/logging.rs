//! Logger setup: user-facing output goes through `log` to stdout, optionally
//! teed into a logfile with ANSI codes removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Writes everything to stdout and an ANSI-stripped copy to a file.
struct Tee {
    file: strip_ansi_escapes::Writer<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

pub(crate) fn init_logger(
    quiet: bool,
    verbose: bool,
    logfile: Option<&Path>,
) -> Result<(), CliError> {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("salsheli", level)
        .parse_default_env()
        .format(move |buf, record| {
            if verbose {
                write!(
                    buf,
                    "[{} {:5} {}] ",
                    buf.timestamp_seconds(),
                    record.level(),
                    record.target()
                )?;
            }
            match record.level() {
                Level::Error => write!(
                    buf,
                    "{} ",
                    "error:".if_supports_color(Stdout, |t| t.red().bold().to_string())
                )?,
                Level::Warn => write!(
                    buf,
                    "{} ",
                    "warning:".if_supports_color(Stdout, |t| t.yellow().to_string())
                )?,
                _ => {}
            }
            writeln!(buf, "{}", record.args())
        });

    match logfile {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(Tee {
                file: strip_ansi_escapes::Writer::new(file),
            })));
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }

    builder
        .try_init()
        .map_err(|e| CliError::config(format!("Failed to initialize logging: {e}")))
}

/// Print an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
