//! Interactive tuning session.
//!
//! Reads commands line by line and re-renders the output file as the user
//! adjusts intensity or switches methods. Intensity changes go through the
//! [`Debouncer`]; the styled image is cached so a pure intensity change only
//! costs a blend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use colorcast_core::{StyledCache, TransferEngine, TransferError, TransferImage, TransferMethod};
use parking_lot::Mutex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::config::percent_to_intensity;
use crate::debounce::Debouncer;
use crate::error::CliError;

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// New intensity in `[0, 1]`.
    Intensity(f32),
    Method(TransferMethod),
    Quit,
}

/// Parse a command line. Blank lines yield `None`.
///
/// A bare number is an intensity percentage (clamped to 0–100).
pub fn parse_command(line: &str) -> Result<Option<Command>, CliError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if matches!(line, "quit" | "exit" | "q") {
        return Ok(Some(Command::Quit));
    }
    if line == "method" || line.starts_with("method ") {
        let id = line["method".len()..].trim();
        if id.is_empty() {
            return Err(CliError::InvalidInput {
                input: line.to_string(),
                reason: "expected `method <id>`",
            });
        }
        return Ok(Some(Command::Method(TransferMethod::from(id.to_string()))));
    }

    let percent: f32 = line.trim_end_matches('%').parse().map_err(|_| CliError::InvalidInput {
        input: line.to_string(),
        reason: "expected an intensity percentage, `method <id>`, or `quit`",
    })?;
    if !percent.is_finite() {
        return Err(CliError::InvalidInput {
            input: line.to_string(),
            reason: "intensity must be finite",
        });
    }
    Ok(Some(Command::Intensity(percent_to_intensity(percent.clamp(0.0, 100.0)))))
}

/// Images and settings for one tuning session.
pub struct TuneSession {
    engine: TransferEngine,
    cache: StyledCache,
    content: TransferImage,
    style: TransferImage,
    method: Mutex<TransferMethod>,
    output: PathBuf,
}

impl TuneSession {
    pub fn new(
        engine: TransferEngine,
        content: TransferImage,
        style: TransferImage,
        method: TransferMethod,
        output: PathBuf,
    ) -> Self {
        Self {
            engine,
            cache: StyledCache::new(),
            content,
            style,
            method: Mutex::new(method),
            output,
        }
    }

    pub fn method(&self) -> TransferMethod {
        self.method.lock().clone()
    }

    pub fn set_method(&self, method: TransferMethod) {
        tracing::info!("method: {}", method.label());
        *self.method.lock() = method;
    }

    /// Blend the (cached) styled image at `intensity`.
    pub fn render(&self, intensity: f32) -> Result<TransferImage, TransferError> {
        let method = self.method();
        let styled = self
            .cache
            .get_or_stylize(&self.engine, &self.content, &self.style, &method)?;
        self.engine.blend(&self.content, &styled, intensity)
    }

    /// Render and overwrite the output file.
    pub fn render_to_output(&self, intensity: f32) -> Result<(), TransferError> {
        let image = self.render(intensity)?;
        colorcast_core::save(&image, &self.output)?;
        tracing::info!(
            "{} at {:.0}% -> {}",
            self.method().label(),
            intensity * 100.0,
            self.output.display()
        );
        Ok(())
    }
}

/// Drive a session from `input` until `quit` or end of input.
///
/// The initial render happens immediately (debounced like any other change);
/// the last pending render is flushed before returning.
pub async fn run<R>(
    session: Arc<TuneSession>,
    input: R,
    initial_intensity: f32,
    window: Duration,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
{
    let worker = Arc::clone(&session);
    let debouncer = Debouncer::spawn(window, move |intensity: f32| {
        if let Err(e) = worker.render_to_output(intensity) {
            tracing::error!("re-render failed: {e}");
        }
    });

    let mut intensity = initial_intensity;
    debouncer.trigger(intensity);

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Intensity(t))) => {
                intensity = t;
                debouncer.trigger(intensity);
            }
            Ok(Some(Command::Method(method))) => {
                session.set_method(method);
                debouncer.trigger(intensity);
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }

    debouncer.close().await?;
    Ok(())
}
