//! Drives a [`WizardController`] from text commands and prints its screens.

use std::io::Write;

use anyhow::{Context, Result};
use meal_core::{LocationLevel, Transition, WizardController, WizardError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::commands::{Command, HELP, parse_command};
use crate::logging;
use crate::render::Screen;
use crate::utils::format_rupiah;

const PROMPT: &str = "meali> ";

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Event {
    Line(Option<String>),
    Fetched(Result<Transition, WizardError>),
}

pub struct Session<W> {
    controller: WizardController,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(
        controller: WizardController,
        out: W,
    ) -> Self {
        Self { controller, out }
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Prints the current screen.
    pub fn render(&mut self) -> Result<()> {
        write!(self.out, "{}", Screen(self.controller.state())).context("writing screen")?;
        self.out.flush().context("flushing output")
    }

    /// Applies one command. Rejected input is reported on the output and the
    /// session continues; only output failures are errors.
    pub async fn execute(
        &mut self,
        command: Command,
    ) -> Result<Flow> {
        debug!(?command, "executing command");
        match command {
            Command::Next => match self.controller.advance() {
                Ok(Transition::Ignored) => self.notice("sudah di langkah terakhir; gunakan 'restart'")?,
                Ok(_) => self.render()?,
                Err(error) => {
                    warn!(%error, "advance rejected");
                    self.notice(&error.to_string())?;
                }
            },
            Command::Back => match self.controller.back() {
                Transition::Ignored => self.notice("tidak bisa kembali dari langkah ini")?,
                _ => self.render()?,
            },
            Command::Restart => match self.controller.restart() {
                Transition::Ignored => self.notice("mulai ulang hanya tersedia di langkah hasil")?,
                _ => self.render()?,
            },
            Command::Budget(text) => {
                self.controller.set_budget(text);
                let shown = format_rupiah(&self.controller.state().budget);
                self.echo("Budget", &shown)?;
            }
            Command::Price(text) => {
                self.controller.set_price_estimate(text);
                let shown = format_rupiah(&self.controller.state().price_estimate);
                self.echo("Perkiraan Harga", &shown)?;
            }
            Command::Province(choice) => self.select(LocationLevel::Province, &choice)?,
            Command::District(choice) => self.select(LocationLevel::District, &choice)?,
            Command::SubDistrict(choice) => self.select(LocationLevel::SubDistrict, &choice)?,
            Command::Click { lat, lng } => {
                self.controller.click_map(lat, lng);
                let shown = self.controller.state().map_center.to_string();
                self.echo("Peta", &shown)?;
            }
            Command::Radius(text) => {
                self.controller.set_radius(text);
                let shown = format!("{} meter", self.controller.state().radius);
                self.echo("Radius", &shown)?;
            }
            Command::Day(day) => match self.controller.select_day(day) {
                Ok(Transition::Ignored) => self.notice("menu harian tersedia setelah rekomendasi dimuat")?,
                Ok(_) => self.render()?,
                Err(error) => self.notice(&error.to_string())?,
            },
            Command::Wait => {
                if self.controller.is_submitting() {
                    let outcome = self.controller.next_completion().await;
                    self.report_completion(outcome)?;
                } else {
                    self.notice("tidak ada rekomendasi yang sedang dimuat")?;
                }
            }
            Command::Show => self.render()?,
            Command::Log(level) => match logging::set_log_level(&level) {
                Ok(()) => self.echo("Log", &level)?,
                Err(error) => self.notice(&error.to_string())?,
            },
            Command::Help => {
                write!(self.out, "{HELP}").context("writing help")?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Runs every line of `input` as a command, then waits for a fetch that
    /// is still outstanding so the result screen is printed.
    pub async fn run_script<R>(
        &mut self,
        input: R,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.render()?;
        let mut lines = input.lines();
        let mut line_no = 0usize;
        while let Some(line) = lines.next_line().await.context("reading script")? {
            line_no += 1;
            if self.handle_line(&line, line_no).await? == Flow::Quit {
                info!(line = line_no, "script quit");
                return Ok(());
            }
        }
        self.finish_outstanding_fetch().await
    }

    /// Reads commands as they arrive while a fetch may finish at any time.
    /// Completed fetches are shown without waiting for the next command.
    pub async fn run_interactive<R>(
        &mut self,
        input: R,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (line_tx, mut line_rx) = mpsc::channel::<String>(16);
        let reader = tokio::spawn(async move {
            logging::log_task_error("command reader", forward_lines(input, line_tx).await);
        });

        self.render()?;
        self.prompt()?;
        let mut line_no = 0usize;
        loop {
            let event = if self.controller.is_submitting() {
                tokio::select! {
                    line = line_rx.recv() => Event::Line(line),
                    outcome = self.controller.next_completion() => Event::Fetched(outcome),
                }
            } else {
                Event::Line(line_rx.recv().await)
            };

            match event {
                Event::Line(None) => {
                    self.finish_outstanding_fetch().await?;
                    break;
                }
                Event::Line(Some(line)) => {
                    line_no += 1;
                    if self.handle_line(&line, line_no).await? == Flow::Quit {
                        break;
                    }
                }
                Event::Fetched(outcome) => {
                    writeln!(self.out).context("writing output")?;
                    self.report_completion(outcome)?;
                }
            }
            self.prompt()?;
        }

        reader.abort();
        Ok(())
    }

    /// Input ended; print the result of a fetch that is still loading.
    async fn finish_outstanding_fetch(&mut self) -> Result<()> {
        if self.controller.is_submitting() {
            info!("input ended while loading, waiting for the result");
            let outcome = self.controller.next_completion().await;
            self.report_completion(outcome)?;
        }
        Ok(())
    }

    async fn handle_line(
        &mut self,
        line: &str,
        line_no: usize,
    ) -> Result<Flow> {
        match parse_command(line) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Ok(Flow::Continue),
            Err(error) => {
                warn!(line = line_no, %error, "command rejected");
                self.notice(&error.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Accepts an option name or its 1-based number in the list.
    fn select(
        &mut self,
        level: LocationLevel,
        choice: &str,
    ) -> Result<()> {
        let value = resolve_option(level, choice);
        match level {
            LocationLevel::Province => self.controller.set_province(value.clone()),
            LocationLevel::District => self.controller.set_district(value.clone()),
            LocationLevel::SubDistrict => self.controller.set_sub_district(value.clone()),
        }
        if !level.is_offered(&value) {
            warn!(level = %level, %value, "value is not one of the offered options");
        }
        self.echo(level.label(), &value)
    }

    fn report_completion(
        &mut self,
        outcome: Result<Transition, WizardError>,
    ) -> Result<()> {
        match outcome {
            Ok(Transition::Ignored) => Ok(()),
            // The failure screen carries the message.
            Ok(_) | Err(WizardError::FetchFailed(_)) => self.render(),
            Err(error) => self.notice(&error.to_string()),
        }
    }

    fn echo(
        &mut self,
        label: &str,
        value: &str,
    ) -> Result<()> {
        writeln!(self.out, "{label}: {value}").context("writing output")
    }

    fn notice(
        &mut self,
        message: &str,
    ) -> Result<()> {
        writeln!(self.out, "! {message}").context("writing output")
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "{PROMPT}").context("writing prompt")?;
        self.out.flush().context("flushing output")
    }
}

fn resolve_option(
    level: LocationLevel,
    choice: &str,
) -> String {
    let options = level.options();
    match choice.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => options[n - 1].to_string(),
        _ => choice.to_string(),
    }
}

async fn forward_lines<R>(
    input: R,
    tx: mpsc::Sender<String>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("reading command")? {
        if tx.send(line).await.is_err() {
            break;
        }
    }
    Ok(())
}
