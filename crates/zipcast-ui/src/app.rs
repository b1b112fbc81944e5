//! Terminal app loop: reads commands from stdin, applies them to the form
//! state, and re-renders after every change.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use zipcast_client::ForecastBackend;

use crate::command::{parse_command, UserEvent, HELP_TEXT};
use crate::services::{
    request_directory_load, request_prediction, DirectoryServiceMessage,
    PredictionServiceMessage,
};
use crate::state::FormState;
use crate::view;

/// Opened by the `learn-more` command.
pub const LEARN_MORE_URL: &str = "https://www.linkedin.com/school/pmaccelerator/";

/// What the loop should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Continue { notice: Option<String> },
    Quit,
}

impl EventOutcome {
    fn quiet() -> Self {
        Self::Continue { notice: None }
    }

    fn notice(message: impl Into<String>) -> Self {
        Self::Continue {
            notice: Some(message.into()),
        }
    }
}

/// Receiving ends of the service channels, polled by the loop.
pub struct ServiceReceivers {
    pub directory: UnboundedReceiver<DirectoryServiceMessage>,
    pub prediction: UnboundedReceiver<PredictionServiceMessage>,
}

pub struct App<B> {
    state: FormState,
    backend: Arc<B>,
    runtime: Handle,
    directory_tx: UnboundedSender<DirectoryServiceMessage>,
    prediction_tx: UnboundedSender<PredictionServiceMessage>,
}

impl<B: ForecastBackend + 'static> App<B> {
    pub fn new(backend: Arc<B>, runtime: Handle) -> (Self, ServiceReceivers) {
        let (directory_tx, directory) = mpsc::unbounded_channel();
        let (prediction_tx, prediction) = mpsc::unbounded_channel();

        let app = Self {
            state: FormState::new(),
            backend,
            runtime,
            directory_tx,
            prediction_tx,
        };

        (app, ServiceReceivers { directory, prediction })
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Kick off the startup directory load.
    pub fn start(&mut self) {
        if self.state.begin_directory_load() {
            tracing::info!("Loading location directory");
            request_directory_load(&self.directory_tx, self.backend.clone(), &self.runtime);
        }
    }

    /// Apply one user event.
    pub fn handle_event(&mut self, event: UserEvent) -> EventOutcome {
        match event {
            UserEvent::SetZip(zip) => self.input_outcome(|state| state.set_zip(zip)),
            UserEvent::SelectCountry(None) => {
                self.input_outcome(|state| state.select_country(None))
            }
            UserEvent::SelectCountry(Some(query)) => {
                let Some(value) = self
                    .state
                    .directory()
                    .find_country(&query)
                    .map(|o| o.value.clone())
                else {
                    return EventOutcome::notice(format!("No country matches '{query}'."));
                };
                self.input_outcome(|state| state.select_country(Some(&value)))
            }
            UserEvent::SelectTown(None) => self.input_outcome(|state| state.select_town(None)),
            UserEvent::SelectTown(Some(query)) => {
                let Some(value) = self
                    .state
                    .directory()
                    .find_town(&query)
                    .map(|o| o.value.clone())
                else {
                    return EventOutcome::notice(format!("No town matches '{query}'."));
                };
                self.input_outcome(|state| state.select_town(Some(&value)))
            }
            UserEvent::Predict => {
                if self.state.is_loading() {
                    return EventOutcome::notice("A request is already in progress.");
                }
                if let Some(input) = self.state.begin_prediction() {
                    tracing::info!("Requesting prediction for {:?}", input);
                    request_prediction(
                        &self.prediction_tx,
                        self.backend.clone(),
                        input,
                        &self.runtime,
                    );
                }
                EventOutcome::quiet()
            }
            UserEvent::ListCountries => EventOutcome::notice(view::render_options(
                "Countries",
                &self.state.directory().countries,
            )),
            UserEvent::ListTowns => EventOutcome::notice(view::render_options(
                "Towns",
                &self.state.directory().towns,
            )),
            UserEvent::LearnMore => match webbrowser::open(LEARN_MORE_URL) {
                Ok(()) => EventOutcome::quiet(),
                Err(e) => {
                    tracing::warn!("Failed to open browser: {}", e);
                    EventOutcome::notice(format!("Open {LEARN_MORE_URL} in your browser."))
                }
            },
            UserEvent::Help => EventOutcome::notice(HELP_TEXT),
            UserEvent::Quit => EventOutcome::Quit,
        }
    }

    pub fn handle_directory_message(&mut self, message: DirectoryServiceMessage) {
        match message {
            DirectoryServiceMessage::LoadDone(result) => self.state.finish_directory_load(result),
        }
    }

    pub fn handle_prediction_message(&mut self, message: PredictionServiceMessage) {
        match message {
            PredictionServiceMessage::PredictionDone(outcome) => {
                self.state.finish_prediction(outcome)
            }
        }
    }

    fn input_outcome(&mut self, apply: impl FnOnce(&mut FormState) -> bool) -> EventOutcome {
        if apply(&mut self.state) {
            EventOutcome::quiet()
        } else {
            EventOutcome::notice("Input is disabled while loading.")
        }
    }
}

/// Run the form on stdin/stdout until `quit` or end of input.
///
/// # Errors
/// Returns an error if stdin cannot be read.
pub async fn run<B: ForecastBackend + 'static>(backend: Arc<B>) -> Result<()> {
    let (mut app, mut receivers) = App::new(backend, Handle::current());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    app.start();
    print!("{}", view::render(app.state()));
    println!("\nType 'help' for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    tracing::debug!("stdin closed");
                    break;
                };

                match parse_command(&line) {
                    Ok(Some(event)) => match app.handle_event(event) {
                        EventOutcome::Quit => break,
                        EventOutcome::Continue { notice } => {
                            if let Some(notice) = notice {
                                println!("{}", notice.trim_end());
                            }
                        }
                    },
                    Ok(None) => {}
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                }
            }
            Some(message) = receivers.directory.recv() => app.handle_directory_message(message),
            Some(message) = receivers.prediction.recv() => app.handle_prediction_message(message),
        }

        println!();
        print!("{}", view::render(app.state()));
    }

    Ok(())
}
