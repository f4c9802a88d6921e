use crate::api::Backend;
use crate::config::Config;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{self, CaptureLogger};
use crate::state::State;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::{mpsc, Arc};
use tokio::sync::Mutex;

pub type NetworkEventSender = mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = mpsc::Receiver<NetworkEvent>;
pub type ConfigSaveSender = mpsc::Sender<()>;
type ConfigSaveReceiver = mpsc::Receiver<()>;

type TerminalBackend = CrosstermBackend<Stdout>;

/// Shared state plus the configuration it was started from. The network and
/// config saver threads each hold a clone of `state`.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Run the client until the user quits, then persist the session.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log_buffer = logger::new_buffer();
        CaptureLogger::new(Arc::clone(&log_buffer), LevelFilter::Info).init()?;

        info!("Starting venue client...");
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default.", config.theme_name);
            Theme::default()
        });
        let (net_tx, net_rx) = mpsc::channel::<NetworkEvent>();
        let (save_tx, save_rx) = mpsc::channel::<()>();
        let state = State::new(
            net_tx,
            save_tx,
            config.access_token.clone(),
            config.email.clone(),
            theme,
            log_buffer,
        );
        let mut app = App {
            state: Arc::new(Mutex::new(state)),
            config,
        };
        app.start_network(net_rx)?;
        app.start_config_saver(save_rx);
        app.start_ui().await?;

        let state = app.state.lock().await;
        update_session(&mut app.config, &state);
        if let Err(e) = app.config.save() {
            error!("Could not persist session on exit: {}", e);
        }
        info!("Venue client stopped.");
        Ok(())
    }

    /// Persist the session whenever state signals a login or logout.
    ///
    fn start_config_saver(&self, save_requests: ConfigSaveReceiver) {
        let shared = Arc::clone(&self.state);
        let mut config = self.config.clone();
        std::thread::spawn(move || {
            for () in save_requests.iter() {
                {
                    let state = shared.blocking_lock();
                    update_session(&mut config, &state);
                }
                match config.save() {
                    Ok(()) => debug!("Saved session to config."),
                    Err(e) => error!("Failed to save config: {}", e),
                }
            }
        });
    }

    /// Serve network events on a dedicated thread with its own runtime.
    ///
    fn start_network(&self, net_events: NetworkEventReceiver) -> Result<()> {
        debug!("Spawning network thread...");
        let shared = Arc::clone(&self.state);
        let mut backend = Backend::new(
            &self.config.api_url,
            &self.config.chat_url,
            self.config.request_timeout(),
        )?;
        backend.set_session_token(self.config.access_token.clone());
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        std::thread::spawn(move || {
            runtime.block_on(async {
                let mut handler = NetworkEventHandler::new(&shared, &mut backend);
                for event in net_events.iter() {
                    if let Err(e) = handler.handle(event).await {
                        error!("Network event failed: {}", e);
                    }
                }
            })
        });
        Ok(())
    }

    /// Draw and route input on the calling task until a quit key or a
    /// terminal failure. The terminal is restored in both cases.
    ///
    async fn start_ui(&mut self) -> Result<()> {
        debug!("Entering render loop...");
        let mut terminal = enter_terminal()?;
        {
            let mut state = self.state.lock().await;
            if state.is_signed_in() {
                state.dispatch(NetworkEvent::Locations);
                state.dispatch(NetworkEvent::ChatSuggestions);
            }
        }

        let input = TerminalEventHandler::new();
        let outcome = loop {
            let mut state = self.state.lock().await;
            if let Ok(area) = terminal.size() {
                state.set_terminal_size(area);
            }
            if let Err(e) = terminal.draw(|frame| crate::ui::render(frame, &mut state)) {
                break Err(e.into());
            }
            match input.handle_next(&mut state) {
                Ok(true) => continue,
                Ok(false) => {
                    debug!("Quit requested.");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        restore_terminal(&mut terminal)?;
        outcome
    }
}

fn enter_terminal() -> Result<Terminal<TerminalBackend>> {
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<TerminalBackend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Copy the session held by state into the configuration.
///
fn update_session(config: &mut Config, state: &State) {
    match (state.session_token(), state.last_email()) {
        (Some(token), email) => {
            config.set_session(token.to_string(), email.unwrap_or_default().to_string())
        }
        (None, email) => {
            config.clear_session();
            if let Some(email) = email {
                config.email = Some(email.to_string());
            }
        }
    }
}
