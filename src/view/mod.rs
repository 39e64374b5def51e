//! TUI rendering and terminal management (impure shell).
//!
//! The shell owns the terminal, an input-reader thread, and the message
//! channel. All engine state lives in the [`Orchestrator`]; the shell's
//! job is to translate key events into messages, execute the commands the
//! orchestrator hands back by spawning fetch tasks, and redraw.
//!
//! Concurrency: the event loop runs on a current-thread tokio runtime, so
//! every `Orchestrator::update` happens on one thread. Fetch tasks never
//! touch shared state; they post a message back through the channel.

mod filter_bar;
mod readme;
mod results;
mod status;

use crate::api::{GithubClient, ReadmeApi};
use crate::config::ResolvedConfig;
use crate::engine::{Cmd, Msg, Orchestrator, QueryPipeline};
use crate::model::{AppError, FilterDraft, FilterField, FilterSet};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::{Frame, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::debug;

// ===== Mode =====

/// Input mode of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Keys navigate the result list.
    Browse,
    /// Keys edit the given draft filter field.
    EditFilter(FilterField),
}

// ===== Entry point =====

/// Set up the terminal and run the application until the user quits.
pub async fn run(config: ResolvedConfig, initial: FilterSet) -> Result<(), AppError> {
    let client = Arc::new(GithubClient::new(
        config.api_base.clone(),
        config.request_timeout(),
    )?);
    let pipeline = QueryPipeline::new(client.clone(), config.debounce(), config.request_timeout());

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, pipeline, client, initial).await;

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

/// Forward crossterm events into the async channel.
///
/// Polls with a timeout so the thread notices channel closure and exits
/// instead of blocking forever on `event::read`.
fn spawn_input_thread(tx: UnboundedSender<Event>) {
    std::thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {}
            Err(_) => break,
        }
    });
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    pipeline: QueryPipeline,
    readme_api: Arc<dyn ReadmeApi>,
    initial: FilterSet,
) -> Result<(), AppError> {
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<Event>();
    spawn_input_thread(input_tx);

    let mut app = App::new(pipeline, readme_api, msg_tx, initial.clone());
    if !initial.is_empty() {
        app.apply(Msg::CommitFilters(initial));
    }

    loop {
        app.draw(terminal)?;

        // The sentinel check needs the viewport geometry of the frame just
        // drawn; when it fires, redraw so the loading trailer appears.
        let cmd = app.poll_sentinel();
        if cmd != Cmd::None {
            app.dispatch(cmd);
            app.draw(terminal)?;
        }

        tokio::select! {
            Some(ev) = input_rx.recv() => app.handle_event(ev),
            Some(msg) = msg_rx.recv() => app.apply(msg),
            else => break,
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

// ===== App =====

/// Shell state: the orchestrator plus everything that is presentation-only
/// (mode, selection, scroll offsets).
struct App {
    orchestrator: Orchestrator,
    draft: FilterDraft,
    mode: Mode,
    selected: usize,
    offset: usize,
    readme_scroll: u16,
    list_height: usize,
    pipeline: QueryPipeline,
    readme_api: Arc<dyn ReadmeApi>,
    msg_tx: UnboundedSender<Msg>,
    should_quit: bool,
}

impl App {
    fn new(
        pipeline: QueryPipeline,
        readme_api: Arc<dyn ReadmeApi>,
        msg_tx: UnboundedSender<Msg>,
        initial: FilterSet,
    ) -> Self {
        Self {
            orchestrator: Orchestrator::new(),
            draft: FilterDraft::new(initial),
            mode: Mode::Browse,
            selected: 0,
            offset: 0,
            readme_scroll: 0,
            list_height: 0,
            pipeline,
            readme_api,
            msg_tx,
            should_quit: false,
        }
    }

    /// Run a message through the orchestrator and execute the command.
    fn apply(&mut self, msg: Msg) {
        if matches!(msg, Msg::OpenReadme { .. }) {
            self.readme_scroll = 0;
        }
        let cmd = self.orchestrator.update(msg);
        self.dispatch(cmd);
    }

    /// Execute a command by spawning the fetch and routing its result back
    /// through the message channel.
    fn dispatch(&self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::FetchPage {
                generation,
                filters,
                page,
            } => {
                let pipeline = self.pipeline.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let outcome = pipeline.search(filters, page).await;
                    let _ = tx.send(Msg::PageResolved {
                        generation,
                        outcome,
                    });
                });
            }
            Cmd::FetchReadme { key } => {
                let api = self.readme_api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let result = api.fetch_readme(&key.owner, &key.repo).await;
                    let _ = tx.send(Msg::ReadmeResolved { key, result });
                });
            }
        }
    }

    /// Feed the current sentinel visibility to the orchestrator.
    fn poll_sentinel(&mut self) -> Cmd {
        let session = self.orchestrator.session();
        if session.generation == 0 {
            return Cmd::None;
        }
        let visible = sentinel_visible(self.offset, self.list_height, session.result_count());
        self.orchestrator.observe_sentinel(visible)
    }

    // ----- input -----

    fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            // Resize redraws on the next loop iteration; nothing to track.
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.mode {
            Mode::EditFilter(field) => self.handle_filter_key(field, key),
            Mode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        if self.orchestrator.viewer().is_open() {
            match key.code {
                KeyCode::Esc => self.apply(Msg::CloseReadme),
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Down | KeyCode::Char('j') => {
                    self.readme_scroll = self.readme_scroll.saturating_add(1);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.readme_scroll = self.readme_scroll.saturating_sub(1);
                }
                KeyCode::PageDown => {
                    self.readme_scroll = self.readme_scroll.saturating_add(20);
                }
                KeyCode::PageUp => {
                    self.readme_scroll = self.readme_scroll.saturating_sub(20);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.mode = Mode::EditFilter(FilterField::Text),
            KeyCode::Char('s') => self.draft.cycle_sort_key(),
            KeyCode::Char('o') => self.draft.toggle_order(),
            KeyCode::Char('r') => self.apply(Msg::Retry),
            KeyCode::Enter => self.open_selected_readme(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(1),
            KeyCode::PageDown => self.select_next(self.list_height.max(1)),
            KeyCode::PageUp => self.select_prev(self.list_height.max(1)),
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = self
                    .orchestrator
                    .session()
                    .result_count()
                    .saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, field: FilterField, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Browse,
            KeyCode::Tab => self.mode = Mode::EditFilter(field.next()),
            KeyCode::Enter => {
                let filters = self.draft.commit();
                debug!(?filters, "committing draft filters");
                self.selected = 0;
                self.offset = 0;
                self.mode = Mode::Browse;
                self.apply(Msg::CommitFilters(filters));
            }
            KeyCode::Backspace => {
                let mut value = self.draft.get(field).to_string();
                value.pop();
                self.draft.set(field, value);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut value = self.draft.get(field).to_string();
                value.push(c);
                self.draft.set(field, value);
            }
            _ => {}
        }
    }

    fn open_selected_readme(&mut self) {
        let session = self.orchestrator.session();
        if let Some(record) = session.records().get(self.selected) {
            self.apply(Msg::OpenReadme {
                owner: record.owner_login.clone(),
                repo: record.name.clone(),
            });
        }
    }

    fn select_next(&mut self, by: usize) {
        let len = self.orchestrator.session().result_count();
        if len > 0 {
            self.selected = (self.selected + by).min(len - 1);
        }
    }

    fn select_prev(&mut self, by: usize) {
        self.selected = self.selected.saturating_sub(by);
    }

    // ----- rendering -----

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| self.render(frame))?;
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        // Clamp selection to the current result count and keep it in view.
        let len = self.orchestrator.session().result_count();
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        self.list_height = chunks[1].height.saturating_sub(2) as usize;
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.list_height > 0 && self.selected >= self.offset + self.list_height {
            self.offset = self.selected + 1 - self.list_height;
        }

        filter_bar::render_filter_bar(frame, chunks[0], &self.draft, self.mode);
        results::render_results(
            frame,
            chunks[1],
            self.orchestrator.session(),
            self.selected,
            self.offset,
        );
        status::render_status(frame, chunks[2], self.orchestrator.session());

        if self.orchestrator.viewer().is_open() {
            readme::render_readme(
                frame,
                frame.area(),
                self.orchestrator.viewer(),
                self.readme_scroll,
            );
        }
    }
}

// ===== Sentinel geometry =====

/// Whether the pagination sentinel (the virtual row just past the last
/// result) falls inside the viewport.
fn sentinel_visible(offset: usize, viewport_rows: usize, total: usize) -> bool {
    viewport_rows > 0 && offset + viewport_rows > total
}
