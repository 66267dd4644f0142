// App state and main event loop.
// Manages tabs, keyboard input, and the async project loads and form sends.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use ratatui::prelude::*;

use crate::cache::{Fetched, KvStore, Source, TimedCache};
use crate::contact::{ContactController, ContactForm, FormTransport, SubmitOutcome};
use crate::error::Result;
use crate::github::{GitHubClient, RateLimit};
use crate::projects::{CACHE_KEY, Project, load_projects};
use crate::state::{ConsoleState, ContactTabState, Field, ProjectsTabState};
use crate::telemetry::{Telemetry, TelemetryBuffer};
use crate::theme::Theme;
use crate::ui;

/// Redraw interval while idle, so relative times stay current.
const TICK: Duration = Duration::from_millis(250);

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Projects,
    Skills,
    Contact,
    Console,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Home, Tab::Projects, Tab::Skills, Tab::Contact, Tab::Console];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Projects => "Projects",
            Tab::Skills => "Skills",
            Tab::Contact => "Contact",
            Tab::Console => "Console",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Projects,
            Tab::Projects => Tab::Skills,
            Tab::Skills => Tab::Contact,
            Tab::Contact => Tab::Console,
            Tab::Console => Tab::Home,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Home => Tab::Console,
            Tab::Projects => Tab::Home,
            Tab::Skills => Tab::Projects,
            Tab::Contact => Tab::Skills,
            Tab::Console => Tab::Contact,
        }
    }
}

/// Work queued by a key press, run by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadProjects { refresh: bool },
    Submit,
    SaveTheme,
}

/// Inputs an action needs, copied out of the app when it starts.
#[derive(Debug)]
enum Job {
    LoadProjects { refresh: bool, user: String },
    Submit(ContactForm),
    SaveTheme(Theme),
}

/// Result of a finished job, applied back to the app.
#[derive(Debug)]
enum Completion {
    Projects {
        user: String,
        fetched: Fetched<Vec<Project>>,
        rate_limit: Option<RateLimit>,
    },
    Submitted {
        outcome: SubmitOutcome,
        next_form: ContactForm,
    },
    ThemeSaved(Result<()>),
}

/// Long-lived collaborators the app drives but does not render.
pub struct Services<T: FormTransport> {
    pub cache: TimedCache<Box<dyn KvStore>>,
    pub github: Option<GitHubClient>,
    pub contact: ContactController,
    pub transport: T,
}

/// Run one job against the services; the app stays free for input meanwhile.
async fn execute<T: FormTransport>(
    job: Job,
    services: &mut Services<T>,
    telemetry: &mut dyn Telemetry,
) -> Completion {
    match job {
        Job::LoadProjects { refresh, user } => {
            if refresh {
                services.cache.invalidate(CACHE_KEY, telemetry);
            }
            let fetched =
                load_projects(&mut services.cache, services.github.as_mut(), &user, telemetry)
                    .await;
            let rate_limit = services.github.as_ref().map(|c| c.rate_limit().clone());
            Completion::Projects {
                user,
                fetched,
                rate_limit,
            }
        }
        Job::Submit(form) => {
            let outcome = services
                .contact
                .submit(&form, &mut services.transport, telemetry)
                .await;
            Completion::Submitted {
                outcome,
                next_form: services.contact.new_form(),
            }
        }
        Job::SaveTheme(theme) => {
            Completion::ThemeSaved(theme.save(&mut **services.cache.store_mut()))
        }
    }
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    pub show_help: bool,
    pub theme: Theme,
    pub projects: ProjectsTabState,
    pub contact: ContactTabState,
    pub console: ConsoleState,
    /// Last GitHub rate limit seen, for the status bar.
    pub rate_limit: Option<RateLimit>,
    /// Whether the app should exit.
    pub should_quit: bool,
    pending: VecDeque<Action>,
}

impl App {
    pub fn new(projects: ProjectsTabState, contact: ContactTabState, theme: Theme) -> Self {
        Self {
            active_tab: Tab::default(),
            show_help: false,
            theme,
            projects,
            contact,
            console: ConsoleState::new(),
            rate_limit: None,
            should_quit: false,
            pending: VecDeque::from([Action::LoadProjects { refresh: false }]),
        }
    }

    /// Main event loop over the terminal's input stream.
    pub async fn run<T: FormTransport>(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        services: &mut Services<T>,
    ) -> io::Result<()> {
        let mut events = EventStream::new();
        self.run_with(terminal, services, &mut events).await
    }

    /// Event loop over any input stream.
    ///
    /// Keys are handled while a job is in flight. Quitting drops the
    /// unfinished job.
    async fn run_with<T, S>(
        &mut self,
        terminal: &mut Terminal<impl Backend>,
        services: &mut Services<T>,
        events: &mut S,
    ) -> io::Result<()>
    where
        T: FormTransport,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        while !self.should_quit {
            let Some(action) = self.pending.pop_front() else {
                terminal.draw(|frame| ui::draw(frame, self))?;
                if let Ok(event) = tokio::time::timeout(TICK, events.next()).await {
                    self.handle_event(event)?;
                }
                continue;
            };

            let job = self.begin(action);
            let mut buffer = TelemetryBuffer::default();
            let completion = {
                let work = execute(job, services, &mut buffer);
                tokio::pin!(work);
                loop {
                    terminal.draw(|frame| ui::draw(frame, self))?;
                    tokio::select! {
                        biased;
                        completion = &mut work => break Some(completion),
                        event = events.next() => self.handle_event(event)?,
                    }
                    if self.should_quit {
                        break None;
                    }
                }
            };
            buffer.replay(&mut self.console);
            if let Some(completion) = completion {
                self.finish(completion);
            }
        }
        Ok(())
    }

    /// Mark the affected view busy and snapshot what the job needs.
    fn begin(&mut self, action: Action) -> Job {
        match action {
            Action::LoadProjects { refresh } => {
                self.projects.set_loading();
                Job::LoadProjects {
                    refresh,
                    user: self.projects.user.clone(),
                }
            }
            Action::Submit => {
                self.contact.sending = true;
                Job::Submit(self.contact.form.clone())
            }
            Action::SaveTheme => Job::SaveTheme(self.theme),
        }
    }

    fn finish(&mut self, completion: Completion) {
        match completion {
            Completion::Projects {
                user,
                fetched,
                rate_limit,
            } => {
                if fetched.source == Source::Remote {
                    self.console.log_info(format!(
                        "fetched {} repositories for {}",
                        fetched.payload.len(),
                        user
                    ));
                }
                self.rate_limit = rate_limit;
                self.projects.set_loaded(fetched);
            }
            Completion::Submitted { outcome, next_form } => {
                self.contact.apply_outcome(&outcome, next_form);
            }
            Completion::ThemeSaved(Err(e)) => {
                self.console.log_warn(format!("could not save theme: {}", e));
            }
            Completion::ThemeSaved(Ok(())) => {}
        }
    }

    /// Apply one item from the input stream; a closed stream quits.
    fn handle_event(&mut self, event: Option<io::Result<Event>>) -> io::Result<()> {
        match event {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e),
            None => self.should_quit = true,
        }
        Ok(())
    }

    /// Apply one key press to the state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if self.active_tab == Tab::Contact {
                self.request_submit();
            }
            return;
        }

        if self.active_tab == Tab::Contact && self.contact.editing {
            self.handle_form_key(key);
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('t') => {
                self.theme = self.theme.toggled();
                self.pending.push_back(Action::SaveTheme);
            }
            KeyCode::Tab => self.switch_tab(self.active_tab.next()),
            KeyCode::BackTab => self.switch_tab(self.active_tab.prev()),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.switch_tab(Tab::ALL[index]);
            }
            _ => self.handle_tab_key(key),
        }
    }

    fn handle_tab_key(&mut self, key: KeyEvent) {
        match self.active_tab {
            Tab::Projects => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.projects.select_next(),
                KeyCode::Up | KeyCode::Char('k') => self.projects.select_prev(),
                KeyCode::Char('s') => self.projects.cycle_sort(),
                KeyCode::Char('r') if !self.projects.loaded.is_loading() => {
                    self.pending.push_back(Action::LoadProjects { refresh: true });
                }
                _ => {}
            },
            Tab::Contact => match key.code {
                KeyCode::Enter | KeyCode::Char('i') => self.contact.editing = true,
                KeyCode::Down | KeyCode::Char('j') => self.contact.focus = self.contact.focus.next(),
                KeyCode::Up | KeyCode::Char('k') => self.contact.focus = self.contact.focus.prev(),
                _ => {}
            },
            Tab::Console => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.console.select_next(),
                KeyCode::Up | KeyCode::Char('k') => self.console.select_prev(),
                _ => {}
            },
            Tab::Home | Tab::Skills => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.contact.editing = false,
            KeyCode::Tab => self.contact.focus = self.contact.focus.next(),
            KeyCode::BackTab => self.contact.focus = self.contact.focus.prev(),
            KeyCode::Enter if self.contact.focus == Field::Message => self.contact.newline(),
            KeyCode::Enter => self.contact.focus = self.contact.focus.next(),
            KeyCode::Backspace => self.contact.backspace(),
            KeyCode::Char(c) => self.contact.insert_char(c),
            _ => {}
        }
    }

    fn request_submit(&mut self) {
        if self.contact.sending || self.pending.contains(&Action::Submit) {
            return;
        }
        if !self.contact.is_complete() {
            self.contact.notice = Some(crate::state::Notice::Error(
                "Please fill in every field".to_string(),
            ));
            return;
        }
        self.pending.push_back(Action::Submit);
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        if tab == Tab::Console {
            self.console.mark_read();
        }
    }
}
