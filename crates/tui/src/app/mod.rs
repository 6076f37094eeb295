mod form;

use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};
use engine::{
    EngineError, Freshness, Ledger, LedgerStore, Roster, Settlement, Snapshot, TripConfig,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    store::Backend,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use form::{AddField, AddForm};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Add,
    List,
    Summary,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Add, Section::List, Section::Summary];

    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::List => "List",
            Self::Summary => "Summary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub form: AddForm,
    pub snapshot: Option<Snapshot>,
    pub settlement: Option<Settlement>,
    pub list_selected: usize,
    pub last_synced: Option<DateTime<Utc>>,
    /// Set when the last ledger read failed.
    pub load_error: Option<String>,
    pub toast: Option<ToastState>,
    pub trip: TripConfig,
    pub timezone: Tz,
    pub location: String,
}

impl AppState {
    pub fn roster(&self) -> &Roster {
        &self.trip.participants
    }

    pub fn listing_len(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.listing().count())
    }

    fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
        }
    }
}

pub struct App<S = Backend> {
    ledger: Ledger<S>,
    pub state: AppState,
    should_quit: bool,
}

impl App<Backend> {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = Backend::from_config(&config.store)?;
        let timezone: Tz = config
            .timezone
            .parse()
            .map_err(|_| AppError::Timezone(config.timezone.clone()))?;
        Self::with_store(store, config.trip, timezone)
    }

    pub async fn run(&mut self) -> Result<()> {
        self.reload(Utc::now()).await;
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit() {
            self.state.expire_toast(Instant::now());
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key, Utc::now()).await;
            }
        }

        Ok(())
    }
}

impl<S: LedgerStore> App<S> {
    pub fn with_store(store: S, trip: TripConfig, timezone: Tz) -> Result<Self> {
        let ledger = Ledger::builder().store(store).config(trip.clone()).build()?;
        let today = Utc::now().with_timezone(&timezone).date_naive();
        let state = AppState {
            section: Section::Add,
            form: AddForm::new(today, &trip.participants),
            snapshot: None,
            settlement: None,
            list_selected: 0,
            last_synced: None,
            load_error: None,
            toast: None,
            location: ledger.store().location(),
            trip,
            timezone,
        };

        Ok(Self {
            ledger,
            state,
            should_quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn handle_key(&mut self, key: KeyEvent, now: DateTime<Utc>) {
        self.handle_action(map_key(key), now).await;
    }

    async fn handle_action(&mut self, action: AppAction, now: DateTime<Utc>) {
        match action {
            AppAction::Quit => self.should_quit = true,
            AppAction::Refresh => self.refresh(now).await,
            AppAction::GoTo(section) => self.goto(section, now).await,
            AppAction::None => {}
            other => match self.state.section {
                Section::Add => self.handle_form(other, now).await,
                Section::List | Section::Summary => self.handle_view(other, now).await,
            },
        }
    }

    async fn goto(&mut self, section: Section, now: DateTime<Utc>) {
        self.state.section = section;
        if section != Section::Add {
            self.reload(now).await;
        }
    }

    async fn handle_form(&mut self, action: AppAction, now: DateTime<Utc>) {
        let roster = self.state.trip.participants.clone();
        let form = &mut self.state.form;
        match action {
            AppAction::NextField | AppAction::Down => form.focus = form.focus.next(),
            AppAction::PrevField | AppAction::Up => form.focus = form.focus.prev(),
            AppAction::Backspace => form.backspace(),
            AppAction::Cancel => {
                let today = self.state.today(now);
                self.state.form = AddForm::new(today, &roster);
            }
            AppAction::Left | AppAction::Right => {
                let forward = action == AppAction::Right;
                match form.focus {
                    AddField::Currency => form.toggle_currency(),
                    AddField::Payer => form.cycle_payer(&roster, forward),
                    AddField::Involved => form.move_involved_cursor(&roster, forward),
                    _ => {}
                }
            }
            AppAction::Input(' ') if !form.focus.is_text() => match form.focus {
                AddField::Currency => form.toggle_currency(),
                AddField::Payer => form.cycle_payer(&roster, true),
                _ => form.toggle_involved(&roster),
            },
            AppAction::Input(ch) => form.push_char(ch),
            AppAction::Submit => self.submit(now).await,
            _ => {}
        }
    }

    async fn handle_view(&mut self, action: AppAction, now: DateTime<Utc>) {
        match action {
            AppAction::Input('q') | AppAction::Cancel => self.should_quit = true,
            AppAction::Input('r') => self.refresh(now).await,
            AppAction::Input('a') | AppAction::Input('1') => self.goto(Section::Add, now).await,
            AppAction::Input('l') | AppAction::Input('2') => self.goto(Section::List, now).await,
            AppAction::Input('s') | AppAction::Input('3') => {
                self.goto(Section::Summary, now).await;
            }
            AppAction::Input('j') | AppAction::Down => {
                let len = self.state.listing_len();
                if len > 0 {
                    self.state.list_selected = (self.state.list_selected + 1).min(len - 1);
                }
            }
            AppAction::Input('k') | AppAction::Up => {
                self.state.list_selected = self.state.list_selected.saturating_sub(1);
            }
            _ => {}
        }
    }

    async fn submit(&mut self, now: DateTime<Utc>) {
        let draft = self.state.form.draft.clone();
        match self.ledger.add(&draft, now).await {
            Ok(entry) => {
                let today = self.state.today(now);
                self.state.form.reset(today, &self.state.trip.participants);
                self.state.toast(
                    ToastLevel::Success,
                    format!("Recorded: {} ({} {})", entry.item, entry.amount, entry.currency),
                );
                self.reload(now).await;
            }
            Err(EngineError::Validation(errors)) => {
                let message = format!("Please fix: {errors}");
                self.state.form.errors = Some(errors);
                self.state.toast(ToastLevel::Error, message);
            }
            Err(err) => {
                self.state.toast(ToastLevel::Error, format!("Could not save: {err}"));
            }
        }
    }

    async fn refresh(&mut self, now: DateTime<Utc>) {
        match self.ledger.refresh(now).await {
            Ok(snapshot) => {
                let rows = snapshot.len();
                self.apply_snapshot(snapshot);
                self.state
                    .toast(ToastLevel::Info, format!("Synced {rows} rows"));
            }
            Err(EngineError::RefreshTooSoon { wait_secs }) => {
                self.state.toast(
                    ToastLevel::Warning,
                    format!("Please wait {wait_secs}s before refreshing again"),
                );
            }
            Err(err) => self.load_failed(err),
        }
    }

    /// Loads the ledger, from the session cache when it is still fresh.
    async fn reload(&mut self, now: DateTime<Utc>) {
        match self.ledger.read_all(Freshness::Cached, now).await {
            Ok(snapshot) => self.apply_snapshot(snapshot),
            Err(err) => self.load_failed(err),
        }
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.state.settlement = Some(self.ledger.settle(&snapshot));
        self.state.snapshot = Some(snapshot);
        self.state.last_synced = self.ledger.sync().last_synced();
        self.state.load_error = None;
        let len = self.state.listing_len();
        self.state.list_selected = self.state.list_selected.min(len.saturating_sub(1));
    }

    fn load_failed(&mut self, err: EngineError) {
        tracing::warn!("ledger load failed: {err}");
        self.state.load_error = Some(err.to_string());
        self.state
            .toast(ToastLevel::Error, format!("Could not load the ledger: {err}"));
    }
}
