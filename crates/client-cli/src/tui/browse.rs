//! Interactive asset browser.
//!
//! Live search over `/assets`: every edit resets the page and issues a new
//! fetch; responses come back through a channel tagged with their ticket and
//! stale ones are dropped, so rapid typing can never leave an older page on
//! screen. Employees request an asset from here; HR managers can delete one.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use shared::{Asset, AssetType, NewRequest, RequestKind, Role};

use crate::http::{ApiError, SecureClient};
use crate::query::{InvalidationSet, ListController, Ticket, DEFAULT_PAGE_SIZE};
use crate::views::Ctx;

const ASSETS_ENDPOINT: &str = "/assets";

/// Messages from the async tasks back into the UI loop
enum AppMessage {
    Fetched {
        ticket: Ticket,
        result: Result<shared::Page<Asset>, String>,
    },
    MutationDone {
        message: String,
    },
    MutationFailed {
        message: String,
        upgrade: bool,
        expired: bool,
    },
}

fn mutation_failure(err: ApiError) -> AppMessage {
    match err {
        ApiError::LimitReached(message) => AppMessage::MutationFailed {
            message,
            upgrade: true,
            expired: false,
        },
        ApiError::AuthExpired => AppMessage::MutationFailed {
            message: "Session expired".to_string(),
            upgrade: false,
            expired: true,
        },
        other => AppMessage::MutationFailed {
            message: other.to_string(),
            upgrade: false,
            expired: false,
        },
    }
}

/// What the keyboard currently drives
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    /// Search box + list navigation
    Browse,
    /// Collecting the request note for the selected asset
    Note,
    /// Waiting for explicit confirmation of a delete
    ConfirmDelete,
}

struct App {
    secure: SecureClient,
    role: Role,
    controller: ListController<Asset>,
    invalidations: InvalidationSet,
    mode: Mode,
    input: String,
    note: String,
    selected: usize,
    status: String,
    loading: bool,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    runtime: tokio::runtime::Handle,
    should_quit: bool,
    session_expired: bool,
}

impl App {
    fn new(secure: SecureClient, role: Role, runtime: tokio::runtime::Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            secure,
            role,
            controller: ListController::new(ASSETS_ENDPOINT, DEFAULT_PAGE_SIZE),
            invalidations: InvalidationSet::default(),
            mode: Mode::Browse,
            input: String::new(),
            note: String::new(),
            selected: 0,
            status: String::new(),
            loading: false,
            tx,
            rx,
            runtime,
            should_quit: false,
            session_expired: false,
        }
    }

    fn spawn_fetch(&mut self, ticket: Ticket) {
        self.loading = true;
        let secure = self.secure.clone();
        let pairs = self.controller.params().to_pairs();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = secure
                .get_page::<Asset>(ASSETS_ENDPOINT, &pairs)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::Fetched { ticket, result });
        });
    }

    fn spawn_request(&mut self, asset: &Asset) {
        let payload = NewRequest {
            asset_id: asset.id.clone(),
            request_type: RequestKind::Request,
            note: std::mem::take(&mut self.note),
        };
        let name = asset.name.clone();
        let secure = self.secure.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let message = match secure
                .post::<serde_json::Value, _>("/requests", &payload)
                .await
            {
                Ok(_) => AppMessage::MutationDone {
                    message: format!("Request for '{name}' sent"),
                },
                Err(err) => mutation_failure(err),
            };
            let _ = tx.send(message);
        });
    }

    fn spawn_delete(&mut self, asset: &Asset) {
        let path = format!("{ASSETS_ENDPOINT}/{}", asset.id);
        let name = asset.name.clone();
        let secure = self.secure.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let message = match secure.delete(&path).await {
                Ok(_) => AppMessage::MutationDone {
                    message: format!("Asset '{name}' deleted"),
                },
                Err(err) => mutation_failure(err),
            };
            let _ = tx.send(message);
        });
    }

    fn selected_asset(&self) -> Option<&Asset> {
        self.controller.data().items.get(self.selected)
    }

    /// Drain async results. Stale fetches are rejected by the controller;
    /// a completed mutation dirties the list and claims exactly one refetch.
    fn process_messages(&mut self) {
        let mut mutated = false;
        while let Ok(message) = self.rx.try_recv() {
            match message {
                AppMessage::Fetched { ticket, result } => match result {
                    Ok(page) => {
                        if self.controller.apply(ticket, page) {
                            self.loading = false;
                            let len = self.controller.data().items.len();
                            if len == 0 {
                                self.selected = 0;
                            } else if self.selected >= len {
                                self.selected = len - 1;
                            }
                        }
                    }
                    Err(message) => {
                        self.loading = false;
                        self.status = format!("✗ {message}");
                    }
                },
                AppMessage::MutationDone { message } => {
                    self.status = format!("✅ {message}");
                    self.invalidations.invalidate(ASSETS_ENDPOINT);
                    mutated = true;
                }
                AppMessage::MutationFailed {
                    message,
                    upgrade,
                    expired,
                } => {
                    if expired {
                        self.session_expired = true;
                        self.should_quit = true;
                    } else if upgrade {
                        self.status =
                            format!("✗ {message} (run 'assetverse subscribe checkout')");
                    } else {
                        self.status = format!("✗ {message}");
                    }
                }
            }
        }
        if mutated && self.invalidations.claim(&self.controller.cache_key()) {
            let ticket = self.controller.refetch();
            self.spawn_fetch(ticket);
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(code),
            Mode::Note => self.handle_note_key(code),
            Mode::ConfirmDelete => self.handle_confirm_key(code),
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c) => {
                self.input.push(c);
                let search = self.input.clone();
                if let Some(ticket) = self.controller.set_search(&search) {
                    self.spawn_fetch(ticket);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                let search = self.input.clone();
                if let Some(ticket) = self.controller.set_search(&search) {
                    self.spawn_fetch(ticket);
                }
            }
            KeyCode::Tab => {
                let next = match self.controller.params().kind {
                    None => Some(AssetType::Returnable),
                    Some(AssetType::Returnable) => Some(AssetType::NonReturnable),
                    Some(AssetType::NonReturnable) => None,
                };
                if let Some(ticket) = self.controller.set_kind(next) {
                    self.spawn_fetch(ticket);
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.controller.data().items.len();
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            KeyCode::Left => {
                if let Some(ticket) = self.controller.prev_page() {
                    self.spawn_fetch(ticket);
                }
            }
            KeyCode::Right => {
                if let Some(ticket) = self.controller.next_page() {
                    self.spawn_fetch(ticket);
                }
            }
            KeyCode::Enter => match self.role {
                Role::Employee => {
                    if let Some(asset) = self.selected_asset() {
                        if asset.in_stock() {
                            self.note.clear();
                            self.mode = Mode::Note;
                        } else {
                            self.status = format!("✗ '{}' is out of stock", asset.name);
                        }
                    }
                }
                Role::Hr => {
                    if self.selected_asset().is_some() {
                        self.mode = Mode::ConfirmDelete;
                    }
                }
            },
            _ => {}
        }
    }

    fn handle_note_key(&mut self, code: KeyCode) {
        match code {
            // cancelling the modal issues no network call
            KeyCode::Esc => {
                self.note.clear();
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                if self.note.trim().is_empty() {
                    self.status = "✗ A reason is required".to_string();
                    return;
                }
                if let Some(asset) = self.selected_asset().cloned() {
                    self.spawn_request(&asset);
                }
                self.mode = Mode::Browse;
            }
            KeyCode::Char(c) => self.note.push(c),
            KeyCode::Backspace => {
                self.note.pop();
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(asset) = self.selected_asset().cloned() {
                    self.spawn_delete(&asset);
                }
                self.mode = Mode::Browse;
            }
            // anything else declines: no network call is made
            _ => {
                self.status = "Delete cancelled".to_string();
                self.mode = Mode::Browse;
            }
        }
    }

    fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            self.process_messages();

            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(area);

        // search bar
        let filter = match self.controller.params().kind {
            None => "all types",
            Some(AssetType::Returnable) => "Returnable",
            Some(AssetType::NonReturnable) => "Non-returnable",
        };
        let search = Paragraph::new(format!("{}█", self.input)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Search assets ({filter}, Tab to cycle) ")),
        );
        frame.render_widget(search, layout[0]);

        // asset list
        let page = self.controller.data();
        let mut lines: Vec<Line> = Vec::new();
        if page.is_empty() && !self.loading {
            lines.push(Line::from("No assets found."));
            lines.push(Line::from(Span::styled(
                "Try a different search, or ask HR to add inventory.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, asset) in page.items.iter().enumerate() {
            let availability = if asset.in_stock() {
                format!("{} available", asset.available_quantity)
            } else {
                "out of stock".to_string()
            };
            let company = asset.company_name.as_deref().unwrap_or("-");
            let text = format!(
                "{:<24} {:<16} {:<14} {}",
                asset.name, asset.asset_type, availability, company
            );
            let style = if i == self.selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else if asset.in_stock() {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(Span::styled(text, style)));
        }

        let title = if self.loading {
            format!(" Assets / page {} (loading...) ", self.controller.params().page)
        } else if page.pages > 1 {
            format!(
                " Assets / page {} of {} ",
                self.controller.params().page,
                page.pages
            )
        } else {
            format!(" Assets / page {} ", self.controller.params().page)
        };
        let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, layout[1]);

        // status / modal line
        let (status_text, status_style) = match self.mode {
            Mode::Note => (
                format!("Reason for request: {}█  (Enter to send, Esc to cancel)", self.note),
                Style::default().fg(Color::Cyan),
            ),
            Mode::ConfirmDelete => {
                let name = self
                    .selected_asset()
                    .map(|a| a.name.as_str())
                    .unwrap_or("asset");
                (
                    format!("Delete '{name}' permanently? [y/N]"),
                    Style::default().fg(Color::Yellow),
                )
            }
            Mode::Browse => {
                let hint = match self.role {
                    Role::Employee => "Enter: request  ←/→: page  Esc: quit",
                    Role::Hr => "Enter: delete  ←/→: page  Esc: quit",
                };
                if self.status.is_empty() {
                    (hint.to_string(), Style::default().fg(Color::DarkGray))
                } else {
                    (format!("{}   {}", self.status, hint), Style::default())
                }
            }
        };
        let status = Paragraph::new(Line::from(Span::styled(status_text, status_style)))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, layout[2]);
    }
}

/// Run the asset browser. Requires an authenticated session; the caller has
/// already gated on role.
pub async fn run(ctx: &Ctx) -> Result<()> {
    let Some(user) = ctx.session.current_user() else {
        crate::term::warn("Log in first: assetverse login");
        return Ok(());
    };

    let runtime = tokio::runtime::Handle::current();
    let mut app = App::new(ctx.secure.clone(), user.role, runtime);

    // initial page
    let ticket = app.controller.refetch();
    app.spawn_fetch(ticket);

    tokio::task::block_in_place(|| app.run())?;

    if app.session_expired {
        crate::term::report_api_error(&ApiError::AuthExpired);
    }
    Ok(())
}
