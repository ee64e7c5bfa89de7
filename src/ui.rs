use crate::auth;
use crate::controller::DisplayEdits;
use crate::entities::{Attributes, ALL_CATEGORIES};
use crate::error::PanelError;
use crate::panel::Panel;
use crate::registry::ModuleKind;
use crate::shell::Shell;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// How often the shell ticks (live feeds drain) while no key is pressed
const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub active: LoginField,
    pub error: Option<String>,
}

impl LoginForm {
    fn new(default_username: &str) -> Self {
        LoginForm {
            username: default_username.to_string(),
            password: String::new(),
            active: LoginField::Password,
            error: None,
        }
    }

    fn toggle_field(&mut self) {
        self.active = match self.active {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    fn active_mut(&mut self) -> &mut String {
        match self.active {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

/// What typed characters go into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    EditTitle,
    /// Index into the domain's editable fields
    EditField(usize),
}

pub struct App {
    pub screen: Screen,
    pub shell: Shell,
    pub login: LoginForm,
    pub user: Option<String>,
    pub module: ModuleKind,
    pub table_state: TableState,
    pub search: String,
    /// Category filter, `ALL_CATEGORIES` for none
    pub category: String,
    /// Attribute row targeted by +/-
    pub attr_cursor: usize,
    /// Attribute values edited but not yet recomputed
    pub staged: Attributes,
    pub input: InputMode,
    pub buffer: String,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(shell: Shell) -> Self {
        let default_username = shell.context().config.login.default_username.clone();
        Self {
            screen: Screen::Login,
            shell,
            login: LoginForm::new(&default_username),
            user: None,
            module: ModuleKind::Dashboard,
            table_state: TableState::default(),
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            attr_cursor: 0,
            staged: Attributes::new(),
            input: InputMode::Normal,
            buffer: String::new(),
            status: String::new(),
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Shell => match self.input {
                InputMode::Normal => self.handle_shell_key(key),
                _ => self.handle_input_key(key),
            },
        }
    }

    // ------------------------------------------------------------------
    // Login
    // ------------------------------------------------------------------

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.login.toggle_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                self.login.active_mut().pop();
            }
            KeyCode::Char(c) => self.login.active_mut().push(c),
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let username = self.login.username.trim().to_string();
        let verdict = auth::verify(&username, &self.login.password);
        self.login.password.clear();

        if verdict.valid {
            self.login.error = None;
            self.user = Some(username);
            self.screen = Screen::Shell;
            self.open_module(ModuleKind::Dashboard);
        } else {
            self.login.error = Some(format!("Access denied: {}", verdict.reason));
        }
    }

    // ------------------------------------------------------------------
    // Shell navigation
    // ------------------------------------------------------------------

    pub fn open_module(&mut self, kind: ModuleKind) {
        self.module = kind;
        self.search.clear();
        self.category = ALL_CATEGORIES.to_string();
        self.attr_cursor = 0;
        self.table_state.select(Some(0));

        match self.shell.switch_to(kind.name()) {
            Ok(()) => self.status = format!("{} loaded", kind.label()),
            Err(e) => self.status = format!("Module failed to load: {}", e),
        }
        self.sync_focus();
    }

    fn visible_ids(&self) -> Vec<String> {
        self.shell
            .mounted()
            .map(|panel| {
                panel
                    .controller()
                    .list(&self.search, &self.category)
                    .iter()
                    .map(|r| r.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Make the controller's focus follow the highlighted table row
    fn sync_focus(&mut self) {
        let ids = self.visible_ids();
        let selected = match (self.table_state.selected(), ids.len()) {
            (_, 0) => None,
            (Some(i), n) => Some(i.min(n - 1)),
            (None, _) => Some(0),
        };
        self.table_state.select(selected);

        let Some(panel) = self.shell.mounted_mut() else {
            self.staged.clear();
            return;
        };
        let controller = panel.controller_mut();

        match selected.and_then(|i| ids.get(i)) {
            Some(id) => match controller.select(id) {
                Ok(record) => self.staged = record.attributes.clone(),
                Err(_) => self.staged.clear(),
            },
            None => {
                controller.clear_focus();
                self.staged.clear();
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_ids().len() as isize;
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        self.table_state.select(Some((current + delta).rem_euclid(len) as usize));
        self.sync_focus();
    }

    /// Run an operation against the mounted panel and report its outcome
    fn apply<F>(&mut self, op: F)
    where
        F: FnOnce(&mut dyn Panel) -> Result<String, PanelError>,
    {
        let Some(panel) = self.shell.mounted_mut() else {
            self.status = "No module mounted".to_string();
            return;
        };
        self.status = match op(panel) {
            Ok(message) => message,
            Err(e) => format!("⚠ {}", e),
        };
        self.sync_focus();
    }

    fn handle_shell_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.open_module(self.module.next()),
            KeyCode::BackTab => self.open_module(self.module.previous()),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(kind) = ModuleKind::ALL.get(index) {
                    self.open_module(*kind);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Left | KeyCode::Char('h') => self.attr_cursor = self.attr_cursor.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                let last = self.attribute_count().saturating_sub(1);
                self.attr_cursor = (self.attr_cursor + 1).min(last);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_staged(1.0),
            KeyCode::Char('-') => self.adjust_staged(-1.0),
            KeyCode::Char('r') => {
                let staged = self.staged.clone();
                self.apply(move |p| {
                    let score = p.controller_mut().recompute(&staged)?;
                    Ok(format!("Score recomputed: {:.2}", score))
                });
            }
            KeyCode::Char('e') => self.begin_edit(InputMode::EditTitle),
            KeyCode::Char('f') => self.begin_edit(InputMode::EditField(0)),
            KeyCode::Char('p') => self.apply(cycle_record_category),
            KeyCode::Char('n') => {
                self.apply(|p| {
                    let id = p.controller_mut().create().id.clone();
                    Ok(format!("Created {}", id))
                });
                self.table_state.select(Some(0));
                self.sync_focus();
            }
            KeyCode::Char('d') => self.apply(|p| {
                let removed = p.controller_mut().delete()?;
                Ok(format!("Deleted {}", removed.id))
            }),
            KeyCode::Char('/') => {
                self.input = InputMode::Search;
                self.status = "Search: type to filter, Enter to finish".to_string();
            }
            KeyCode::Char('c') => self.cycle_category_filter(),
            KeyCode::Char(c) if c.is_ascii_uppercase() => self.apply(move |p| p.run_action(c)),
            _ => {}
        }
    }

    fn attribute_count(&self) -> usize {
        self.shell
            .mounted()
            .map(|p| p.controller().domain().attributes().len())
            .unwrap_or(0)
    }

    fn adjust_staged(&mut self, direction: f64) {
        let Some(panel) = self.shell.mounted() else {
            return;
        };
        let Some(spec) = panel.controller().domain().attributes().get(self.attr_cursor) else {
            return;
        };
        let value = self.staged.entry(spec.key.to_string()).or_insert(spec.min);
        *value = spec.clamp(*value + direction * spec.step);
        self.status = format!("{} staged at {} (r to recompute)", spec.label, format_value(*value));
    }

    fn cycle_category_filter(&mut self) {
        let Some(panel) = self.shell.mounted() else {
            return;
        };
        let categories = panel.controller().domain().categories();
        let next = match categories.iter().position(|c| *c == self.category) {
            Some(i) if i + 1 < categories.len() => categories[i + 1],
            Some(_) => ALL_CATEGORIES,
            None => categories.first().copied().unwrap_or(ALL_CATEGORIES),
        };
        self.category = next.to_string();
        self.status = format!("Category: {}", next);
        self.table_state.select(Some(0));
        self.sync_focus();
    }

    // ------------------------------------------------------------------
    // Text input
    // ------------------------------------------------------------------

    fn editable_fields(&self) -> &'static [&'static str] {
        self.shell
            .mounted()
            .map(|p| p.controller().domain().editable_fields())
            .unwrap_or(&[])
    }

    fn begin_edit(&mut self, mode: InputMode) {
        let Some(record) = self.shell.mounted().and_then(|p| p.controller().focused()) else {
            self.status = format!("⚠ {}", PanelError::NoFocus);
            return;
        };
        let buffer = match mode {
            InputMode::EditTitle => record.title.clone(),
            InputMode::EditField(i) => match self.editable_fields().get(i) {
                Some(key) => record.field(key).to_string(),
                None => {
                    self.status = "This module has no editable fields".to_string();
                    return;
                }
            },
            _ => String::new(),
        };
        self.buffer = buffer;
        self.input = mode;
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match (self.input, key.code) {
            (_, KeyCode::Esc) => {
                self.input = InputMode::Normal;
                self.buffer.clear();
            }
            (InputMode::Search, KeyCode::Enter) => self.input = InputMode::Normal,
            (InputMode::Search, KeyCode::Backspace) => {
                self.search.pop();
                self.table_state.select(Some(0));
                self.sync_focus();
            }
            (InputMode::Search, KeyCode::Char(c)) => {
                self.search.push(c);
                self.table_state.select(Some(0));
                self.sync_focus();
            }
            (InputMode::EditField(i), KeyCode::Tab) => {
                let count = self.editable_fields().len().max(1);
                self.begin_edit(InputMode::EditField((i + 1) % count));
            }
            (mode, KeyCode::Enter) => {
                self.input = InputMode::Normal;
                self.commit_edit(mode);
            }
            (_, KeyCode::Backspace) => {
                self.buffer.pop();
            }
            (_, KeyCode::Char(c)) => self.buffer.push(c),
            _ => {}
        }
    }

    fn commit_edit(&mut self, mode: InputMode) {
        let value = std::mem::take(&mut self.buffer);
        let field = match mode {
            InputMode::EditField(i) => self.editable_fields().get(i).copied(),
            _ => None,
        };
        self.apply(move |p| {
            let controller = p.controller_mut();
            let record = controller.focused().ok_or(PanelError::NoFocus)?;
            let mut edits = DisplayEdits::from_record(record);
            match field {
                Some(key) => edits = edits.with_field(key, value),
                None => edits.title = value,
            }
            controller.save(&edits)?;
            Ok("Saved".to_string())
        });
    }
}

/// Save the focused record under the next category of its domain
fn cycle_record_category(panel: &mut dyn Panel) -> Result<String, PanelError> {
    let controller = panel.controller_mut();
    let record = controller.focused().ok_or(PanelError::NoFocus)?;
    let categories = controller.domain().categories();
    let position = categories.iter().position(|c| *c == record.category).unwrap_or(0);
    let next = categories[(position + 1) % categories.len()];

    let edits = DisplayEdits::from_record(record).with_category(next);
    controller.save(&edits)?;
    Ok(format!("Category → {}", next))
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        if app.should_quit {
            return Ok(());
        }
        app.shell.tick();
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Login => {
            let area = f.size();
            render_login(f, area, app)
        }
        Screen::Shell => render_shell(f, app),
    }
}

fn render_login(f: &mut Frame, area: Rect, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Min(0),
        ])
        .split(area);
    let form_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(vertical[1])[1];

    let field_style = |field: LoginField| {
        if app.login.active == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Username: ", Style::default().fg(Color::Cyan)),
            Span::styled(app.login.username.clone(), field_style(LoginField::Username)),
        ]),
        Line::from(vec![
            Span::styled("  Password: ", Style::default().fg(Color::Cyan)),
            Span::styled("*".repeat(app.login.password.chars().count()), field_style(LoginField::Password)),
        ]),
        Line::from(""),
    ];
    if let Some(error) = &app.login.error {
        lines.push(Line::from(Span::styled(format!("  {}", error), Style::default().fg(Color::Red))));
    }
    lines.push(Line::from(Span::styled(
        "  Tab switch field · Enter sign in · Esc quit",
        Style::default().fg(Color::DarkGray),
    )));

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Culture Desk · Sign in "),
    );
    f.render_widget(form, form_area);
}

fn render_shell(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Sidebar + content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)])
        .split(chunks[1]);
    render_sidebar(f, body[0], app);

    if app.shell.is_empty() {
        let reason = app.shell.last_error().unwrap_or("No module mounted").to_string();
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {}", reason), Style::default().fg(Color::Red))),
            Line::from("  Pick another module from the sidebar."),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Empty "));
        f.render_widget(empty, body[1]);
    } else {
        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body[1]);
        render_table(f, content[0], app);
        render_detail(f, content[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let user = app.user.as_deref().unwrap_or("-");
    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.module.label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(user.to_string(), Style::default().fg(Color::Green)),
        Span::styled(
            format!(" [{}]", auth::permissions(user).join(", ")),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(headline) = app.shell.mounted().and_then(|p| p.headline()) {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(headline, Style::default().fg(Color::Yellow)));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));
    f.render_widget(header, area);
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = ModuleKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let style = if *kind == app.module {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(" {} {}", i + 1, kind.label())).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Modules "));
    f.render_widget(list, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let Some(panel) = app.shell.mounted() else {
        return;
    };
    let controller = panel.controller();

    let header_cells = ["Id", "Title", "Category", "Score"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells).style(Style::default().bg(Color::DarkGray)).height(1);

    let records = controller.list(&app.search, &app.category);
    let count = records.len();
    let rows = records.into_iter().map(|record| {
        let color = score_color(record.score);
        Row::new(vec![
            Cell::from(record.id.clone()),
            Cell::from(truncate(&record.title, 36)),
            Cell::from(record.category.clone()),
            Cell::from(format!("{:.2}", record.score)).style(Style::default().fg(color)),
        ])
    });

    let mut title = format!(" {} records · {} ", count, app.category);
    if !app.search.is_empty() {
        title.push_str(&format!("· \"{}\" ", app.search));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let Some(panel) = app.shell.mounted() else {
        return;
    };
    let controller = panel.controller();
    let Some(record) = controller.focused() else {
        let idle = Paragraph::new("  No record selected")
            .block(Block::default().borders(Borders::ALL).title(" Detail "));
        f.render_widget(idle, area);
        return;
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![Span::styled("  Title: ", label), Span::raw(record.title.clone())]),
        Line::from(vec![Span::styled("  Category: ", label), Span::raw(record.category.clone())]),
        Line::from(vec![
            Span::styled("  Score: ", label),
            Span::styled(format!("{:.2}", record.score), Style::default().fg(score_color(record.score))),
        ]),
    ];

    for (key, value) in &record.fields {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", key), Style::default().fg(Color::Cyan)),
            Span::raw(value.clone()),
        ]));
    }

    lines.push(Line::from(""));
    for (i, spec) in controller.domain().attributes().iter().enumerate() {
        let current = record.attribute(spec.key);
        let staged = app.staged.get(spec.key).copied().unwrap_or(current);
        let marker = if i == app.attr_cursor { "▸" } else { " " };
        let mut spans = vec![
            Span::styled(format!(" {} {}: ", marker, spec.label), Style::default().fg(Color::Cyan)),
            Span::raw(format_value(current)),
        ];
        if staged != current {
            spans.push(Span::styled(format!(" → {}", format_value(staged)), Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));
    }

    let insights = panel.insights();
    if !insights.is_empty() {
        lines.push(Line::from(""));
        for insight in insights {
            lines.push(Line::from(Span::styled(format!("  {}", insight), Style::default().fg(Color::Green))));
        }
    }

    if !panel.actions().is_empty() {
        lines.push(Line::from(""));
        let mut spans = vec![Span::raw("  ")];
        for action in panel.actions() {
            spans.push(Span::styled(action.key.to_string(), Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(format!(" {}  ", action.label)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  History", label)));
    for entry in record.history.iter().rev().take(8) {
        lines.push(Line::from(Span::styled(format!("  {}", entry), Style::default().fg(Color::DarkGray))));
    }

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", record.id)),
    );
    f.render_widget(detail, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let spans = match app.input {
        InputMode::Search => vec![Span::raw(format!(" Search: {}_", app.search))],
        InputMode::EditTitle => vec![Span::raw(format!(" Title: {}_ ", app.buffer)), key("Enter"), Span::raw(" save")],
        InputMode::EditField(i) => {
            let field = app.editable_fields().get(i).copied().unwrap_or("-");
            vec![
                Span::raw(format!(" {}: {}_ ", field, app.buffer)),
                key("Tab"),
                Span::raw(" next field | "),
                key("Enter"),
                Span::raw(" save"),
            ]
        }
        InputMode::Normal => vec![
            Span::styled(format!(" {} ", app.status), Style::default().fg(Color::Cyan)),
            Span::raw("| "),
            key("Tab/1-9"),
            Span::raw(" Module | "),
            key("←/→ +/-"),
            Span::raw(" Attr | "),
            key("r"),
            Span::raw(" Recompute | "),
            key("e/f/p"),
            Span::raw(" Edit | "),
            key("n/d"),
            Span::raw(" New/Del | "),
            key("/ c"),
            Span::raw(" Filter | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" Quit"),
        ],
    };

    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::White)));
    f.render_widget(status_bar, area);
}

fn score_color(score: f64) -> Color {
    if score > 80.0 {
        Color::Green
    } else if score > 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
