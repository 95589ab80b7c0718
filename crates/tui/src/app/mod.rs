use std::time::{Duration, Instant};

use api_types::{pokemon::Pokemon, user::User};
use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use listing::{RemoteError, RemoteErrorKind, SortScope};

use crate::{
    client::{Client, PokedexClient, UsersClient},
    config::AppConfig,
    error::{AppError, Result},
    session::Session,
    ui::{self, keymap::AppAction},
};

pub use collection::{ListMode, ListScreen};
pub use entities::{FormDraft, TableEntity};

mod collection;
mod entities;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Pokemon,
    Users,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Pokemon, Section::Users];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pokemon => "Pokémon",
            Self::Users => "Users",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Self::Pokemon => 'm',
            Self::Users => 'u',
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Pokemon => Self::Users,
            Self::Users => Self::Pokemon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
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
    pub created: Instant,
}

impl ToastState {
    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    fn expired(&self) -> bool {
        self.created.elapsed() >= TOAST_TTL
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub login: LoginState,
    pub user: Option<User>,
    pub signed_in_at: Option<DateTime<Utc>>,
    pub pokemon: ListScreen<Pokemon>,
    pub users: ListScreen<User>,
    pub toast: Option<ToastState>,
    pub base_url: String,
}

impl AppState {
    /// Whether a keystroke would be typed into a field or dialog of the
    /// active section rather than act as a global shortcut.
    pub fn capturing_input(&self) -> bool {
        let mode = match self.section {
            Section::Pokemon => self.pokemon.mode,
            Section::Users => self.users.mode,
        };
        mode != ListMode::Browse
    }
}

pub struct App {
    config: AppConfig,
    client: Client,
    pokedex: PokedexClient,
    users: UsersClient,
    session: Session,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, session: Session) -> Result<Self> {
        let client = Client::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let user = session.current_user().cloned();
        let state = AppState {
            screen: if user.is_some() {
                Screen::Dashboard
            } else {
                Screen::Login
            },
            section: Section::Pokemon,
            login: LoginState {
                email: config.email.clone(),
                password: String::new(),
                focus: LoginField::Email,
                message: None,
            },
            user,
            signed_in_at: session.signed_in_at(),
            pokemon: ListScreen::new(config.page_size(), config.sort_scope.into()),
            users: ListScreen::new(config.page_size(), config.sort_scope.into()),
            toast: None,
            base_url: client.base_url().to_string(),
        };

        Ok(Self {
            pokedex: client.pokedex(),
            users: client.users(),
            config,
            client,
            session,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        if self.state.screen == Screen::Dashboard {
            tracing::info!("resuming persisted session");
            self.refresh_section().await;
        }

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            if self.state.toast.as_ref().is_some_and(ToastState::expired) {
                self.state.toast = None;
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key).await?
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.screen {
            Screen::Login => self.handle_login_key(action).await,
            Screen::Dashboard => self.handle_dashboard_key(action).await,
        }
    }

    async fn handle_login_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::NextField | AppAction::PrevField | AppAction::Up | AppAction::Down => {
                let login = &mut self.state.login;
                login.focus = match login.focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            AppAction::Backspace => {
                self.active_login_field().pop();
            }
            AppAction::Input(ch) => self.active_login_field().push(ch),
            AppAction::Cancel => self.state.login.message = None,
            AppAction::Submit => self.attempt_login().await?,
            _ => {}
        }
        Ok(())
    }

    fn active_login_field(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Email => &mut self.state.login.email,
            LoginField::Password => &mut self.state.login.password,
        }
    }

    async fn attempt_login(&mut self) -> Result<()> {
        let email = self.state.login.email.trim().to_string();
        let password = self.state.login.password.clone();

        if email.is_empty() || password.is_empty() {
            self.state.login.message = Some("Please fill in all fields.".to_string());
            return Ok(());
        }

        match self.client.login(&email, &password).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "signed in");
                self.session.set_current_user(user.clone())?;
                self.state.signed_in_at = self.session.signed_in_at();
                self.state.user = Some(user);
                self.state.login.password.clear();
                self.state.login.message = None;
                self.state.screen = Screen::Dashboard;
                self.state.section = Section::Pokemon;
                self.refresh_section().await;
            }
            Err(err) => {
                tracing::warn!(status = ?err.status, "login failed: {err}");
                self.state.login.message = Some(login_message_for_error(&err));
            }
        }

        Ok(())
    }

    async fn handle_dashboard_key(&mut self, action: AppAction) -> Result<()> {
        if !self.state.capturing_input() {
            match action {
                AppAction::Input('q') => {
                    self.should_quit = true;
                    return Ok(());
                }
                AppAction::Input('L') => return self.logout().await,
                AppAction::NextField | AppAction::PrevField => {
                    self.switch_section(self.state.section.other()).await;
                    return Ok(());
                }
                AppAction::Input(ch) => {
                    if let Some(section) = Section::ALL
                        .into_iter()
                        .find(|section| section.shortcut() == ch)
                    {
                        self.switch_section(section).await;
                        return Ok(());
                    }
                }
                _ => {}
            }
        }

        let toast = match self.state.section {
            Section::Pokemon => self.state.pokemon.handle(action, &self.pokedex).await,
            Section::Users => self.state.users.handle(action, &self.users).await,
        };
        if toast.is_some() {
            self.state.toast = toast;
        }
        Ok(())
    }

    async fn switch_section(&mut self, section: Section) {
        if self.state.section == section {
            return;
        }
        self.state.section = section;
        let loaded = match section {
            Section::Pokemon => self.state.pokemon.view.is_loaded(),
            Section::Users => self.state.users.view.is_loaded(),
        };
        if !loaded {
            self.refresh_section().await;
        }
    }

    async fn refresh_section(&mut self) {
        let toast = match self.state.section {
            Section::Pokemon => self.state.pokemon.reload(&self.pokedex).await,
            Section::Users => self.state.users.reload(&self.users).await,
        };
        if toast.is_some() {
            self.state.toast = toast;
        }
    }

    /// Signs out even when the server call fails; the local session is what
    /// gates the dashboard.
    async fn logout(&mut self) -> Result<()> {
        if let Err(err) = self.client.logout().await {
            tracing::warn!("logout request failed: {err}");
        }
        self.session.clear()?;
        tracing::info!("signed out");

        let page_size = self.config.page_size();
        let scope: SortScope = self.config.sort_scope.into();
        self.state.user = None;
        self.state.signed_in_at = None;
        self.state.pokemon = ListScreen::new(page_size, scope);
        self.state.users = ListScreen::new(page_size, scope);
        self.state.section = Section::Pokemon;
        self.state.screen = Screen::Login;
        self.state.login.password.clear();
        self.state.login.focus = LoginField::Email;
        self.state.login.message = None;
        self.state.toast = Some(ToastState::info("Signed out."));
        Ok(())
    }
}

fn login_message_for_error(err: &RemoteError) -> String {
    match err.kind() {
        RemoteErrorKind::Transport => format!("Server unreachable: {}", err.message),
        _ => err.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::client::tests::{Seen, spawn_api};

    fn scratch_session() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/test_sessions")
            .join(format!("app_{}.json", uuid::Uuid::new_v4()))
    }

    fn config(base_url: &str, session_path: &std::path::Path) -> AppConfig {
        AppConfig {
            base_url: base_url.to_string(),
            session_path: session_path.display().to_string(),
            ..AppConfig::default()
        }
    }

    fn app(base_url: &str, session_path: &std::path::Path) -> App {
        let session = Session::load(session_path).unwrap();
        App::new(config(base_url, session_path), session).unwrap()
    }

    async fn type_login(app: &mut App, email: &str, password: &str) {
        for ch in email.chars() {
            app.handle_login_key(AppAction::Input(ch)).await.unwrap();
        }
        app.handle_login_key(AppAction::NextField).await.unwrap();
        for ch in password.chars() {
            app.handle_login_key(AppAction::Input(ch)).await.unwrap();
        }
    }

    #[test]
    fn starts_on_login_without_a_persisted_user() {
        let path = scratch_session();
        let app = app("http://127.0.0.1:8000", &path);
        assert_eq!(app.state.screen, Screen::Login);
        assert!(app.state.user.is_none());
        assert!(app.state.signed_in_at.is_none());
    }

    #[test]
    fn persisted_user_resumes_on_the_pokemon_tab() {
        let path = scratch_session();
        let mut session = Session::load(&path).unwrap();
        session
            .set_current_user(User {
                id: 1,
                name: "Ash".to_string(),
                email: "ash@kanto.test".to_string(),
            })
            .unwrap();

        let app = app("http://127.0.0.1:8000", &path);
        assert_eq!(app.state.screen, Screen::Dashboard);
        assert_eq!(app.state.section, Section::Pokemon);
        assert_eq!(app.state.user.as_ref().map(|u| u.name.as_str()), Some("Ash"));
        assert!(app.state.signed_in_at.is_some());
        session.clear().unwrap();
    }

    #[tokio::test]
    async fn login_with_an_empty_field_asks_for_both() {
        let base = spawn_api(Seen::default()).await;
        let path = scratch_session();
        let mut app = app(&base, &path);

        type_login(&mut app, "ash@kanto.test", "").await;
        app.handle_login_key(AppAction::Submit).await.unwrap();
        assert_eq!(app.state.screen, Screen::Login);
        assert_eq!(
            app.state.login.message.as_deref(),
            Some("Please fill in all fields.")
        );
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn rejected_login_shows_the_server_message() {
        let base = spawn_api(Seen::default()).await;
        let path = scratch_session();
        let mut app = app(&base, &path);

        type_login(&mut app, "ash@kanto.test", "raichu").await;
        app.attempt_login().await.unwrap();
        assert_eq!(app.state.screen, Screen::Login);
        assert_eq!(app.state.login.message.as_deref(), Some("Invalid credentials"));
        assert!(app.state.user.is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn login_persists_the_user_and_loads_pokemon() {
        let base = spawn_api(Seen::default()).await;
        let path = scratch_session();
        let mut app = app(&base, &path);

        type_login(&mut app, " ash@kanto.test ", "pikachu").await;
        app.attempt_login().await.unwrap();
        assert_eq!(app.state.screen, Screen::Dashboard);
        assert_eq!(app.state.section, Section::Pokemon);
        assert!(app.state.login.password.is_empty());
        assert!(app.state.login.message.is_none());
        assert_eq!(app.state.pokemon.view.filtered_count(), 2);
        assert!(!app.state.users.view.is_loaded());

        let stored = Session::load(&path).unwrap();
        assert_eq!(stored.current_user().map(|u| u.id), Some(1));
        app.session.clear().unwrap();
    }

    #[tokio::test]
    async fn logout_returns_to_login_and_forgets_the_user() {
        let base = spawn_api(Seen::default()).await;
        let path = scratch_session();
        let mut app = app(&base, &path);
        type_login(&mut app, "ash@kanto.test", "pikachu").await;
        app.attempt_login().await.unwrap();
        assert!(path.exists());

        app.handle_dashboard_key(AppAction::Input('L')).await.unwrap();
        assert_eq!(app.state.screen, Screen::Login);
        assert!(app.state.user.is_none());
        assert!(app.state.signed_in_at.is_none());
        assert!(!app.state.pokemon.view.is_loaded());
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.message.as_str()),
            Some("Signed out.")
        );
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn logout_still_signs_out_when_the_server_is_gone() {
        let path = scratch_session();
        let mut session = Session::load(&path).unwrap();
        session
            .set_current_user(User {
                id: 1,
                name: "Ash".to_string(),
                email: "ash@kanto.test".to_string(),
            })
            .unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let mut app = app(&format!("http://{addr}"), &path);
        assert_eq!(app.state.screen, Screen::Dashboard);

        app.logout().await.unwrap();
        assert_eq!(app.state.screen, Screen::Login);
        assert!(!path.exists());
    }
}
