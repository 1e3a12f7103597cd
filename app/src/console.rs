//! Text front end over the whole application.
//!
//! [`Console`] plays the part of the browser: it owns the shell, the pages
//! and the storage, and turns each [`Command`] into the text a page would
//! show.

use crate::command::{Command, HELP};
use crate::routes::Route;
use crate::shell::Shell;
use std::fmt::Write as _;
use std::time::Duration;
use userdesk_auth::{
    AuthClient, AuthGateway, AuthStore, LoginCredentials, LoginError, RouteGate, Surface, selectors,
};
use userdesk_core::environment::Clock;
use userdesk_directory::{
    DirectoryApi, SearchBar, TableList, UserDetailEditor, UserProfile,
};
use userdesk_storage::StorageInspector;

/// Shown for commands that need a signed-in user.
pub const SIGN_IN_REQUIRED: &str = "Please log in first";

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print this and read the next command.
    Continue(String),
    /// Stop reading commands.
    Quit,
}

/// Console settings.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Route shown after signing in.
    pub landing_route: String,
    /// Endpoint behind the user list search.
    pub search_url: String,
    /// How long `login` waits for the exchange to settle.
    pub login_timeout: Duration,
}

/// The application, driven one command at a time.
pub struct Console<G, A, C>
where
    G: AuthGateway + Clone + 'static,
    A: DirectoryApi,
    C: Clock,
{
    client: AuthClient<G>,
    gate: RouteGate,
    shell: Shell,
    directory: A,
    search: SearchBar,
    table: TableList,
    editor: Option<UserDetailEditor>,
    storage: StorageInspector<C>,
    login_timeout: Duration,
}

impl<G, A, C> Console<G, A, C>
where
    G: AuthGateway + Clone + 'static,
    A: DirectoryApi,
    C: Clock,
{
    /// Build the console and gate it on `store`.
    pub async fn attach(store: AuthStore<G>, directory: A, clock: C, config: ConsoleConfig) -> Self {
        let shell = Shell::new();
        let gate = RouteGate::attach(&store, config.landing_route, shell.clone()).await;

        Self {
            client: AuthClient::new(store),
            gate,
            shell,
            directory,
            search: SearchBar::new(config.search_url.clone()),
            table: TableList::user_list_at(config.search_url),
            editor: None,
            storage: StorageInspector::new(clock),
            login_timeout: config.login_timeout,
        }
    }

    /// Which surface is on screen.
    #[must_use]
    pub fn surface(&self) -> Surface {
        self.gate.surface()
    }

    /// The shell.
    #[must_use]
    pub const fn shell(&self) -> &Shell {
        &self.shell
    }

    /// The user detail editor, if a user is open.
    #[must_use]
    pub const fn editor(&self) -> Option<&UserDetailEditor> {
        self.editor.as_ref()
    }

    /// The storage inspector.
    #[must_use]
    pub const fn storage(&self) -> &StorageInspector<C> {
        &self.storage
    }

    /// Run one command.
    pub async fn execute(&mut self, command: Command) -> Step {
        if !command.is_public() && self.surface() == Surface::Login {
            return Step::Continue(SIGN_IN_REQUIRED.to_string());
        }

        let output = match command {
            Command::Quit => return Step::Quit,
            Command::Help => HELP.to_string(),
            Command::Login { username, password } => self.login(username, password).await,
            Command::Logout => {
                self.client.logout().await;
                self.editor = None;
                self.table.set_data(Vec::new());
                "Signed out".to_string()
            },
            Command::WhoAmI => self.who_am_i().await,
            Command::Menu => self.render_menu(),
            Command::Go(path) => {
                self.shell.go(&path);
                self.show_current().await
            },
            Command::Search(keyword) => self.run_search(keyword).await,
            Command::Open(row) => match self.table.row_click(row).and_then(|record| record.id()) {
                Some(id) => {
                    self.shell.go(&Route::UserDetail(id).path());
                    self.show_current().await
                },
                None => format!("No row {row}"),
            },
            Command::Edit => match self.editor.as_mut() {
                Some(editor) => {
                    editor.toggle_edit();
                    render_profile(editor)
                },
                None => "No user open".to_string(),
            },
            Command::Set { field, value } => self.set_field(&field, &value),
            Command::Save => match self.editor.as_mut() {
                Some(editor) => editor.save(&self.directory).await.to_string(),
                None => "No user open".to_string(),
            },
            Command::Session { key, value } => stored(self.storage.set_session(&key, &value)),
            Command::Local { key, value } => stored(self.storage.set_local(&key, &value)),
            Command::Cookie {
                key,
                value,
                expiry_minutes,
            } => stored(self.storage.set_cookie(&key, &value, expiry_minutes)),
            Command::Reset => {
                self.storage.reset_all();
                "All storage cleared".to_string()
            },
        };

        Step::Continue(output)
    }

    async fn login(&mut self, username: String, password: String) -> String {
        let credentials = LoginCredentials::new(username, password);
        match self.client.login_and_wait(credentials, self.login_timeout).await {
            Ok(state) => match (&state.user, &state.error) {
                (Some(user), _) => {
                    let page = self.show_current().await;
                    format!("Signed in as {}\n\n{page}", user.full_name())
                },
                (None, Some(error)) => error.clone(),
                (None, None) => "Login did not complete".to_string(),
            },
            Err(LoginError::Validation(error)) => format!("Cannot sign in: {error}"),
            Err(LoginError::Store(error)) => {
                tracing::warn!(%error, "Login did not settle");
                format!("Login did not complete: {error}")
            },
        }
    }

    async fn who_am_i(&self) -> String {
        match self.client.store().state(selectors::current_user).await {
            Some(user) => format!("{} <{}> ({})", user.full_name(), user.email, user.username),
            None => "Not signed in".to_string(),
        }
    }

    fn render_menu(&self) -> String {
        let mut out = String::new();
        for group in self.shell.menu().groups() {
            let _ = writeln!(out, "{}", group.text);
            for item in &group.items {
                let _ = writeln!(out, "  {:<14} {}", item.text, item.route_link);
            }
        }
        out.trim_end().to_string()
    }

    async fn run_search(&mut self, keyword: String) -> String {
        if self.shell.current() != Route::UserList {
            self.shell.go(&Route::UserList.path());
        }
        self.search.set_term(keyword);
        let outcome = self.search.search(&self.directory).await;
        self.table.apply(outcome);
        self.render_table()
    }

    fn set_field(&mut self, field: &str, value: &str) -> String {
        let Some(editor) = self.editor.as_mut() else {
            return "No user open".to_string();
        };
        let Some(draft) = editor.draft_mut() else {
            return "Not in edit mode (use 'edit')".to_string();
        };
        match set_profile_field(draft, field, value) {
            Ok(()) => render_profile(editor),
            Err(message) => message,
        }
    }

    /// Render the current page, loading it first if needed.
    async fn show_current(&mut self) -> String {
        let route = self.shell.current();
        match &route {
            Route::Welcome => self.render_welcome().await,
            Route::UserList => self.render_table(),
            Route::UserDetail(id) => {
                if self.editor.as_ref().map(|e| e.original().id) != Some(*id) {
                    match UserDetailEditor::load(&self.directory, *id).await {
                        Ok(editor) => self.editor = Some(editor),
                        Err(error) => {
                            self.editor = None;
                            return format!("Could not load user {id}: {error}");
                        },
                    }
                }
                self.editor
                    .as_ref()
                    .map_or_else(String::new, render_profile)
            },
            Route::Storage => match self.storage.snapshot() {
                Ok(snapshot) => format!(
                    "Session Storage\n{}\n\nLocal Storage\n{}\n\nCookies\n{}GMT Time\n{}",
                    snapshot.session, snapshot.local, snapshot.cookies, snapshot.gmt_time
                ),
                Err(error) => format!("Could not read storage: {error}"),
            },
            Route::NotFound(_) => "404\nSorry, the page you visited does not exist.".to_string(),
        }
    }

    async fn render_welcome(&self) -> String {
        let name = self
            .client
            .store()
            .state(selectors::current_user)
            .await
            .map_or_else(String::new, |user| user.full_name());
        format!("Welcome, {name}")
    }

    fn render_table(&self) -> String {
        let mut out = format!("{}\n", self.table.title());
        let _ = writeln!(out, "#  {}", self.table.headers().join(" | "));
        for (index, row) in self.table.rows().iter().enumerate() {
            let _ = writeln!(out, "{index:<2} {}", row.join(" | "));
        }
        out.trim_end().to_string()
    }
}

fn stored(accepted: bool) -> String {
    if accepted {
        "Saved".to_string()
    } else {
        "Key and value are required".to_string()
    }
}

fn render_profile(editor: &UserDetailEditor) -> String {
    let p = editor.draft();
    let mode = if editor.is_editing() { "editing" } else { "read-only" };
    format!(
        "User {id} ({mode})\n\
         username:    {username}\n\
         email:       {email}\n\
         macAddress:  {mac}\n\
         university:  {university}\n\
         address:     {address}, {city}, {state} {postal}\n\
         coordinates: {lat}, {lng}\n\
         card:        {card_type} {card_number} exp {card_expire}\n\
         currency:    {currency}\n\
         iban:        {iban}",
        id = p.id,
        username = p.username,
        email = p.email,
        mac = p.mac_address,
        university = p.university,
        address = p.address.address,
        city = p.address.city,
        state = p.address.state,
        postal = p.address.postal_code,
        lat = p.address.coordinates.lat,
        lng = p.address.coordinates.lng,
        card_type = p.bank.card_type,
        card_number = p.bank.card_number,
        card_expire = p.bank.card_expire,
        currency = p.bank.currency,
        iban = p.bank.iban,
    )
}

/// Set one editable field by its form name.
fn set_profile_field(profile: &mut UserProfile, field: &str, value: &str) -> Result<(), String> {
    let coordinate = || {
        value
            .parse::<f64>()
            .map_err(|_| format!("'{value}' is not a number"))
    };

    match field {
        "username" => profile.username = value.to_string(),
        "email" => profile.email = value.to_string(),
        "macAddress" => profile.mac_address = value.to_string(),
        "university" => profile.university = value.to_string(),
        "address" => profile.address.address = value.to_string(),
        "city" => profile.address.city = value.to_string(),
        "state" => profile.address.state = value.to_string(),
        "postalCode" => profile.address.postal_code = value.to_string(),
        "lat" => profile.address.coordinates.lat = coordinate()?,
        "lng" => profile.address.coordinates.lng = coordinate()?,
        "cardNumber" => profile.bank.card_number = value.to_string(),
        "cardExpire" => profile.bank.card_expire = value.to_string(),
        "cardType" => profile.bank.card_type = value.to_string(),
        "currency" => profile.bank.currency = value.to_string(),
        "iban" => profile.bank.iban = value.to_string(),
        other => return Err(format!("Unknown field '{other}'")),
    }
    Ok(())
}
