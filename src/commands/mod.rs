/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `auth`: login, register, logout, status, user listing
- `movies`: catalog listing, lookup, import, deletion, route navigation

Handlers share an [`App`], which wires the session store, the HTTP client,
the two service wrappers, and the route guard from one [`Config`].
*/

use std::borrow::Cow;
use std::sync::Arc;

use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{DefaultEditor, Editor, Helper};

use crate::api::ApiClient;
use crate::auth::AuthService;
use crate::config::Config;
use crate::error::Result;
use crate::guard::RouteGuard;
use crate::movies::MovieService;
use crate::session::{self, SessionContext, SessionStore};

pub mod auth;
pub mod movies;

/// Everything a command handler needs, built once per invocation.
#[derive(Debug, Clone)]
pub struct App {
    /// Effective configuration
    pub config: Config,
    /// Session shared by every component below
    pub session: SessionContext,
    /// Authentication wrapper
    pub auth: AuthService,
    /// Movie wrapper
    pub movies: MovieService,
    /// Route guard
    pub guard: RouteGuard,
}

impl App {
    /// Wires the application using the session store named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store or HTTP client cannot be
    /// created.
    pub fn new(config: Config) -> Result<Self> {
        let store = session::open_store(&config)?;
        Self::with_store(config, store)
    }

    /// Wires the application over an explicit session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_store(config: Config, store: Arc<dyn SessionStore>) -> Result<Self> {
        let session = SessionContext::new(store);
        let client = ApiClient::new(&config.api, session.clone())?;
        Ok(Self {
            auth: AuthService::new(client.clone()),
            movies: MovieService::new(client, config.api.movie_lookup),
            guard: RouteGuard::new(session.clone()),
            session,
            config,
        })
    }
}

/// Reads a line from the terminal; `None` on Ctrl-C / Ctrl-D.
fn prompt(label: &str) -> Result<Option<String>> {
    let mut rl = DefaultEditor::new()?;
    match rl.readline(label) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Line helper that renders every typed character as `*`.
#[derive(Debug, Default, Clone, Copy)]
struct PasswordMask;

impl Highlighter for PasswordMask {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        // redraw through highlight() on every keystroke
        true
    }
}

impl Completer for PasswordMask {
    type Candidate = String;
}

impl Hinter for PasswordMask {
    type Hint = String;
}

impl Validator for PasswordMask {}

impl Helper for PasswordMask {}

/// Reads a secret from the terminal without echoing it; `None` on
/// Ctrl-C / Ctrl-D. Nothing is added to the line history.
fn prompt_secret(label: &str) -> Result<Option<String>> {
    let mut rl: Editor<PasswordMask, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(PasswordMask));
    match rl.readline(label) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Asks a yes/no question; anything but `y`/`yes` is a no.
fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(
        answer.as_deref().map(|a| a.trim().to_lowercase()).as_deref(),
        Some("y") | Some("yes")
    ))
}
