//! Session commands: login, register, logout, status, users

use anyhow::bail;
use colored::Colorize;
use prettytable::{format, row, Table};

use super::{prompt_secret, App};
use crate::error::Result;
use crate::views::{LoginForm, RegisterForm};

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(prompt_secret("Password: ")?.unwrap_or_default()),
    }
}

/// Logs in and stores the session.
///
/// # Errors
///
/// Returns the login form's error message when the login fails.
pub async fn login(app: &App, username: String, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let mut form = LoginForm::new(username, password);

    match form.submit(&app.auth).await {
        Some(route) => {
            let role = app
                .session
                .role()
                .map(|r| r.to_string())
                .unwrap_or_default();
            println!(
                "{}",
                format!("Logged in as {} ({})", form.username.trim(), role).green()
            );
            println!("Continue at {}", route.path().cyan());
            Ok(())
        }
        None => bail!("{}", form.error),
    }
}

/// Registers a new account.
///
/// # Errors
///
/// Returns the registration form's error message when registration fails.
pub async fn register(
    app: &App,
    username: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password)?;
    let mut form = RegisterForm::new(username, password, email);

    match form.submit(&app.auth).await {
        Some(route) => {
            if !form.success_message.is_empty() {
                println!("{}", form.success_message.green());
            }
            println!(
                "Log in next: {} (screen {})",
                format!("moviedesk login -u {}", form.username.trim()).cyan(),
                route.path()
            );
            Ok(())
        }
        None => bail!("{}", form.error),
    }
}

/// Forgets the stored session.
///
/// # Errors
///
/// Returns the session store's error if the session cannot be cleared.
pub fn logout(app: &App) -> Result<()> {
    app.auth.logout()?;
    println!("{}", "Logged out".green());
    Ok(())
}

/// Prints the current login state.
pub fn status(app: &App) {
    if app.session.is_logged_in() {
        let role = app
            .session
            .role()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{} (role: {})", "Logged in".green(), role);
        if let Some(expires_at) = app.session.expires_at() {
            println!("Session expires {}", expires_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        if app.session.is_admin() {
            println!("Catalog changes: {}", "allowed".green());
        }
    } else if app.session.bearer().is_some() {
        println!("{}", "Session expired. Log in again.".yellow());
    } else {
        println!("{}", "Not logged in".yellow());
    }
}

/// Lists registered users.
///
/// # Errors
///
/// Fails fast without a session; otherwise returns the API error.
pub async fn users(app: &App, json: bool) -> Result<()> {
    let users = app.auth.get_users().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    let Some(entries) = users.as_array() else {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    };

    if entries.is_empty() {
        println!("{}", "No users found.".yellow());
        return Ok(());
    }

    let field = |entry: &serde_json::Value, key: &str| -> String {
        match entry.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        }
    };

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["ID".bold(), "Username".bold(), "Email".bold(), "Role".bold()]);
    for entry in entries {
        table.add_row(row![
            field(entry, "id"),
            field(entry, "username").cyan(),
            field(entry, "email"),
            field(entry, "role")
        ]);
    }
    table.printstd();
    Ok(())
}
