//! Catalog commands and screen navigation

use anyhow::bail;
use colored::Colorize;
use prettytable::{format, row, Table};

use super::{confirm, App};
use crate::error::Result;
use crate::guard::{Navigation, Route};
use crate::movies::Movie;
use crate::views::{MovieListView, Notice};

/// Opens the catalog screen, or fails when the guard redirects.
fn open_catalog(app: &App) -> Result<MovieListView> {
    match app.guard.check(Route::Movies) {
        Navigation::Allow(_) => Ok(MovieListView::new(
            app.movies.clone(),
            &app.session,
            app.config.omdb.api_key.clone(),
        )),
        Navigation::Redirect(to) => bail!(
            "Not logged in or session expired. Run `moviedesk login` first (redirected to {}).",
            to
        ),
    }
}

/// Prints the view's notice and turns an error notice into a failure.
fn report(notice: &Notice) -> Result<()> {
    match notice {
        Notice::None => Ok(()),
        Notice::Info(text) => {
            println!("{}", text.green());
            Ok(())
        }
        Notice::Error(text) => bail!("{}", text),
    }
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn print_movie_table(movies: &[Movie]) {
    if movies.is_empty() {
        println!("{}", "No movies in the catalog.".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "ID".bold(),
        "Title".bold(),
        "Year".bold(),
        "Genre".bold(),
        "Rating".bold(),
        "IMDb".bold()
    ]);
    for movie in movies {
        table.add_row(row![
            movie.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            movie.title.cyan(),
            or_dash(&movie.year),
            or_dash(&movie.genre),
            or_dash(&movie.imdb_rating),
            movie.imdb_id
        ]);
    }
    table.printstd();
    println!("{} movie(s)", movies.len());
}

fn print_movie_details(movie: &Movie) {
    println!(
        "{} ({})",
        movie.title.bold().cyan(),
        movie.year.as_deref().unwrap_or("?")
    );

    let fields: [(&str, &Option<String>); 11] = [
        ("Rated", &movie.rated),
        ("Released", &movie.released),
        ("Runtime", &movie.runtime),
        ("Genre", &movie.genre),
        ("Director", &movie.director),
        ("Writer", &movie.writer),
        ("Actors", &movie.actors),
        ("Language", &movie.language),
        ("Country", &movie.country),
        ("IMDb rating", &movie.imdb_rating),
        ("Poster", &movie.poster),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {:<12} {}", format!("{}:", label).bold(), value);
        }
    }
    if !movie.imdb_id.is_empty() {
        println!("  {:<12} {}", "IMDb ID:".bold(), movie.imdb_id);
    }
    if let Some(id) = movie.id {
        println!("  {:<12} {}", "ID:".bold(), id);
    }
    if let Some(plot) = &movie.plot {
        println!();
        println!("{}", plot);
    }
}

/// Lists the catalog.
///
/// # Errors
///
/// Fails when not logged in or when the catalog cannot be loaded.
pub async fn list(app: &App, json: bool) -> Result<()> {
    let mut view = open_catalog(app)?;
    view.load().await;
    report(&view.notice)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view.movies)?);
    } else {
        print_movie_table(&view.movies);
    }
    Ok(())
}

/// Shows one movie by backend id.
///
/// # Errors
///
/// Fails when not logged in, when the id is not a number, or when the movie
/// cannot be found.
pub async fn show(app: &App, id: String, json: bool) -> Result<()> {
    let mut view = open_catalog(app)?;
    view.search_id = id;
    view.search_movie().await;
    report(&view.notice)?;

    let Some(movie) = view.selected else {
        bail!("Movie not found");
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&movie)?);
    } else {
        print_movie_details(&movie);
    }
    Ok(())
}

/// Imports a movie by IMDb id.
///
/// # Errors
///
/// Fails when not logged in, when the session is not an administrator's, or
/// when the backend rejects the import.
pub async fn add(app: &App, imdb_id: String, api_key: Option<String>) -> Result<()> {
    let mut view = open_catalog(app)?;
    if let Some(api_key) = api_key {
        view.api_key = api_key;
    }
    view.imdb_id = imdb_id;
    view.add_movie().await;
    report(&view.notice)?;

    if let Some(movie) = view.movies.last() {
        tracing::debug!(title = %movie.title, "Catalog now ends with");
    }
    println!("{} movie(s) in the catalog", view.movies.len());
    Ok(())
}

/// Deletes a movie by backend id, asking first unless `yes` is set.
///
/// # Errors
///
/// Fails when not logged in, when the session is not an administrator's, or
/// when the backend rejects the deletion.
pub async fn delete(app: &App, id: i64, yes: bool) -> Result<()> {
    let mut view = open_catalog(app)?;
    if !yes && !confirm(&format!("Are you sure you want to delete movie {}?", id))? {
        println!("{}", "Cancelled".yellow());
        return Ok(());
    }
    view.delete_movie(id).await;
    report(&view.notice)
}

/// Navigates to a screen by path and reports where the guard sent us.
///
/// # Errors
///
/// Fails on unknown paths, or when the catalog cannot be loaded.
pub async fn open(app: &App, path: &str) -> Result<()> {
    let Some(route) = Route::resolve(path) else {
        bail!("Unknown route: {}", path);
    };

    match app.guard.check(route) {
        Navigation::Redirect(to) => {
            println!("{} {}", "Redirected to".yellow(), to);
            Ok(())
        }
        Navigation::Allow(Route::Movies) => {
            println!("{}", Route::Movies);
            list(app, false).await
        }
        Navigation::Allow(Route::Login) => {
            println!("{}", Route::Login);
            println!("Log in with {}", "moviedesk login -u <username>".cyan());
            Ok(())
        }
        Navigation::Allow(Route::Register) => {
            println!("{}", Route::Register);
            println!(
                "Create an account with {}",
                "moviedesk register -u <username> -e <email>".cyan()
            );
            Ok(())
        }
    }
}
