//! Minimal terminal frontend. All logic lives in shiori-core; this binary
//! only forwards intents and prints whatever state the core holds.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use shiori_api::omdb::OmdbClient;
use shiori_api::CatalogClient;
use shiori_core::app::{App, Event};
use shiori_core::config::AppConfig;
use shiori_core::watchlist::WatchlistStore;

const HELP: &str = "\
type text        search the catalog (3+ characters)
:open <n>        open the n-th search result
:close           close the detail view
:rate <1-10>     rate the open movie
:add             add the rated movie to the watchlist
:rm <n>          delete the n-th watchlist entry
:list            show the watchlist
:help            this text
:quit            exit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("shiori=info")
        .init();

    let config = AppConfig::load()?;
    if config.catalog.api_key.is_empty() {
        eprintln!(
            "No API key configured; set catalog.api_key in {}",
            AppConfig::config_path().display()
        );
    }

    let client = OmdbClient::with_base_url(
        config.catalog.api_key.clone(),
        config.catalog.base_url.clone(),
    );
    let watchlist = WatchlistStore::open(AppConfig::watchlist_path());
    let mut app = App::new(client, watchlist);

    println!("shiori — movie search & watchlist");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match parse_command(line, &app) {
            Command::Quit => break,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::List => {
                render_watchlist(&app);
                continue;
            }
            Command::Invalid(msg) => {
                println!("{msg}");
                continue;
            }
            Command::Event(event) => event,
        };

        dispatch(&mut app, event).await;
        render(&app);
    }

    Ok(())
}

enum Command {
    Event(Event),
    List,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command<C: CatalogClient + 'static>(line: &str, app: &App<C>) -> Command {
    let mut parts = line.splitn(2, ' ');
    match parts.next().unwrap_or_default() {
        ":quit" | ":q" => Command::Quit,
        ":help" => Command::Help,
        ":list" => Command::List,
        ":close" => Command::Event(Event::SelectionClosed),
        ":add" => Command::Event(Event::WatchedAdded),
        ":rate" => match parts.next().and_then(|s| s.trim().parse::<u8>().ok()) {
            Some(rating @ 1..=10) => Command::Event(Event::RatingSubmitted(rating)),
            _ => Command::Invalid("usage: :rate <1-10>".into()),
        },
        ":open" => match pick(parts.next(), app.search_results().len()) {
            Some(index) => {
                Command::Event(Event::MovieSelected(app.search_results()[index].id.clone()))
            }
            None => Command::Invalid("usage: :open <result number>".into()),
        },
        ":rm" => match pick(parts.next(), app.watchlist().len()) {
            Some(index) => {
                Command::Event(Event::WatchedRemoved(app.watchlist().items()[index].id.clone()))
            }
            None => Command::Invalid("usage: :rm <watchlist number>".into()),
        },
        _ => Command::Event(Event::QueryChanged(line.to_string())),
    }
}

/// Parse a 1-based index argument, bounds-checked against `len`.
fn pick(arg: Option<&str>, len: usize) -> Option<usize> {
    let n: usize = arg?.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

/// Run one event and any chain of continuations to quiescence.
async fn dispatch<C: CatalogClient + 'static>(app: &mut App<C>, event: Event) {
    let mut next = app.update(event);
    while let Some(future) = next {
        next = app.update(future.await);
    }
}

fn render<C: CatalogClient + 'static>(app: &App<C>) {
    if let Some(message) = app.search_error().user_message() {
        println!("! {message}");
    } else if !app.search_results().is_empty() {
        for (i, movie) in app.search_results().iter().enumerate() {
            println!("{:2}. {} ({})", i + 1, movie.title, movie.year);
        }
    }

    if app.selected_id().is_some() {
        match app.selected_detail() {
            Some(detail) => {
                println!("── {} ──", detail.title);
                if let Some(released) = &detail.released {
                    println!("   released {released}");
                }
                if let Some(minutes) = detail.runtime_minutes {
                    println!("   {minutes} min");
                }
                if let Some(rating) = detail.catalog_rating {
                    println!("   rated {rating} by the catalog");
                }
                if let Some(plot) = &detail.plot {
                    println!("   {plot}");
                }
                if app.is_watched() {
                    println!("   (already on your watchlist)");
                }
            }
            None if app.detail_loading() => println!("loading..."),
            None => println!("no details available"),
        }
    }
}

fn render_watchlist<C: CatalogClient + 'static>(app: &App<C>) {
    let watchlist = app.watchlist();
    if watchlist.is_empty() {
        println!("watchlist is empty");
        return;
    }
    for (i, item) in watchlist.items().iter().enumerate() {
        println!(
            "{:2}. {} — you rated {}/10",
            i + 1,
            item.title,
            item.user_rating
        );
    }
    let summary = watchlist.summary();
    println!(
        "{} movies · avg catalog {:.2} · avg yours {:.2} · avg {:.0} min",
        summary.count,
        summary.avg_catalog_rating,
        summary.avg_user_rating,
        summary.avg_runtime_minutes
    );
}
