use std::{env, process, sync::Arc};

use colored::Colorize;
use command::{Command, UsageError, USAGE};
use log::{error, info, warn};
use marquee_client::{Activity, ClientError, DetailView, Marquee, ViewState};
use marquee_collab::{AuthConfig, FileStorage, StorageError};
use marquee_core::{Config, Movie};
use marquee_impls::TmdbProvider;
use thiserror::Error;
use tokio::runtime::{self, Runtime};

mod command;
mod logging;

/// Where accounts, the session and wishlists are kept
const STORAGE_PATH: &str = "marquee.json";

struct App {
    marquee: Marquee<FileStorage, TmdbProvider>,
    runtime: Runtime,
}

#[derive(Debug, Error)]
enum MarqueeError {
    #[error("Invalid usage: {0}")]
    Usage(#[from] UsageError),

    #[error("Could not open storage: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("Fatal error: {0}")]
    Fatal(String),
}

impl App {
    fn new() -> Result<Self, MarqueeError> {
        let runtime = runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("marquee-async")
            .build()
            .map_err(|e| MarqueeError::Fatal(e.to_string()))?;

        let storage = FileStorage::open(STORAGE_PATH)?;

        let config = Config::with_api_key(option_env!("MARQUEE_TMDB_API_KEY").unwrap_or_default());
        if config.api_key.is_empty() {
            warn!("No API key was compiled in, requests to the provider will be rejected");
        }

        let provider = Arc::new(TmdbProvider::new(config));
        let marquee = Marquee::new(storage, provider, AuthConfig::default());

        if let Some(user) = marquee.current_user() {
            info!("Signed in as {}", user.username);
        }

        Ok(Self { marquee, runtime })
    }

    fn run(&self, command: Command) -> Result<(), MarqueeError> {
        self.runtime.block_on(self.execute(command))
    }

    async fn execute(&self, command: Command) -> Result<(), MarqueeError> {
        let marquee = &self.marquee;

        match command {
            Command::SignUp { username, password } => {
                let user = marquee.sign_up(username, password).await?;
                info!("Created account {}, sign in to start browsing", user.username);
            }
            Command::SignIn { username, password } => {
                let user = marquee.sign_in(username, password).await?;
                info!("Welcome, {}!", user.username);
            }
            Command::SignOut => {
                marquee.sign_out()?;
                info!("Signed out");
            }
            Command::Popular => {
                let mut browser = marquee.browser()?;
                browser.start().await;
                show(&browser.state());
            }
            Command::Search(query) => {
                let mut browser = marquee.browser()?;
                browser.load_genres().await;
                browser.search(&query).await;
                show(&browser.state());
            }
            Command::Suggest(criteria) => {
                let mut browser = marquee.browser()?;
                browser.start().await;
                browser.suggest(criteria).await;
                show(&browser.state());
            }
            Command::Discover(criteria) => {
                let mut browser = marquee.browser()?;
                browser.load_genres().await;
                browser.discover(criteria).await;
                show(&browser.state());
            }
            Command::Genres => {
                let mut browser = marquee.browser()?;
                browser.load_genres().await;

                for genre in browser.catalog().genres() {
                    println!("{:>8}  {}", genre.id, genre.name);
                }
            }
            Command::Details(movie_id) => {
                let browser = marquee.browser()?;

                match browser.details(movie_id).await {
                    Ok(view) => {
                        let wishlisted = marquee.is_wishlisted(movie_id);
                        show_details(&view, marquee.provider().config(), wishlisted);
                    }
                    Err(e) => error!("{}", e.message(Activity::Details)),
                }
            }
            Command::Wishlist => {
                let entries = marquee.wishlist()?;

                if entries.is_empty() {
                    info!("Your wishlist is empty");
                }

                for entry in entries {
                    println!(
                        "{:>8}  {} ({})",
                        entry.id,
                        entry.title.bold(),
                        year(entry.release_date.as_deref())
                    );
                }
            }
            Command::Toggle(movie_id) => {
                let browser = marquee.browser()?;
                let view = browser.details(movie_id).await?;
                let movie = Movie::from(view.details);

                if marquee.toggle_wishlist(&movie)? {
                    info!("Added {} to your wishlist", movie.title);
                } else {
                    info!("Removed {} from your wishlist", movie.title);
                }
            }
        }

        Ok(())
    }
}

impl MarqueeError {
    fn hint(&self) -> String {
        match self {
            MarqueeError::Usage(_) => format!("Usage: {}", USAGE),
            MarqueeError::Storage(_) => format!(
                "Make sure {} is a readable and writable file in the current directory.",
                STORAGE_PATH
            ),
            MarqueeError::Client(ClientError::NotSignedIn) => {
                "Create an account with sign-up, then sign in with sign-in.".to_string()
            }
            MarqueeError::Client(ClientError::Storage(_)) => {
                "Your data could not be saved. Free up some disk space and try again.".to_string()
            }
            MarqueeError::Client(_) => {
                "Check your input and your internet connection, then try again.".to_string()
            }
            MarqueeError::Fatal(_) => "This error is fatal, and should not happen.".to_string(),
        }
    }
}

fn show(state: &ViewState) {
    match state {
        ViewState::Results(movies) => {
            for movie in movies {
                let rating = movie
                    .rating()
                    .map_or("-".to_string(), |r| format!("{:.1}", r));

                let director = movie
                    .directors()
                    .next()
                    .map_or(String::new(), |d| format!(" by {}", d.name));

                println!(
                    "{:>8}  {} ({}){}  {}",
                    movie.id,
                    movie.title.bold(),
                    year(movie.release_date()),
                    director,
                    rating.yellow()
                );
            }

            info!("Showing {} movies", movies.len());
        }
        ViewState::Empty => info!("No movies found."),
        ViewState::Error(message) => error!("{}", message),
        ViewState::Loading => {}
    }
}

fn show_details(view: &DetailView, config: &Config, wishlisted: bool) {
    let details = &view.details;

    println!("{}", details.title.bold());
    println!("{}", details.overview);
    println!();

    let genres: Vec<_> = details.genres.iter().map(|g| g.name.as_str()).collect();

    let fields = [
        ("Released", details.release_date.clone()),
        ("Runtime", view.runtime()),
        ("Rating", details.vote_average.map(|r| format!("{:.1}", r))),
        ("Genres", (!genres.is_empty()).then(|| genres.join(", "))),
        ("Director", view.director().map(str::to_string)),
        ("Cast", view.actors()),
        ("Poster", details.poster_url(config)),
        ("Trailer", view.trailer.as_ref().map(|t| t.watch_url())),
    ];

    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            println!("{:>10}  {}", label.bright_black(), value);
        }
    }

    let gallery = view.cast_gallery();
    if !gallery.is_empty() {
        println!();
    }

    for member in gallery {
        let character = member.character.as_deref().unwrap_or_default();
        let picture = member.profile_url(config).unwrap_or_default();

        println!(
            "{:>24}  {:<24} {}",
            member.name,
            character.bright_black(),
            picture.dimmed()
        );
    }

    if wishlisted {
        println!("{:>10}  {}", "".clear(), "On your wishlist".green());
    }
}

fn year(date: Option<&str>) -> &str {
    date.and_then(|d| d.get(..4)).unwrap_or("????")
}

fn main() {
    let mut args: Vec<_> = env::args().skip(1).collect();

    let verbose = args.iter().any(|a| a == "--verbose");
    args.retain(|a| a != "--verbose");

    logging::init_logger(verbose);

    let result = Command::parse(args)
        .map_err(MarqueeError::from)
        .and_then(|command| App::new()?.run(command));

    if let Err(error) = result {
        error!("{}", error);
        error!("{}", format!("Hint: {}", error.hint()).dimmed().italic());
        process::exit(1);
    }
}
