use std::fmt::Display;

use colored::Colorize;
use log::{Level, LevelFilter};

/// Crates that carry the traffic to the movie provider
const HTTP_CRATES: [&str; 5] = ["reqwest", "hyper", "hyper_util", "h2", "rustls"];

pub fn init_logger(verbose: bool) {
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let target = Target::from_str(record.target());
            let now = chrono::Local::now();

            out.finish(format_args!(
                "{:^5} {} {:^8} {}",
                level_badge(record.level()),
                now.format("%H:%M:%S").to_string().bright_black(),
                target,
                message
            ))
        })
        .filter(move |meta| meta.level() <= Target::from_str(meta.target()).max_level(verbose))
        .chain(std::io::stderr())
        .apply()
        .expect("logging is initialized")
}

#[derive(Debug, PartialEq)]
enum Target {
    External(String),
    /// Requests to the movie provider, below the provider implementation
    Http,
    App,
    Client,
    Collab,
    Core,
    Impls,
}

impl Target {
    fn from_str(str: &str) -> Self {
        let module = str.split("::").next().unwrap_or_default();

        match module {
            "marquee" => Self::App,
            "marquee_client" => Self::Client,
            "marquee_collab" => Self::Collab,
            "marquee_core" => Self::Core,
            "marquee_impls" => Self::Impls,
            http if HTTP_CRATES.contains(&http) => Self::Http,
            other => Self::External(other.to_string()),
        }
    }

    /// The most detailed level shown for this target.
    /// Provider traffic is only traced when running verbose, other crates only report problems.
    fn max_level(&self, verbose: bool) -> LevelFilter {
        match (self, verbose) {
            (Self::External(_), _) => LevelFilter::Warn,
            (Self::Http, true) => LevelFilter::Debug,
            (Self::Http, false) => LevelFilter::Warn,
            (_, true) => LevelFilter::Debug,
            (_, false) => LevelFilter::Info,
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            Target::External(x) => x.as_str().clear(),
            Target::Http => "HTTP".bright_black(),
            Target::App => "MARQUEE".bright_white(),
            Target::Client => "CLIENT".bright_green(),
            Target::Collab => "COLLAB".bright_purple(),
            Target::Core => "CORE".blue(),
            Target::Impls => "IMPLS".cyan(),
        };

        Display::fmt(&result, f)
    }
}

fn level_badge(level: Level) -> String {
    let label = match level {
        Level::Error => "ERR",
        Level::Warn => "WRN",
        Level::Info => "INF",
        Level::Debug => "DBG",
        Level::Trace => "TRC",
    };
    let label = format!(" {} ", label);

    match level {
        Level::Error => label.black().on_red().bold().to_string(),
        Level::Warn => label.black().on_yellow().bold().to_string(),
        Level::Info => label.black().on_blue().bold().to_string(),
        Level::Debug => label.white().on_black().to_string(),
        Level::Trace => label,
    }
}
