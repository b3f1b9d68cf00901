use marquee_core::{FilterCriteria, MovieId};
use thiserror::Error;

pub const USAGE: &str = "marquee [--verbose] <command>

Commands:
  sign-up <username> <password>   Create an account
  sign-in <username> <password>   Start a session
  sign-out                        End the session
  popular                         List popular movies (default)
  search <title>                  Search movies by title
  suggest [filters]               Filter the popular list
  discover [filters]              Ask the provider for matching movies
  genres                          List the genres filters accept
  details <id>                    Show a movie
  wishlist                        List the wishlist
  toggle <id>                     Add or remove a movie from the wishlist

Filters:
  --person <name>  --year <year>  --genre <name>  --rating <minimum>";

/// A single invocation of the command line client
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SignUp {
        username: Option<String>,
        password: Option<String>,
    },
    SignIn {
        username: Option<String>,
        password: Option<String>,
    },
    SignOut,
    Popular,
    Search(String),
    Suggest(FilterCriteria),
    Discover(FilterCriteria),
    Genres,
    Details(MovieId),
    Wishlist,
    Toggle(MovieId),
}

#[derive(Debug, Error, PartialEq)]
pub enum UsageError {
    #[error("Unknown command {0}")]
    UnknownCommand(String),
    #[error("{0} expects {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("{0} is not a movie id")]
    InvalidId(String),
    #[error("Unknown filter {0}")]
    UnknownFilter(String),
}

impl Command {
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let Some(name) = args.next() else {
            return Ok(Command::Popular);
        };

        let command = match name.as_str() {
            "sign-up" => Command::SignUp {
                username: args.next(),
                password: args.next(),
            },
            "sign-in" => Command::SignIn {
                username: args.next(),
                password: args.next(),
            },
            "sign-out" => Command::SignOut,
            "popular" => Command::Popular,
            "search" => Command::Search(args.collect::<Vec<_>>().join(" ")),
            "suggest" => Command::Suggest(parse_criteria(args)?),
            "discover" => Command::Discover(parse_criteria(args)?),
            "genres" => Command::Genres,
            "details" => Command::Details(parse_id("details", args.next())?),
            "wishlist" => Command::Wishlist,
            "toggle" => Command::Toggle(parse_id("toggle", args.next())?),
            _ => return Err(UsageError::UnknownCommand(name)),
        };

        Ok(command)
    }
}

fn parse_id(command: &'static str, arg: Option<String>) -> Result<MovieId, UsageError> {
    let arg = arg.ok_or(UsageError::MissingArgument(command, "a movie id"))?;
    arg.parse().map_err(|_| UsageError::InvalidId(arg))
}

fn parse_criteria<I>(mut args: I) -> Result<FilterCriteria, UsageError>
where
    I: Iterator<Item = String>,
{
    let mut criteria = FilterCriteria::default();

    while let Some(flag) = args.next() {
        let field = match flag.as_str() {
            "--person" => &mut criteria.actor_director,
            "--year" => &mut criteria.year,
            "--genre" => &mut criteria.genre,
            "--rating" => &mut criteria.rating,
            _ => return Err(UsageError::UnknownFilter(flag)),
        };

        *field = args
            .next()
            .ok_or(UsageError::MissingArgument("filters", "a value"))?;
    }

    Ok(criteria)
}
