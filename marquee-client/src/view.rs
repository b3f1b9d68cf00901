use marquee_core::Movie;

/// What the movie list shows. Exactly one of these is shown at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Results(Vec<Movie>),
    /// Nothing matched, or nothing has been asked for yet
    Empty,
    Error(String),
}

impl ViewState {
    pub fn from_movies(movies: Vec<Movie>) -> Self {
        if movies.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Results(movies)
        }
    }

    /// The movies currently shown, if any
    pub fn movies(&self) -> &[Movie] {
        match self {
            ViewState::Results(movies) => movies,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Empty
    }
}
