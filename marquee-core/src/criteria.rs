use serde::{Deserialize, Serialize};

/// User supplied constraints used to narrow down a list of movies.
/// A blank field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// A fragment of a director's name
    pub actor_director: String,
    /// A prefix of the release date, usually a year
    pub year: String,
    /// A fragment of a genre name
    pub genre: String,
    /// The minimum average rating
    pub rating: String,
}

impl FilterCriteria {
    /// Returns true if no field imposes a constraint
    pub fn is_empty(&self) -> bool {
        self.actor_director().is_none()
            && self.year().is_none()
            && self.genre().is_none()
            && self.rating().is_none()
    }

    pub fn actor_director(&self) -> Option<&str> {
        non_blank(&self.actor_director)
    }

    pub fn year(&self) -> Option<&str> {
        non_blank(&self.year)
    }

    pub fn genre(&self) -> Option<&str> {
        non_blank(&self.genre)
    }

    pub fn rating(&self) -> Option<&str> {
        non_blank(&self.rating)
    }

    /// The rating threshold, read from the number the rating field starts with.
    /// Text after the number is ignored, so `"7+"` means 7.
    pub fn min_rating(&self) -> Option<f64> {
        self.rating()
            .and_then(leading_number)
            .filter(|r| r.is_finite())
    }
}

/// Parses the longest prefix of `text` that forms a decimal number
fn leading_number(text: &str) -> Option<f64> {
    let numeric = text
        .find(|c: char| !matches!(c, '0'..='9' | '.' | '+' | '-' | 'e' | 'E'))
        .map_or(text, |end| &text[..end]);

    (1..=numeric.len())
        .rev()
        .find_map(|end| numeric[..end].parse().ok())
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
