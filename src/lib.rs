//! SMS movie bot: answers "info <title>" and "showtimes <title> <zip>"
//! text commands with movie metadata from OMDb and theater showtimes
//! scraped from a listings page.

use std::collections::HashMap;
use std::fmt;

pub mod error;
pub mod fandango;
pub mod listings;
pub mod omdb;
pub mod reply;
pub mod router;

pub use error::{BotError, Result};

/// One theater's schedule for a single movie.
#[derive(Debug, Clone)]
pub struct Theater {
    pub name: String,
    pub showtimes: Vec<String>,
}

impl Theater {
    pub fn new(name: impl Into<String>, showtimes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            showtimes,
        }
    }
}

impl fmt::Display for Theater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.showtimes.join(", "))
    }
}

/// One listed film, keyed across theaters by its lower-cased title.
#[derive(Debug, Clone)]
pub struct Movie {
    pub title: String,
    pub rating: String,
    pub duration: String,
    pub theaters: Vec<Theater>,
}

impl Movie {
    pub fn new(
        title: impl Into<String>,
        rating: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            rating: rating.into(),
            duration: duration.into(),
            theaters: Vec::new(),
        }
    }

    /// Build a movie from one raw listing line. An unparsable line keeps
    /// the whole line as the title, with empty rating and duration.
    pub fn from_line(line: &str) -> Self {
        match listings::split_line(line) {
            Some(fields) => Self::new(fields.title, fields.rating, fields.duration),
            None => Self::new(line, "", ""),
        }
    }

    /// Every theater schedule for this movie, one per line, in append
    /// order.
    pub fn showtimes(&self) -> String {
        self.theaters
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.title.as_str()];
        for field in [self.rating.as_str(), self.duration.as_str()] {
            if !field.is_empty() {
                parts.push(field);
            }
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Movies keyed by normalized title, in first-seen insertion order.
///
/// The order is load-bearing: the substring matcher in [`reply`] picks the
/// earliest entry, which must reflect document order. `HashMap` alone is
/// unordered, so positions are tracked explicitly.
#[derive(Debug, Default)]
pub struct MovieRegistry {
    movies: Vec<Movie>,
    by_title: HashMap<String, usize>,
}

impl MovieRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Look up the movie for a normalized title, inserting it with the
    /// given rating and duration on first sight.
    pub fn entry(&mut self, title: &str, rating: &str, duration: &str) -> &mut Movie {
        let idx = match self.by_title.get(title) {
            Some(&i) => i,
            None => {
                let i = self.movies.len();
                self.by_title.insert(title.to_string(), i);
                self.movies.push(Movie::new(title, rating, duration));
                i
            }
        };
        &mut self.movies[idx]
    }

    pub fn get(&self, title: &str) -> Option<&Movie> {
        self.by_title.get(title).map(|&i| &self.movies[i])
    }

    /// Movies in first-seen insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }
}

/// Upstream source of movie metadata (the OMDb API in production).
#[async_trait::async_trait]
pub trait MovieInfoSource {
    async fn lookup(&self, title: &str) -> Result<omdb::MovieRecord>;
}

/// Upstream source of the raw theater-listings page.
#[async_trait::async_trait]
pub trait ListingsSource {
    /// Fetch the listings HTML for a zip code and a start date in
    /// `MM-DD-YYYY` form.
    async fn listings(&self, zip: &str, start_date: &str) -> Result<String>;
}
