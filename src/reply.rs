//! Reply rendering: title matching against the registry and the final
//! user-facing strings.

use crate::omdb::{self, MovieRecord};
use crate::{MovieRegistry, Result};

/// Render the showtimes reply for a free-text title query.
///
/// The first registry entry (document order) whose title contains the
/// lower-cased query wins. Substring containment is intentionally
/// permissive and exact matches get no special precedence: "man" picks
/// "spider-man" over "iron man" whenever spider-man's row came first.
pub fn format_showtimes(registry: &MovieRegistry, query: &str) -> String {
    let needle = query.to_lowercase();
    let Some(movie) = registry.iter().find(|m| m.title.contains(&needle)) else {
        return format!("Couldn't find movie {query} in showtimes");
    };
    let mut parts = vec![title_case(&movie.title)];
    for field in [&movie.rating, &movie.duration] {
        if !field.is_empty() {
            parts.push(field.clone());
        }
    }
    format!("{}\n{}", parts.join(", "), movie.showtimes())
}

/// Render the movie-info reply for an OMDb record.
///
/// A record carrying the not-found sentinel renders the not-found reply.
/// A found record with unusable rating data is a contract violation and
/// propagates as an error for the caller to map.
pub fn format_movie_info(record: &MovieRecord, query: &str) -> Result<String> {
    if !record.is_found() {
        return Ok(movie_info_not_found(query));
    }
    let score = omdb::blended_score(record)?;
    let text = |field: &Option<String>| field.as_deref().unwrap_or("").to_string();
    Ok(format!(
        "{}\n{}, {}, {}\n{}\nDirector: {}\nCast: {}\nPlot: {}\nRating: {}%",
        text(&record.title),
        text(&record.rated),
        text(&record.year),
        text(&record.runtime),
        text(&record.genre),
        text(&record.director),
        text(&record.actors),
        text(&record.plot),
        score,
    ))
}

pub fn movie_info_not_found(title: &str) -> String {
    format!("Movie info for {} not found.", title_case(title))
}

pub fn showtimes_not_found(title: &str) -> String {
    format!("Showtimes for {} not found.", title_case(title))
}

/// Python-style title casing: the first letter of every alphabetic run is
/// upper-cased, the rest lower-cased. Non-alphabetic characters pass
/// through and restart a run, so "spider-man" becomes "Spider-Man".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
