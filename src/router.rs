//! Inbound command dispatch: one message body in, one reply string out.
//!
//! Every failure past this point is mapped to a fixed user-facing reply;
//! nothing propagates to the transport layer as an error.

use chrono::Local;

use crate::listings::scrape_listings;
use crate::reply;
use crate::{ListingsSource, MovieInfoSource};

const BLANK_MESSAGE_REPLY: &str = "Incoming message was blank.";
const SHOWTIMES_USAGE: &str = "Usage: showtimes <title> <zip>";

/// A parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Blank,
    /// `showtimes <title> <zip>` with the zip as the last token.
    Showtimes { title: String, zip: String },
    /// `showtimes` without both a title and a zip.
    MalformedShowtimes,
    /// `info <title>`, or any other body treated as a bare title.
    Info { title: String },
}

impl Command {
    /// Parse a raw message body. Dispatch happens on the lower-cased text;
    /// any body that is not a showtimes request is a movie-info query.
    pub fn parse(body: &str) -> Self {
        let lowered = body.trim().to_lowercase();
        if lowered.is_empty() {
            return Self::Blank;
        }
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        match tokens.as_slice() {
            ["showtimes", middle @ .., zip] if !middle.is_empty() => Self::Showtimes {
                title: middle.join(" "),
                zip: (*zip).to_string(),
            },
            ["showtimes", ..] => Self::MalformedShowtimes,
            ["info", rest @ ..] if !rest.is_empty() => Self::Info {
                title: rest.join(" "),
            },
            _ => Self::Info { title: lowered },
        }
    }
}

/// Answer one inbound message body with a reply string.
pub async fn handle_message(
    body: &str,
    info: &dyn MovieInfoSource,
    listings: &dyn ListingsSource,
) -> String {
    match Command::parse(body) {
        Command::Blank => BLANK_MESSAGE_REPLY.to_string(),
        Command::MalformedShowtimes => SHOWTIMES_USAGE.to_string(),
        Command::Info { title } => movie_info_reply(&title, info).await,
        Command::Showtimes { title, zip } => showtimes_reply(&title, &zip, listings).await,
    }
}

async fn movie_info_reply(title: &str, source: &dyn MovieInfoSource) -> String {
    let record = match source.lookup(title).await {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(%err, title, "movie info fetch failed");
            return reply::movie_info_not_found(title);
        }
    };
    match reply::format_movie_info(&record, title) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(%err, title, "rating data violated the OMDb contract");
            reply::movie_info_not_found(title)
        }
    }
}

async fn showtimes_reply(title: &str, zip: &str, source: &dyn ListingsSource) -> String {
    let date = Local::now().format("%m-%d-%Y").to_string();
    let html = match source.listings(zip, &date).await {
        Ok(html) => html,
        Err(err) => {
            tracing::warn!(%err, zip, "listings fetch failed");
            return reply::showtimes_not_found(title);
        }
    };
    let registry = match scrape_listings(&html) {
        Ok(registry) => registry,
        Err(err) => {
            tracing::warn!(%err, "listings scrape failed");
            return reply::showtimes_not_found(title);
        }
    };
    reply::format_showtimes(&registry, title)
}
