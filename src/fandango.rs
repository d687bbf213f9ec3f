//! Printable theater-listings fetch.

use reqwest::header;

use crate::error::Result;
use crate::ListingsSource;

const FANDANGO_URL: &str = "https://www.fandango.com/theaterlistings-prn.aspx";

/// Theater ids the listings page is restricted to, in the comma-joined
/// form the upstream page expects.
const THEATER_IDS: &str = "AAAPP,AAJMM,AAIJQ,AANJV,AAWPB,AAHIP,AANVP,AAHIF,AAHIJ,AAUHN";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// Client for the printable listings page; returns raw HTML for
/// [`crate::listings::scrape_listings`] to walk.
pub struct FandangoClient {
    client: reqwest::Client,
    base_url: String,
}

impl FandangoClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, FANDANGO_URL)
    }

    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl ListingsSource for FandangoClient {
    async fn listings(&self, zip: &str, start_date: &str) -> Result<String> {
        let body = self
            .client
            .get(&self.base_url)
            .header(header::USER_AGENT, USER_AGENT)
            .query(&[
                ("location", zip),
                ("pn", "1"),
                ("sdate", start_date),
                ("tid", THEATER_IDS),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}
