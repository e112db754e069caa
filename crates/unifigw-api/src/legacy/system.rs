// Site health dashboard

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::Record;

impl LegacyClient {
    /// `GET stat/health`: one entry per subsystem (`wan`, `www`, `lan`,
    /// `wlan`, `vpn`), each with a `status` field.
    pub async fn get_health(&self) -> Result<Vec<Record>, Error> {
        let entries: Vec<Record> = self.fetch("stat/health").await?;
        debug!(count = entries.len(), site = self.site(), "health fetched");
        Ok(entries)
    }
}
