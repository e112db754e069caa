// Alarm list

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::Record;

impl LegacyClient {
    /// `GET list/alarm`: every alarm on the site, archived ones included.
    ///
    /// Records carry an `archived` flag; callers decide what counts.
    pub async fn list_alarms(&self) -> Result<Vec<Record>, Error> {
        let alarms: Vec<Record> = self.fetch("list/alarm").await?;
        debug!(count = alarms.len(), site = self.site(), "alarms fetched");
        Ok(alarms)
    }
}
