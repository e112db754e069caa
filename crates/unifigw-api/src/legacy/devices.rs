// Adopted device list

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::Record;

impl LegacyClient {
    /// `GET stat/device`: adopted devices with their full stat payload.
    ///
    /// Firmware state lives in `upgradable` and `upgrade_to_firmware`; the
    /// rest of the record is passed through untouched.
    pub async fn list_devices(&self) -> Result<Vec<Record>, Error> {
        let devices: Vec<Record> = self.fetch("stat/device").await?;
        debug!(count = devices.len(), site = self.site(), "devices fetched");
        Ok(devices)
    }
}
