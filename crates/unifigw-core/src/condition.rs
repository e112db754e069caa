// ── Monitored conditions ──
//
// The seven sensor kinds a profile can opt into, plus their fixed display
// metadata. The table is static and never mutated.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// One recognized sensor kind.
///
/// Declaration order is the display order and the `Ord` used by profile
/// condition sets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Condition {
    Vpn,
    Www,
    Wan,
    Lan,
    Wlan,
    Alerts,
    Firmware,
}

/// Which controller endpoint a condition reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// `list/alarm`
    Alerts,
    /// `stat/device`
    Devices,
    /// `stat/health`, filtered to one subsystem.
    Health,
}

/// Static display metadata for a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorMeta {
    pub label: &'static str,
    pub unit: &'static str,
    pub icon: &'static str,
}

impl Condition {
    /// Display metadata from the sensor table.
    pub fn meta(self) -> &'static SensorMeta {
        match self {
            Self::Vpn => &SensorMeta {
                label: "VPN",
                unit: "",
                icon: "mdi:folder-key-network",
            },
            Self::Www => &SensorMeta {
                label: "WWW",
                unit: "",
                icon: "mdi:web",
            },
            Self::Wan => &SensorMeta {
                label: "WAN",
                unit: "",
                icon: "mdi:shield-outline",
            },
            Self::Lan => &SensorMeta {
                label: "LAN",
                unit: "",
                icon: "mdi:lan",
            },
            Self::Wlan => &SensorMeta {
                label: "WLAN",
                unit: "",
                icon: "mdi:wifi",
            },
            Self::Alerts => &SensorMeta {
                label: "Alerts",
                unit: "",
                icon: "mdi:information-outline",
            },
            Self::Firmware => &SensorMeta {
                label: "Firmware Upgradable",
                unit: "",
                icon: "mdi:database-plus",
            },
        }
    }

    pub fn source(self) -> DataSource {
        match self {
            Self::Alerts => DataSource::Alerts,
            Self::Firmware => DataSource::Devices,
            Self::Vpn | Self::Www | Self::Wan | Self::Lan | Self::Wlan => DataSource::Health,
        }
    }

    /// The wire name, e.g. `"wlan"`. Also the `subsystem` tag for health entries.
    pub fn name(self) -> &'static str {
        self.into()
    }
}
