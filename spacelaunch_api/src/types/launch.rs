//! Launch-related types returned by the `LaunchList` query.

use serde::{Deserialize, Serialize};

/// The `data` object of a `LaunchList` response.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LaunchListData {
    pub launches: LaunchConnection,
}

/// One page of launches together with its continuation state.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConnection {
    /// Opaque token to pass as `after` for the next page.
    pub cursor: Option<String>,
    /// Whether the server holds launches beyond this page.
    pub has_more: bool,
    /// Launches on this page. The schema allows null entries.
    pub launches: Vec<Option<Launch>>,
}

impl LaunchConnection {
    /// Consumes the connection, dropping null entries and keeping server order.
    pub fn into_launches(self) -> Vec<Launch> {
        self.launches.into_iter().flatten().collect()
    }
}

/// A single launch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    /// Server-assigned identifier.
    pub id: String,

    /// Launch site, e.g. "KSC LC 39A".
    pub site: Option<String>,

    pub mission: Option<Mission>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub name: Option<String>,

    /// URL of the mission patch image.
    pub mission_patch: Option<String>,
}

impl Launch {
    /// Mission name, if the launch has one.
    pub fn mission_name(&self) -> Option<&str> {
        self.mission.as_ref().and_then(|m| m.name.as_deref())
    }

    /// Mission patch URL, if the launch has one.
    pub fn mission_patch(&self) -> Option<&str> {
        self.mission.as_ref().and_then(|m| m.mission_patch.as_deref())
    }
}
