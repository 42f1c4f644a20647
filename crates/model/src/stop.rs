use serde::{Deserialize, Serialize};
use utility::id::HasId;

use crate::{Latitude, Longitude};

/// A fixed stop point of the network, as listed in the static stop table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub name: String,
    #[serde(flatten)]
    pub location: Location,
}

impl Stop {
    pub fn latitude(&self) -> Latitude {
        self.location.latitude
    }

    pub fn longitude(&self) -> Longitude {
        self.location.longitude
    }
}

impl HasId for Stop {
    type IdType = String;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: Latitude,
    pub longitude: Longitude,
}
