use crate::core::geo::LatLng;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned station identifier
///
/// Backends disagree on whether ids are strings or numbers, so both are
/// accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Integer(n) => Self(n.to_string()),
            RawId::Float(n) => Self(n.to_string()),
        })
    }
}

/// A geolocated temperature-reporting record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    /// Display name
    pub ubication: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl Station {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Overwrites the editable fields with a payload the server accepted
    pub fn apply(&mut self, dto: &DtoStation) {
        self.ubication = dto.ubication.clone();
        self.latitude = dto.latitude;
        self.longitude = dto.longitude;
        self.temperature = dto.temperature;
        self.client = Some(dto.client.clone());
    }
}

/// Request body for create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtoStation {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub ubication: String,
    pub client: String,
}

impl DtoStation {
    pub fn new(
        latitude: f64,
        longitude: f64,
        temperature: f64,
        ubication: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            temperature,
            ubication: ubication.into(),
            client: client.into(),
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// The station this payload describes once the server knows it as `id`
    pub fn into_station(self, id: StationId) -> Station {
        Station {
            id,
            ubication: self.ubication,
            latitude: self.latitude,
            longitude: self.longitude,
            temperature: self.temperature,
            client: Some(self.client),
        }
    }
}
