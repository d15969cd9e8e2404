use crate::core::config::AppConfig;
use crate::data::http::HttpClient;
use crate::data::station::{DtoStation, Station, StationId};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// CRUD operations on the station collection
///
/// Failures come back as an opaque [`crate::Error`]; deciding what to tell the
/// user is left to the caller.
#[async_trait]
pub trait StationApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Station>>;

    async fn create(&self, dto: &DtoStation) -> Result<Value>;

    async fn update_by_id(&self, id: &StationId, dto: &DtoStation) -> Result<Value>;

    async fn delete_by_id(&self, id: &StationId) -> Result<Value>;
}

/// [`StationApi`] backed by the REST endpoint
pub struct StationService {
    http: HttpClient,
    endpoint: String,
}

impl StationService {
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::new(&config.http)?, config.endpoint.clone()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `{endpoint}{id}`
    fn item_url(&self, id: &StationId) -> String {
        format!("{}{}", self.endpoint, id)
    }
}

#[async_trait]
impl StationApi for StationService {
    async fn list(&self) -> Result<Vec<Station>> {
        let stations: Vec<Station> = self.http.get(&self.endpoint).await?;
        log::info!("fetched {} stations", stations.len());
        Ok(stations)
    }

    async fn create(&self, dto: &DtoStation) -> Result<Value> {
        log::info!("creating station {:?}", dto.ubication);
        self.http.post(&self.endpoint, dto).await
    }

    async fn update_by_id(&self, id: &StationId, dto: &DtoStation) -> Result<Value> {
        log::info!("updating station {}", id);
        self.http.put(&self.item_url(id), dto).await
    }

    async fn delete_by_id(&self, id: &StationId) -> Result<Value> {
        log::info!("deleting station {}", id);
        self.http.delete(&self.item_url(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::HttpConfig;

    #[test]
    fn test_item_url_concatenates_id() {
        let http = HttpClient::new(&HttpConfig::default()).unwrap();
        let service = StationService::new(http, "http://localhost:8080/api/stations/");

        assert_eq!(
            service.item_url(&StationId::new("42")),
            "http://localhost:8080/api/stations/42"
        );
        assert_eq!(service.endpoint(), "http://localhost:8080/api/stations/");
    }
}
