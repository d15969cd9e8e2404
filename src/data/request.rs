use crate::data::service::StationApi;
use crate::data::station::{DtoStation, Station, StationId};
use crate::Result;
use serde_json::Value;
use std::fmt;

/// One call against the station collection, detached from whoever issued it
#[derive(Debug, Clone, PartialEq)]
pub enum StationRequest {
    List,
    Create(DtoStation),
    Update { id: StationId, dto: DtoStation },
    Delete(StationId),
}

/// What a successful [`StationRequest`] produced
#[derive(Debug, Clone, PartialEq)]
pub enum StationResponse {
    Listed(Vec<Station>),
    Created(Value),
    Updated(Value),
    Deleted(Value),
}

impl StationRequest {
    /// Everything but `List` changes server state
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StationRequest::List)
    }

    pub async fn execute(&self, api: &dyn StationApi) -> Result<StationResponse> {
        match self {
            StationRequest::List => api.list().await.map(StationResponse::Listed),
            StationRequest::Create(dto) => api.create(dto).await.map(StationResponse::Created),
            StationRequest::Update { id, dto } => api
                .update_by_id(id, dto)
                .await
                .map(StationResponse::Updated),
            StationRequest::Delete(id) => api.delete_by_id(id).await.map(StationResponse::Deleted),
        }
    }
}

impl fmt::Display for StationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationRequest::List => write!(f, "list"),
            StationRequest::Create(dto) => write!(f, "create {:?}", dto.ubication),
            StationRequest::Update { id, .. } => write!(f, "update {}", id),
            StationRequest::Delete(id) => write!(f, "delete {}", id),
        }
    }
}
