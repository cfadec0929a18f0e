//! Network half of the optimistic protocol.
//!
//! The cache owner calls `begin_*` on [`TentCache`], sends the matching
//! [`MutationRequest`] through [`run_mutation`], and settles the outcome with
//! [`settle`].

use tentrack_core::{NewTent, Stats, Tent, TentPatch};
use tracing::warn;

use crate::cache::{CacheError, Confirmation, MutationId, TentCache};
use crate::client::{ClientError, TentApi};

/// A write against the API.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest {
    Create(NewTent),
    Update { id: String, patch: TentPatch },
    Delete { id: String },
}

impl MutationRequest {
    /// Apply the local half of this request to `cache`.
    pub fn begin(&self, cache: &mut TentCache) -> MutationId {
        match self {
            Self::Create(new) => cache.begin_create(new),
            Self::Update { id, patch } => cache.begin_update(id, patch),
            Self::Delete { id } => cache.begin_delete(id),
        }
    }

    /// Short description for notices and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Create(new) => format!("create \"{}\"", new.name),
            Self::Update { id, .. } => format!("update {id}"),
            Self::Delete { id } => format!("delete {id}"),
        }
    }
}

/// Outcome of a mutation round-trip.
pub type MutationResult = Result<Confirmation, ClientError>;

/// Send `request` to the API.
pub async fn run_mutation<A: TentApi>(api: &A, request: MutationRequest) -> MutationResult {
    match request {
        MutationRequest::Create(new) => api.create_tent(&new).await.map(Confirmation::Created),
        MutationRequest::Update { id, patch } => api
            .update_tent(&id, &patch)
            .await
            .map(Confirmation::Updated),
        MutationRequest::Delete { id } => api.delete_tent(&id).await.map(|()| Confirmation::Deleted),
    }
}

/// Fetch the collection and the aggregates concurrently.
pub async fn fetch_all<A: TentApi>(api: &A) -> Result<(Vec<Tent>, Stats), ClientError> {
    tokio::try_join!(api.list_tents(), api.stats())
}

/// Settle a finished mutation: confirm on success, roll back on failure.
///
/// Returns the client error (if any) so the caller can surface it.
pub fn settle(
    cache: &mut TentCache,
    id: MutationId,
    result: MutationResult,
) -> Result<Option<ClientError>, CacheError> {
    match result {
        Ok(confirmation) => {
            cache.confirm(id, confirmation)?;
            Ok(None)
        }
        Err(e) => {
            warn!(mutation = %id, error = %e, "Mutation failed");
            cache.roll_back(id)?;
            Ok(Some(e))
        }
    }
}
