//! Client-side tent cache with optimistic mutations.
//!
//! Every mutation follows the same lifecycle:
//!
//! 1. bump the fetch epoch so in-flight refetches are discarded,
//! 2. snapshot the collection and aggregates,
//! 3. apply the change locally and recompute aggregates,
//! 4. on success, reconcile with the server's record ([`TentCache::confirm`]),
//! 5. on failure, restore the snapshot ([`TentCache::roll_back`]).
//!
//! Aggregates are always recomputed from the cached collection after a local
//! change, so `stats.total` matches the number of cached tents.

use std::collections::HashMap;
use std::fmt;

use tentrack_core::{NewTent, Stats, Tent, TentPatch};
use thiserror::Error;
use tracing::{debug, warn};

/// Prefix of placeholder ids given to tents the server has not confirmed yet.
pub const OPTIMISTIC_PREFIX: &str = "optimistic-";

/// Identifies one optimistic mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationId(u64);

impl fmt::Display for MutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Token returned by [`TentCache::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchEpoch(u64);

/// What a mutation did locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationKind {
    /// A placeholder with `temp_id` was inserted.
    Create { temp_id: String },
    Update { id: String },
    Delete { id: String },
}

/// Lifecycle of a mutation: `Pending → Confirmed | RolledBack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Pending,
    Confirmed,
    RolledBack,
}

/// Server answer used to settle a mutation successfully.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    Created(Tent),
    Updated(Tent),
    Deleted,
}

#[derive(Debug, Clone)]
struct Snapshot {
    tents: Vec<Tent>,
    stats: Stats,
}

/// Bookkeeping for one optimistic mutation.
#[derive(Debug, Clone)]
pub struct PendingMutation {
    pub kind: MutationKind,
    pub state: MutationState,
    snapshot: Option<Snapshot>,
}

/// Errors from settling mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("unknown mutation {0}")]
    UnknownMutation(MutationId),

    #[error("mutation {id} already settled ({state:?})")]
    AlreadySettled { id: MutationId, state: MutationState },

    #[error("mutation {0} confirmed with a result of the wrong kind")]
    KindMismatch(MutationId),
}

/// Cached tent collection and aggregates.
#[derive(Debug, Default)]
pub struct TentCache {
    tents: Vec<Tent>,
    stats: Stats,
    loaded: bool,
    epoch: u64,
    next_mutation: u64,
    mutations: HashMap<MutationId, PendingMutation>,
}

impl TentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached tents, newest first.
    pub fn tents(&self) -> &[Tent] {
        &self.tents
    }

    pub const fn stats(&self) -> Stats {
        self.stats
    }

    /// Whether at least one fetch has been applied.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn get(&self, id: &str) -> Option<&Tent> {
        self.tents.iter().find(|t| t.id == id)
    }

    /// Lifecycle state of a mutation, if known.
    pub fn mutation_state(&self, id: MutationId) -> Option<MutationState> {
        self.mutations.get(&id).map(|m| m.state)
    }

    /// Number of mutations still waiting for the server.
    pub fn pending_count(&self) -> usize {
        self.mutations
            .values()
            .filter(|m| m.state == MutationState::Pending)
            .count()
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Start a refetch. Results must be handed back with the returned epoch.
    pub const fn begin_fetch(&self) -> FetchEpoch {
        FetchEpoch(self.epoch)
    }

    /// Apply fetched data unless a mutation started after the fetch did.
    ///
    /// Returns `false` when the result was discarded as stale.
    pub fn apply_fetch(&mut self, epoch: FetchEpoch, tents: Vec<Tent>, stats: Stats) -> bool {
        if epoch.0 != self.epoch {
            debug!(fetch = epoch.0, current = self.epoch, "Discarding stale fetch");
            return false;
        }
        self.tents = tents;
        self.stats = stats;
        self.loaded = true;
        true
    }

    // =========================================================================
    // Optimistic mutations
    // =========================================================================

    fn begin(&mut self, kind: MutationKind) -> MutationId {
        self.epoch += 1;
        self.next_mutation += 1;
        let id = MutationId(self.next_mutation);
        self.mutations.insert(
            id,
            PendingMutation {
                kind,
                state: MutationState::Pending,
                snapshot: Some(Snapshot {
                    tents: self.tents.clone(),
                    stats: self.stats,
                }),
            },
        );
        id
    }

    fn recompute_stats(&mut self) {
        self.stats = Stats::from_tents(&self.tents);
    }

    /// Insert a placeholder for `new` at the top of the list.
    pub fn begin_create(&mut self, new: &NewTent) -> MutationId {
        let temp_id = format!("{OPTIMISTIC_PREFIX}{}", self.next_mutation + 1);
        let id = self.begin(MutationKind::Create {
            temp_id: temp_id.clone(),
        });
        let created_at = self.tents.first().map_or(0, |t| t.created_at);
        self.tents.insert(0, new.clone().into_tent(temp_id, created_at));
        self.recompute_stats();
        id
    }

    /// Apply `patch` to the cached tent with `tent_id`.
    pub fn begin_update(&mut self, tent_id: &str, patch: &TentPatch) -> MutationId {
        let id = self.begin(MutationKind::Update {
            id: tent_id.to_string(),
        });
        if let Some(tent) = self.tents.iter_mut().find(|t| t.id == tent_id) {
            patch.apply_to(tent);
        }
        self.recompute_stats();
        id
    }

    /// Remove the cached tent with `tent_id`.
    pub fn begin_delete(&mut self, tent_id: &str) -> MutationId {
        let id = self.begin(MutationKind::Delete {
            id: tent_id.to_string(),
        });
        self.tents.retain(|t| t.id != tent_id);
        self.recompute_stats();
        id
    }

    fn take_pending(&mut self, id: MutationId) -> Result<&mut PendingMutation, CacheError> {
        let mutation = self
            .mutations
            .get_mut(&id)
            .ok_or(CacheError::UnknownMutation(id))?;
        if mutation.state != MutationState::Pending {
            return Err(CacheError::AlreadySettled {
                id,
                state: mutation.state,
            });
        }
        Ok(mutation)
    }

    /// Reconcile a successful mutation with the server's answer.
    pub fn confirm(&mut self, id: MutationId, confirmation: Confirmation) -> Result<(), CacheError> {
        let mutation = self.take_pending(id)?;
        let kind = mutation.kind.clone();
        match (&kind, confirmation) {
            (MutationKind::Create { temp_id }, Confirmation::Created(tent)) => {
                // A refetch may already carry the server record.
                if let Some(slot) = self.tents.iter_mut().find(|t| t.id == tent.id) {
                    *slot = tent;
                    self.tents.retain(|t| &t.id != temp_id);
                } else if let Some(slot) = self.tents.iter_mut().find(|t| &t.id == temp_id) {
                    *slot = tent;
                } else {
                    self.tents.push(tent);
                }
            }
            (MutationKind::Update { id: tent_id }, Confirmation::Updated(tent)) => {
                if let Some(slot) = self.tents.iter_mut().find(|t| &t.id == tent_id) {
                    *slot = tent;
                }
            }
            (MutationKind::Delete { id: tent_id }, Confirmation::Deleted) => {
                self.tents.retain(|t| &t.id != tent_id);
            }
            _ => return Err(CacheError::KindMismatch(id)),
        }
        if let Some(mutation) = self.mutations.get_mut(&id) {
            mutation.state = MutationState::Confirmed;
            mutation.snapshot = None;
        }
        self.recompute_stats();
        debug!(mutation = %id, ?kind, "Mutation confirmed");
        Ok(())
    }

    /// Restore the collection and aggregates captured when `id` began.
    pub fn roll_back(&mut self, id: MutationId) -> Result<(), CacheError> {
        let mutation = self.take_pending(id)?;
        mutation.state = MutationState::RolledBack;
        let snapshot = mutation.snapshot.take();
        let kind = mutation.kind.clone();
        if let Some(snapshot) = snapshot {
            self.tents = snapshot.tents;
            self.stats = snapshot.stats;
        }
        warn!(mutation = %id, ?kind, "Mutation rolled back");
        Ok(())
    }

    /// Drop bookkeeping for settled mutations.
    pub fn prune_settled(&mut self) {
        self.mutations
            .retain(|_, m| m.state == MutationState::Pending);
    }
}
