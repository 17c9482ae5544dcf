// tests/support/mocks/catalog.rs
//! Slug index and ownership table shared by the in-memory repositories,
//! standing in for the unique slug indexes and the per-table owner columns.
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use trailhead_core::domain::errors::{DomainError, DomainResult};
use trailhead_core::domain::resource::{RecordLookup, ResourceKind};
use trailhead_core::domain::slug::{Slug, SlugRepository};
use trailhead_core::domain::user::UserId;

#[derive(Default)]
pub struct Catalog {
    slugs: Mutex<HashMap<(ResourceKind, String), i64>>,
    owners: Mutex<HashMap<(ResourceKind, i64), UserId>>,
    /// Slugs reported as free by `slug_exists` although the index holds them,
    /// as if another writer committed between the check and the insert.
    racing: Mutex<HashSet<String>>,
    ids: AtomicI64,
}

impl Catalog {
    pub fn next_id(&self) -> i64 {
        self.ids.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Points `slug` at record `id`, failing like a unique index would.
    pub fn claim_slug(&self, kind: ResourceKind, slug: &Slug, id: i64) -> DomainResult<()> {
        let mut slugs = self.slugs.lock().unwrap();
        let key = (kind, slug.as_str().to_string());
        match slugs.get(&key) {
            Some(holder) if *holder != id => Err(DomainError::DuplicateSlug),
            _ => {
                slugs.retain(|(k, _), holder| !(*k == kind && *holder == id));
                slugs.insert(key, id);
                Ok(())
            }
        }
    }

    pub fn register(&self, kind: ResourceKind, id: i64, owner: UserId) {
        self.owners.lock().unwrap().insert((kind, id), owner);
    }

    pub fn owner(&self, kind: ResourceKind, id: i64) -> Option<UserId> {
        self.owners.lock().unwrap().get(&(kind, id)).copied()
    }

    pub fn forget(&self, kind: ResourceKind, id: i64) {
        self.owners.lock().unwrap().remove(&(kind, id));
        self.slugs
            .lock()
            .unwrap()
            .retain(|(k, _), holder| !(*k == kind && *holder == id));
    }

    pub fn race_on(&self, slug: &str) {
        self.racing.lock().unwrap().insert(slug.to_string());
    }
}

#[async_trait]
impl SlugRepository for Catalog {
    async fn slug_exists(
        &self,
        kind: ResourceKind,
        slug: &Slug,
        exclude_id: Option<i64>,
    ) -> DomainResult<bool> {
        if self.racing.lock().unwrap().contains(slug.as_str()) {
            return Ok(false);
        }
        let slugs = self.slugs.lock().unwrap();
        Ok(slugs
            .get(&(kind, slug.as_str().to_string()))
            .is_some_and(|holder| Some(*holder) != exclude_id))
    }
}

#[async_trait]
impl RecordLookup for Catalog {
    async fn owner_of(&self, kind: ResourceKind, id: i64) -> DomainResult<Option<UserId>> {
        Ok(self.owner(kind, id))
    }
}
