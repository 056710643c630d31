use crate::models::{samples, ListingError, Property};
use crate::store::traits::Storage;
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const ACTIVE_KEY: &str = "listings_active";
pub const TRASHED_KEY: &str = "listings_trashed";

/// Owner of all listing data: the active catalog and the trash
///
/// Ids are unique across both sequences. Every applied mutation writes the
/// affected sequences back to storage before returning.
pub struct ListingStore<S: Storage> {
    storage: S,
    active: Vec<Property>,
    trashed: Vec<Property>,
    revision: u64,
}

impl<S: Storage> ListingStore<S> {
    /// Hydrate from storage, seeding the default listings when nothing
    /// usable is stored under the active key
    pub fn open(storage: S) -> Result<Self> {
        let mut store = Self {
            storage,
            active: Vec::new(),
            trashed: Vec::new(),
            revision: 0,
        };

        match store.read_sequence(ACTIVE_KEY) {
            Some(active) => store.active = active,
            None => {
                store.active = samples::default_listings();
                info!("No stored listings, seeding {} defaults", store.active.len());
                store.persist_active()?;
            }
        }
        store.trashed = store.read_sequence(TRASHED_KEY).unwrap_or_default();

        drop_repeated_ids(&mut store.active, ACTIVE_KEY);
        drop_repeated_ids(&mut store.trashed, TRASHED_KEY);
        let active_ids: HashSet<&str> = store.active.iter().map(|p| p.id.as_str()).collect();
        let before = store.trashed.len();
        store.trashed.retain(|p| !active_ids.contains(p.id.as_str()));
        if store.trashed.len() != before {
            warn!(
                "Dropped {} trashed listings whose ids are also active",
                before - store.trashed.len()
            );
        }

        info!(
            "Loaded {} active and {} trashed listings from {} storage",
            store.active.len(),
            store.trashed.len(),
            store.storage.backend_name()
        );
        Ok(store)
    }

    /// Missing, unreadable and malformed entries all count as absent
    fn read_sequence(&self, key: &str) -> Option<Vec<Property>> {
        let raw = match self.storage.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Could not read {}: {:#}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(listings) => Some(listings),
            Err(e) => {
                warn!("Ignoring malformed {}: {}", key, e);
                None
            }
        }
    }

    pub fn active(&self) -> &[Property] {
        &self.active
    }

    pub fn trashed(&self) -> &[Property] {
        &self.trashed
    }

    /// Look up an active listing
    pub fn get(&self, id: &str) -> Option<&Property> {
        self.active.iter().find(|p| p.id == id)
    }

    /// Bumped on every applied mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The substrate, for entries other than the listing keys
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    fn contains(&self, id: &str) -> bool {
        self.active.iter().chain(self.trashed.iter()).any(|p| p.id == id)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Insert a new listing at the top of the catalog and return its id
    pub fn add(&mut self, mut property: Property) -> Result<String> {
        property.validate()?;

        if property.id.trim().is_empty() {
            property.id = self.fresh_id();
        } else if self.contains(&property.id) {
            return Err(ListingError::DuplicateId(property.id).into());
        }

        let id = property.id.clone();
        self.active.insert(0, property);
        self.revision += 1;
        self.persist_active()?;

        info!("Added listing {}", id);
        Ok(id)
    }

    /// Replace the active listing with the same id. Returns false if there
    /// is none.
    pub fn update(&mut self, property: Property) -> Result<bool> {
        property.validate()?;

        let Some(pos) = self.active.iter().position(|p| p.id == property.id) else {
            debug!("Update skipped, {} is not active", property.id);
            return Ok(false);
        };
        let id = property.id.clone();
        self.active[pos] = property;
        self.revision += 1;
        self.persist_active()?;

        info!("Updated listing {}", id);
        Ok(true)
    }

    /// Move a listing to the front of the trash
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.active.iter().position(|p| p.id == id) else {
            debug!("Delete skipped, {} is not active", id);
            return Ok(false);
        };
        let property = self.active.remove(pos);
        self.trashed.insert(0, property);
        self.revision += 1;
        self.persist_active()?;
        self.persist_trashed()?;

        info!("Moved listing {} to trash", id);
        Ok(true)
    }

    /// Move a trashed listing back to the front of the catalog
    pub fn restore(&mut self, id: &str) -> Result<bool> {
        let Some(pos) = self.trashed.iter().position(|p| p.id == id) else {
            debug!("Restore skipped, {} is not in trash", id);
            return Ok(false);
        };
        let property = self.trashed.remove(pos);
        self.active.insert(0, property);
        self.revision += 1;
        self.persist_active()?;
        self.persist_trashed()?;

        info!("Restored listing {}", id);
        Ok(true)
    }

    /// Drop a trashed listing for good. Callers confirm with the user first.
    pub fn purge_forever(&mut self, id: &str) -> Result<bool> {
        let before = self.trashed.len();
        self.trashed.retain(|p| p.id != id);
        if self.trashed.len() == before {
            debug!("Purge skipped, {} is not in trash", id);
            return Ok(false);
        }
        self.revision += 1;
        self.persist_trashed()?;

        info!("Permanently deleted listing {}", id);
        Ok(true)
    }

    fn persist_active(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.active).context("Failed to serialize listings")?;
        self.storage
            .save(ACTIVE_KEY, &json)
            .context("Failed to persist active listings")
    }

    fn persist_trashed(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.trashed).context("Failed to serialize trash")?;
        self.storage
            .save(TRASHED_KEY, &json)
            .context("Failed to persist trashed listings")
    }
}

/// Keep the first listing for each id
fn drop_repeated_ids(listings: &mut Vec<Property>, key: &str) {
    let mut seen = HashSet::new();
    let before = listings.len();
    listings.retain(|p| seen.insert(p.id.clone()));
    if listings.len() != before {
        warn!(
            "Dropped {} listings in {} with repeated ids",
            before - listings.len(),
            key
        );
    }
}
