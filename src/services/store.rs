use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::{fs, sync::watch};

use crate::{
    error::AppError,
    models::trip::{Trip, TripPatch},
};

const TRIPS_FILE: &str = "trips.json";

/// The trip collection. Documents are kept as one JSON file under the data
/// root and always written whole; readers go through the file, subscribers
/// get the full current result set pushed after every accepted write.
///
/// No optimistic-concurrency check is applied before a write, so two writers
/// racing on the same trip can lose an update. That matches the collection
/// contract the rest of the code is built against.
#[derive(Clone)]
pub struct TripStore {
    root: Arc<PathBuf>,
    changes: Arc<watch::Sender<Vec<Trip>>>,
}

impl TripStore {
    pub fn new(root: PathBuf) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            root: Arc::new(root),
            changes: Arc::new(changes),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_structure(&self) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        let current = self.load().await?;
        self.changes.send_replace(current);
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Trip>, AppError> {
        let path = self.root().join(TRIPS_FILE);
        if !fs::try_exists(&path).await? {
            return Ok(Vec::new());
        }
        let raw = fs::read(&path).await?;
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        let trips: Vec<Trip> =
            serde_json::from_slice(&raw).map_err(|err| AppError::Other(err.into()))?;
        Ok(trips)
    }

    async fn save(&self, trips: &[Trip]) -> Result<(), AppError> {
        fs::create_dir_all(self.root()).await?;
        let path = self.root().join(TRIPS_FILE);
        let data = serde_json::to_vec_pretty(trips).map_err(|err| AppError::Other(err.into()))?;
        fs::write(path, data).await?;
        self.changes.send_replace(trips.to_vec());
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Trip>, AppError> {
        self.load().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Trip>, AppError> {
        Ok(self.load().await?.into_iter().find(|trip| trip.id == id))
    }

    pub async fn insert(&self, trip: Trip) -> Result<Trip, AppError> {
        let mut trips = self.load().await?;
        match trips.iter_mut().find(|existing| existing.id == trip.id) {
            Some(slot) => *slot = trip.clone(),
            None => trips.push(trip.clone()),
        }
        self.save(&trips).await?;
        Ok(trip)
    }

    /// Top-level field merge: present patch fields replace the stored fields
    /// wholesale. Updating an unknown id is a no-op.
    pub async fn update(&self, id: &str, patch: &TripPatch) -> Result<Option<Trip>, AppError> {
        let mut trips = self.load().await?;
        let Some(slot) = trips.iter_mut().find(|trip| trip.id == id) else {
            return Ok(None);
        };
        *slot = slot.apply(patch);
        let updated = slot.clone();
        self.save(&trips).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut trips = self.load().await?;
        trips.retain(|trip| trip.id != id);
        self.save(&trips).await?;
        Ok(())
    }

    /// Subscription to the live collection. Each accepted write publishes the
    /// complete ordered result set, never a diff.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Trip>> {
        self.changes.subscribe()
    }
}
