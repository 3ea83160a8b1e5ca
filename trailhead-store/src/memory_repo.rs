use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use trailhead_core::repository::TourRepository;
use trailhead_shared::{TourDeparture, TourRecord};
use uuid::Uuid;

/// Process-local tour store for tests and demo servers
#[derive(Default)]
pub struct InMemoryTourRepository {
    tours: RwLock<HashMap<Uuid, TourRecord>>,
}

impl InMemoryTourRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tours(tours: impl IntoIterator<Item = TourRecord>) -> Self {
        Self {
            tours: RwLock::new(tours.into_iter().map(|t| (t.id, t)).collect()),
        }
    }

    /// Insert or replace a tour, as an admin edit would.
    pub async fn upsert(&self, tour: TourRecord) {
        self.tours.write().await.insert(tour.id, tour);
    }

    pub async fn remove(&self, id: Uuid) -> Option<TourRecord> {
        self.tours.write().await.remove(&id)
    }
}

#[async_trait]
impl TourRepository for InMemoryTourRepository {
    async fn get_tour(
        &self,
        id: Uuid,
    ) -> Result<Option<TourRecord>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.tours.read().await.get(&id).cloned())
    }

    async fn list_departures(
        &self,
        tour_id: Uuid,
    ) -> Result<Vec<TourDeparture>, Box<dyn std::error::Error + Send + Sync>> {
        let mut departures = self
            .tours
            .read()
            .await
            .get(&tour_id)
            .map(|t| t.departures.clone())
            .unwrap_or_default();
        departures.sort_by_key(|d| d.start_date);
        Ok(departures)
    }
}
