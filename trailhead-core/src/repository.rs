use async_trait::async_trait;
use trailhead_catalog::PricingModel;
use trailhead_shared::{TourDeparture, TourRecord};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Tour data provider backed by the hosted relational store
#[async_trait]
pub trait TourRepository: Send + Sync {
    /// Tour with its seasonal prices and group discounts joined in.
    async fn get_tour(
        &self,
        id: Uuid,
    ) -> Result<Option<TourRecord>, Box<dyn std::error::Error + Send + Sync>>;

    /// Scheduled departures for a tour. A tour without any yields an empty list.
    async fn list_departures(
        &self,
        tour_id: Uuid,
    ) -> Result<Vec<TourDeparture>, Box<dyn std::error::Error + Send + Sync>>;
}

/// A tour together with the pricing model derived from it
#[derive(Debug, Clone)]
pub struct TourSnapshot {
    pub tour: TourRecord,
    pub model: PricingModel,
}

/// Load a tour and validate its pricing at the boundary.
pub async fn load_snapshot(repo: &dyn TourRepository, id: Uuid) -> CoreResult<TourSnapshot> {
    let tour = repo
        .get_tour(id)
        .await
        .map_err(|e| CoreError::Provider(e.to_string()))?
        .ok_or_else(|| CoreError::TourNotFound(id.to_string()))?;

    let model = PricingModel::try_from(&tour)?;
    tracing::debug!(
        tour_id = %id,
        seasonal_prices = model.seasonal_prices().len(),
        group_discounts = model.group_discounts().len(),
        "Loaded pricing snapshot"
    );

    Ok(TourSnapshot { tour, model })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StubRepository {
        tours: HashMap<Uuid, TourRecord>,
    }

    #[async_trait]
    impl TourRepository for StubRepository {
        async fn get_tour(
            &self,
            id: Uuid,
        ) -> Result<Option<TourRecord>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.tours.get(&id).cloned())
        }

        async fn list_departures(
            &self,
            _tour_id: Uuid,
        ) -> Result<Vec<TourDeparture>, Box<dyn std::error::Error + Send + Sync>> {
            Err("departures unavailable".into())
        }
    }

    fn repo_with(tour: TourRecord) -> StubRepository {
        let mut tours = HashMap::new();
        tours.insert(tour.id, tour);
        StubRepository { tours }
    }

    #[tokio::test]
    async fn test_load_snapshot() {
        let tour = TourRecord::new(Uuid::new_v4(), "Annapurna Circuit", 1450.0);
        let id = tour.id;
        let repo = repo_with(tour);

        let snapshot = load_snapshot(&repo, id).await.expect("snapshot loads");
        assert_eq!(snapshot.model.price(), 1450.0);
        assert_eq!(snapshot.tour.name, "Annapurna Circuit");
    }

    #[tokio::test]
    async fn test_unknown_tour() {
        let repo = repo_with(TourRecord::new(Uuid::new_v4(), "Langtang", 900.0));
        let result = load_snapshot(&repo, Uuid::new_v4()).await;
        assert!(matches!(result, Err(CoreError::TourNotFound(_))));
    }

    #[tokio::test]
    async fn test_negative_price_rejected_at_boundary() {
        let tour = TourRecord::new(Uuid::new_v4(), "Broken", -5.0);
        let id = tour.id;
        let repo = repo_with(tour);

        let result = load_snapshot(&repo, id).await;
        assert!(matches!(result, Err(CoreError::InvalidPricing(_))));
    }
}
