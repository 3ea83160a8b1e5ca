use redis::AsyncCommands;
use trailhead_shared::TourRecord;
use tracing::warn;
use uuid::Uuid;

/// Short-lived cache of tour snapshots in front of Postgres
#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
    ttl_seconds: u64,
}

fn snapshot_key(tour_id: Uuid) -> String {
    format!("tour:snapshot:{}", tour_id)
}

impl RedisClient {
    pub async fn new(connection_string: &str, ttl_seconds: u64) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client, ttl_seconds })
    }

    pub async fn get_tour_snapshot(&self, tour_id: Uuid) -> Result<Option<TourRecord>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(snapshot_key(tour_id)).await?;

        Ok(raw.and_then(|json| match serde_json::from_str(&json) {
            Ok(tour) => Some(tour),
            Err(e) => {
                // Schema drift: treat as a miss and let Postgres answer
                warn!("Discarding unreadable snapshot for tour {}: {}", tour_id, e);
                None
            }
        }))
    }

    pub async fn cache_tour_snapshot(&self, tour: &TourRecord) -> Result<(), redis::RedisError> {
        let json = match serde_json::to_string(tour) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize tour {} for caching: {}", tour.id, e);
                return Ok(());
            }
        };

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(snapshot_key(tour.id), json, self.ttl_seconds).await?;
        Ok(())
    }
}
