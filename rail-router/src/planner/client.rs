//! HTTP client for the trip planning backend.
//!
//! The backend exposes two JSON endpoints: `POST /api/plan` for itinerary
//! search and `POST /api/details` for the stops of a single trip.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{DetailRequest, ItinerarySummary, SearchCriteria, StopDetail};

use super::config::PlannerConfig;
use super::error::PlannerError;
use super::source::{StopDetailSource, TripPlanner};

/// Client for the trip planning backend.
///
/// Plan and detail requests are bounded by separate semaphores, so a burst
/// of searches never delays the two legs of a detail expansion.
#[derive(Debug, Clone)]
pub struct PlannerClient {
    http: reqwest::Client,
    base_url: String,
    plan_permits: Arc<Semaphore>,
    detail_permits: Arc<Semaphore>,
}

impl PlannerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PlannerConfig) -> Result<Self, PlannerError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            plan_permits: Arc::new(Semaphore::new(config.max_concurrent)),
            detail_permits: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    async fn post_json<B, R>(
        &self,
        permits: &Semaphore,
        path: &str,
        body: &B,
    ) -> Result<R, PlannerError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let _permit = permits
            .acquire()
            .await
            .map_err(|_| PlannerError::Closed)?;

        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PlannerError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| PlannerError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl TripPlanner for PlannerClient {
    async fn plan(&self, criteria: &SearchCriteria) -> Result<Vec<ItinerarySummary>, PlannerError> {
        let itineraries: Vec<ItinerarySummary> = self
            .post_json(&self.plan_permits, "/api/plan", criteria)
            .await?;
        debug!(
            origin = %criteria.origin,
            destination = %criteria.destination,
            itineraries = itineraries.len(),
            "plan response"
        );
        Ok(itineraries)
    }
}

impl StopDetailSource for PlannerClient {
    async fn stops(&self, request: &DetailRequest) -> Result<Vec<StopDetail>, PlannerError> {
        let stops: Vec<StopDetail> = self
            .post_json(&self.detail_permits, "/api/details", request).await?;
        debug!(
            trip_id = %request.trip_id,
            agency = %request.agency,
            stops = stops.len(),
            "detail response"
        );
        Ok(stops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Agency, StationCode};
    use crate::test_support::{RecordedRequests, serve_json, serve_recording, unused_local_url};

    fn criteria() -> SearchCriteria {
        SearchCriteria::new("14", "WAS", "2024-06-01", "08:00", 30)
    }

    #[test]
    fn client_creation() {
        assert!(PlannerClient::new(PlannerConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn plan_posts_criteria_and_parses_summaries() {
        let recorded = RecordedRequests::default();
        let response = serde_json::json!([{
            "leg_type": "lirr_first",
            "lirr_trip": {"trip_id": "T100", "departure": "08:12", "arrival": "09:31"},
            "connections": [{"train_num": "125", "departure": "10:05", "arrival": "13:40", "status": "On Time"}]
        }]);
        let url = serve_recording("/api/plan", 200, response, recorded.clone()).await;
        let client = PlannerClient::new(PlannerConfig::new(url)).unwrap();

        let itineraries = client.plan(&criteria()).await.unwrap();
        assert_eq!(itineraries.len(), 1);
        assert_eq!(itineraries[0].primary_agency(), Agency::Lirr);

        let bodies = recorded.bodies();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["origin"], "14");
        assert_eq!(bodies[0]["transition_time"], 30);
    }

    #[tokio::test]
    async fn empty_plan_is_not_an_error() {
        let url = serve_json("/api/plan", 200, serde_json::json!([])).await;
        let client = PlannerClient::new(PlannerConfig::new(url)).unwrap();
        assert!(client.plan(&criteria()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let url = serve_json("/api/plan", 500, serde_json::json!({"error": "boom"})).await;
        let client = PlannerClient::new(PlannerConfig::new(url)).unwrap();
        match client.plan(&criteria()).await {
            Err(PlannerError::Api { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_json_error() {
        let url = serve_json("/api/plan", 200, serde_json::json!({"not": "a list"})).await;
        let client = PlannerClient::new(PlannerConfig::new(url)).unwrap();
        assert!(matches!(
            client.plan(&criteria()).await,
            Err(PlannerError::Json { .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_an_http_error() {
        let client =
            PlannerClient::new(PlannerConfig::new(unused_local_url()).with_timeout(2)).unwrap();
        assert!(matches!(
            client.plan(&criteria()).await,
            Err(PlannerError::Http(_))
        ));
    }

    #[tokio::test]
    async fn details_do_not_wait_for_plan_permits() {
        let response = serde_json::json!([{"stop_id": "NYP", "arrival_time": "10:05:00"}]);
        let url = serve_json("/api/details", 200, response).await;
        let client =
            PlannerClient::new(PlannerConfig::new(url).with_max_concurrent(2)).unwrap();

        // Every plan permit is held, as if two slow searches were running.
        let _busy = client.plan_permits.clone().acquire_many_owned(2).await.unwrap();

        let request = DetailRequest {
            trip_id: "125".to_string(),
            agency: Agency::Amtrak,
            origin: StationCode::hub(),
            destination: StationCode::from("WAS"),
        };
        let stops = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            client.stops(&request),
        )
        .await
        .expect("detail request should not queue behind plan requests")
        .unwrap();
        assert_eq!(stops.len(), 1);
    }

    #[tokio::test]
    async fn details_posts_leg_request() {
        let recorded = RecordedRequests::default();
        let response = serde_json::json!([
            {"stop_id": 14, "arrival_time": "08:12:00", "stop_sequence": 1},
            {"stop_id": "237", "arrival_time": "09:31:00", "stop_sequence": 9}
        ]);
        let url = serve_recording("/api/details", 200, response, recorded.clone()).await;
        let client = PlannerClient::new(PlannerConfig::new(url)).unwrap();

        let request = DetailRequest {
            trip_id: "T100".to_string(),
            agency: Agency::Lirr,
            origin: StationCode::from("14"),
            destination: StationCode::hub(),
        };
        let stops = client.stops(&request).await.unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].stop_id.as_str(), "14");

        assert_eq!(
            recorded.bodies()[0],
            serde_json::json!({"trip_id": "T100", "agency": "lirr", "origin": "14", "destination": "NYP"})
        );
    }
}
