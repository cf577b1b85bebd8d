//! Router configuration.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{self, companies, licenses, sync};
use crate::state::AppState;

/// Build the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/vendor-sync", vendor_sync_routes())
        .nest("/api/licenses", license_routes())
        .nest("/api/companies", company_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn vendor_sync_routes() -> Router<AppState> {
    Router::new()
        .route("/sync-all", post(sync::sync_all))
        .route("/sync/{vendor}", post(sync::sync_vendor))
        .route("/test-all", get(sync::test_all))
        .route("/test/{vendor}", get(sync::test_vendor))
        .route("/vendors", get(sync::list_vendors))
}

fn license_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(licenses::list_licenses))
        .route("/", post(licenses::create_license))
        .route("/{id}", get(licenses::get_license))
        .route("/{id}", put(licenses::update_license))
        .route("/{id}", delete(licenses::delete_license))
}

fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(companies::list_companies))
        .route("/", post(companies::create_company))
        .route("/{id}", get(companies::get_company))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use core_licenses::{
        CompanyRepository, LicenseRepository, SqliteCompanyRepository, SqliteLicenseRepository,
    };
    use core_sync::SyncOrchestrator;
    use core_vendors::{SyncResult, VendorAdapter};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubAdapter {
        name: &'static str,
        healthy: bool,
    }

    #[async_trait]
    impl VendorAdapter for StubAdapter {
        fn vendor_name(&self) -> &'static str {
            self.name
        }

        async fn sync_licenses(&self) -> SyncResult {
            if self.healthy {
                let mut result = SyncResult::started(self.name);
                result.success = true;
                result.licenses_found = 1;
                result.licenses_added = 1;
                result.sync_time = Utc::now();
                result
            } else {
                SyncResult::failure(self.name, format!("{} API credentials not configured", self.name))
            }
        }

        async fn test_connection(&self) -> bool {
            self.healthy
        }
    }

    async fn test_app() -> Router {
        let pool = core_licenses::create_test_pool().await.unwrap();
        let licenses: Arc<dyn LicenseRepository> =
            Arc::new(SqliteLicenseRepository::new(pool.clone()));
        let companies: Arc<dyn CompanyRepository> = Arc::new(SqliteCompanyRepository::new(pool));

        let orchestrator = Arc::new(SyncOrchestrator::new(vec![
            Arc::new(StubAdapter {
                name: "Microsoft",
                healthy: true,
            }),
            Arc::new(StubAdapter {
                name: "Adobe",
                healthy: false,
            }),
            Arc::new(StubAdapter {
                name: "Slack",
                healthy: true,
            }),
        ]));

        app_router(AppState::new(orchestrator, licenses, companies))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_vendor_listing_is_sorted() {
        let app = test_app().await;
        let response = app
            .oneshot(empty_request("GET", "/api/vendor-sync/vendors"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(["Adobe", "Microsoft", "Slack"]));
    }

    #[tokio::test]
    async fn test_sync_all_reports_in_registration_order() {
        let app = test_app().await;
        let response = app
            .oneshot(empty_request("POST", "/api/vendor-sync/sync-all"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let results = body.as_array().unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["vendorName"], "Microsoft");
        assert_eq!(results[1]["vendorName"], "Adobe");
        assert_eq!(results[1]["success"], false);
        assert_eq!(
            results[1]["errorMessage"],
            "Adobe API credentials not configured"
        );
        assert_eq!(results[2]["vendorName"], "Slack");
    }

    #[tokio::test]
    async fn test_sync_vendor_is_case_insensitive() {
        let app = test_app().await;
        let response = app
            .oneshot(empty_request("POST", "/api/vendor-sync/sync/MICROSOFT"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["vendorName"], "Microsoft");
    }

    #[tokio::test]
    async fn test_sync_unknown_vendor_is_404() {
        let app = test_app().await;
        let response = app
            .oneshot(empty_request("POST", "/api/vendor-sync/sync/NoSuchVendor"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["message"],
            "Vendor 'NoSuchVendor' not found"
        );
    }

    #[tokio::test]
    async fn test_test_all_maps_vendor_to_connected() {
        let app = test_app().await;
        let response = app
            .oneshot(empty_request("GET", "/api/vendor-sync/test-all"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["Microsoft"], true);
        assert_eq!(body["Adobe"], false);
    }

    #[tokio::test]
    async fn test_test_vendor_payload() {
        let app = test_app().await;
        let response = app
            .oneshot(empty_request("GET", "/api/vendor-sync/test/adobe"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["vendorName"], "Adobe");
        assert_eq!(body["connected"], false);
        assert_eq!(body["message"], "Connection failed");
    }

    #[tokio::test]
    async fn test_license_crud_round_trip() {
        let app = test_app().await;

        let create = json_request(
            "POST",
            "/api/licenses",
            json!({
                "name": "Figma",
                "vendor": "Figma",
                "category": "Design",
                "hasLicense": true,
                "users": 8
            }),
        );
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["remainingDays"], 0);

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/api/licenses/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "Figma");

        let update = json_request(
            "PUT",
            &format!("/api/licenses/{}", id),
            json!({
                "name": "Figma",
                "vendor": "Figma",
                "category": "Design",
                "hasLicense": true,
                "users": 12
            }),
        );
        let response = app.clone().oneshot(update).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["users"], 12);

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/api/licenses/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(empty_request("GET", &format!("/api/licenses/{}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_license_key_conflicts() {
        let app = test_app().await;
        let payload = json!({
            "name": "Zoom",
            "vendor": "Zoom",
            "category": "Video Conferencing"
        });

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/licenses", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request("POST", "/api/licenses", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_company_and_duplicate_conflict() {
        let app = test_app().await;
        let payload = json!({ "name": "TechCorp", "apiKeyVaultReference": "vault-techcorp" });

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/companies", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await["apiKeyVaultReference"],
            "vault-techcorp"
        );

        let response = app
            .oneshot(json_request("POST", "/api/companies", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_blank_license_name_is_rejected() {
        let app = test_app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/licenses",
                json!({ "name": " ", "vendor": "Zoom", "category": "x" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
