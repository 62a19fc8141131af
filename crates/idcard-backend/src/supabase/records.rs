//! PostgREST client for the `applications` table.

use async_trait::async_trait;
use reqwest::Method;

use idcard_core::{Application, NewApplication, UserId};

use super::SupabaseClient;
use crate::error::{BackendError, Result};
use crate::session::Session;
use crate::RecordStore;

const APPLICATIONS_PATH: &str = "/rest/v1/applications";

/// PostgREST client implementing [`RecordStore`].
#[derive(Debug, Clone)]
pub struct SupabaseRecords {
    client: SupabaseClient,
}

impl SupabaseRecords {
    pub(crate) fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordStore for SupabaseRecords {
    async fn insert(&self, session: &Session, application: &NewApplication) -> Result<Application> {
        let response = self
            .client
            .as_user(Method::POST, APPLICATIONS_PATH, &session.access_token)
            .header("prefer", "return=representation")
            .json(application)
            .send()
            .await?;

        let rows: Vec<Application> = SupabaseClient::check(response).await?.json().await?;
        let stored = rows.into_iter().next().ok_or_else(|| BackendError::Api {
            status: 201,
            message: "insert returned no row".into(),
        })?;

        tracing::info!(
            application_id = %stored.id,
            user_id = %stored.user_id,
            "Application stored"
        );
        Ok(stored)
    }

    async fn list_by_owner(&self, session: &Session, owner: UserId) -> Result<Vec<Application>> {
        let response = self
            .client
            .as_user(Method::GET, APPLICATIONS_PATH, &session.access_token)
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{owner}")),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<Application> = SupabaseClient::check(response).await?.json().await?;
        tracing::debug!(user_id = %owner, count = rows.len(), "Applications fetched");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supabase::{Supabase, SupabaseConfig};
    use idcard_core::{ApplicationStatus, Faculty, Level};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER: &str = "5b8f1c3e-2a4d-4e6f-8a9b-0c1d2e3f4a5b";

    fn session() -> Session {
        Session {
            access_token: "student-token".into(),
            refresh_token: None,
            user_id: USER.parse().unwrap(),
            email: None,
            expires_at: None,
        }
    }

    fn row(id: &str, status: &str, created_at: &str) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": USER,
            "matric_number": "FUL/2024/001",
            "faculty": "Faculty of Science",
            "department": "Physics",
            "level": "200",
            "passport_photo_url": "https://cdn/p.jpg",
            "signature_url": "https://cdn/s.png",
            "status": status,
            "created_at": created_at
        })
    }

    #[tokio::test]
    async fn insert_asks_for_representation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/applications"))
            .and(header("prefer", "return=representation"))
            .and(body_partial_json(json!({
                "user_id": USER,
                "faculty": "Faculty of Science",
                "level": "200",
                "status": "pending"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([row(
                "app-1",
                "pending",
                "2024-06-01T10:00:00+00:00"
            )])))
            .expect(1)
            .mount(&server)
            .await;

        let supabase = Supabase::new(SupabaseConfig::new(server.uri(), "anon")).unwrap();
        let new = NewApplication {
            user_id: USER.parse().unwrap(),
            matric_number: "FUL/2024/001".into(),
            faculty: Faculty::Science,
            department: "Physics".into(),
            level: Level::L200,
            passport_photo_url: Some("https://cdn/p.jpg".into()),
            signature_url: Some("https://cdn/s.png".into()),
            status: ApplicationStatus::Pending,
        };

        let stored = supabase.records().insert(&session(), &new).await.unwrap();
        assert_eq!(stored.id, "app-1");
        assert_eq!(stored.status, ApplicationStatus::Pending);
    }

    #[tokio::test]
    async fn insert_error_surfaces_store_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/applications"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": "42501",
                "message": "new row violates row-level security policy for table \"applications\""
            })))
            .mount(&server)
            .await;

        let supabase = Supabase::new(SupabaseConfig::new(server.uri(), "anon")).unwrap();
        let new = NewApplication {
            user_id: USER.parse().unwrap(),
            matric_number: "FUL/2024/001".into(),
            faculty: Faculty::Arts,
            department: "History".into(),
            level: Level::L100,
            passport_photo_url: None,
            signature_url: None,
            status: ApplicationStatus::Pending,
        };

        let err = supabase.records().insert(&session(), &new).await.unwrap_err();
        assert!(err.user_message().starts_with("new row violates row-level security"));
    }

    #[tokio::test]
    async fn list_filters_by_owner_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/applications"))
            .and(query_param("user_id", format!("eq.{USER}")))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                row("app-2", "ready", "2024-06-02T10:00:00+00:00"),
                row("app-1", "processing", "2024-06-01T10:00:00+00:00"),
            ])))
            .mount(&server)
            .await;

        let supabase = Supabase::new(SupabaseConfig::new(server.uri(), "anon")).unwrap();
        let rows = supabase
            .records()
            .list_by_owner(&session(), USER.parse().unwrap())
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "app-2");
        assert!(rows[0].status.is_ready());
    }
}
