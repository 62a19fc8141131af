//! Supabase Storage client.

use async_trait::async_trait;
use reqwest::Method;

use idcard_core::Bucket;

use super::types::RemoveObjects;
use super::SupabaseClient;
use crate::error::Result;
use crate::session::Session;
use crate::ObjectStorage;

/// Storage client implementing [`ObjectStorage`].
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    client: SupabaseClient,
}

impl SupabaseStorage {
    pub(crate) fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(
        &self,
        session: &Session,
        bucket: Bucket,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let size = bytes.len();
        let response = self
            .client
            .as_user(
                Method::POST,
                &format!("/storage/v1/object/{}/{name}", bucket.name()),
                &session.access_token,
            )
            .header("content-type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        SupabaseClient::check(response).await?;
        tracing::debug!(bucket = %bucket, object = %name, size, "Object uploaded");
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        self.client
            .url(&format!("/storage/v1/object/public/{}/{name}", bucket.name()))
    }

    async fn remove(&self, session: &Session, bucket: Bucket, name: &str) -> Result<()> {
        let response = self
            .client
            .as_user(
                Method::DELETE,
                &format!("/storage/v1/object/{}", bucket.name()),
                &session.access_token,
            )
            .json(&RemoveObjects { prefixes: [name] })
            .send()
            .await?;

        SupabaseClient::check(response).await?;
        tracing::debug!(bucket = %bucket, object = %name, "Object removed");
        Ok(())
    }
}
