use async_trait::async_trait;
use model::ForecastPlan;
use serde::Deserialize;
use tracing::{debug, info, instrument, trace, warn};

use super::{Result, SnapshotStore, StorageError, StoreReceipt, SNAPSHOT_FILE_NAME};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Cloud snapshot store speaking the Google Drive v3 file API.
///
/// Overwrite semantics are search-then-create-or-patch: the store looks up
/// the well-known filename, patches the existing file's media when found,
/// and otherwise creates it with a multipart upload. Only the opaque bearer
/// credential is carried here; acquiring it is the identity provider's
/// problem.
#[derive(Debug, Clone)]
pub struct DriveStore {
    client: reqwest::Client,
    access_token: Option<String>,
    base_url: String,
}

/// Subset of the Drive file resource the store cares about.
#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

/// Response shape of the file search endpoint.
#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

impl DriveStore {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the store at a different API host. Used by tests and
    /// self-hosted proxies.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn token(&self) -> Result<&str> {
        self.access_token
            .as_deref()
            .ok_or(StorageError::NotAuthenticated)
    }

    /// Look up the id of the well-known snapshot file, if one exists.
    #[instrument(skip(self))]
    async fn find_file_id(&self) -> Result<Option<String>> {
        let token = self.token()?;
        let query = format!("name = '{}' and trashed = false", SNAPSHOT_FILE_NAME);
        trace!(%query, "searching for snapshot file");

        let list: FileList = self
            .client
            .get(format!("{}/drive/v3/files", self.base_url))
            .bearer_auth(token)
            .query(&[("q", query.as_str()), ("spaces", "drive")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(matches = list.files.len(), "snapshot search finished");
        Ok(list.files.into_iter().next().map(|f| f.id))
    }
}

#[async_trait]
impl SnapshotStore for DriveStore {
    fn kind(&self) -> &'static str {
        "drive"
    }

    fn authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    #[instrument(skip(self, plan))]
    async fn save(&self, plan: &ForecastPlan) -> Result<StoreReceipt> {
        let token = self.token()?.to_string();
        let content = serde_json::to_string_pretty(plan)?;

        match self.find_file_id().await? {
            Some(file_id) => {
                // Update existing
                debug!(%file_id, "patching existing snapshot file");
                self.client
                    .patch(format!(
                        "{}/upload/drive/v3/files/{}?uploadType=media",
                        self.base_url, file_id
                    ))
                    .bearer_auth(&token)
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(content)
                    .send()
                    .await?
                    .error_for_status()?;

                info!(%file_id, "snapshot saved to cloud store");
                Ok(StoreReceipt {
                    location: file_id,
                    created: false,
                })
            }
            None => {
                // Create new
                debug!("no snapshot file yet, creating one");
                let metadata = serde_json::json!({
                    "name": SNAPSHOT_FILE_NAME,
                    "mimeType": "application/json",
                })
                .to_string();

                let form = reqwest::multipart::Form::new()
                    .part(
                        "metadata",
                        reqwest::multipart::Part::text(metadata).mime_str("application/json")?,
                    )
                    .part(
                        "file",
                        reqwest::multipart::Part::text(content).mime_str("application/json")?,
                    );

                let created: DriveFile = self
                    .client
                    .post(format!(
                        "{}/upload/drive/v3/files?uploadType=multipart",
                        self.base_url
                    ))
                    .bearer_auth(&token)
                    .multipart(form)
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;

                info!(file_id = %created.id, "snapshot file created in cloud store");
                Ok(StoreReceipt {
                    location: created.id,
                    created: true,
                })
            }
        }
    }

    #[instrument(skip(self))]
    async fn load(&self) -> Result<ForecastPlan> {
        let token = self.token()?.to_string();

        let file_id = match self.find_file_id().await? {
            Some(id) => id,
            None => {
                warn!("no snapshot file found in cloud store");
                return Err(StorageError::NotFound(SNAPSHOT_FILE_NAME.to_string()));
            }
        };

        let content = self
            .client
            .get(format!(
                "{}/drive/v3/files/{}?alt=media",
                self.base_url, file_id
            ))
            .bearer_auth(&token)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let plan = serde_json::from_str(&content)?;
        info!(%file_id, "snapshot loaded from cloud store");
        Ok(plan)
    }
}
