use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// GCP project the Firestore database and FCM app live in
    pub project_id: String,

    /// Firestore REST endpoint (override for emulator testing)
    pub firestore_host: String,

    /// FCM HTTP v1 endpoint (override for emulator testing)
    pub fcm_host: String,

    /// GCE metadata server used to mint access tokens when running on GCP
    pub metadata_host: String,

    /// Static access token override for local development; when set, the
    /// metadata server is never contacted
    pub google_access_token: Option<String>,

    /// Port the trigger listener binds to (Cloud Run convention: $PORT)
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            project_id: std::env::var("GOOGLE_CLOUD_PROJECT")
                .map_err(|_| anyhow::anyhow!("GOOGLE_CLOUD_PROJECT environment variable is required"))?,
            firestore_host: std::env::var("FIRESTORE_HOST")
                .unwrap_or_else(|_| "https://firestore.googleapis.com".to_string()),
            fcm_host: std::env::var("FCM_HOST")
                .unwrap_or_else(|_| "https://fcm.googleapis.com".to_string()),
            metadata_host: std::env::var("GCE_METADATA_HOST")
                .unwrap_or_else(|_| "http://metadata.google.internal".to_string()),
            google_access_token: std::env::var("GOOGLE_ACCESS_TOKEN").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid u16"))?,
        })
    }
}
