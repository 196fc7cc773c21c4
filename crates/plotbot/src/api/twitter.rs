//! Twitter API v1.1 client

use crate::api::SocialPlatform;
use crate::api::models::{
    Account, MediaUpload, MentionPost, PostedStatus, SearchResponse, TimelinePost,
};
use crate::api::oauth::{OAuthSigner, encode_pairs};
use crate::config::BotConfig;
use crate::error::{PlotbotError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, instrument};

/// Twitter REST client signing every request with OAuth 1.0a
pub struct TwitterClient {
    client: Client,
    signer: OAuthSigner,
    api_base: String,
    upload_base: String,
}

impl TwitterClient {
    /// Create a client from the bot configuration
    pub fn new(config: &BotConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            signer: OAuthSigner::new(config.credentials.clone()),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            upload_base: config.upload_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = self.endpoint(path);
        let auth = self.signer.authorization_header("GET", &url, params);
        let full_url = if params.is_empty() {
            url
        } else {
            format!("{url}?{}", encode_pairs(params))
        };

        debug!("GET {}", full_url);
        let response = self
            .client
            .get(&full_url)
            .header("Authorization", auth)
            .send()
            .await?;

        read_json(response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let auth = self.signer.authorization_header("POST", url, params);

        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header("Authorization", auth)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(encode_pairs(params))
            .send()
            .await?;

        read_json(response).await
    }

    async fn upload_media(&self, media_path: &Path) -> Result<MediaUpload> {
        let url = format!("{}/media/upload.json", self.upload_base);
        let bytes = tokio::fs::read(media_path).await?;
        let file_name = media_path
            .file_name()
            .map_or_else(|| "chart.png".to_string(), |name| name.to_string_lossy().into_owned());

        let part = Part::bytes(bytes).file_name(file_name).mime_str("image/png")?;
        let form = Form::new().part("media", part);
        // Multipart bodies are excluded from the signature
        let auth = self.signer.authorization_header("POST", &url, &[]);

        debug!("POST {} ({})", url, media_path.display());
        let response = self
            .client
            .post(&url)
            .header("Authorization", auth)
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Check the status, then decode the body into `T`
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(PlotbotError::from_status(status.as_u16(), body));
    }

    serde_json::from_str(&body).map_err(PlotbotError::from)
}

fn pair(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[async_trait]
impl SocialPlatform for TwitterClient {
    #[instrument(skip(self))]
    async fn verify_credentials(&self) -> Result<Account> {
        self.get_json("account/verify_credentials.json", &[]).await
    }

    #[instrument(skip(self))]
    async fn search_mentions(&self, query: &str) -> Result<Vec<MentionPost>> {
        let response: SearchResponse = self
            .get_json("search/tweets.json", &[pair("q", query)])
            .await?;
        Ok(response.statuses)
    }

    #[instrument(skip(self))]
    async fn user_timeline(
        &self,
        screen_name: &str,
        page: u32,
        count: u32,
    ) -> Result<Vec<TimelinePost>> {
        let params = [
            pair("screen_name", screen_name),
            pair("count", count),
            pair("page", page),
        ];
        self.get_json("statuses/user_timeline.json", &params).await
    }

    #[instrument(skip(self, text))]
    async fn post_status(&self, text: &str) -> Result<PostedStatus> {
        let url = self.endpoint("statuses/update.json");
        self.post_form(&url, &[pair("status", text)]).await
    }

    #[instrument(skip(self, text))]
    async fn post_status_with_media(&self, text: &str, media_path: &Path) -> Result<PostedStatus> {
        let upload = self.upload_media(media_path).await?;
        debug!("uploaded media {}", upload.media_id_string);

        let url = self.endpoint("statuses/update.json");
        let params = [pair("status", text), pair("media_ids", &upload.media_id_string)];
        self.post_form(&url, &params).await
    }
}
