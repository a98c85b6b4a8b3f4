//! Media staging for post images and videos.
//!
//! Every media item is downloaded into the local media folder. Files under the
//! attachment ceiling are attached directly when uploading from the host is enabled;
//! everything else is linked through the public URL the media folder is served from.

use std::path::{Path, PathBuf};

use rand::Rng;
use url::Url;

use crate::{
    config::Config,
    error::{internal::InternalError, AppError},
    model::platform::{Post, PostVideo},
};

/// Files of this size or larger are never attached directly.
pub const ATTACHMENT_SIZE_LIMIT: usize = 8_000_000;

/// Where a staged media file is delivered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedMedia {
    /// Attached from the local media folder.
    Local(PathBuf),
    /// Linked by its public URL.
    Remote(String),
}

/// Decides whether a file of `size` bytes is attached or linked.
pub fn should_attach(size: usize, upload_from_host: bool) -> bool {
    upload_from_host && size < ATTACHMENT_SIZE_LIMIT
}

/// All media of one post, split by delivery method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedPostMedia {
    /// Local files to attach.
    pub media_files: Vec<PathBuf>,
    /// Public URLs to post as text.
    pub remote_urls: Vec<String>,
}

impl StagedPostMedia {
    pub fn push(&mut self, media: StagedMedia) {
        match media {
            StagedMedia::Local(path) => self.media_files.push(path),
            StagedMedia::Remote(url) => self.remote_urls.push(url),
        }
    }

    /// Remote URLs as one message body, one per line.
    pub fn message_text(&self) -> Option<String> {
        if self.remote_urls.is_empty() {
            None
        } else {
            Some(self.remote_urls.join("\n"))
        }
    }
}

/// Downloads post media and decides how each file is delivered.
pub struct MediaStager {
    client: reqwest::Client,
    folder: PathBuf,
    public_url: Url,
    upload_from_host: bool,
}

impl MediaStager {
    /// Creates a stager.
    ///
    /// # Arguments
    /// - `client` - HTTP client used for downloads
    /// - `folder` - Local folder media is written to
    /// - `public_url` - Base URL the folder is served from
    /// - `upload_from_host` - Attach files under the size limit instead of linking them
    pub fn new(
        client: reqwest::Client,
        folder: impl Into<PathBuf>,
        mut public_url: Url,
        upload_from_host: bool,
    ) -> Self {
        // Url::join replaces the last segment unless the base ends with a slash.
        if !public_url.path().ends_with('/') {
            let path = format!("{}/", public_url.path());
            public_url.set_path(&path);
        }

        Self {
            client,
            folder: folder.into(),
            public_url,
            upload_from_host,
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            &config.media_folder,
            config.media_public_url.clone(),
            config.upload_from_host,
        )
    }

    /// Stages every image and video of a post.
    ///
    /// A media item that fails to download is logged and left out; the rest of the
    /// post is still delivered.
    pub async fn stage_post(&self, post: &Post) -> StagedPostMedia {
        let mut staged = StagedPostMedia::default();

        let videos = post
            .videos
            .iter()
            .map(|video| (video.url.as_str(), video_file_name(&post.slug, video)));
        let images = post
            .images
            .iter()
            .map(|image| (image.path.as_str(), image.name.clone()));

        for (url, file_name) in images.chain(videos) {
            match self.stage(url, &file_name).await {
                Ok(media) => staged.push(media),
                Err(e) => tracing::warn!(
                    "Failed to stage {} for post {}: {}",
                    file_name,
                    post.slug,
                    e
                ),
            }
        }

        staged
    }

    /// Downloads one file into the media folder.
    async fn stage(&self, url: &str, file_name: &str) -> Result<StagedMedia, AppError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        self.store(file_name, &bytes).await
    }

    /// Writes downloaded bytes to the media folder and picks the delivery method.
    pub async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<StagedMedia, AppError> {
        let file_name = local_file_name(file_name);

        tokio::fs::create_dir_all(&self.folder).await?;
        let path = self.folder.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!("Staged {} ({} bytes)", path.display(), bytes.len());

        if should_attach(bytes.len(), self.upload_from_host) {
            Ok(StagedMedia::Local(path))
        } else {
            Ok(StagedMedia::Remote(self.public_url(&file_name)?))
        }
    }

    /// Public URL of a file in the media folder.
    pub fn public_url(&self, file_name: &str) -> Result<String, AppError> {
        let url = self
            .public_url
            .join(file_name)
            .map_err(|source| InternalError::InvalidMediaUrl {
                file_name: file_name.to_string(),
                source,
            })?;

        Ok(url.to_string())
    }
}

/// Name a video is stored under; unnamed videos get a random name derived from the post.
pub fn video_file_name(post_slug: &str, video: &PostVideo) -> String {
    match &video.name {
        Some(name) if !name.trim().is_empty() => name.clone(),
        _ => format!(
            "{}_{}.mp4",
            post_slug,
            rand::rng().random_range(1..=50_000_000u32)
        ),
    }
}

/// Strips any directory components so files always land inside the media folder.
fn local_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("media")
        .to_string()
}
