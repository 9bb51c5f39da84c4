use std::{path::Path, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::DownloadError;

#[async_trait]
pub trait Downloader: Send + Sync {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<(), DownloadError>;
}

/// Saves images over plain HTTP, resolving relative sources against the site.
pub struct HttpDownloader {
    client: Client,
    base_url: Url,
}

impl HttpDownloader {
    pub fn new(base_url: &str) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(fake_user_agent::get_rua())
            .read_timeout(Duration::from_secs(30))
            .build()?;

        Ok(HttpDownloader {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn resolve(&self, src: &str) -> Result<Url, DownloadError> {
        Ok(self.base_url.join(src)?)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<(), DownloadError> {
        let url = self.resolve(url)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status { status });
        }

        let body = response.bytes().await?;
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(destination, &body).await?;

        log::debug!(
            "Saved {} bytes from {} to {}",
            body.len(),
            url,
            destination.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::HttpDownloader;

    #[test]
    fn resolve_relative_sources() {
        let downloader = HttpDownloader::new("https://www.latimes.com/").unwrap();

        assert_eq!(
            downloader.resolve("/images/a.jpg").unwrap().as_str(),
            "https://www.latimes.com/images/a.jpg"
        );
        assert_eq!(
            downloader
                .resolve("//ca-times.brightspotcdn.com/b.png")
                .unwrap()
                .as_str(),
            "https://ca-times.brightspotcdn.com/b.png"
        );
        assert_eq!(
            downloader
                .resolve("https://cdn.example.com/c.webp?w=300")
                .unwrap()
                .as_str(),
            "https://cdn.example.com/c.webp?w=300"
        );
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(HttpDownloader::new("not a url").is_err());
    }
}
