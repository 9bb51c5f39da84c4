use std::path::{Path, PathBuf};

use crate::{
    domain::{Locator, LocatorTable, RawArticle},
    error::ScoutError,
};

use super::{Browser, Downloader};

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "avif", "svg"];
const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Where the profile picture of the n-th processed entry is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureTarget {
    directory: PathBuf,
    file_stem: String,
}

impl PictureTarget {
    pub fn new(directory: &Path, prefix: &str, index: usize) -> Self {
        PictureTarget {
            directory: directory.to_path_buf(),
            file_stem: format!("{}_{}", prefix, index),
        }
    }

    pub fn path_for(&self, src: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.file_stem, image_extension(src)))
    }
}

fn image_extension(src: &str) -> String {
    let path = src.split(['?', '#']).next().unwrap_or_default();
    let file_name = path.rsplit('/').next().unwrap_or_default();

    match file_name.rsplit_once('.') {
        Some((_, ext)) if IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => {
            ext.to_lowercase()
        }
        _ => DEFAULT_IMAGE_EXTENSION.to_string(),
    }
}

/// Reads the raw fields of one result entry.
///
/// Sub-elements the entry does not have come back as `None`. A picture that is
/// present but cannot be downloaded fails the whole entry.
pub async fn extract_fields<B: Browser, D: Downloader>(
    browser: &B,
    downloader: &D,
    entry: &B::Element,
    locators: &LocatorTable,
    picture: &PictureTarget,
) -> Result<RawArticle, ScoutError> {
    let article = &locators.article;

    Ok(RawArticle {
        title: field_text(browser, entry, &article.title).await?,
        date: field_text(browser, entry, &article.date).await?,
        description: field_text(browser, entry, &article.description).await?,
        profile_picture: download_profile_picture(
            browser,
            downloader,
            entry,
            &article.profile_picture,
            picture,
        )
        .await?,
    })
}

async fn field_text<B: Browser>(
    browser: &B,
    entry: &B::Element,
    locator: &Locator,
) -> Result<Option<String>, ScoutError> {
    match browser.find_within(entry, locator).await? {
        Some(element) => Ok(Some(browser.text(&element).await?)),
        None => {
            log::debug!("No element for {} in result entry", locator);
            Ok(None)
        }
    }
}

async fn download_profile_picture<B: Browser, D: Downloader>(
    browser: &B,
    downloader: &D,
    entry: &B::Element,
    locator: &Locator,
    picture: &PictureTarget,
) -> Result<Option<PathBuf>, ScoutError> {
    let Some(img) = browser.find_within(entry, locator).await? else {
        log::debug!("Result entry has no profile picture");
        return Ok(None);
    };
    let Some(src) = browser.attr(&img, "src").await? else {
        log::warn!("Profile picture without src attribute, skipping");
        return Ok(None);
    };

    let path = picture.path_for(&src);
    downloader
        .fetch(&src, &path)
        .await
        .map_err(|source| ScoutError::Download {
            url: src.clone(),
            source,
        })?;

    Ok(Some(path))
}
