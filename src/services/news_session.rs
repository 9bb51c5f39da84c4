use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    configuration::Settings,
    domain::{DerivedFields, LocatorTable, NewsArticle, PhraseMatcher},
    error::ScoutError,
};

use super::{extract_fields, write_articles, Browser, Downloader, PictureTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Init,
    SearchSubmitted,
    NoResults,
    ResultsShown,
    CategorySelected,
    Sorted,
    Extracted,
    Exported,
    Closed,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub wait_timeout: Duration,
    pub results_settle: Duration,
    pub picture_directory: PathBuf,
    pub picture_prefix: String,
}

impl SessionOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        SessionOptions {
            wait_timeout: settings.browser.wait_timeout(),
            results_settle: settings.browser.results_settle(),
            picture_directory: settings.output.directory.clone(),
            picture_prefix: settings.output.picture_prefix.clone(),
        }
    }
}

/// One browsing session: search, filter, sort, extract, export, close.
///
/// The phrase fixed by a successful search is the only phrase articles of this
/// session are scored against.
pub struct NewsSession<B: Browser, D: Downloader> {
    browser: B,
    downloader: D,
    locators: LocatorTable,
    options: SessionOptions,
    state: SessionState,
    phrase: Option<PhraseMatcher>,
}

impl<B: Browser, D: Downloader> NewsSession<B, D> {
    pub fn new(browser: B, downloader: D, locators: LocatorTable, options: SessionOptions) -> Self {
        NewsSession {
            browser,
            downloader,
            locators,
            options,
            state: SessionState::Init,
            phrase: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    fn transition(&mut self, expected: SessionState, to: SessionState) -> Result<(), ScoutError> {
        if self.state != expected {
            return Err(ScoutError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }

    pub async fn search(&mut self, phrase: &str) -> Result<(), ScoutError> {
        self.transition(SessionState::Init, SessionState::SearchSubmitted)?;
        let search = &self.locators.search;

        self.browser.click(&search.button).await?;
        self.browser.input_text(&search.input, phrase).await?;
        self.browser.click(&search.submit).await?;
        self.browser
            .wait_until_present(&search.results_heading, self.options.wait_timeout)
            .await?;

        if self
            .browser
            .page_contains(&self.locators.no_results(phrase))
            .await?
        {
            log::warn!("Found no results for phrase: {}", phrase);
            self.state = SessionState::NoResults;
            return Err(ScoutError::NoResults {
                phrase: phrase.to_string(),
            });
        }

        log::info!("Search results shown for phrase: {}", phrase);
        self.phrase = Some(PhraseMatcher::new(phrase));
        self.state = SessionState::ResultsShown;
        Ok(())
    }

    pub async fn select_category(&mut self, name: &str) -> Result<(), ScoutError> {
        self.transition(SessionState::ResultsShown, SessionState::CategorySelected)?;
        let category = &self.locators.category;

        self.browser
            .wait_until_present(&category.topics_section, self.options.wait_timeout)
            .await?;
        let section = self
            .browser
            .find(&category.topics_section)
            .await?
            .ok_or_else(|| ScoutError::Timeout {
                locator: category.topics_section.to_string(),
                timeout: self.options.wait_timeout,
            })?;

        match self
            .browser
            .find_within(&section, &category.see_all_topics)
            .await?
        {
            Some(see_all) => self.browser.click_element(&see_all).await?,
            None => log::debug!("Topics list is not collapsed"),
        }

        let topic = self
            .browser
            .find_within(&section, &self.locators.topic(name))
            .await?
            .ok_or_else(|| ScoutError::CategoryNotFound {
                name: name.to_string(),
            })?;
        self.browser.click_element(&topic).await?;

        self.browser
            .wait_until_present(&self.locators.search.results, self.options.wait_timeout)
            .await?;
        log::info!("Selected category: {}", name);
        Ok(())
    }

    pub async fn sort_by_newest(&mut self) -> Result<(), ScoutError> {
        self.transition(SessionState::CategorySelected, SessionState::Sorted)?;
        let sort = &self.locators.sort;

        self.browser
            .select_by_value(&sort.select_input, &sort.newest_value)
            .await?;
        self.browser
            .wait_until_present(&self.locators.search.results, self.options.wait_timeout)
            .await?;
        log::info!("Sorted results by newest");
        Ok(())
    }

    pub async fn collect_articles(&mut self) -> Result<Vec<NewsArticle>, ScoutError> {
        let phrase = match (self.state, self.phrase.clone()) {
            (SessionState::Sorted, Some(phrase)) => phrase,
            _ => {
                return Err(ScoutError::InvalidTransition {
                    from: self.state,
                    to: SessionState::Extracted,
                })
            }
        };
        self.state = SessionState::Extracted;

        if !self.options.results_settle.is_zero() {
            tokio::time::sleep(self.options.results_settle).await;
        }
        let entries = self.browser.find_all(&self.locators.search.results).await?;
        log::info!("Found {} result entries", entries.len());

        extract_articles(
            &self.browser,
            &self.downloader,
            &self.locators,
            &entries,
            &phrase,
            &self.options,
        )
        .await
    }

    pub async fn export(
        &mut self,
        articles: &[NewsArticle],
        destination: &Path,
    ) -> Result<(), ScoutError> {
        self.transition(SessionState::Extracted, SessionState::Exported)?;
        write_articles(articles, destination)?;
        log::info!(
            "Wrote {} articles to {}",
            articles.len(),
            destination.display()
        );
        Ok(())
    }

    /// Releases the browser, whatever state the session stopped in.
    pub async fn close(&mut self) -> Result<(), ScoutError> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        self.browser.close().await?;
        self.state = SessionState::Closed;
        log::info!("Closed browser session");
        Ok(())
    }
}

/// Turns result entries into records, in page order.
pub async fn extract_articles<B: Browser, D: Downloader>(
    browser: &B,
    downloader: &D,
    locators: &LocatorTable,
    entries: &[B::Element],
    phrase: &PhraseMatcher,
    options: &SessionOptions,
) -> Result<Vec<NewsArticle>, ScoutError> {
    let mut articles = Vec::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        let picture = PictureTarget::new(
            &options.picture_directory,
            &options.picture_prefix,
            idx + 1,
        );
        let raw = extract_fields(browser, downloader, entry, locators, &picture).await?;
        let derived = DerivedFields::compute(
            raw.title.as_deref().unwrap_or_default(),
            raw.description.as_deref().unwrap_or_default(),
            phrase,
        );

        log::debug!(
            "Article {}: {} occurrences of \"{}\", money: {}",
            idx + 1,
            derived.search_phrase_count,
            phrase.phrase(),
            derived.contains_money
        );
        articles.push(NewsArticle::new(raw, derived));
    }

    Ok(articles)
}

/// Runs a whole session and always closes the browser afterwards.
///
/// Returns the number of exported articles.
pub async fn run_session<B: Browser, D: Downloader>(
    session: &mut NewsSession<B, D>,
    phrase: &str,
    category: &str,
    destination: &Path,
) -> Result<usize, ScoutError> {
    let result = drive(session, phrase, category, destination).await;

    if let Err(e) = session.close().await {
        log::error!("Failed to close browser session: {}", e);
    }

    result
}

async fn drive<B: Browser, D: Downloader>(
    session: &mut NewsSession<B, D>,
    phrase: &str,
    category: &str,
    destination: &Path,
) -> Result<usize, ScoutError> {
    session.search(phrase).await?;
    session.select_category(category).await?;
    session.sort_by_newest().await?;
    let articles = session.collect_articles().await?;
    session.export(&articles, destination).await?;
    Ok(articles.len())
}
