use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;

use crate::{
    domain::{Locator, LocatorTable},
    error::{DownloadError, ScoutError},
};

use super::{Browser, Downloader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeElement(usize);

#[derive(Default)]
struct FakeNode {
    text: String,
    attrs: HashMap<String, String>,
    children: HashMap<String, usize>,
}

/// In-memory page: a flat list of nodes reachable either from page level
/// locators or from a parent node by relative locator.
#[derive(Default)]
pub struct FakeBrowser {
    nodes: Vec<FakeNode>,
    page: HashMap<String, Vec<usize>>,
    actions: Mutex<Vec<String>>,
}

pub struct FakeEntry<'a> {
    pub title: Option<&'a str>,
    pub date: Option<&'a str>,
    pub description: Option<&'a str>,
    pub image_src: Option<&'a str>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        FakeBrowser::default()
    }

    pub fn add_node(&mut self, text: &str) -> FakeElement {
        self.nodes.push(FakeNode {
            text: text.to_string(),
            ..Default::default()
        });
        FakeElement(self.nodes.len() - 1)
    }

    pub fn set_attr(&mut self, element: FakeElement, name: &str, value: &str) {
        self.nodes[element.0]
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn add_child(&mut self, parent: FakeElement, locator: &Locator, child: FakeElement) {
        self.nodes[parent.0]
            .children
            .insert(locator.to_string(), child.0);
    }

    pub fn place(&mut self, locator: &Locator, element: FakeElement) {
        self.page
            .entry(locator.to_string())
            .or_default()
            .push(element.0);
    }

    /// Builds one result entry and appends it to the result list.
    pub fn add_entry(&mut self, locators: &LocatorTable, entry: FakeEntry<'_>) -> FakeElement {
        let li = self.add_node("");
        let article = &locators.article;

        for (locator, text) in [
            (&article.title, entry.title),
            (&article.date, entry.date),
            (&article.description, entry.description),
        ] {
            if let Some(text) = text {
                let child = self.add_node(text);
                self.add_child(li, locator, child);
            }
        }
        if let Some(src) = entry.image_src {
            let img = self.add_node("");
            self.set_attr(img, "src", src);
            self.add_child(li, &article.profile_picture, img);
        }

        self.place(&locators.search.results, li);
        li
    }

    /// Search page with every control the session touches, no result entries yet.
    pub fn search_page(locators: &LocatorTable, topics: &[&str]) -> Self {
        let mut browser = FakeBrowser::new();

        for locator in [
            &locators.search.button,
            &locators.search.input,
            &locators.search.submit,
            &locators.search.results_heading,
            &locators.sort.select_input,
        ] {
            let node = browser.add_node("");
            browser.place(locator, node);
        }

        let section = browser.add_node("Topics");
        browser.place(&locators.category.topics_section, section);
        let see_all = browser.add_node("See All");
        browser.add_child(section, &locators.category.see_all_topics, see_all);
        for topic in topics {
            let node = browser.add_node(topic);
            browser.add_child(section, &locators.topic(topic), node);
        }

        browser
    }

    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }

    fn record(&self, action: String) {
        self.actions.lock().unwrap().push(action);
    }

    fn require(&self, locator: &Locator) -> Result<usize, ScoutError> {
        self.page
            .get(locator.as_str())
            .and_then(|ids| ids.first().copied())
            .ok_or_else(|| ScoutError::Timeout {
                locator: locator.to_string(),
                timeout: Duration::ZERO,
            })
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    type Element = FakeElement;

    async fn click(&self, locator: &Locator) -> Result<(), ScoutError> {
        self.require(locator)?;
        self.record(format!("click {}", locator));
        Ok(())
    }

    async fn input_text(&self, locator: &Locator, text: &str) -> Result<(), ScoutError> {
        self.require(locator)?;
        self.record(format!("type {} into {}", text, locator));
        Ok(())
    }

    async fn select_by_value(&self, locator: &Locator, value: &str) -> Result<(), ScoutError> {
        self.require(locator)?;
        self.record(format!("select {} in {}", value, locator));
        Ok(())
    }

    async fn wait_until_present(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), ScoutError> {
        self.require(locator)
            .map(|_| ())
            .map_err(|_| ScoutError::Timeout {
                locator: locator.to_string(),
                timeout,
            })
    }

    async fn page_contains(&self, locator: &Locator) -> Result<bool, ScoutError> {
        Ok(self.require(locator).is_ok())
    }

    async fn find(&self, locator: &Locator) -> Result<Option<FakeElement>, ScoutError> {
        Ok(self.require(locator).ok().map(FakeElement))
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>, ScoutError> {
        Ok(self
            .page
            .get(locator.as_str())
            .map(|ids| ids.iter().copied().map(FakeElement).collect())
            .unwrap_or_default())
    }

    async fn find_within(
        &self,
        parent: &FakeElement,
        locator: &Locator,
    ) -> Result<Option<FakeElement>, ScoutError> {
        Ok(self.nodes[parent.0]
            .children
            .get(locator.as_str())
            .copied()
            .map(FakeElement))
    }

    async fn click_element(&self, element: &FakeElement) -> Result<(), ScoutError> {
        self.record(format!("click {}", self.nodes[element.0].text));
        Ok(())
    }

    async fn text(&self, element: &FakeElement) -> Result<String, ScoutError> {
        Ok(self.nodes[element.0].text.clone())
    }

    async fn attr(&self, element: &FakeElement, name: &str) -> Result<Option<String>, ScoutError> {
        Ok(self.nodes[element.0].attrs.get(name).cloned())
    }

    async fn close(&self) -> Result<(), ScoutError> {
        self.record("close".to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDownloader {
    failing_url: Option<String>,
    fetched: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeDownloader {
    pub fn failing_on(url: &str) -> Self {
        FakeDownloader {
            failing_url: Some(url.to_string()),
            ..Default::default()
        }
    }

    pub fn fetched(&self) -> Vec<(String, PathBuf)> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<(), DownloadError> {
        if self.failing_url.as_deref() == Some(url) {
            return Err(DownloadError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
            });
        }
        self.fetched
            .lock()
            .unwrap()
            .push((url.to_string(), destination.to_path_buf()));
        Ok(())
    }
}
