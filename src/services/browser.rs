use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::{
    components::SelectElement, error::WebDriverError, prelude::ElementQueryable, By,
    ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement,
};

use crate::{configuration::BrowserSettings, domain::Locator, error::ScoutError};

/// Capabilities the session needs from a browser.
///
/// Lookups that may legitimately miss return `Ok(None)`; only driver failures
/// and expired waits are errors.
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Send + Sync;

    async fn click(&self, locator: &Locator) -> Result<(), ScoutError>;

    /// Types into the input once it is visible.
    async fn input_text(&self, locator: &Locator, text: &str) -> Result<(), ScoutError>;

    async fn select_by_value(&self, locator: &Locator, value: &str) -> Result<(), ScoutError>;

    async fn wait_until_present(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), ScoutError>;

    async fn page_contains(&self, locator: &Locator) -> Result<bool, ScoutError>;

    async fn find(&self, locator: &Locator) -> Result<Option<Self::Element>, ScoutError>;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, ScoutError>;

    async fn find_within(
        &self,
        parent: &Self::Element,
        locator: &Locator,
    ) -> Result<Option<Self::Element>, ScoutError>;

    async fn click_element(&self, element: &Self::Element) -> Result<(), ScoutError>;

    async fn text(&self, element: &Self::Element) -> Result<String, ScoutError>;

    async fn attr(&self, element: &Self::Element, name: &str)
        -> Result<Option<String>, ScoutError>;

    async fn close(&self) -> Result<(), ScoutError>;
}

pub struct WebDriverBrowser {
    driver: WebDriver,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl WebDriverBrowser {
    /// Starts a Chrome session on the WebDriver server and opens the site.
    pub async fn open(settings: &BrowserSettings) -> Result<Self, ScoutError> {
        let mut caps = DesiredCapabilities::chrome();
        if settings.headless {
            caps.set_headless()?;
        }

        let driver = WebDriver::new(&settings.webdriver_url, caps).await?;
        if settings.maximized {
            driver.maximize_window().await?;
        }
        driver.goto(&settings.site_url).await?;
        log::info!("Opened {} on {}", settings.site_url, settings.webdriver_url);

        Ok(WebDriverBrowser {
            driver,
            wait_timeout: settings.wait_timeout(),
            poll_interval: settings.poll_interval(),
        })
    }

    async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
        displayed: bool,
    ) -> Result<WebElement, ScoutError> {
        let query = self
            .driver
            .query(By::XPath(locator.as_str()))
            .wait(timeout, self.poll_interval);
        let query = match displayed {
            true => query.and_displayed(),
            false => query,
        };

        match query.first().await {
            Ok(element) => Ok(element),
            Err(WebDriverError::NoSuchElement(_)) => Err(ScoutError::Timeout {
                locator: locator.to_string(),
                timeout,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn missing_as_none(
    result: Result<WebElement, WebDriverError>,
) -> Result<Option<WebElement>, ScoutError> {
    match result {
        Ok(element) => Ok(Some(element)),
        Err(WebDriverError::NoSuchElement(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl Browser for WebDriverBrowser {
    type Element = WebElement;

    async fn click(&self, locator: &Locator) -> Result<(), ScoutError> {
        let element = self.wait_for(locator, self.wait_timeout, true).await?;
        element.click().await?;
        Ok(())
    }

    async fn input_text(&self, locator: &Locator, text: &str) -> Result<(), ScoutError> {
        let element = self.wait_for(locator, self.wait_timeout, true).await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn select_by_value(&self, locator: &Locator, value: &str) -> Result<(), ScoutError> {
        let element = self.wait_for(locator, self.wait_timeout, false).await?;
        SelectElement::new(&element)
            .await?
            .select_by_value(value)
            .await?;
        Ok(())
    }

    async fn wait_until_present(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<(), ScoutError> {
        self.wait_for(locator, timeout, false).await.map(|_| ())
    }

    async fn page_contains(&self, locator: &Locator) -> Result<bool, ScoutError> {
        let elements = self.driver.find_all(By::XPath(locator.as_str())).await?;
        Ok(!elements.is_empty())
    }

    async fn find(&self, locator: &Locator) -> Result<Option<WebElement>, ScoutError> {
        missing_as_none(self.driver.find(By::XPath(locator.as_str())).await)
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<WebElement>, ScoutError> {
        Ok(self.driver.find_all(By::XPath(locator.as_str())).await?)
    }

    async fn find_within(
        &self,
        parent: &WebElement,
        locator: &Locator,
    ) -> Result<Option<WebElement>, ScoutError> {
        missing_as_none(parent.find(By::XPath(locator.as_str())).await)
    }

    async fn click_element(&self, element: &WebElement) -> Result<(), ScoutError> {
        element.click().await?;
        Ok(())
    }

    async fn text(&self, element: &WebElement) -> Result<String, ScoutError> {
        Ok(element.text().await?)
    }

    async fn attr(&self, element: &WebElement, name: &str) -> Result<Option<String>, ScoutError> {
        Ok(element.attr(name).await?)
    }

    async fn close(&self) -> Result<(), ScoutError> {
        self.driver.clone().quit().await?;
        Ok(())
    }
}
