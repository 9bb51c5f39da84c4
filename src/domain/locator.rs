use std::fmt;

use serde::Deserialize;

const PHRASE_PLACEHOLDER: &str = "{phrase}";
const NAME_PLACEHOLDER: &str = "{name}";

/// XPath expression pointing at one element role on the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role to query mapping for the news site.
///
/// Defaults point at latimes.com. Every group can be overridden from the
/// `locators` section of the configuration; missing entries keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocatorTable {
    pub search: SearchLocators,
    pub category: CategoryLocators,
    pub sort: SortLocators,
    pub article: ArticleLocators,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchLocators {
    pub button: Locator,
    pub input: Locator,
    pub submit: Locator,
    /// Template, `{phrase}` is replaced by the searched phrase.
    pub no_results: String,
    pub results_heading: Locator,
    pub results: Locator,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CategoryLocators {
    pub topics_section: Locator,
    pub see_all_topics: Locator,
    /// Template, `{name}` is replaced by the topic name.
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SortLocators {
    pub select_input: Locator,
    pub newest_value: String,
}

/// Relative to one result entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArticleLocators {
    pub title: Locator,
    pub date: Locator,
    pub description: Locator,
    pub profile_picture: Locator,
}

impl Default for SearchLocators {
    fn default() -> Self {
        SearchLocators {
            button: Locator::xpath("//button[@data-element='search-button']"),
            input: Locator::xpath("//input[@data-element='search-form-input']"),
            submit: Locator::xpath("//button[@data-element='search-submit-button']"),
            no_results: r#"//div[contains(text(),'There are not any results that match "{phrase}".')]"#
                .to_string(),
            results_heading: Locator::xpath("//h1[text()='Search results for']"),
            results: Locator::xpath(r#"//ul[@class="search-results-module-results-menu"]//li"#),
        }
    }
}

impl Default for CategoryLocators {
    fn default() -> Self {
        CategoryLocators {
            topics_section: Locator::xpath(
                "//div[@class='search-filter']//p[contains(text(), 'Topics')]/parent::*",
            ),
            see_all_topics: Locator::xpath(".//span[@class='see-all-text']"),
            topic: ".//span[text()='{name}']".to_string(),
        }
    }
}

impl Default for SortLocators {
    fn default() -> Self {
        SortLocators {
            select_input: Locator::xpath("//select[@class='select-input']"),
            newest_value: "1".to_string(),
        }
    }
}

impl Default for ArticleLocators {
    fn default() -> Self {
        ArticleLocators {
            title: Locator::xpath(".//h3//a[@class='link']"),
            date: Locator::xpath(".//p[@class='promo-timestamp']"),
            description: Locator::xpath(".//p[@class='promo-description']"),
            profile_picture: Locator::xpath(".//img"),
        }
    }
}

impl LocatorTable {
    pub fn no_results(&self, phrase: &str) -> Locator {
        Locator::xpath(self.search.no_results.replace(PHRASE_PLACEHOLDER, phrase))
    }

    pub fn topic(&self, name: &str) -> Locator {
        Locator::xpath(self.category.topic.replace(NAME_PLACEHOLDER, name))
    }
}

#[cfg(test)]
mod tests {
    use super::{Locator, LocatorTable};

    #[test]
    fn no_results_fills_phrase() {
        let locators = LocatorTable::default();

        assert_eq!(
            locators.no_results("pakistan"),
            Locator::xpath(
                r#"//div[contains(text(),'There are not any results that match "pakistan".')]"#
            )
        );
    }

    #[test]
    fn topic_fills_name() {
        let locators = LocatorTable::default();

        assert_eq!(
            locators.topic("World & Nation").as_str(),
            ".//span[text()='World & Nation']"
        );
    }

    #[test]
    fn templates_without_placeholder_are_kept() {
        let mut locators = LocatorTable::default();
        locators.category.topic = "//span[@id='topic']".to_string();

        assert_eq!(locators.topic("Sports").as_str(), "//span[@id='topic']");
    }
}
