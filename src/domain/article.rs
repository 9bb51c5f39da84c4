use std::path::PathBuf;

use super::derived_fields::DerivedFields;

pub const ARTICLE_HEADER: [&str; 6] = [
    "Title",
    "Date",
    "Description",
    "ProfilePicture",
    "Search Phrase Count",
    "Contains Money",
];

/// Spreadsheet row in header order.
pub type ArticleRow<'a> = (&'a str, &'a str, &'a str, &'a str, usize, bool);

/// Fields read from one result entry. `None` means the page has no such
/// sub-element, `Some("")` means it exists but renders no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArticle {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub profile_picture: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsArticle {
    title: String,
    date: String,
    description: String,
    profile_picture: String,
    search_phrase_count: usize,
    contains_money: bool,
}

impl NewsArticle {
    pub fn new(raw: RawArticle, derived: DerivedFields) -> Self {
        NewsArticle {
            title: raw.title.unwrap_or_default(),
            date: raw.date.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            profile_picture: raw
                .profile_picture
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            search_phrase_count: derived.search_phrase_count,
            contains_money: derived.contains_money,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn profile_picture(&self) -> &str {
        &self.profile_picture
    }

    pub fn search_phrase_count(&self) -> usize {
        self.search_phrase_count
    }

    pub fn contains_money(&self) -> bool {
        self.contains_money
    }

    pub fn to_row(&self) -> ArticleRow<'_> {
        (
            &self.title,
            &self.date,
            &self.description,
            &self.profile_picture,
            self.search_phrase_count,
            self.contains_money,
        )
    }
}
