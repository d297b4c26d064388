/// A single search request as entered by the user.
///
/// Immutable once constructed; the resolver never mutates it.
#[derive(Debug, Clone)]
pub struct Query {
    /// Free-text search term, trimmed. May be empty.
    pub text: String,
    /// Cuisine filter. `None` means "no filter" - the UI sentinel value
    /// "All" is normalized to `None` at construction time.
    pub cuisine: Option<String>,
    /// Display order requested by the user. Applied by the caller after
    /// resolution, not inside the pipeline.
    pub sort: SortOrder,
}

impl Query {
    pub fn new(text: impl Into<String>, cuisine: Option<&str>, sort: SortOrder) -> Self {
        let cuisine = cuisine
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(str::to_string);

        Query {
            text: text.into().trim().to_string(),
            cuisine,
            sort,
        }
    }
}

/// Display ordering for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Preserve the order the pipeline produced.
    #[default]
    Relevance,
    /// Ascending by title, case-insensitive.
    Az,
    /// Descending by title, case-insensitive.
    Za,
}

impl SortOrder {
    /// Parse a selector value (`relevance`, `az`, `za`).
    pub fn parse(value: &str) -> Option<SortOrder> {
        match value.trim().to_ascii_lowercase().as_str() {
            "relevance" => Some(SortOrder::Relevance),
            "az" => Some(SortOrder::Az),
            "za" => Some(SortOrder::Za),
            _ => None,
        }
    }
}

/// A recipe record as returned by the upstream service.
///
/// `title` is the only field guaranteed non-empty; the adapter defaults it
/// to "Untitled" when missing. Duplicate ids within one result set are not
/// de-duplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRecord {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub recipe_url: Option<String>,
    pub video_url: Option<String>,
}

/// Which branch of the resolution pipeline produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLabel {
    /// Direct text search matched (possibly after cuisine filtering).
    DirectMatch,
    /// Fell back to browsing the selected cuisine.
    CuisineFallback,
    /// Fell back to the system default cuisine.
    DefaultCuisine,
    /// No source yielded any records.
    Empty,
}

/// Output of one resolution, consumed by the presentation sink and then
/// discarded. Nothing is cached across searches.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub records: Vec<MealRecord>,
    pub source: SourceLabel,
    pub message: Option<String>,
}

impl ResultSet {
    pub fn new(records: Vec<MealRecord>, source: SourceLabel, message: Option<String>) -> Self {
        ResultSet {
            records,
            source,
            message,
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        ResultSet {
            records: Vec::new(),
            source: SourceLabel::Empty,
            message: Some(message.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Persisted theme preference. Read at startup, written on every toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored value. Anything other than "dark" is light.
    pub fn from_stored(value: &str) -> Theme {
        if value.trim() == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
