use crate::model::{MealRecord, ResultSet, SortOrder};
use html_escape::encode_safe;

/// Everything a host surface needs to draw one recipe card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDescriptor {
    pub title: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
    pub area: Option<String>,
    /// Recipe page, falling back to the video when no page exists.
    pub link: Option<String>,
    pub video_url: Option<String>,
}

impl From<&MealRecord> for CardDescriptor {
    fn from(record: &MealRecord) -> Self {
        CardDescriptor {
            title: record.title.clone(),
            thumbnail_url: record.thumbnail_url.clone(),
            category: record.category.clone(),
            area: record.area.clone(),
            link: record
                .recipe_url
                .clone()
                .or_else(|| record.video_url.clone()),
            video_url: record.video_url.clone(),
        }
    }
}

/// Output surface for a resolved search. Receives the status message (if
/// any) first, then one card per record in result order.
pub trait RenderSink {
    fn status(&mut self, message: &str);
    fn card(&mut self, card: &CardDescriptor);
}

/// Emit a result set into a sink.
pub fn render(result: &ResultSet, sink: &mut dyn RenderSink) {
    if let Some(message) = &result.message {
        sink.status(message);
    }
    for record in &result.records {
        sink.card(&CardDescriptor::from(record));
    }
}

/// Reorder records for display. `Relevance` preserves pipeline order; the
/// alphabetical orders compare titles case-insensitively and are stable,
/// so ties keep their prior relative order.
pub fn sort_records(records: &mut [MealRecord], order: SortOrder) {
    match order {
        SortOrder::Relevance => {}
        SortOrder::Az => records.sort_by_key(|r| r.title.to_lowercase()),
        SortOrder::Za => records.sort_by(|a, b| {
            b.title.to_lowercase().cmp(&a.title.to_lowercase())
        }),
    }
}

/// Sink that accumulates an HTML fragment. Every interpolated field is
/// escaped, so hostile upstream content cannot inject markup.
#[derive(Debug, Default)]
pub struct HtmlSink {
    html: String,
}

impl HtmlSink {
    pub fn new() -> Self {
        HtmlSink::default()
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl RenderSink for HtmlSink {
    fn status(&mut self, message: &str) {
        self.html
            .push_str(&format!("<p>{}</p>\n", encode_safe(message)));
    }

    fn card(&mut self, card: &CardDescriptor) {
        let title = encode_safe(&card.title);
        self.html.push_str(&format!(
            "<article class=\"recipe-card\" data-title=\"{}\">\n",
            title
        ));
        self.html.push_str(&format!(
            "  <img src=\"{}\" alt=\"{}\" loading=\"lazy\" />\n",
            encode_safe(&card.thumbnail_url),
            title
        ));
        self.html.push_str("  <div class=\"recipe-info\">\n");
        self.html.push_str(&format!("    <h3>{}</h3>\n", title));
        if let Some(category) = &card.category {
            self.html.push_str(&format!(
                "    <p><strong>Category:</strong> {}</p>\n",
                encode_safe(category)
            ));
        }
        if let Some(area) = &card.area {
            self.html.push_str(&format!(
                "    <p><strong>Area:</strong> {}</p>\n",
                encode_safe(area)
            ));
        }
        if let Some(link) = &card.link {
            self.html.push_str(&format!(
                "    <a class=\"action\" href=\"{}\" target=\"_blank\" rel=\"noopener\">View Recipe</a>\n",
                encode_safe(link)
            ));
        }
        if let Some(video) = &card.video_url {
            self.html.push_str(&format!(
                "    <a class=\"link-plain\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Watch Video</a>\n",
                encode_safe(video)
            ));
        }
        self.html.push_str("  </div>\n</article>\n");
    }
}
