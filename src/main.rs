use dishdive::render::{self, CardDescriptor, RenderSink};
use dishdive::{AppConfig, FileStore, Query, Resolver, Settings, SortOrder};
use dishdive::{DishDiveError, MealDbSource};
use std::env;

const USAGE: &str = "Usage: dishdive [OPTIONS] [QUERY...]

Search for recipes by name, with cuisine browsing as a fallback.

Options:
  --cuisine <name>   Filter/browse by cuisine (\"All\" means no filter)
  --sort <order>     relevance | az | za (default: relevance)
  --toggle-theme     Flip the persisted light/dark preference and exit
  -h, --help         Show this help";

/// Plain-text sink for terminal output.
#[derive(Default)]
struct TextSink;

impl RenderSink for TextSink {
    fn status(&mut self, message: &str) {
        println!("{}", message);
    }

    fn card(&mut self, card: &CardDescriptor) {
        let mut line = format!("- {}", card.title);
        match (&card.category, &card.area) {
            (Some(category), Some(area)) => line.push_str(&format!(" ({}, {})", category, area)),
            (Some(category), None) => line.push_str(&format!(" ({})", category)),
            (None, Some(area)) => line.push_str(&format!(" ({})", area)),
            (None, None) => {}
        }
        if let Some(link) = &card.link {
            line.push_str(&format!(" [{}]", link));
        }
        println!("{}", line);
    }
}

struct CliArgs {
    text: String,
    cuisine: Option<String>,
    sort: SortOrder,
    toggle_theme: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs, DishDiveError> {
    let mut text_parts: Vec<&str> = Vec::new();
    let mut cuisine = None;
    let mut sort = SortOrder::Relevance;
    let mut toggle_theme = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--cuisine" => {
                let value = iter.next().ok_or_else(|| {
                    DishDiveError::InvalidArgument("--cuisine requires a value".to_string())
                })?;
                cuisine = Some(value.clone());
            }
            "--sort" => {
                let value = iter.next().ok_or_else(|| {
                    DishDiveError::InvalidArgument("--sort requires a value".to_string())
                })?;
                sort = SortOrder::parse(value).ok_or_else(|| {
                    DishDiveError::InvalidArgument(format!(
                        "Unknown sort order '{}' (expected relevance, az or za)",
                        value
                    ))
                })?;
            }
            "--toggle-theme" => toggle_theme = true,
            other => text_parts.push(other),
        }
    }

    Ok(CliArgs {
        text: text_parts.join(" "),
        cuisine,
        sort,
        toggle_theme,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let raw: Vec<String> = env::args().skip(1).collect();
    if raw.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }
    let args = parse_args(&raw)?;

    let mut store = FileStore::new(".dishdive");
    let mut settings = Settings::load(&store);

    if args.toggle_theme {
        let theme = settings.toggle_theme(&mut store)?;
        println!("Theme set to {}", theme.as_str());
        return Ok(());
    }

    let config = AppConfig::load()?;
    let query = Query::new(args.text, args.cuisine.as_deref(), args.sort);

    let source = MealDbSource::new(&config)?;
    let resolver = Resolver::new(Box::new(source), config.default_cuisine.clone());
    let mut result = resolver.resolve(&query).await;

    // Display order is the caller's concern, not the pipeline's.
    render::sort_records(&mut result.records, query.sort);

    let mut sink = TextSink;
    render::render(&result, &mut sink);

    Ok(())
}
