//! Readable-text extraction for a single article page.
//!
//! The page is parsed with `scraper` and handed to an ordered chain of
//! [`ExtractionStrategy`] values. The first strategy that matches at least
//! one element wins; the text of its elements is joined with single spaces
//! and whitespace-normalized.
//!
//! | Order | Strategy | Selector |
//! |-------|----------|----------|
//! | 1 | `paragraphs` | `p` |
//! | 2 | `article_body_class` | `div.article-body__content` |
//! | 3 | `article_body_itemprop` | `div[itemprop="articleBody"]` |

use crate::error::ExtractionError;
use crate::models::ArticleSource;
use crate::scrapers::Fetcher;
use crate::utils::{collapse_whitespace, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

/// Extracted article text, or the reason there is none.
pub type ExtractionResult = Result<String, ExtractionError>;

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
static ARTICLE_BODY_CLASS: Lazy<Selector> = Lazy::new(|| selector("div.article-body__content"));
static ARTICLE_BODY_ITEMPROP: Lazy<Selector> =
    Lazy::new(|| selector(r#"div[itemprop="articleBody"]"#));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static article selectors are valid CSS")
}

/// One way of locating article content in a parsed page.
///
/// `locate` returns `None` when nothing matched, otherwise the text of
/// every matched element in document order.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionStrategy {
    pub name: &'static str,
    pub locate: fn(&Html) -> Option<Vec<String>>,
}

/// The fallback chain, tried in order.
pub const STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy {
        name: "paragraphs",
        locate: paragraphs,
    },
    ExtractionStrategy {
        name: "article_body_class",
        locate: article_body_class,
    },
    ExtractionStrategy {
        name: "article_body_itemprop",
        locate: article_body_itemprop,
    },
];

fn paragraphs(document: &Html) -> Option<Vec<String>> {
    select_texts(document, &PARAGRAPH)
}

fn article_body_class(document: &Html) -> Option<Vec<String>> {
    select_texts(document, &ARTICLE_BODY_CLASS)
}

fn article_body_itemprop(document: &Html) -> Option<Vec<String>> {
    select_texts(document, &ARTICLE_BODY_ITEMPROP)
}

fn select_texts(document: &Html, selector: &Selector) -> Option<Vec<String>> {
    let texts: Vec<String> = document.select(selector).map(element_text).collect();
    (!texts.is_empty()).then_some(texts)
}

/// All descendant text nodes, concatenated without separators.
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text located by the winning strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub strategy: &'static str,
    pub text: String,
}

/// Run the strategy chain over an HTML document.
///
/// Returns `None` only when no strategy matched any element. A strategy
/// whose elements hold no text still wins, and its text is empty.
pub fn extract_from_html(html: &str) -> Option<ExtractedText> {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!(count = document.errors.len(), "Recovered from HTML parse errors");
    }

    let (strategy, texts) = STRATEGIES
        .iter()
        .find_map(|s| (s.locate)(&document).map(|texts| (s.name, texts)))?;
    debug!(strategy, elements = texts.len(), "Strategy matched");

    let text = collapse_whitespace(&texts.join(" "));
    if text.is_empty() {
        debug!(strategy, "Matched elements contain no text");
    }
    Some(ExtractedText { strategy, text })
}

/// True when a `Content-Type` value can reasonably hold an HTML page.
fn is_markup(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence.is_empty()
        || essence.starts_with("text/")
        || essence.contains("html")
        || essence.contains("xml")
}

/// Fetch an article and extract its readable text.
///
/// Never panics and never retries. Transport and status failures become
/// [`ExtractionError::Network`], a body that is not markup becomes
/// [`ExtractionError::Parse`], and a page where no strategy matches any
/// element becomes [`ExtractionError::NotFound`]. Matched elements with no
/// text give `Ok("")`.
#[instrument(level = "info", skip_all, fields(url = %source))]
pub async fn extract<F: Fetcher>(fetcher: &F, source: &ArticleSource) -> ExtractionResult {
    let url = source.as_str().to_string();

    let page = match fetcher.fetch(&source.url).await {
        Ok(page) => page,
        Err(e) => return Err(ExtractionError::Network { url, source: e }),
    };

    if let Some(content_type) = page.content_type.as_deref() {
        if !is_markup(content_type) {
            warn!(content_type, "Response is not an HTML document");
            return Err(ExtractionError::Parse {
                url,
                reason: format!("unsupported content type '{content_type}'"),
            });
        }
    }

    match extract_from_html(&page.body) {
        Some(extracted) => {
            info!(
                strategy = extracted.strategy,
                bytes = extracted.text.len(),
                "Extracted article text"
            );
            debug!(preview = %truncate_for_log(&extracted.text, 200), "Article text");
            Ok(extracted.text)
        }
        None => {
            warn!(bytes = page.body.len(), "No extraction strategy located article content");
            Err(ExtractionError::NotFound { url })
        }
    }
}
