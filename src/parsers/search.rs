use crate::parsers::html::clean_text;
use crate::results::SearchHit;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static RESULT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.result").expect("result selector is valid"));
static TITLE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.result__a").expect("title selector is valid"));
static SNIPPET: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".result__snippet").expect("snippet selector is valid"));

/// Parses a DuckDuckGo HTML results page into search hits, in page order.
///
/// Sponsored results are skipped, and at most `max_results` hits are returned.
pub fn parse_results(html: &str, max_results: usize) -> Vec<SearchHit> {
    let doc = Html::parse_document(html);

    let hits = doc
        .select(&RESULT)
        .filter(|result| !is_ad(result))
        .filter_map(parse_result)
        .take(max_results)
        .collect::<Vec<_>>();

    ::log::debug!("Search results page yielded {} hits", hits.len());
    hits
}

fn is_ad(result: &ElementRef) -> bool {
    result.value().classes().any(|class| class == "result--ad")
}

fn parse_result(result: ElementRef) -> Option<SearchHit> {
    let link = result.select(&TITLE_LINK).next()?;
    let href = resolve_href(link.value().attr("href")?);

    let title = clean_text(&link.text().collect::<String>());
    let body = result
        .select(&SNIPPET)
        .next()
        .map(|snippet| clean_text(&snippet.text().collect::<String>()));

    Some(SearchHit {
        title: (!title.is_empty()).then_some(title),
        href,
        body,
    })
}

/// Unwraps DuckDuckGo redirect links (`//duckduckgo.com/l/?uddg=<target>`).
///
/// Anything that is not a redirect link comes back unchanged.
pub fn resolve_href(raw: &str) -> String {
    let absolute = if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    };

    let Ok(url) = Url::parse(&absolute) else {
        return raw.to_string();
    };

    if url.path() == "/l/" {
        if let Some((_, target)) = url.query_pairs().find(|(key, _)| key == "uddg") {
            return target.into_owned();
        }
    }

    raw.to_string()
}
