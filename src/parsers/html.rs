use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// Elements whose text never counts as page content
pub const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer"];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Extracts readable text from a rendered HTML document.
///
/// Text inside [`STRIPPED_TAGS`] is dropped, the remaining text nodes are
/// concatenated as they appear and every whitespace run collapses to a
/// single space. Inline markup such as `<b>Pay</b>ments` stays one word.
pub fn extract_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let fragments = doc
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_text().map(|text| (node, text)))
        .filter(|(node, _)| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| STRIPPED_TAGS.contains(&el.name()))
            })
        })
        .map(|(_, text)| &**text)
        .collect::<Vec<_>>();

    ::log::trace!("HTML text extraction kept {} text nodes", fragments.len());

    clean_text(&fragments.concat())
}

/// Collapses whitespace runs to single spaces and trims the ends
pub fn clean_text(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}
