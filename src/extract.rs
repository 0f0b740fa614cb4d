use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// The fields clipped from a page. Missing pieces degrade to empty strings;
/// a record only exists at all when extraction found usable structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub headline: String,
    pub paragraph: String,
    pub image_url: String,
}

/// Which lookup strategy to run against the document.
///
/// Wikipedia articles share a fixed DOM shape and need no caller input.
/// Any other page must supply the CSS classes of its content and image
/// containers; without both there is nothing reliable to anchor on.
#[derive(Debug, Clone)]
pub enum ExtractionConfig {
    Wikipedia,
    Generic {
        content_class: String,
        image_class: String,
    },
}

/// Extract headline, lead paragraph and a representative image URL.
///
/// Returns `None` when the page's structure (or the configuration needed to
/// find it) is absent. The Wikipedia path never returns `None`: its anchors
/// are hard-coded, so even a degenerate document yields a record with empty
/// fields.
pub fn extract(html: &str, config: &ExtractionConfig) -> Option<ExtractedRecord> {
    let document = Html::parse_document(html);

    match config {
        ExtractionConfig::Wikipedia => Some(extract_wikipedia(&document)),
        ExtractionConfig::Generic {
            content_class,
            image_class,
        } => extract_generic(&document, content_class, image_class),
    }
}

fn extract_wikipedia(document: &Html) -> ExtractedRecord {
    let content_sel = Selector::parse("div#bodyContent").unwrap();
    let p_sel = Selector::parse("p").unwrap();

    // The infobox table on the right precedes the lead paragraph in document
    // order and can itself contain <p> tags. The lead paragraph is the first
    // <p> that is not nested in any table.
    let paragraph = document
        .select(&content_sel)
        .next()
        .and_then(|container| {
            container
                .select(&p_sel)
                .find(|p| !inside_table(p))
                .map(element_text)
        })
        .unwrap_or_default();

    let infobox_sel = Selector::parse("table.infobox").unwrap();
    let image_url = document
        .select(&infobox_sel)
        .next()
        .and_then(|infobox| first_image_url(&infobox))
        .unwrap_or_default();

    ExtractedRecord {
        headline: headline(document),
        paragraph,
        image_url,
    }
}

fn extract_generic(
    document: &Html,
    content_class: &str,
    image_class: &str,
) -> Option<ExtractedRecord> {
    // Both container classes are required before any DOM work; a page
    // without known structure is rejected here, not half-extracted.
    if content_class.is_empty() || image_class.is_empty() {
        return None;
    }

    let content_sel = class_selector(content_class)?;
    let container = document.select(&content_sel).next()?;

    let p_sel = Selector::parse("p").unwrap();
    let paragraph = container
        .select(&p_sel)
        .next()
        .map(element_text)
        .unwrap_or_default();

    // A missing image container only empties the image field; headline and
    // paragraph may still be worth keeping.
    let image_url = class_selector(image_class)
        .and_then(|sel| document.select(&sel).next())
        .and_then(|c| first_image_url(&c))
        .unwrap_or_default();

    Some(ExtractedRecord {
        headline: headline(document),
        paragraph,
        image_url,
    })
}

fn headline(document: &Html) -> String {
    let h1_sel = Selector::parse("body h1").unwrap();
    document
        .select(&h1_sel)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn class_selector(class: &str) -> Option<Selector> {
    Selector::parse(&format!("div.{}", class)).ok()
}

fn first_image_url(container: &ElementRef) -> Option<String> {
    let img_sel = Selector::parse("img").unwrap();
    container
        .select(&img_sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
}

fn inside_table(el: &ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "table")
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Tests ──
