//! The field extraction rules for a calculator page.
//!
//! Each rule is a plain function from the page anchors to a value. Rules
//! never see each other's results, so one layout change only costs the
//! fields whose selectors it breaks.

use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

use crate::extractor::model::Field;

pub const WRAPPER: &str = "div.calculator-wrapper";
pub const TAB_CONTENT: &str = "div.body-content > .container .tab-content";

const AVATAR: &str = "img.avatar";
const DISPLAY_NAME: &str = "h1.header-title a";
const LEVEL: &str = "ul.player-info span.friendPlayerLevel";
const LEVEL_FALLBACK: &str = "ul.player-info > li:first-child span.number";
const ACCOUNT_AGE: &str = "ul.player-info > li:nth-child(2) span.number";
const ACCOUNT_AGE_FALLBACK: &str = "ul.player-info > li:nth-child(3) span.number";
// The site labels these two the wrong way round: `number-price` holds the
// lowest price and `number-price-lowest` the regular one.
const NUMBER_PRICE: &str = "div.prices span.number-price";
const NUMBER_PRICE_LOWEST: &str = "div.prices span.number-price-lowest";
const GAMES: &str = "div.wrapper-info .row-stats .span6:first-child div.progress-desc strong.number";
const GAMES_PLAYED: &str =
    "div.wrapper-info .row-stats .span6:first-child div.progress-desc span.number";
const PRICE_AVERAGE: &str = "div.wrapper-info .row-stats .span3:first-child b";
const PRICE_HOUR: &str = "div.wrapper-info .row-stats .span3:nth-child(2) b";
const HOURS: &str = "div.wrapper-info .row-stats .span3:nth-child(3) b";
const HOURS_AVERAGE: &str = "div.wrapper-info .row-stats .span3:nth-child(4) b";
const VANITY_LABEL: &str =
    "#info > div:first-of-type .span6:first-child table tr:first-child .span2";
const VANITY_LINK: &str = "#info > div:first-of-type .span6:first-child table tr:first-child a";
const VANITY_LABEL_TEXT: &str = "Vanity URL";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector {
        selector: &'static str,
        reason: String,
    },

    #[error("anchor not found: {0}")]
    MissingAnchor(&'static str),

    #[error("no element matches {0}")]
    MissingNode(&'static str),

    #[error("{selector} has no {attribute} attribute")]
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
    },

    #[error("{0} has no text")]
    EmptyText(&'static str),

    #[error("{selector} has no child node at index {index}")]
    MissingChild { selector: &'static str, index: usize },

    #[error("expected label {expected:?}, found {found:?}")]
    LabelMismatch {
        expected: &'static str,
        found: String,
    },
}

/// The two containers every rule searches from.
#[derive(Debug, Clone, Copy)]
pub struct PageAnchors<'a> {
    wrapper: Option<ElementRef<'a>>,
    tab_content: Option<ElementRef<'a>>,
}

impl<'a> PageAnchors<'a> {
    pub fn locate(document: &'a Html) -> Self {
        Self {
            wrapper: find_in_document(document, WRAPPER),
            tab_content: find_in_document(document, TAB_CONTENT),
        }
    }

    pub fn has_wrapper(&self) -> bool {
        self.wrapper.is_some()
    }

    pub fn has_tab_content(&self) -> bool {
        self.tab_content.is_some()
    }

    fn wrapper(&self) -> Result<ElementRef<'a>, ExtractError> {
        self.wrapper.ok_or(ExtractError::MissingAnchor(WRAPPER))
    }

    fn tab_content(&self) -> Result<ElementRef<'a>, ExtractError> {
        self.tab_content.ok_or(ExtractError::MissingAnchor(TAB_CONTENT))
    }
}

type ExtractFn = fn(&PageAnchors<'_>) -> Result<String, ExtractError>;

pub struct Rule {
    pub field: Field,
    pub extract: ExtractFn,
}

pub const RULES: [Rule; 13] = [
    Rule { field: Field::Avatar, extract: avatar },
    Rule { field: Field::DisplayName, extract: display_name },
    Rule { field: Field::Level, extract: level },
    Rule { field: Field::AccountAge, extract: account_age },
    Rule { field: Field::PriceLowest, extract: price_lowest },
    Rule { field: Field::Price, extract: price },
    Rule { field: Field::Games, extract: games },
    Rule { field: Field::GamesPlayed, extract: games_played },
    Rule { field: Field::PriceAverage, extract: price_average },
    Rule { field: Field::PriceHour, extract: price_hour },
    Rule { field: Field::Hours, extract: hours },
    Rule { field: Field::HoursAverage, extract: hours_average },
    Rule { field: Field::VanityUrl, extract: vanity_url },
];

fn avatar(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    let img = select_first(anchors.wrapper()?, AVATAR)?;
    attr_of(img, AVATAR, "src")
}

fn display_name(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    first_text(anchors.wrapper()?, DISPLAY_NAME)
}

fn level(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    let wrapper = anchors.wrapper()?;
    first_text(wrapper, LEVEL).or_else(|_| first_text(wrapper, LEVEL_FALLBACK))
}

fn account_age(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    let wrapper = anchors.wrapper()?;
    first_text(wrapper, ACCOUNT_AGE).or_else(|_| first_text(wrapper, ACCOUNT_AGE_FALLBACK))
}

fn price_lowest(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    let span = select_first(anchors.wrapper()?, NUMBER_PRICE)?;
    child_text(span, NUMBER_PRICE, 1)
}

fn price(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    let span = select_first(anchors.wrapper()?, NUMBER_PRICE_LOWEST)?;
    child_text(span, NUMBER_PRICE_LOWEST, 1)
}

fn games(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    first_text(anchors.wrapper()?, GAMES)
}

fn games_played(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    first_text(anchors.wrapper()?, GAMES_PLAYED)
}

fn price_average(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    first_text(anchors.wrapper()?, PRICE_AVERAGE)
}

fn price_hour(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    first_text(anchors.wrapper()?, PRICE_HOUR)
}

fn hours(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    first_text(anchors.wrapper()?, HOURS)
}

fn hours_average(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    first_text(anchors.wrapper()?, HOURS_AVERAGE)
}

fn vanity_url(anchors: &PageAnchors<'_>) -> Result<String, ExtractError> {
    let tab_content = anchors.tab_content()?;
    let label = first_text(tab_content, VANITY_LABEL)?;
    if label != VANITY_LABEL_TEXT {
        return Err(ExtractError::LabelMismatch {
            expected: VANITY_LABEL_TEXT,
            found: label,
        });
    }
    let link = select_first(tab_content, VANITY_LINK)?;
    attr_of(link, VANITY_LINK, "href")
}

fn parse_selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::InvalidSelector {
        selector: css,
        reason: e.to_string(),
    })
}

fn find_in_document<'a>(document: &'a Html, css: &'static str) -> Option<ElementRef<'a>> {
    let selector = parse_selector(css).ok()?;
    document.select(&selector).next()
}

fn select_first<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<ElementRef<'a>, ExtractError> {
    let selector = parse_selector(css)?;
    scope
        .select(&selector)
        .next()
        .ok_or(ExtractError::MissingNode(css))
}

fn non_empty(text: &str, css: &'static str) -> Result<String, ExtractError> {
    let text = text.trim();
    if text.is_empty() {
        Err(ExtractError::EmptyText(css))
    } else {
        Ok(text.to_string())
    }
}

fn first_text(scope: ElementRef<'_>, css: &'static str) -> Result<String, ExtractError> {
    let element = select_first(scope, css)?;
    non_empty(&element.text().collect::<String>(), css)
}

fn attr_of(
    element: ElementRef<'_>,
    css: &'static str,
    attribute: &'static str,
) -> Result<String, ExtractError> {
    let value = element
        .value()
        .attr(attribute)
        .ok_or(ExtractError::MissingAttribute {
            selector: css,
            attribute,
        })?;
    non_empty(value, css)
}

/// Text of the `index`-th child node (text or element) of `element`.
fn child_text(element: ElementRef<'_>, css: &'static str, index: usize) -> Result<String, ExtractError> {
    let child = element
        .children()
        .nth(index)
        .ok_or(ExtractError::MissingChild {
            selector: css,
            index,
        })?;
    let text = match child.value() {
        Node::Text(text) => (**text).to_owned(),
        Node::Element(_) => ElementRef::wrap(child)
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default(),
        _ => String::new(),
    };
    non_empty(&text, css)
}
