pub mod model;
pub mod rules;

#[cfg(test)]
mod tests;

pub use model::{Field, ProfileRecord};
pub use rules::{ExtractError, PageAnchors};

use scraper::Html;
use tracing::{debug, warn};

use crate::extractor::rules::RULES;

/// Parses a calculator page once and runs every extraction rule against it.
///
/// Fields whose rule fails are left untouched on `record`; the failure is
/// logged and the remaining rules still run. Returns how many fields were set.
pub fn extract_profile(html: &str, record: &mut ProfileRecord) -> usize {
    let document = Html::parse_document(html);
    let anchors = PageAnchors::locate(&document);

    if !anchors.has_wrapper() {
        warn!("calculator wrapper not found, page layout may have changed");
    }

    let mut extracted = 0;
    for rule in &RULES {
        match (rule.extract)(&anchors) {
            Ok(value) => {
                debug!(field = %rule.field, value = %value, "field extracted");
                record.set(rule.field, value);
                extracted += 1;
            }
            Err(err @ ExtractError::InvalidSelector { .. }) => {
                warn!(field = %rule.field, error = %err, "extraction rule is broken");
            }
            Err(err) => {
                debug!(field = %rule.field, error = %err, "field not extracted");
            }
        }
    }

    extracted
}
