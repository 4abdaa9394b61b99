use std::fs;

use crate::extractor::{Field, ProfileRecord, extract_profile};

const STEAM_ID: &str = "76561198287455504";

fn fixture() -> String {
    fs::read_to_string("src/extractor/tests/fixtures/calculator.html")
        .expect("Failed to read test fixture")
}

fn blank_record() -> ProfileRecord {
    ProfileRecord::new(
        STEAM_ID,
        format!("http://steamcommunity.com/profiles/{STEAM_ID}"),
        format!("https://steamdb.info/calculator/{STEAM_ID}/?cc=us"),
    )
}

fn extract(html: &str) -> ProfileRecord {
    let mut record = blank_record();
    extract_profile(html, &mut record);
    record
}

/// Wraps a `ul.player-info` body in the minimal calculator markup.
fn player_info_page(items: &str) -> String {
    format!(
        r#"<html><body><div class="calculator-wrapper"><ul class="player-info">{items}</ul></div></body></html>"#
    )
}

#[test]
fn test_extract_full_profile() {
    let mut record = blank_record();
    let extracted = extract_profile(&fixture(), &mut record);

    assert_eq!(extracted, Field::ALL.len());
    assert_eq!(
        record.avatar.as_deref(),
        Some("https://avatars.akamai.steamstatic.com/3f6a8c2d_full.jpg")
    );
    assert_eq!(record.display_name.as_deref(), Some("Lucas Cabral"));
    assert_eq!(record.level.as_deref(), Some("42"));
    assert_eq!(record.account_age.as_deref(), Some("6 years ago"));
    assert_eq!(record.games.as_deref(), Some("312"));
    assert_eq!(record.games_played.as_deref(), Some("187"));
    assert_eq!(record.price_average.as_deref(), Some("$7.75"));
    assert_eq!(record.price_hour.as_deref(), Some("$0.68"));
    assert_eq!(record.hours.as_deref(), Some("3,562h"));
    assert_eq!(record.hours_average.as_deref(), Some("19h"));
    assert_eq!(
        record.vanity_url.as_deref(),
        Some("https://steamcommunity.com/id/lucascabral")
    );

    // Identity fields are untouched by extraction
    assert_eq!(record.steam_id, STEAM_ID);
    assert_eq!(
        record.url_steam,
        "http://steamcommunity.com/profiles/76561198287455504"
    );
}

#[test]
fn test_price_classes_stay_swapped() {
    let record = extract(&fixture());

    // `number-price` feeds price_lowest and `number-price-lowest` feeds price
    assert_eq!(record.price_lowest.as_deref(), Some("$1,021.35"));
    assert_eq!(record.price.as_deref(), Some("$2,417.90"));
}

#[test]
fn test_missing_node_only_clears_its_field() {
    let html = fixture().replace(
        r#"<img class="avatar" src="https://avatars.akamai.steamstatic.com/3f6a8c2d_full.jpg" alt="">"#,
        "",
    );
    let record = extract(&html);

    assert!(record.avatar.is_none());
    assert_eq!(record.populated(), Field::ALL.len() - 1);
    assert_eq!(record.display_name.as_deref(), Some("Lucas Cabral"));
}

#[test]
fn test_missing_attribute_only_clears_its_field() {
    let html = fixture().replace(
        r#"src="https://avatars.akamai.steamstatic.com/3f6a8c2d_full.jpg""#,
        "",
    );
    let record = extract(&html);

    assert!(record.avatar.is_none());
    assert_eq!(record.populated(), Field::ALL.len() - 1);
}

#[test]
fn test_price_without_second_node_is_absent() {
    let html = fixture().replace(
        r#"<span class="number-price"><span class="price-label">Lowest</span>$1,021.35</span>"#,
        r#"<span class="number-price">$1,021.35</span>"#,
    );
    let record = extract(&html);

    assert!(record.price_lowest.is_none());
    assert_eq!(record.price.as_deref(), Some("$2,417.90"));
}

#[test]
fn test_level_falls_back_to_first_item_number() {
    let html = player_info_page(
        r#"<li><span class="friendPlayerLevel"></span><span class="number">17</span></li>
           <li>Created <span class="number">3 years ago</span></li>"#,
    );
    let record = extract(&html);

    assert_eq!(record.level.as_deref(), Some("17"));
    assert_eq!(record.account_age.as_deref(), Some("3 years ago"));
}

#[test]
fn test_level_prefers_friend_player_level() {
    let html = player_info_page(
        r#"<li><span class="friendPlayerLevel"><span>8</span></span><span class="number">99</span></li>"#,
    );
    let record = extract(&html);

    assert_eq!(record.level.as_deref(), Some("8"));
}

#[test]
fn test_account_age_falls_back_to_third_item() {
    let html = player_info_page(
        r#"<li><span class="friendPlayerLevel">5</span></li>
           <li>Private profile</li>
           <li>Created <span class="number">11 years ago</span></li>"#,
    );
    let record = extract(&html);

    assert_eq!(record.level.as_deref(), Some("5"));
    assert_eq!(record.account_age.as_deref(), Some("11 years ago"));
}

#[test]
fn test_vanity_url_requires_label() {
    let html = fixture().replace(
        r#"<td class="span2">Vanity URL</td>"#,
        r#"<td class="span2">Custom URL</td>"#,
    );
    let record = extract(&html);

    assert!(record.vanity_url.is_none());
    assert_eq!(record.populated(), Field::ALL.len() - 1);
}

#[test]
fn test_vanity_url_without_tab_content() {
    let html = fixture().replace(r#"class="body-content""#, r#"class="footer""#);
    let record = extract(&html);

    assert!(record.vanity_url.is_none());
    assert_eq!(record.games.as_deref(), Some("312"));
}

#[test]
fn test_vanity_url_survives_missing_wrapper() {
    let html = fixture().replace(r#"class="calculator-wrapper""#, r#"class="other""#);
    let mut record = blank_record();
    let extracted = extract_profile(&html, &mut record);

    // Only the tab-content anchored rule can still succeed
    assert_eq!(extracted, 1);
    assert!(record.vanity_url.is_some());
    assert!(record.display_name.is_none());
}

#[test]
fn test_unrelated_page_extracts_nothing() {
    let mut record = blank_record();
    let extracted = extract_profile(
        "<html><head><title>Just a moment...</title></head><body>Checking your browser</body></html>",
        &mut record,
    );

    assert_eq!(extracted, 0);
    assert_eq!(record, blank_record());
}

#[test]
fn test_malformed_html() {
    let html = r#"<div class="calculator-wrapper"><h1 class="header-title"><a>Unclosed <b>name"#;
    let record = extract(html);

    assert_eq!(record.display_name.as_deref(), Some("Unclosed name"));
    assert!(record.level.is_none());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let mut record = blank_record();
            let extracted = extract_profile(&html, &mut record);
            prop_assert_eq!(extracted, record.populated());
            prop_assert_eq!(record.steam_id.as_str(), STEAM_ID);
        }

        #[test]
        fn test_extracted_values_are_trimmed(name in "[ \t\n]{0,3}[A-Za-z0-9]{1,12}[ \t\n]{0,3}") {
            let html = format!(
                r#"<div class="calculator-wrapper"><h1 class="header-title"><a>{name}</a></h1></div>"#
            );
            let record = extract(&html);
            prop_assert_eq!(record.display_name.as_deref(), Some(name.trim()));
        }
    }
}
