#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn fragment_links_resolve_to_selector() {
    assert_eq!(target_selector("#features"), Some("#features"));
}

#[test]
fn bare_hash_and_hashbang_are_ignored() {
    assert_eq!(target_selector("#"), None);
    assert_eq!(target_selector("#!"), None);
}

#[test]
fn non_fragment_links_are_ignored() {
    assert_eq!(target_selector("/about#team"), None);
    assert_eq!(target_selector(""), None);
}

#[test]
fn scroll_top_clears_fixed_nav() {
    assert_eq!(scroll_top_for(1200.0, 80.0), 1120.0);
    assert_eq!(scroll_top_for(20.0, 80.0), -60.0);
}
