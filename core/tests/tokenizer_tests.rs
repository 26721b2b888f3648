use catalog_core::tokenizer::{english_stopwords, IdentityStemmer};
use catalog_core::{normalize, normalize_joined, NormalizerConfig};

fn identity(stopwords: &[&str]) -> NormalizerConfig {
    NormalizerConfig::new(stopwords.iter().map(|w| w.to_string()).collect(), Box::new(IdentityStemmer))
}

#[test]
fn empty_and_blank_input() {
    let config = NormalizerConfig::english();
    assert!(normalize("", &config).is_empty());
    assert!(normalize(" \t\n ", &config).is_empty());
    assert!(normalize("!!! ... --", &config).is_empty());
}

#[test]
fn it_strips_punctuation_and_filters_stopwords() {
    let terms = normalize("Hello, World! This is a test.", &identity(&["this", "is", "a"]));
    assert_eq!(terms, vec!["hello", "world", "test"]);
}

#[test]
fn it_stems_to_a_shared_root() {
    let terms = normalize("running runs run", &NormalizerConfig::english());
    assert_eq!(terms, vec!["run", "run", "run"]);
}

#[test]
fn it_keeps_order_and_duplicates() {
    let terms = normalize("Shoe sock SHOE", &identity(&[]));
    assert_eq!(terms, vec!["shoe", "sock", "shoe"]);
}

#[test]
fn joined_equals_space_concatenation() {
    let config = NormalizerConfig::english();
    assert_eq!(
        normalize_joined(&["Red Shoes", "Blue Socks"], &config),
        normalize("Red Shoes Blue Socks", &config)
    );
    assert!(normalize_joined::<&str>(&[], &config).is_empty());
}

#[test]
fn second_pass_is_a_no_op() {
    let config = identity(&["the", "and", "for", "with"]);
    for text in [
        "The quick, brown fox -- and the lazy dog!",
        "Cotton Blend (Pack of 3) for Men",
        "  Slim   Fit; with \"stretch\" denim.  ",
    ] {
        let once = normalize(text, &config);
        let twice = normalize(&once.join(" "), &config);
        assert_eq!(once, twice, "input: {text}");
    }
}

// Snowball stems are not themselves fixed points, so a second pass with the
// English stemmer can shorten them further.
#[test]
fn porter2_second_pass_may_restem() {
    let english = NormalizerConfig::english();
    let once = normalize("agreed universal meeting", &english);
    assert_eq!(once, vec!["agre", "univers", "meet"]);
    let twice = normalize(&once.join(" "), &english);
    assert_eq!(twice, vec!["agr", "univ", "meet"]);
}

#[test]
fn output_never_holds_noise() {
    let config = NormalizerConfig::english();
    let stopwords = english_stopwords();
    let text = "The BEST-selling, 100% cotton shirt!!! It's (really) soft -- isn't it? ... & more";
    let terms = normalize(text, &config);
    assert!(!terms.is_empty());
    for term in &terms {
        assert!(!term.is_empty());
        assert!(term.chars().all(char::is_alphanumeric), "{term}");
        assert!(!stopwords.contains(term), "{term}");
    }
}
