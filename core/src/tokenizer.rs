use crate::error::NormalizeError;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use rust_stemmers::Stemmer;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

pub use rust_stemmers::Algorithm;

lazy_static! {
    static ref ENGLISH_STOPWORDS: HashSet<&'static str> = {
        // NLTK english list.
        let words: &[&str] = &[
            "a","about","above","after","again","against","ain","all","am","an","and","any","are","aren","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","couldn","couldn't",
            "d","did","didn","didn't","do","does","doesn","doesn't","doing","don","don't","down","during",
            "each","few","for","from","further",
            "had","hadn","hadn't","has","hasn","hasn't","have","haven","haven't","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","isn","isn't","it","it's","its","itself",
            "just","ll","m","ma","me","mightn","mightn't","more","most","mustn","mustn't","my","myself",
            "needn","needn't","no","nor","not","now",
            "o","of","off","on","once","only","or","other","our","ours","ourselves","out","over","own",
            "re","s","same","shan","shan't","she","she's","should","should've","shouldn","shouldn't","so","some","such",
            "t","than","that","that'll","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","ve","very",
            "was","wasn","wasn't","we","were","weren","weren't","what","when","where","which","while","who","whom","why","will","with","won","won't","wouldn","wouldn't",
            "y","you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };

    static ref GLOBAL: RwLock<Option<Arc<NormalizerConfig>>> = RwLock::new(None);
}

/// Reduces a word to its root form.
pub trait Stem: Send + Sync {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

/// Snowball stemmer backed by `rust-stemmers` (Porter2 for English).
pub struct SnowballStemmer {
    inner: Stemmer,
}

impl SnowballStemmer {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { inner: Stemmer::create(algorithm) }
    }
}

impl Stem for SnowballStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.inner.stem(word)
    }
}

/// Leaves every word untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStemmer;

impl Stem for IdentityStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(word)
    }
}

/// Stopwords, stemmer and folding options used by [`normalize`].
///
/// Built once at startup and shared read-only afterwards, either by passing a
/// reference around or through [`init_global`].
pub struct NormalizerConfig {
    stopwords: HashSet<String>,
    stemmer: Box<dyn Stem>,
    unicode_nfkc: bool,
}

impl NormalizerConfig {
    pub fn new(stopwords: HashSet<String>, stemmer: Box<dyn Stem>) -> Self {
        Self { stopwords, stemmer, unicode_nfkc: false }
    }

    /// English stopwords with the Porter2 stemmer.
    pub fn english() -> Self {
        Self::new(english_stopwords(), Box::new(SnowballStemmer::new(Algorithm::English)))
    }

    /// Apply NFKC compatibility folding before lowercasing.
    pub fn with_nfkc(mut self, enabled: bool) -> Self {
        self.unicode_nfkc = enabled;
        self
    }

    pub fn is_stopword(&self, token: &str) -> bool { self.stopwords.contains(token) }

    pub fn stopwords(&self) -> &HashSet<String> { &self.stopwords }

    pub fn unicode_nfkc(&self) -> bool { self.unicode_nfkc }
}

impl fmt::Debug for NormalizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizerConfig")
            .field("stopwords", &self.stopwords.len())
            .field("unicode_nfkc", &self.unicode_nfkc)
            .finish_non_exhaustive()
    }
}

pub fn english_stopwords() -> HashSet<String> {
    ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

/// Parse a stopword list: one word per line, `#` starts a comment line.
pub fn parse_stopwords(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

pub fn load_stopwords(path: &Path) -> Result<HashSet<String>, NormalizeError> {
    let text = fs::read_to_string(path).map_err(|source| NormalizeError::Stopwords {
        path: path.to_path_buf(),
        source,
    })?;
    let words = parse_stopwords(&text);
    tracing::debug!(path = %path.display(), count = words.len(), "loaded stopwords");
    Ok(words)
}

/// Install the process-wide configuration. The first call wins; later calls
/// return the configuration that is already installed.
pub fn init_global(config: NormalizerConfig) -> Arc<NormalizerConfig> {
    if let Some(existing) = GLOBAL.read().clone() {
        return existing;
    }
    let mut slot = GLOBAL.write();
    match slot.as_ref() {
        Some(existing) => Arc::clone(existing),
        None => {
            let config = Arc::new(config);
            *slot = Some(Arc::clone(&config));
            tracing::debug!(?config, "installed global normalizer config");
            config
        }
    }
}

pub fn global() -> Result<Arc<NormalizerConfig>, NormalizeError> {
    GLOBAL.read().clone().ok_or(NormalizeError::NotInitialized)
}

/// [`normalize`] using the configuration installed by [`init_global`].
pub fn normalize_global(text: &str) -> Result<Vec<String>, NormalizeError> {
    let config = global()?;
    Ok(normalize(text, &config))
}

/// Turn text into stemmed terms: lowercase, split on whitespace, strip edge
/// punctuation, keep alphanumeric non-stopwords, stem.
///
/// "Alphanumeric" is the Unicode rule of [`char::is_alphanumeric`], so
/// `café` and `日本` are kept while `t-shirt` is dropped.
pub fn normalize(text: &str, config: &NormalizerConfig) -> Vec<String> {
    let folded = if config.unicode_nfkc {
        text.nfkc().collect::<String>().to_lowercase()
    } else {
        text.to_lowercase()
    };

    let mut terms = Vec::new();
    for raw in folded.split_whitespace() {
        let token = strip_punctuation(raw);
        if !is_term(token) || config.is_stopword(token) {
            continue;
        }
        let stem = config.stemmer.stem(token);
        // A stem may itself land on a stopword ("wills" -> "will").
        if stem.is_empty() || config.is_stopword(&stem) {
            continue;
        }
        terms.push(stem.into_owned());
    }
    terms
}

/// Normalize several texts as one, joined by single spaces.
pub fn normalize_joined<S: AsRef<str>>(texts: &[S], config: &NormalizerConfig) -> Vec<String> {
    let joined = texts.iter().map(|t| t.as_ref()).collect::<Vec<&str>>().join(" ");
    normalize(&joined, config)
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| c.is_ascii_punctuation())
}

fn is_term(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}
