//! Synthetic domain generation.
//!
//! Produces random but syntactically valid domains for tests, fixtures and
//! fuzzing. Each example is one to three labels followed by a TLD drawn from
//! a built-in table; nothing here touches the network.
//!
//! Labels are assembled slot by slot: the first and last characters come
//! from `[a-z0-9]`, inner characters may also be a hyphen, but never two
//! hyphens in a row.

use rand::Rng;

/// Single-label TLDs used for synthetic domains.
const BUILTIN_TLDS: &[&str] = &[
    // Classic gTLDs
    "com", "net", "org", "info", "biz",
    // Popular new gTLDs
    "io", "ai", "app", "dev", "tech", "xyz", "cloud", "online", "site", "shop", "blog",
    // Country codes
    "us", "uk", "de", "fr", "ca", "au", "br", "in", "nl", "me", "co",
];

const MAX_LABELS: usize = 3;
const MAX_GENERATED_LABEL_LEN: usize = 12;

/// The TLDs `domain_examples` draws from, in table order.
///
/// # Examples
///
/// ```rust
/// use domain_kit::builtin_tlds;
///
/// assert!(builtin_tlds().contains(&"com"));
/// ```
pub fn builtin_tlds() -> &'static [&'static str] {
    BUILTIN_TLDS
}

/// Characters allowed at the edges of a label.
fn edge_chars() -> Vec<char> {
    let mut chars: Vec<char> = ('a'..='z').collect();
    chars.extend('0'..='9');
    chars
}

/// Characters allowed inside a label.
fn inner_chars() -> Vec<char> {
    let mut chars = edge_chars();
    chars.push('-');
    chars
}

fn random_label<R: Rng + ?Sized>(rng: &mut R, edge: &[char], inner: &[char]) -> String {
    let len = rng.gen_range(1..=MAX_GENERATED_LABEL_LEN);
    let mut label = String::with_capacity(len);

    for pos in 0..len {
        let at_edge = pos == 0 || pos == len - 1;
        let after_hyphen = label.ends_with('-');
        let pool = if at_edge || after_hyphen { edge } else { inner };
        label.push(pool[rng.gen_range(0..pool.len())]);
    }

    label
}

/// Generate `n` example domains using the thread-local RNG.
///
/// Duplicates are possible.
///
/// # Examples
///
/// ```rust
/// use domain_kit::{domain_examples, is_domain};
///
/// let examples = domain_examples(5);
/// assert_eq!(examples.len(), 5);
/// assert!(examples.iter().all(|d| is_domain(d)));
/// ```
pub fn domain_examples(n: usize) -> Vec<String> {
    domain_examples_with_rng(n, &mut rand::thread_rng())
}

/// Generate `n` example domains from a caller-supplied RNG.
///
/// Seeding the RNG makes the output reproducible.
pub fn domain_examples_with_rng<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<String> {
    let edge = edge_chars();
    let inner = inner_chars();

    (0..n)
        .map(|_| {
            let label_count = rng.gen_range(1..=MAX_LABELS);
            let mut labels: Vec<String> = (0..label_count)
                .map(|_| random_label(rng, &edge, &inner))
                .collect();
            labels.push(BUILTIN_TLDS[rng.gen_range(0..BUILTIN_TLDS.len())].to_string());
            labels.join(".")
        })
        .collect()
}
