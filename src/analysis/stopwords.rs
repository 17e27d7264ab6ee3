//! Stopword tables for the supported languages.

use super::Language;
use std::collections::HashSet;
use std::sync::LazyLock;

const SPANISH: &[&str] = &[
    "a", "ante", "bajo", "cabe", "con", "contra", "de", "desde", "durante", "en", "entre",
    "hacia", "hasta", "mediante", "para", "por", "según", "sin", "so", "sobre", "tras",
    "versus", "vía", "el", "la", "los", "las", "un", "una", "unos", "unas", "y", "o", "pero",
    "si", "no", "ni", "que", "como", "cuando", "donde", "quien", "cual", "este", "esta",
    "estos", "estas", "ese", "esa", "esos", "esas", "aquel", "aquella", "aquellos",
    "aquellas", "su", "sus", "mi", "mis", "tu", "tus", "nuestro", "nuestra", "nuestros",
    "nuestras", "vuestro", "vuestra", "vuestros", "vuestras", "del", "al", "muy", "más",
    "menos", "tanto", "tan", "también", "tampoco", "ya", "aún", "todavía", "ser", "estar",
    "tener", "hacer", "decir", "poder", "ir", "ver", "dar", "saber", "querer", "llegar",
    "pasar", "deber", "poner", "parecer", "quedar", "creer", "hablar", "llevar", "dejar",
    "seguir", "encontrar", "llamar", "venir", "pensar", "salir", "volver", "tomar",
    "conocer", "vivir", "sentir",
];

const ENGLISH: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "were", "will", "with", "this",
    "but", "they", "have", "had", "what", "said", "each", "which", "she", "do", "how",
    "their", "if", "up", "out", "many", "then", "them", "these", "so", "some", "her",
    "would", "make", "like", "into", "him", "time", "two", "more", "go", "no", "way",
    "could", "my", "than", "first", "been", "call", "who", "oil", "sit", "now", "find",
    "down", "day", "did", "get", "come", "made", "may", "part",
];

static SPANISH_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SPANISH.iter().copied().collect());

static ENGLISH_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH.iter().copied().collect());

/// Spanish stopwords.
pub fn spanish() -> &'static HashSet<&'static str> {
    &SPANISH_SET
}

/// English stopwords.
pub fn english() -> &'static HashSet<&'static str> {
    &ENGLISH_SET
}

/// Stopwords used for scoring text in `language`.
///
/// Anything not detected as Spanish is scored with the English table.
pub fn for_language(language: Language) -> &'static HashSet<&'static str> {
    match language {
        Language::Es => spanish(),
        Language::En | Language::Unknown => english(),
    }
}
