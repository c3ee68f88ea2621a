// French function words excluded from the ranking vocabulary

use std::collections::HashSet;

/// Stopwords applied after tokenization. Single-letter elisions are listed
/// for completeness even though the tokenizer never emits one-character terms.
pub const FRENCH_STOPWORDS: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et", "eux", "il",
    "ils", "je", "la", "le", "les", "leur", "lui", "ma", "mais", "me", "même", "mes", "moi", "mon",
    "ne", "nos", "notre", "nous", "on", "ou", "par", "pas", "pour", "qu", "que", "qui", "sa", "se",
    "ses", "son", "sur", "ta", "te", "tes", "toi", "ton", "tu", "un", "une", "vos", "votre",
    "vous", "c", "d", "j", "l", "à", "m", "n", "s", "t", "y", "été", "étée", "étées", "étés",
    "étant", "étante", "étants", "étantes", "suis", "es", "est", "sommes", "êtes", "sont", "serai",
    "seras", "sera", "serons", "serez", "seront", "aurais", "aura", "aurons", "aurez", "auront",
    "avais", "avait", "avions", "aviez", "avaient", "eut", "eûmes", "eûtes", "eurent", "ai", "as",
    "avons", "avez", "ont", "aurai", "auras", "fus", "fut", "fûmes", "fûtes", "furent",
];

/// Stopword lookup set
pub fn french_stopwords() -> HashSet<String> {
    FRENCH_STOPWORDS.iter().map(|w| w.to_string()).collect()
}
