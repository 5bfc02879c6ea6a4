pub use bip39::Language;

/// Words per BIP-39 dictionary.
pub const WORD_COUNT: usize = 2048;

/// Characters never accepted while typing a seed word.
const FORBIDDEN: &[char] = &[';', ',', '.', ':', '"', '\''];

/// Dictionary for `language`, in BIP-39 order.
pub fn word_list(language: Language) -> &'static [&'static str; WORD_COUNT] {
    language.word_list()
}

/// State of a seed-entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedEntryState {
    Invalid,
    Incomplete,
    Valid,
}

/// Character policy for seed-word input fields.
///
/// Only rejects forbidden characters. The dictionary is not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedEntryValidator;

impl SeedEntryValidator {
    pub fn validate(&self, input: &str) -> SeedEntryState {
        if input.chars().any(|c| c.is_whitespace() || FORBIDDEN.contains(&c)) {
            SeedEntryState::Invalid
        } else if input.is_empty() {
            SeedEntryState::Incomplete
        } else {
            SeedEntryState::Valid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list_has_2048_words() {
        let words = word_list(Language::English);
        assert_eq!(words.len(), WORD_COUNT);
        assert_eq!(words[0], "abandon");
        assert_eq!(words[WORD_COUNT - 1], "zoo");
    }

    #[test]
    fn seed_entry_states() {
        let validator = SeedEntryValidator;
        assert_eq!(validator.validate(""), SeedEntryState::Incomplete);
        assert_eq!(validator.validate("abandon"), SeedEntryState::Valid);
        assert_eq!(validator.validate("aban;don"), SeedEntryState::Invalid);
        assert_eq!(validator.validate("two words"), SeedEntryState::Invalid);
    }

    #[test]
    fn seed_entry_does_not_check_the_dictionary() {
        assert_eq!(SeedEntryValidator.validate("xyz"), SeedEntryState::Valid);
        assert_eq!(SeedEntryValidator.validate("Abandon1"), SeedEntryState::Valid);
    }
}
