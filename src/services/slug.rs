//! Slug derivation
//!
//! Converts a note title into a URL-friendly slug: Cyrillic characters are
//! transliterated to ASCII, everything is lowercased, and runs of
//! non-alphanumeric characters collapse into single hyphens.

/// Maximum slug length in characters
pub const MAX_SLUG_LEN: usize = 100;

/// Transliterate a single lowercase Cyrillic character to its ASCII form.
///
/// Returns `None` for characters outside the table; `Some("")` marks
/// letters that are dropped entirely (hard and soft signs).
fn translit(c: char) -> Option<&'static str> {
    let mapped = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "ju",
        'я' => "ja",
        _ => return None,
    };
    Some(mapped)
}

/// Derive a URL-friendly slug from a title.
///
/// Non-ASCII characters with no transliteration are treated as
/// separators, the same as punctuation and whitespace. The result is
/// lowercase, contains only `[a-z0-9-]`, has no leading, trailing or
/// doubled hyphens, and is capped at [`MAX_SLUG_LEN`] characters.
pub fn slugify(title: &str) -> String {
    let mut raw = String::new();

    for c in title.chars() {
        for lc in c.to_lowercase() {
            if let Some(t) = translit(lc) {
                raw.push_str(t);
            } else if lc.is_ascii_alphanumeric() {
                raw.push(lc);
            } else {
                raw.push('-');
            }
        }
    }

    // Collapse consecutive hyphens and trim them from both ends
    let mut result = String::new();
    let mut prev_hyphen = false;

    for c in raw.chars() {
        if c == '-' {
            if !prev_hyphen && !result.is_empty() {
                result.push(c);
                prev_hyphen = true;
            }
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    let capped: String = result.chars().take(MAX_SLUG_LEN).collect();
    capped.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_ascii_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_transliterates_cyrillic() {
        assert_eq!(slugify("Новый заголовок"), "novyj-zagolovok");
        assert_eq!(slugify("Заголовок"), "zagolovok");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_slugify_drops_signs() {
        assert_eq!(slugify("объявление"), "objavlenie");
        assert_eq!(slugify("день"), "den");
    }

    #[test]
    fn test_slugify_multi_char_letters() {
        assert_eq!(slugify("щука"), "shchuka");
        assert_eq!(slugify("журнал"), "zhurnal");
    }

    #[test]
    fn test_slugify_unmapped_unicode_becomes_separator() {
        assert_eq!(slugify("a→b"), "a-b");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_caps_length() {
        let long = "а".repeat(500);
        assert_eq!(slugify(&long).chars().count(), MAX_SLUG_LEN);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Slugs only ever contain lowercase ASCII alphanumerics and
        /// single interior hyphens, within the length cap.
        #[test]
        fn slug_alphabet_and_shape(title in "\\PC{0,80}") {
            let slug = slugify(&title);

            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
            prop_assert!(slug.chars().count() <= MAX_SLUG_LEN);
        }

        /// Slugification is deterministic and idempotent.
        #[test]
        fn slugify_is_idempotent(title in "\\PC{0,80}") {
            let once = slugify(&title);
            prop_assert_eq!(slugify(&once), once.clone());
            prop_assert_eq!(slugify(&title), once);
        }
    }
}
