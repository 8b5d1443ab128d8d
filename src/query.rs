//! Raw query-string parsing and validation for the two endpoints.

use crate::cms::ContentRoot;
use crate::error::SiteError;

/// Split a raw query string into key/value pairs. Items without a `=` are
/// dropped; values keep any further `=` intact. Duplicate keys are preserved
/// in order so callers can apply first-match-wins rules.
pub fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter_map(|item| item.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

/// Validated parameters of the tree endpoint: `(base, lang)`.
///
/// `lang` is required and must name a direct child of the navigation root;
/// the membership test runs on the raw value, and the first matching pair
/// wins, so repeated `lang` parameters act as fallbacks. `base` is the first
/// `base` pair if any, defaulting to empty.
pub fn validated_tree_params(
    raw: &str,
    root: &dyn ContentRoot,
) -> Result<(String, String), SiteError> {
    let pairs = parse_pairs(raw);
    let lang = validated_lang(&pairs, root)?;
    let base = match first_value(&pairs, "base") {
        Some(value) => unquote(&value)?.trim_matches('/').to_string(),
        None => String::new(),
    };
    Ok((base, lang))
}

/// Validated parameters of the single-item endpoint: `(path, lang)`.
/// Both are required; `path` must be non-empty after slash-stripping.
pub fn validated_single_params(
    raw: &str,
    root: &dyn ContentRoot,
) -> Result<(String, String), SiteError> {
    let pairs = parse_pairs(raw);
    let lang = validated_lang(&pairs, root)?;
    let path = match first_value(&pairs, "path") {
        Some(value) => unquote(&value)?.trim_matches('/').to_string(),
        None => String::new(),
    };
    if path.is_empty() {
        return Err(SiteError::MissingParam("path"));
    }
    Ok((path, lang))
}

fn validated_lang(
    pairs: &[(String, String)],
    root: &dyn ContentRoot,
) -> Result<String, SiteError> {
    let lang = pairs
        .iter()
        .find(|(key, value)| key == "lang" && root.contains(value))
        .map(|(_, value)| value.clone());
    let lang = match lang {
        Some(value) => unquote(&value)?.trim_matches('/').to_string(),
        None => String::new(),
    };
    if lang.is_empty() {
        return Err(SiteError::MissingParam("lang"));
    }
    Ok(lang)
}

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, value)| value.clone())
}

fn unquote(value: &str) -> Result<String, SiteError> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| SiteError::BadParam(format!("{value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentItem, PortalUrls};
    use async_trait::async_trait;

    struct FixedRoot {
        langs: Vec<&'static str>,
    }

    #[async_trait]
    impl ContentRoot for FixedRoot {
        fn physical_path(&self) -> String {
            "/site".to_string()
        }
        fn portal_urls(&self) -> PortalUrls {
            PortalUrls::default()
        }
        fn contains(&self, name: &str) -> bool {
            self.langs.iter().any(|lang| *lang == name)
        }
        async fn traverse(&self, path: &str) -> Result<ContentItem, SiteError> {
            Err(SiteError::NotFound(path.to_string()))
        }
        async fn traverse_view(&self, path: &str) -> Result<String, SiteError> {
            Err(SiteError::NotFound(path.to_string()))
        }
        async fn default_page(
            &self,
            _item: &ContentItem,
        ) -> Result<Option<ContentItem>, SiteError> {
            Ok(None)
        }
    }

    fn root() -> FixedRoot {
        FixedRoot {
            langs: vec!["de", "en"],
        }
    }

    #[test]
    fn splits_pairs_and_drops_bare_items() {
        let pairs = parse_pairs("lang=de&flag&base=a=b");
        assert_eq!(
            pairs,
            vec![
                ("lang".to_string(), "de".to_string()),
                ("base".to_string(), "a=b".to_string()),
            ]
        );
    }

    #[test]
    fn missing_lang_is_rejected() {
        let err = validated_tree_params("base=info", &root()).unwrap_err();
        assert!(matches!(err, SiteError::MissingParam("lang")));
    }

    #[test]
    fn unknown_lang_is_rejected() {
        let err = validated_tree_params("lang=fr", &root()).unwrap_err();
        assert!(matches!(err, SiteError::MissingParam("lang")));
    }

    #[test]
    fn first_known_lang_wins() {
        let (base, lang) = validated_tree_params("lang=fr&lang=en&lang=de", &root()).unwrap();
        assert_eq!(lang, "en");
        assert_eq!(base, "");
    }

    #[test]
    fn base_is_unquoted_and_stripped() {
        let (base, lang) =
            validated_tree_params("lang=de&base=%2Fabout%2Fteam%2F", &root()).unwrap();
        assert_eq!(lang, "de");
        assert_eq!(base, "about/team");
    }

    #[test]
    fn single_requires_nonempty_path() {
        let err = validated_single_params("lang=de&path=%2F", &root()).unwrap_err();
        assert!(matches!(err, SiteError::MissingParam("path")));

        let (path, lang) = validated_single_params("lang=de&path=about/team", &root()).unwrap();
        assert_eq!(lang, "de");
        assert_eq!(path, "about/team");
    }
}
