//! Shared helpers for turning parser events into output.

use pulldown_cmark::{HeadingLevel, Options};

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Parser options for the given GitHub Flavored Markdown setting.
///
/// GFM enables tables, strikethrough and task lists. Renderer and tokenizer
/// must build their parsers from the same options, otherwise the two passes
/// can disagree on block boundaries.
#[must_use]
pub(crate) fn gfm_options(gfm: bool) -> Options {
    if gfm {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    } else {
        Options::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H4), 4);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }

    #[test]
    fn test_gfm_options() {
        let options = gfm_options(true);
        assert!(options.contains(Options::ENABLE_TABLES));
        assert!(options.contains(Options::ENABLE_STRIKETHROUGH));
        assert!(options.contains(Options::ENABLE_TASKLISTS));
        assert!(gfm_options(false).is_empty());
    }
}
