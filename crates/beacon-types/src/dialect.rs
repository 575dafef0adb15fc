use std::num::NonZeroUsize;

/// Which flavour of BEACON dump a decoder is reading.
///
/// Chosen once when the decoder is built and never changed afterwards.
///
/// ```text
/// ┌───────────────────────────────┬────────────────────────────────────────┐
/// │ Dialect                       │ Link line                              │
/// ├───────────────────────────────┼────────────────────────────────────────┤
/// │ Rfc                           │ source[|target] or                     │
/// │                               │ source|annotation|target               │
/// │ UrlTeam { shortcode_len: None}│ source|target…  (first '|' splits)     │
/// │ UrlTeam { shortcode_len: w }  │ w-char source '|' target, target may   │
/// │                               │ continue over following lines          │
/// └───────────────────────────────┴────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Generic dialect following the BEACON draft RFC.
    #[default]
    Rfc,

    /// URLTeam dumps: no annotation, everything after the split is target.
    UrlTeam {
        /// Fixed shortcode width in bytes, or `None` to split on the
        /// first `'|'`.
        shortcode_len: Option<NonZeroUsize>,
    },
}

impl Dialect {
    /// URLTeam dialect with the given shortcode width; `0` means variable
    /// width.
    #[must_use]
    pub fn url_team(shortcode_len: usize) -> Self {
        Self::UrlTeam {
            shortcode_len: NonZeroUsize::new(shortcode_len),
        }
    }

    /// Fixed shortcode width, if this is a fixed-width URLTeam dialect.
    #[must_use]
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Self::UrlTeam {
                shortcode_len: Some(w),
            } => Some(w.get()),
            _ => None,
        }
    }
}
