// Object masks
//
// A mask tells the service which relational properties to hydrate in the
// response. Masks built from field lists render as `mask[a,b,c]`; masks
// supplied by a caller as text are forwarded verbatim.

use std::fmt;

/// An object mask, either built from field paths or taken as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectMask {
    /// Ordered field paths, rendered as `mask[f1,f2,...]`.
    Fields(Vec<String>),
    /// Caller-supplied mask text, sent exactly as given.
    Raw(String),
}

impl ObjectMask {
    /// Build a mask from an ordered list of field paths.
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(fields.into_iter().map(Into::into).collect())
    }

    /// Use a mask string as-is.
    pub fn raw(mask: impl Into<String>) -> Self {
        Self::Raw(mask.into())
    }
}

impl fmt::Display for ObjectMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(fields) => write!(f, "mask[{}]", fields.join(",")),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

impl From<&str> for ObjectMask {
    fn from(raw: &str) -> Self {
        Self::raw(raw)
    }
}

impl From<String> for ObjectMask {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}
