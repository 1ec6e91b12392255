//! The local-part shapes probed for every request, as a declarative table.
//!
//! Each entry names which name fields appear, in which order, and the
//! separator joining them. The table order is part of the public contract:
//! generated addresses come out in exactly this order.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    First,
    Last,
    FirstInitial,
    LastInitial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Separator {
    None,
    Dot,
    Underscore,
    Hyphen,
}

impl Separator {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Dot => ".",
            Self::Underscore => "_",
            Self::Hyphen => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pattern {
    Single(Token),
    Pair(Token, Separator, Token),
}

use Pattern::{Pair, Single};
use Separator::{Dot, Hyphen, None as NoSep, Underscore};
use Token::{First, FirstInitial, Last, LastInitial};

/// The 34 shapes, first-name forms leading, then last-name forms, then
/// initials. Note the asymmetry: `first_l` and `first-l` are absent, so the
/// pair grid is not the full 8 × 4.
pub(crate) const PATTERNS: [Pattern; 34] = [
    Single(First),
    Pair(First, Dot, Last),
    Pair(First, NoSep, Last),
    Pair(FirstInitial, Dot, Last),
    Pair(FirstInitial, NoSep, Last),
    Pair(First, Dot, LastInitial),
    Pair(First, NoSep, LastInitial),
    Pair(First, Underscore, Last),
    Pair(First, Hyphen, Last),
    Single(Last),
    Pair(Last, Dot, First),
    Pair(Last, NoSep, First),
    Pair(LastInitial, Dot, First),
    Pair(LastInitial, NoSep, First),
    Pair(Last, Underscore, First),
    Pair(Last, Hyphen, First),
    Pair(FirstInitial, Underscore, Last),
    Pair(FirstInitial, Hyphen, Last),
    Pair(LastInitial, Underscore, First),
    Pair(LastInitial, Hyphen, First),
    Pair(Last, NoSep, FirstInitial),
    Pair(Last, Dot, FirstInitial),
    Pair(Last, Underscore, FirstInitial),
    Pair(Last, Hyphen, FirstInitial),
    Single(FirstInitial),
    Single(LastInitial),
    Pair(FirstInitial, NoSep, LastInitial),
    Pair(FirstInitial, Dot, LastInitial),
    Pair(FirstInitial, Underscore, LastInitial),
    Pair(FirstInitial, Hyphen, LastInitial),
    Pair(LastInitial, NoSep, FirstInitial),
    Pair(LastInitial, Dot, FirstInitial),
    Pair(LastInitial, Underscore, FirstInitial),
    Pair(LastInitial, Hyphen, FirstInitial),
];
