//! Declarative macro for closed status vocabularies.
//!
//! Every entity in this crate carries at least one closed set of states
//! (disaster status, donation status, and so on). The macro generates the
//! enum, its canonical storage strings, a `FromStr` implementation with a
//! typed parse error, and an `ALLOWED` list for validation messages.

/// Define a status enum with canonical strings and a typed parse error.
///
/// ```ignore
/// status_enum! {
///     /// Lifecycle of a widget.
///     WidgetStatus, ParseWidgetStatusError, "widget status" {
///         /// Newly created.
///         New => "New",
///         /// No longer in use.
///         Retired => "Retired",
///     }
/// }
/// ```
macro_rules! status_enum {
    (
        $(#[$outer:meta])*
        $name:ident, $parse_err:ident, $label:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $text:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Canonical storage strings accepted by [`std::str::FromStr`].
            pub const ALLOWED: &'static [&'static str] = &[$($text),+];

            /// Canonical storage string for this value.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[doc = concat!("Error returned when parsing an unknown ", $label, ".")]
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        #[error("unknown {}: {value}", $label)]
        pub struct $parse_err {
            /// The rejected input.
            pub value: String,
        }

        impl ::std::str::FromStr for $name {
            type Err = $parse_err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok(Self::$variant),)+
                    other => Err($parse_err {
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

pub(crate) use status_enum;
