//! Host-facing enumerations.
//!
//! The shading host passes enumerations as plain integer indices and lists
//! their names in its UI. Both the indices and the names are part of the
//! compatibility surface, so every enum declared here keeps an explicit
//! discriminant and a fixed host name.

use thiserror::Error;

/// Error returned when parsing an enumeration from its host name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{name}' (expected one of: {expected})")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub name: String,
    /// Comma separated list of accepted names.
    pub expected: String,
}

/// Declares a host enumeration with index/name tables.
///
/// Generates `ALL`, `NAMES`, `name`, `index`, `from_index`,
/// `from_index_or_default`, `Default`, `Display` and `FromStr`. Unknown
/// indices fall back to the declared default; unknown names are an error.
macro_rules! host_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal, default = $default:ident) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $index:literal => $host:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[repr(i32)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $host)]
                $variant = $index,
            )+
        }

        impl $name {
            /// Every variant, in host index order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Host names, in host index order.
            pub const NAMES: &'static [&'static str] = &[$($host),+];

            /// Returns the host name of this variant.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $host,)+
                }
            }

            /// Returns the host index of this variant.
            pub fn index(self) -> i32 {
                self as i32
            }

            /// Looks up a variant by host index.
            pub fn from_index(index: i32) -> Option<Self> {
                match index {
                    $($index => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Looks up a variant by host index, falling back to the default
            /// for indices the host should never send.
            pub fn from_index_or_default(index: i32) -> Self {
                Self::from_index(index).unwrap_or_else(|| {
                    tracing::debug!(
                        index,
                        fallback = $name::$default.name(),
                        concat!("unknown ", $kind, " index")
                    );
                    $name::$default
                })
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::enums::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($host => Ok($name::$variant),)+
                    _ => Err($crate::enums::ParseEnumError {
                        kind: $kind,
                        name: s.to_string(),
                        expected: Self::NAMES.join(", "),
                    }),
                }
            }
        }
    };
}
