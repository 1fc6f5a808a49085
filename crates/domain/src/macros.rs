//! Macro for implementing Display and FromStr for string-valued domain enums
//!
//! Several domain enums travel as fixed strings (configuration files, log
//! fields). This macro provides both conversions from a single mapping table,
//! with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use oidc_session_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Prompt {
//!     None,
//!     Login,
//! }
//!
//! impl_domain_enum_conversions!(Prompt {
//!     None => "none",
//!     Login => "login",
//! });
//!
//! assert_eq!(Prompt::None.to_string(), "none");
//! assert_eq!("LOGIN".parse::<Prompt>().unwrap(), Prompt::Login);
//! ```

/// Implements Display and FromStr traits for string-valued enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase string
///   representations
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err(::std::format!(
                        "Invalid {}: {}",
                        ::std::stringify!($enum_name),
                        s
                    )),
                }
            }
        }
    };
}
