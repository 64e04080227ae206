//! Enums stored by symbolic name
//!
//! An enum value is persisted as the string name of its variant, so the
//! stored text stays readable and survives reordering of variants.

/// An enum that round-trips through its variant name
pub trait PrefEnum: Sized {
    /// Symbolic name of this variant
    fn name(&self) -> &'static str;

    /// Variant for `name`, or None if no variant has that name
    fn from_name(name: &str) -> Option<Self>;
}

/// Implement [`PrefEnum`] for a fieldless enum using the variant identifiers
/// as names.
///
/// ```
/// use prefstore_core::{pref_enum, PrefEnum};
///
/// #[derive(Debug, PartialEq)]
/// enum Theme { Light, Dark }
/// pref_enum!(Theme { Light, Dark });
///
/// assert_eq!(Theme::Dark.name(), "Dark");
/// assert_eq!(Theme::from_name("Light"), Some(Theme::Light));
/// ```
#[macro_export]
macro_rules! pref_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::PrefEnum for $ty {
            fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => stringify!($variant),)+
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some($ty::$variant),)+
                    _ => None,
                }
            }
        }
    };
}
