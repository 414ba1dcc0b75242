//! Declarative macros to reduce boilerplate across the ryzen-co codebase

/// Define an index-coded enum with automatic `name()`, `all()` and
/// `from_index()` implementations
///
/// Variants are numbered in declaration order starting at 0, matching how
/// the driver reports table-coded values.
///
/// # Example
/// ```
/// use ryzen_co::indexed_enum;
///
/// indexed_enum! {
///     pub enum Socket {
///         Unknown => "Unknown",
///         Am4 => "AM4",
///         Am5 => "AM5",
///     }
/// }
///
/// // Usage
/// assert_eq!(Socket::Am5.name(), "AM5");
/// assert_eq!(Socket::all().len(), 3);
/// assert_eq!(Socket::from_index(1), Some(Socket::Am4));
/// assert_eq!(Socket::from_index(3), None);
/// ```
///
/// Expands to:
/// - An enum with Debug, Clone, Copy, PartialEq, Eq, Hash derives
/// - A `name(&self) -> &'static str` method
/// - An `all() -> Vec<Self>` method
/// - A `from_index(usize) -> Option<Self>` method
#[macro_export]
macro_rules! indexed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $str:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)*
                }
            }

            pub fn all() -> Vec<$name> {
                vec![$($name::$variant,)*]
            }

            pub fn from_index(index: usize) -> Option<$name> {
                Self::all().get(index).copied()
            }
        }
    };
}
