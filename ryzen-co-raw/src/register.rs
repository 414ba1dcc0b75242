//! Generic abstractions for typed SMU argument words

/// Trait for values that travel through an SMU argument or response word
///
/// This trait provides type-safe conversion between structured values and
/// the raw 32-bit words written to / read from the `smu_args` register.
///
/// # Example
///
/// ```
/// use ryzen_co_raw::register::ArgumentLayout;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Limit {
///     enable: bool,
///     value: u8,
/// }
///
/// impl ArgumentLayout for Limit {
///     fn to_word(&self) -> u32 {
///         (if self.enable { 1 << 31 } else { 0 }) | self.value as u32
///     }
///
///     fn from_word(word: u32) -> Self {
///         Self {
///             enable: (word >> 31) != 0,
///             value: (word & 0xFF) as u8,
///         }
///     }
/// }
///
/// let limit = Limit { enable: true, value: 7 };
/// assert_eq!(Limit::from_word(limit.to_word()), limit);
/// ```
pub trait ArgumentLayout: Sized {
    /// Convert this value to a raw argument word
    fn to_word(&self) -> u32;

    /// Parse a raw word into this layout
    fn from_word(word: u32) -> Self;

    /// Validate that the value can be represented in its word layout
    ///
    /// Returns `Ok(())` if valid, or an error message if invalid.
    fn validate(&self) -> Result<(), &'static str> {
        Ok(())
    }
}
