//! Macros for ergonomic declarations.

/// Build a [`Params`](crate::core::Params) value from key/value pairs.
///
/// Values are anything convertible into a JSON value.
///
/// # Example
///
/// ```
/// use statecraft::params;
///
/// let params = params! {
///     "driver" => "louise",
///     "speed" => 88,
/// };
/// assert!(params.contains("driver"));
///
/// let empty = params! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::core::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::core::Params::new();
        $(params.insert($key, $value);)+
        params
    }};
}
