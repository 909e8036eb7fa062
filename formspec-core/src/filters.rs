// Built-in filters
//
// Each returns a plain closure so it can go straight into `Rule::filter`.

/// Strip leading and trailing whitespace.
pub fn trim() -> impl Fn(&str) -> String + Send + Sync + Clone + 'static {
    |value: &str| value.trim().to_string()
}

/// Strip any of `chars` from both ends.
///
/// ```
/// use formspec_core::filters;
///
/// let strip = filters::trim_chars(" \n");
/// assert_eq!(strip(" \nname\n "), "name");
/// ```
pub fn trim_chars(chars: &str) -> impl Fn(&str) -> String + Send + Sync + Clone + use<> {
    let chars: Vec<char> = chars.chars().collect();
    move |value: &str| value.trim_matches(chars.as_slice()).to_string()
}

pub fn lowercase() -> impl Fn(&str) -> String + Send + Sync + Clone + 'static {
    |value: &str| value.to_lowercase()
}

pub fn uppercase() -> impl Fn(&str) -> String + Send + Sync + Clone + 'static {
    |value: &str| value.to_uppercase()
}

/// Trim, then replace every internal whitespace run with one space.
pub fn collapse_whitespace() -> impl Fn(&str) -> String + Send + Sync + Clone + 'static {
    |value: &str| value.split_whitespace().collect::<Vec<_>>().join(" ")
}
