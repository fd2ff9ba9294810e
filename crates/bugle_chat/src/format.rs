//! Message formatting helpers.

/// How timestamps render inside chat messages.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
///
/// let instant = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// assert_eq!(instant.format(bugle_chat::TIMESTAMP_FORMAT).to_string(), "2025.03.10 09:30");
/// ```
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M";

/// Render a login as a mention the chat platform resolves.
///
/// # Examples
///
/// ```
/// assert_eq!(bugle_chat::mention("alice"), "@alice");
/// ```
pub fn mention(login: &str) -> String {
    format!("@{login}")
}

/// The first word of a display name, for greeting people.
///
/// # Examples
///
/// ```
/// assert_eq!(bugle_chat::first_name("Alice Cooper"), "Alice");
/// assert_eq!(bugle_chat::first_name("Cher"), "Cher");
/// ```
pub fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_prefixes_the_login() {
        assert_eq!(mention("bob"), "@bob");
    }

    #[test]
    fn first_name_handles_padding_and_single_words() {
        assert_eq!(first_name("  Alice   Cooper "), "Alice");
        assert_eq!(first_name("Cher"), "Cher");
        assert_eq!(first_name(""), "");
    }
}
