//! Run-as user derived from an image config

/// Split an image's `User` field into a numeric uid or a user name.
///
/// Only the part before the first `:` is looked at, so `user:group` forms
/// resolve to the user. A value that parses as `i64` is a uid; anything else
/// is a name. At most one of the two outputs is set.
pub fn get_user_from_image(user: &str) -> (Option<i64>, Option<String>) {
    let user = user.split(':').next().unwrap_or(user);
    if user.is_empty() {
        return (None, None);
    }
    match user.parse::<i64>() {
        Ok(uid) => (Some(uid), None),
        Err(_) => (None, Some(user.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_user_with_group() {
        assert_eq!(get_user_from_image("1000:1000"), (Some(1000), None));
    }

    #[test]
    fn test_named_user() {
        assert_eq!(get_user_from_image("alice"), (None, Some("alice".to_string())));
        assert_eq!(
            get_user_from_image("www-data:staff"),
            (None, Some("www-data".to_string()))
        );
    }

    #[test]
    fn test_empty_user() {
        assert_eq!(get_user_from_image(""), (None, None));
    }

    #[test]
    fn test_edge_numbers() {
        assert_eq!(get_user_from_image("0"), (Some(0), None));
        assert_eq!(get_user_from_image("-1"), (Some(-1), None));
        // Beyond i64 range falls back to a name
        assert_eq!(
            get_user_from_image("99999999999999999999"),
            (None, Some("99999999999999999999".to_string()))
        );
        // Group only
        assert_eq!(get_user_from_image(":100"), (None, None));
    }
}
