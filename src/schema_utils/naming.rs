use crate::core::{DbError, Result};
use crate::model::ModelClass;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `%` followed by its conversion character (or nothing at end of input)
    static ref FORMAT_DIRECTIVE: Regex = Regex::new(r"(?s)%(.?)").unwrap();
}

/// Name of the table a model is mapped to.
pub fn table_name(model: &ModelClass) -> &str {
    model.table_name()
}

/// Number of `%s` slots in a printf-style template.
///
/// `%%` is an escaped percent sign; any other directive is rejected.
pub fn count_template_slots(template: &str) -> Result<usize> {
    let mut slots = 0;
    for caps in FORMAT_DIRECTIVE.captures_iter(template) {
        match &caps[1] {
            "s" => slots += 1,
            "%" => {}
            "" => {
                return Err(DbError::FormatError(format!(
                    "incomplete format directive at end of '{}'",
                    template
                )));
            }
            other => {
                return Err(DbError::FormatError(format!(
                    "unsupported format directive '%{}' in '{}'",
                    other, template
                )));
            }
        }
    }
    Ok(slots)
}

/// Substitutes `value` into a template holding exactly one `%s` slot.
pub fn format_table_name(template: &str, value: &str) -> Result<String> {
    let slots = count_template_slots(template)?;
    if slots != 1 {
        return Err(DbError::FormatError(format!(
            "table name template '{}' must contain exactly one '%s', found {}",
            template, slots
        )));
    }

    let formatted = FORMAT_DIRECTIVE.replace_all(template, |caps: &regex::Captures<'_>| {
        if &caps[1] == "s" {
            value.to_string()
        } else {
            "%".to_string()
        }
    });
    Ok(formatted.into_owned())
}

/// Builds the class name of a history model: `Article` -> `ArticleVersion`.
pub fn version_class_name(model_name: &str) -> String {
    format!("{}Version", model_name)
}

/// Sanitizes a string for use as a SQL identifier (table/column name).
///
/// Converts non-alphanumeric characters to underscores and lowercases the result.
pub fn sanitize_sql_identifier(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
        } else {
            sanitized.push('_');
        }
    }
    sanitized
}

/// Derives a class name from a table name: `blog_posts` -> `BlogPosts`.
pub fn class_name_for_table(table: &str) -> String {
    sanitize_sql_identifier(table)
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_single_slot() {
        assert_eq!(format_table_name("%s_history", "articles").unwrap(), "articles_history");
        assert_eq!(format_table_name("audit_%s", "users").unwrap(), "audit_users");
    }

    #[test]
    fn test_escaped_percent() {
        assert_eq!(format_table_name("%s_100%%", "t").unwrap(), "t_100%");
    }

    #[test]
    fn test_wrong_slot_count() {
        assert!(matches!(format_table_name("history", "t"), Err(DbError::FormatError(_))));
        assert!(matches!(format_table_name("%s_%s", "t"), Err(DbError::FormatError(_))));
    }

    #[test]
    fn test_bad_directive() {
        assert!(matches!(count_template_slots("%d_version"), Err(DbError::FormatError(_))));
        assert!(matches!(count_template_slots("%s_%"), Err(DbError::FormatError(_))));
    }

    #[test]
    fn test_class_names() {
        assert_eq!(class_name_for_table("blog_posts"), "BlogPosts");
        assert_eq!(class_name_for_table("Users"), "Users");
        assert_eq!(version_class_name("Article"), "ArticleVersion");
    }
}
