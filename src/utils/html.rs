/// Escapes text for safe insertion into HTML, attributes included.
///
/// Uses ammonia's text cleaner, which entity-encodes every character that
/// could open a tag or break out of a quoted attribute.
pub fn escape_text(input: &str) -> String {
    ammonia::clean_text(input)
}
