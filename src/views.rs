// src/views.rs

use crate::utils::html::escape_text;

/// The `profile.html` template, compiled into the binary.
const PROFILE_TEMPLATE: &str = include_str!("../templates/profile.html");

/// Renders the profile page for the given email and roles.
///
/// Both values are escaped; each role becomes one list item.
pub fn render_profile(email: &str, roles: &[String]) -> String {
    let email_html = escape_text(email);
    let roles_html: String = roles
        .iter()
        .map(|role| format!("<li>{}</li>", escape_text(role)))
        .collect();

    fill_slots(PROFILE_TEMPLATE, |slot| match slot {
        "email" => Some(email_html.as_str()),
        "roles" => Some(roles_html.as_str()),
        _ => None,
    })
}

/// Replaces each `{{name}}` slot in one left-to-right pass over the template.
/// Inserted values are never scanned again. Unknown slots are kept verbatim.
fn fill_slots<'v>(template: &str, value: impl Fn(&str) -> Option<&'v str>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        match value(after[..end].trim()) {
            Some(v) => out.push_str(v),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_email_and_each_role() {
        let page = render_profile(
            "ann@example.com",
            &["student".to_string(), "teacher".to_string()],
        );
        assert!(page.contains("ann@example.com"));
        assert!(page.contains("<li>student</li>"));
        assert!(page.contains("<li>teacher</li>"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn slot_looking_email_is_shown_literally() {
        let page = render_profile("{{roles}}", &["admin".to_string()]);
        assert_eq!(page.matches("<li>admin</li>").count(), 1);
        assert!(page.contains(r#"<span id="email">{{roles}}</span>"#));
    }

    #[test]
    fn unknown_and_unclosed_slots_are_kept() {
        assert_eq!(fill_slots("a {{x}} b {{", |_| None), "a {{x}} b {{");
        assert_eq!(fill_slots("{{ x }}!", |_| Some("y")), "y!");
    }

    #[test]
    fn escapes_injected_markup() {
        let page = render_profile("<b>x</b>", &["<i>r</i>".to_string()]);
        assert!(!page.contains("<b>"));
        assert!(!page.contains("<i>"));
    }
}
