use crate::error::{Result, StyleError};

/// Contact details for a vCard 3.0 payload; empty fields are omitted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Organisation
    pub organization: String,
    /// Phone number
    pub phone: String,
    /// Email address
    pub email: String,
    /// Website
    pub website: String,
    /// Postal address, single line
    pub address: String,
}

impl Contact {
    /// Display name built from first and last name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Escape a text value: backslash, `;`, `,` and line breaks (RFC 2426 section 4)
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' | ';' | ',' => {
                out.push('\\');
                out.push(c);
            }
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push_str("\\n");
                }
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Format `contact` as a vCard 3.0 block.
///
/// Name, organisation and address are escaped so separators inside a value
/// cannot split it into extra components.
///
/// Fails with `Payload` when the contact has neither a name nor an email.
pub fn build_vcard_payload(contact: &Contact) -> Result<String> {
    let name = contact.full_name();
    let email = contact.email.trim();
    if name.is_empty() && email.is_empty() {
        return Err(StyleError::Payload(
            "contact needs a name or an email address".into(),
        ));
    }

    let mut lines = vec!["BEGIN:VCARD".to_string(), "VERSION:3.0".to_string()];
    if !name.is_empty() {
        lines.push(format!("FN:{}", escape_text(&name)));
        lines.push(format!(
            "N:{};{};;;",
            escape_text(contact.last_name.trim()),
            escape_text(contact.first_name.trim())
        ));
    }
    let optional = [
        ("ORG", escape_text(contact.organization.trim())),
        ("TEL", contact.phone.trim().to_string()),
        ("EMAIL", email.to_string()),
        ("URL", contact.website.trim().to_string()),
    ];
    for (key, value) in optional.into_iter().filter(|(_, v)| !v.is_empty()) {
        lines.push(format!("{key}:{value}"));
    }
    // Street goes in the third ADR component
    let address = contact.address.trim();
    if !address.is_empty() {
        lines.push(format!("ADR:;;{};;;;", escape_text(address)));
    }
    lines.push("END:VCARD".to_string());
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_contact() {
        let contact = Contact {
            first_name: "Jane".into(),
            email: "jane@x.com".into(),
            ..Contact::default()
        };
        let card = build_vcard_payload(&contact).unwrap();
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines.first(), Some(&"BEGIN:VCARD"));
        assert_eq!(lines.last(), Some(&"END:VCARD"));
        assert!(lines.contains(&"FN:Jane"));
        assert!(lines.contains(&"EMAIL:jane@x.com"));
        for absent in ["ORG:", "TEL:", "URL:", "ADR:"] {
            assert!(!lines.iter().any(|l| l.starts_with(absent)), "{absent}");
        }
    }

    #[test]
    fn test_full_contact() {
        let contact = Contact {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            organization: "Acme".into(),
            phone: "+1 555 0100".into(),
            email: "jane@acme.test".into(),
            website: "https://acme.test".into(),
            address: "1 Main St".into(),
        };
        let card = build_vcard_payload(&contact).unwrap();
        assert!(card.contains("FN:Jane Doe\nN:Doe;Jane;;;"));
        assert!(card.contains("ORG:Acme"));
        assert!(card.contains("TEL:+1 555 0100"));
        assert!(card.contains("ADR:;;1 Main St;;;;"));
    }

    #[test]
    fn test_email_only_contact_has_no_name_lines() {
        let contact = Contact {
            email: "anon@x.com".into(),
            ..Contact::default()
        };
        let card = build_vcard_payload(&contact).unwrap();
        assert!(!card.contains("FN:"));
        assert!(!card.contains("\nN:"));
    }

    #[test]
    fn test_separators_are_escaped() {
        let contact = Contact {
            first_name: "Ann".into(),
            last_name: "O;Neil".into(),
            organization: "Smith, Jones; Co".into(),
            address: "1 Main St\nSuite 2".into(),
            ..Contact::default()
        };
        let card = build_vcard_payload(&contact).unwrap();
        let lines: Vec<&str> = card.lines().collect();
        assert!(lines.contains(&"N:O\\;Neil;Ann;;;"));
        assert!(lines.contains(&"FN:Ann O\\;Neil"));
        assert!(lines.contains(&"ORG:Smith\\, Jones\\; Co"));
        assert!(lines.contains(&"ADR:;;1 Main St\\nSuite 2;;;;"));
        assert_eq!(escape_text("a\\b\r\nc"), "a\\\\b\\nc");
    }

    #[test]
    fn test_empty_contact_rejected() {
        let err = build_vcard_payload(&Contact::default()).unwrap_err();
        assert!(matches!(err, StyleError::Payload(_)));

        let blank = Contact {
            first_name: "   ".into(),
            ..Contact::default()
        };
        assert!(build_vcard_payload(&blank).is_err());
    }
}
