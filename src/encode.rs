//! String builders for each payload kind.
//!
//! Builders assume their input already passed the matching validator in
//! [`crate::validate`]; they only trim and escape.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::payload::{ContactPayload, EmailPayload, SmsPayload, TextPayload, WifiPayload};

/// Characters left untouched in a URI component: ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )`.
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Trims a vCard value and folds embedded line breaks into single spaces.
fn vcard_value(value: &str) -> String {
    value
        .trim()
        .split(|c: char| c == '\r' || c == '\n')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a vCard 3.0 block. Optional properties appear only when non-empty.
pub fn encode_vcard(contact: &ContactPayload) -> String {
    let first = vcard_value(&contact.first_name);
    let last = vcard_value(&contact.last_name);

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{first} {last}"),
        format!("N:{last};{first};;;"),
    ];

    let optional = [
        ("EMAIL", &contact.email),
        ("TEL;TYPE=CELL", &contact.mobile),
        ("TEL;TYPE=HOME", &contact.phone),
        ("TEL;TYPE=WORK", &contact.work_phone),
        ("TEL;TYPE=FAX", &contact.fax),
        ("ORG", &contact.company),
        ("TITLE", &contact.job_title),
    ];
    for (property, value) in optional {
        let value = vcard_value(value);
        if !value.is_empty() {
            lines.push(format!("{property}:{value}"));
        }
    }

    let address = [
        vcard_value(&contact.street),
        vcard_value(&contact.city),
        vcard_value(&contact.state),
        vcard_value(&contact.zip),
        vcard_value(&contact.country),
    ];
    if address.iter().any(|part| !part.is_empty()) {
        lines.push(format!("ADR:;;{}", address.join(";")));
    }

    let website = vcard_value(&contact.website);
    if !website.is_empty() {
        lines.push(format!("URL:{website}"));
    }

    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

pub fn encode_email(payload: &EmailPayload) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        payload.email.trim(),
        encode_uri_component(&payload.subject),
        encode_uri_component(&payload.body)
    )
}

pub fn encode_sms(payload: &SmsPayload) -> String {
    let phone = payload.phone.trim();
    if payload.message.is_empty() {
        format!("sms:{phone}")
    } else {
        format!("sms:{phone}:{}", encode_uri_component(&payload.message))
    }
}

/// Builds a `WIFI:` join string. The password segment is always present,
/// even for open networks.
pub fn encode_wifi(payload: &WifiPayload) -> String {
    let mut out = format!(
        "WIFI:T:{};S:{};P:{}",
        payload.encryption,
        payload.ssid.trim(),
        payload.password
    );
    if payload.hidden {
        out.push_str(";H:true");
    }
    out.push_str(";;");
    out
}

pub fn encode_text(payload: &TextPayload) -> String {
    payload.text.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::WifiEncryption;

    fn jane() -> ContactPayload {
        ContactPayload {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_vcard() {
        assert_eq!(
            encode_vcard(&jane()),
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nN:Doe;Jane;;;\nEND:VCARD"
        );
    }

    #[test]
    fn vcard_with_mobile() {
        let contact = ContactPayload {
            mobile: "+1 555-123-4567".into(),
            ..jane()
        };
        let card = encode_vcard(&contact);
        assert!(card.contains("\nFN:Jane Doe\n"));
        assert!(card.contains("\nN:Doe;Jane;;;\n"));
        assert!(card.contains("\nTEL;TYPE=CELL:+1 555-123-4567\n"));
    }

    #[test]
    fn vcard_optional_lines_follow_fixed_order() {
        let contact = ContactPayload {
            first_name: " Jane ".into(),
            email: "jane@example.org".into(),
            mobile: "1".into(),
            phone: "2".into(),
            work_phone: "3".into(),
            fax: "4".into(),
            company: "Acme".into(),
            job_title: "CTO".into(),
            city: "Springfield".into(),
            country: "US".into(),
            website: "https://acme.test".into(),
            ..jane()
        };
        let card = encode_vcard(&contact);
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(
            lines,
            [
                "BEGIN:VCARD",
                "VERSION:3.0",
                "FN:Jane Doe",
                "N:Doe;Jane;;;",
                "EMAIL:jane@example.org",
                "TEL;TYPE=CELL:1",
                "TEL;TYPE=HOME:2",
                "TEL;TYPE=WORK:3",
                "TEL;TYPE=FAX:4",
                "ORG:Acme",
                "TITLE:CTO",
                "ADR:;;;Springfield;;;US",
                "URL:https://acme.test",
                "END:VCARD",
            ]
        );
    }

    #[test]
    fn vcard_values_cannot_inject_lines() {
        let contact = ContactPayload {
            company: "Acme\r\nEND:VCARD".into(),
            ..jane()
        };
        let card = encode_vcard(&contact);
        assert!(card.contains("\nORG:Acme END:VCARD\n"));
        assert_eq!(card.matches("END:VCARD").count(), 2);
        assert!(card.ends_with("\nEND:VCARD"));
    }

    #[test]
    fn blank_address_is_omitted() {
        let contact = ContactPayload {
            street: "   ".into(),
            ..jane()
        };
        assert!(!encode_vcard(&contact).contains("ADR"));
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let payload = EmailPayload {
            email: "a@b.com".into(),
            subject: "Hi there".into(),
            body: String::new(),
        };
        assert_eq!(encode_email(&payload), "mailto:a@b.com?subject=Hi%20there&body=");

        let payload = EmailPayload {
            email: "a@b.com".into(),
            subject: "Q&A?".into(),
            body: "line 1\nüber (it's fine)".into(),
        };
        assert_eq!(
            encode_email(&payload),
            "mailto:a@b.com?subject=Q%26A%3F&body=line%201%0A%C3%BCber%20(it's%20fine)"
        );
    }

    #[test]
    fn sms_message_suffix_only_when_present() {
        let payload = SmsPayload {
            phone: "555-1234".into(),
            message: String::new(),
        };
        assert_eq!(encode_sms(&payload), "sms:555-1234");

        let payload = SmsPayload {
            phone: "555-1234".into(),
            message: "on my way".into(),
        };
        assert_eq!(encode_sms(&payload), "sms:555-1234:on%20my%20way");
    }

    #[test]
    fn wifi_open_network() {
        let payload = WifiPayload {
            ssid: "Home".into(),
            encryption: WifiEncryption::NoPass,
            ..Default::default()
        };
        assert_eq!(encode_wifi(&payload), "WIFI:T:nopass;S:Home;P:;;");
    }

    #[test]
    fn wifi_hidden_network() {
        let payload = WifiPayload {
            ssid: "Office".into(),
            password: "s3cret".into(),
            encryption: WifiEncryption::Wpa,
            hidden: true,
        };
        assert_eq!(encode_wifi(&payload), "WIFI:T:WPA;S:Office;P:s3cret;H:true;;");
    }

    #[test]
    fn text_is_passed_through() {
        let payload = TextPayload {
            text: "  keep  spacing ".into(),
        };
        assert_eq!(encode_text(&payload), "  keep  spacing ");
    }

    #[test]
    fn uri_component_set() {
        assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
        assert_eq!(encode_uri_component("a b/c"), "a%20b%2Fc");
    }
}
