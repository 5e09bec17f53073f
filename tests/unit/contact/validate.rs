use super::*;

#[test]
fn short_message_fails_only_on_message() {
    let s = ContactSubmission::new("Al", "a@b.com", "short");
    let errs = s.validate().unwrap_err();
    assert_eq!(errs.0.len(), 1);
    assert_eq!(errs.field(ContactField::Message).len(), 1);
    assert!(errs.field(ContactField::Name).is_empty());
    assert!(errs.field(ContactField::Email).is_empty());
}

#[test]
fn complete_submission_passes() {
    let s = ContactSubmission::new("Alice", "alice@example.com", "I would like to discuss a project.");
    assert!(s.validate().is_ok());
}

#[test]
fn every_failing_field_is_reported() {
    let s = ContactSubmission::new("A", "not-an-email", "");
    let errs = s.validate().unwrap_err();
    let fields: Vec<ContactField> = errs.0.keys().copied().collect();
    assert_eq!(
        fields,
        vec![ContactField::Name, ContactField::Email, ContactField::Message]
    );
}

#[test]
fn email_shape() {
    for ok in ["a@b.co", "first.last@sub.example.org", "x+tag@y.io"] {
        assert!(EMAIL_RE.is_match(ok), "{ok}");
    }
    for bad in ["a@b", "@b.com", "a b@c.com", "a@b .com", "a@@b.com", ""] {
        assert!(!EMAIL_RE.is_match(bad), "{bad}");
    }
}

#[test]
fn lengths_count_characters_not_bytes() {
    let s = ContactSubmission::new("Zoë", "z@x.fr", "ééééééééé");
    let errs = s.validate().unwrap_err();
    assert!(errs.field(ContactField::Name).is_empty());
    assert_eq!(errs.field(ContactField::Message).len(), 1);
}

#[test]
fn errors_serialize_keyed_by_field() {
    let errs = ContactSubmission::new("Al", "a@b.com", "short")
        .validate()
        .unwrap_err();
    let v = serde_json::to_value(&errs).unwrap();
    assert!(v["message"].is_array());
    assert!(v.get("name").is_none());
}
