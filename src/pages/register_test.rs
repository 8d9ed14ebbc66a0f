use super::*;

#[test]
fn validate_register_input_trims_name_and_email() {
    assert_eq!(
        validate_register_input(" Ann ", " a@x.com ", "secret1"),
        Ok(RegisterRequest {
            full_name: "Ann".to_owned(),
            email: "a@x.com".to_owned(),
            password: "secret1".to_owned(),
        })
    );
}

#[test]
fn validate_register_input_requires_every_field() {
    assert_eq!(validate_register_input("", "a@x.com", "secret1"), Err("Fill in every field."));
    assert_eq!(validate_register_input("Ann", "  ", "secret1"), Err("Fill in every field."));
    assert_eq!(validate_register_input("Ann", "a@x.com", ""), Err("Fill in every field."));
}

#[test]
fn validate_register_input_rejects_malformed_email() {
    assert_eq!(validate_register_input("Ann", "ann.x.com", "secret1"), Err("Enter a valid email address."));
}

#[test]
fn validate_register_input_enforces_min_password_length() {
    assert_eq!(
        validate_register_input("Ann", "a@x.com", "12345"),
        Err("Password must be at least 6 characters.")
    );
    assert!(validate_register_input("Ann", "a@x.com", "123456").is_ok());
}

#[test]
fn validate_register_input_counts_characters_not_bytes() {
    assert!(validate_register_input("Ann", "a@x.com", "ééééé").is_err());
    assert!(validate_register_input("Ann", "a@x.com", "éééééé").is_ok());
}
