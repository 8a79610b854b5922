use gate_domain::form::HostRestrictionField;
use gate_domain::totp::{DEFAULT_ISSUER, TotpMode, TotpSettings};
use gate_domain::user::AuthenticatedUser;
use serde_json::json;
use std::str::FromStr;
use strum::VariantNames;

#[test]
fn totp_defaults_are_sane() {
    let settings = TotpSettings::default();
    assert_eq!(settings.issuer, DEFAULT_ISSUER);
    assert_eq!(settings.digits, 6);
    assert_eq!(settings.period, 30);
    assert_eq!(settings.mode, TotpMode::Sha1);
}

#[test]
fn totp_mode_symbols_are_lowercase_and_case_sensitive() {
    assert_eq!(TotpMode::VARIANTS, &["sha1", "sha256", "sha512"]);
    assert_eq!(TotpMode::from_str("sha256"), Ok(TotpMode::Sha256));
    assert!(TotpMode::from_str("SHA256").is_err());
    assert_eq!(TotpMode::Sha512.to_string(), "sha512");
}

#[test]
fn host_restriction_field_serializes_type_tag() {
    let field = HostRestrictionField::new("guac-allowed-hosts");
    let value = serde_json::to_value(&field).expect("field serialize");
    assert_eq!(value, json!({ "name": "guac-allowed-hosts", "type": "HOST_RESTRICTION" }));
}

#[test]
fn anonymous_users_are_detected() {
    let addr = "10.0.0.1".parse().expect("address");
    assert!(AuthenticatedUser::new("anonymous", addr).is_anonymous());
    assert!(AuthenticatedUser::new("", addr).is_anonymous());
    assert!(!AuthenticatedUser::new("alice", addr).is_anonymous());
}
