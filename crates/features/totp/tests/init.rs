use gate_domain::user::AuthenticatedUser;
use gate_kernel::prelude::*;
use gate_totp::{TotpError, TotpProvider, init};
use std::collections::HashMap;

fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

#[test]
fn init_registers_the_totp_provider() {
    let provider = init(&source(&[("totp-issuer", "Example"), ("totp-mode", "sha256")]))
        .expect("init should succeed");

    assert_eq!(provider.id, "totp");
    assert_eq!(provider.type_id, std::any::TypeId::of::<TotpProvider>());

    let totp = provider.downcast_ref::<TotpProvider>().expect("totp provider");
    assert_eq!(totp.settings().issuer, "Example");
    assert_eq!(totp.settings().mode.to_string(), "sha256");
}

#[test]
fn init_fails_fast_on_invalid_digits() {
    let err = init(&source(&[("totp-digits", "9")])).unwrap_err();
    assert!(err.to_string().starts_with("TOTP config error (Failed to resolve TOTP settings)"));
}

#[test]
fn init_fails_fast_on_malformed_hosts() {
    let err = init(&source(&[("totp-enforce-hosts", "10.0.0.0/8,nope")])).unwrap_err();
    assert!(matches!(
        err,
        TotpError::Property { source: PropertyError::MalformedNetworkRange { .. }, .. }
    ));
}

#[test]
fn codes_are_only_requested_outside_bypassed_hosts() {
    let provider =
        TotpProvider::from_source(&source(&[("totp-bypass-hosts", "192.168.0.0/16")])).unwrap();
    let reject = |user: &AuthenticatedUser| -> Result<(), VerificationError> {
        Err(VerificationError::Rejected {
            username: user.username.clone(),
            message: "invalid code".into(),
            context: None,
        })
    };

    let inside = AuthenticatedUser::new("alice", "192.168.4.2".parse().unwrap());
    assert_eq!(provider.verify_authenticated_user(&inside, &reject).unwrap(), Outcome::Skipped);

    let outside = AuthenticatedUser::new("alice", "203.0.113.7".parse().unwrap());
    let err = provider.verify_authenticated_user(&outside, &reject).unwrap_err();
    assert!(matches!(err, TotpError::Verification { .. }));
}

#[test]
fn settings_serialize_for_the_code_generator() {
    let provider = TotpProvider::from_source(&source(&[])).unwrap();
    let json = serde_json::to_value(provider.settings()).unwrap();
    assert_eq!(json["issuer"], "Apache Guacamole");
    assert_eq!(json["mode"], "sha1");
}
