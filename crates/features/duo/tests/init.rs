use gate_domain::user::AuthenticatedUser;
use gate_duo::{DuoError, DuoProvider, init};
use gate_kernel::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

fn source(extra: &[(&str, &str)]) -> HashMap<String, String> {
    [
        ("duo-api-hostname", "api-1234.duosecurity.com"),
        ("duo-client-id", "DIXXXXXXXXXXXXXXXXXX"),
        ("duo-client-secret", "super-secret-value"),
        ("duo-redirect-uri", "https://gate.example.com/"),
    ]
    .iter()
    .chain(extra)
    .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
    .collect()
}

#[test]
fn init_registers_the_duo_provider() {
    let provider = init(&source(&[])).expect("init should succeed");
    assert_eq!(provider.id, "duo");

    let duo = provider.downcast_ref::<DuoProvider>().expect("duo provider");
    assert_eq!(duo.api_hostname(), "api-1234.duosecurity.com");
    assert_eq!(duo.auth_timeout().as_secs(), 300);
}

#[test]
fn init_requires_client_properties() {
    let mut source = source(&[]);
    source.remove("duo-redirect-uri");

    let err = init(&source).unwrap_err();
    assert!(matches!(
        err,
        DuoError::Property { source: PropertyError::Missing { name: "duo-redirect-uri", .. }, .. }
    ));
}

#[test]
fn debug_output_never_contains_the_secret() {
    let duo = DuoProvider::from_source(&source(&[])).unwrap();
    let rendered = format!("{duo:?}");
    assert!(!rendered.contains("super-secret-value"));
    assert_eq!(duo.client_secret().expose(), "super-secret-value");
}

#[test]
fn only_enforced_hosts_reach_duo() {
    let duo = DuoProvider::from_source(&source(&[("duo-enforce-hosts", "203.0.113.0/24")]))
        .unwrap();
    let calls = AtomicUsize::new(0);
    let approve = |_: &AuthenticatedUser| -> Result<(), VerificationError> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    };

    let office = AuthenticatedUser::new("bob", "10.0.0.8".parse().unwrap());
    assert_eq!(duo.verify_authenticated_user(&office, &approve).unwrap(), Outcome::Skipped);

    let remote = AuthenticatedUser::new("bob", "203.0.113.9".parse().unwrap());
    assert_eq!(duo.verify_authenticated_user(&remote, &approve).unwrap(), Outcome::Verified);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn denied_prompts_surface_as_errors() {
    let duo = DuoProvider::from_source(&source(&[])).unwrap();
    let deny = |_: &AuthenticatedUser| -> Result<(), VerificationError> {
        Err(VerificationError::Unavailable { message: "timeout".into(), context: None })
    };

    let user = AuthenticatedUser::new("carol", "198.51.100.1".parse().unwrap());
    let err = duo.verify_authenticated_user(&user, &deny).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Duo verification failed (Duo prompt via api-1234.duosecurity.com failed): \
         Second factor service unavailable: timeout"
    );
}
