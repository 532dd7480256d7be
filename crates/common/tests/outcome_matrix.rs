use std::sync::Arc;

use authprobe_common::{
    AccountProvisioner, AccountStatus, ExpectedOutcome, Field, IdentityGenerator, LoginAttempt,
    OutcomeOracle, RecordingRegistrar, SubjectStatus, Validity,
};

fn provisioner(registrar: &RecordingRegistrar) -> AccountProvisioner {
    AccountProvisioner::new(IdentityGenerator::default(), Arc::new(registrar.clone()))
}

/// Provisioned accounts and the oracle agree for each documented scenario
#[tokio::test]
async fn provisioned_accounts_map_to_documented_outcomes() {
    let registrar = RecordingRegistrar::new();
    let provisioner = provisioner(&registrar);
    let oracle = OutcomeOracle::default();

    let active = provisioner.provision(AccountStatus::Active).await.unwrap();
    let attempt = LoginAttempt::exact(&active.identity);
    assert_eq!(attempt.entered_login, active.login());
    assert_eq!(
        oracle
            .expected_outcome(active.status.into(), Validity::Correct, Validity::Correct)
            .unwrap(),
        ExpectedOutcome::Success
    );

    let blocked = provisioner.provision(AccountStatus::Blocked).await.unwrap();
    assert_eq!(
        oracle
            .expected_outcome(blocked.status.into(), Validity::Correct, Validity::Correct)
            .unwrap(),
        ExpectedOutcome::ErrorMessage("user is blocked".to_string())
    );

    let stranger = provisioner.unregistered_identity();
    assert!(!registrar.is_registered(&stranger.login));
    assert_eq!(
        oracle
            .expected_outcome(SubjectStatus::NotRegistered, Validity::Correct, Validity::Correct)
            .unwrap(),
        ExpectedOutcome::ErrorMessage("wrong login or password".to_string())
    );

    assert_eq!(registrar.requests().len(), 2);
}

#[tokio::test]
async fn wrong_password_attempt_is_wrong_credentials() {
    let registrar = RecordingRegistrar::new();
    let provisioner = provisioner(&registrar);

    let user = provisioner.provision(AccountStatus::Active).await.unwrap();
    let attempt = LoginAttempt::build(
        &user.identity,
        Validity::Correct,
        Validity::Incorrect,
        provisioner.generator(),
    );

    assert_eq!(attempt.entered_login, user.login());
    assert_ne!(attempt.entered_password, user.password());
    assert_eq!(
        authprobe_common::expected_outcome(SubjectStatus::ACTIVE, Validity::Correct, Validity::Incorrect)
            .unwrap(),
        ExpectedOutcome::ErrorMessage("wrong login or password".to_string())
    );
}

#[test]
fn both_fields_empty_yields_both_warnings() {
    let outcome = authprobe_common::expected_outcome(
        SubjectStatus::NotRegistered,
        Validity::Empty,
        Validity::Empty,
    )
    .unwrap();

    let ExpectedOutcome::FieldWarnings(warnings) = &outcome else {
        panic!("expected field warnings, got {outcome}");
    };
    let fields: Vec<Field> = warnings.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, vec![Field::Login, Field::Password]);
}
