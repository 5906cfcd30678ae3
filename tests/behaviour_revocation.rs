//! BDD tests for trust changes between downloads.
//!
//! The registry is read afresh on every download, so trusting or revoking a
//! signer changes the outcome of the very next call on the same downloader.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use semver::Version;
use sigfetch::checksum::ShaChecksumService;
use sigfetch::error::DownloadError;
use sigfetch::fingerprint::Fingerprint;
use sigfetch::test_utils::{CountingRegistry, StubTransport, TrustingVerifier};
use sigfetch::transport::FetchResult;
use sigfetch::{ArtefactLocator, Downloader, VerifiedArtefact};
use url::Url;

struct RevocationWorld {
    locator: ArtefactLocator,
    transport: StubTransport,
    verifier: Option<TrustingVerifier>,
    registry: CountingRegistry,
    result: Option<Result<VerifiedArtefact, DownloadError>>,
}

#[fixture]
fn world() -> RevocationWorld {
    let artefact_url = Url::parse("https://example.com/tool.phar").expect("valid URL");
    let signature_url = Url::parse("https://example.com/tool.phar.sig").expect("valid URL");
    RevocationWorld {
        locator: ArtefactLocator::new(
            "tool",
            Version::new(2, 1, 0),
            artefact_url.clone(),
            signature_url.clone(),
        ),
        transport: StubTransport::new()
            .with_response(artefact_url, FetchResult::success("tool-content"))
            .with_response(signature_url, FetchResult::success("tool-signature")),
        verifier: None,
        registry: CountingRegistry::default(),
        result: None,
    }
}

#[given("a published artefact signed by \"{signer}\"")]
fn given_signed_by(world: &mut RevocationWorld, signer: String) {
    world.verifier = Some(TrustingVerifier::new(Fingerprint::from(signer)));
}

#[given("the registry trusts \"{signer}\"")]
fn given_registry_trusts(world: &mut RevocationWorld, signer: String) {
    world.registry.registry().trust(Fingerprint::from(signer));
}

#[when("the registry trusts \"{signer}\"")]
fn when_registry_trusts(world: &mut RevocationWorld, signer: String) {
    world.registry.registry().trust(Fingerprint::from(signer));
}

#[when("the registry revokes \"{signer}\"")]
fn when_registry_revokes(world: &mut RevocationWorld, signer: String) {
    world.registry.registry().revoke(&Fingerprint::from(signer));
}

#[when("the artefact is downloaded")]
fn when_downloaded(world: &mut RevocationWorld) {
    let verifier = world.verifier.as_ref().expect("verifier set");
    let downloader = Downloader::new(
        &world.transport,
        verifier,
        &ShaChecksumService,
        &world.registry,
    );
    let result = downloader.download(&world.locator);
    world.result = Some(result);
}

#[then("the download succeeds")]
fn then_succeeds(world: &mut RevocationWorld) {
    let result = world.result.as_ref().expect("download attempted");
    assert!(result.is_ok(), "expected success, got {result:?}");
}

#[then("the download is rejected by verification")]
fn then_rejected(world: &mut RevocationWorld) {
    let result = world.result.as_ref().expect("download attempted");
    assert!(
        matches!(result, Err(DownloadError::VerificationFailed { .. })),
        "expected verification failure, got {result:?}"
    );
}

#[then("the registry was queried {count} times")]
fn then_registry_queried(world: &mut RevocationWorld, count: usize) {
    assert_eq!(world.registry.queries(), count);
}

#[scenario(
    path = "tests/features/revocation.feature",
    name = "Revoking a signer rejects the next download"
)]
fn scenario_revoke(world: RevocationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/revocation.feature",
    name = "Trusting a signer accepts the next download"
)]
fn scenario_trust(world: RevocationWorld) {
    let _ = world;
}
