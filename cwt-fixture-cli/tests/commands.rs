//! Integration tests for the cwt-fixture command handlers.

use clap::Parser;

use cwt_fixture::fixture::{FixtureConfig, sample_envelope};
use cwt_fixture::{Algorithm, Profile};
use cwt_fixture_cli::keygen::{KeygenArgs, KeygenCommand, run_keygen};
use cwt_fixture_cli::token::{OutputFormat, TokenArgs, run_token};

#[derive(Parser, Debug)]
struct TokenCli {
    #[command(flatten)]
    args: TokenArgs,
}

#[derive(Parser, Debug)]
struct KeygenCli {
    #[command(subcommand)]
    command: Top,
}

#[derive(clap::Subcommand, Debug)]
enum Top {
    Keygen(KeygenArgs),
}

fn keygen_args(argv: &[&str]) -> KeygenArgs {
    let Top::Keygen(args) = KeygenCli::parse_from(argv).command;
    args
}

#[test]
fn token_flags_parse_into_config() {
    let cli = TokenCli::parse_from([
        "token",
        "--profile",
        "minimal",
        "--kid",
        "k1",
        "--alg",
        "es512",
        "--format",
        "base64url",
        "--summary",
    ]);
    let config = cli.args.config();

    assert_eq!(config.profile, Profile::Minimal);
    assert_eq!(config.kid, "k1");
    assert_eq!(config.algorithm, Algorithm::Es512);
    assert_eq!(cli.args.format, OutputFormat::Base64url);
    assert!(cli.args.summary);
}

#[test]
fn token_defaults_match_sample_fixture() {
    let cli = TokenCli::parse_from(["token", "--format", "hex"]);
    let mut out = Vec::new();
    run_token(&cli.args, &mut out).unwrap();

    let expected = sample_envelope(&FixtureConfig::default()).unwrap();
    let printed = String::from_utf8(out).unwrap();
    assert_eq!(printed.trim_end(), cwt_fixture::to_hex(expected.as_bytes()));
}

#[test]
fn unknown_format_is_rejected_by_parser() {
    let result = TokenCli::try_parse_from(["token", "--format", "yaml"]);
    assert!(result.is_err());
}

#[test]
fn keygen_hmac_flags_parse() {
    let args = keygen_args(&["cwt-fixture", "keygen", "hmac", "--bits", "512", "--json"]);
    assert!(args.json);
    assert!(matches!(args.command, KeygenCommand::Hmac { bits: 512, .. }));

    let mut out = Vec::new();
    run_keygen(&args, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["bits"], 512);
    assert_eq!(value["jwk"]["alg"], "HS512");
}

#[test]
fn keygen_es256_defaults_to_p256() {
    let args = keygen_args(&["cwt-fixture", "keygen", "es256", "--kid", "test-key", "--json"]);

    let mut out = Vec::new();
    run_keygen(&args, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["kid"], "test-key");
    assert_eq!(value["private_jwk"]["crv"], "P-256");
}
