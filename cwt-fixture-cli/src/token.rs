//! # Token Subcommand
//!
//! Builds the sample COSE_Sign1/CWT and prints it in the requested
//! encodings, optionally followed by a structural summary.

use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};

use cwt_fixture::fixture::{FixtureConfig, sample_envelope};
use cwt_fixture::{Algorithm, DEFAULT_KID, EncodedOutput, Profile};

use crate::report::Sign1Summary;

/// Arguments for the `token` subcommand.
#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Encoder profile bounding integer and length arguments.
    #[arg(long, value_enum, default_value_t = ProfileArg::Full)]
    pub profile: ProfileArg,

    /// Key identifier written to the unprotected header.
    #[arg(long, default_value = DEFAULT_KID)]
    pub kid: String,

    /// Algorithm written to the protected header.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Es256)]
    pub alg: AlgorithmArg,

    /// Placeholder signature length in bytes (defaults to the algorithm's).
    #[arg(long)]
    pub signature_len: Option<usize>,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::All)]
    pub format: OutputFormat,

    /// Append a per-slot structural summary.
    #[arg(long)]
    pub summary: bool,
}

impl TokenArgs {
    /// Converts the arguments into a fixture configuration.
    #[must_use]
    pub fn config(&self) -> FixtureConfig {
        let config = FixtureConfig::new()
            .with_kid(self.kid.as_str())
            .with_algorithm(self.alg.into())
            .with_profile(self.profile.into());
        match self.signature_len {
            Some(len) => config.with_signature_len(len),
            None => config,
        }
    }
}

impl Default for TokenArgs {
    fn default() -> Self {
        Self {
            profile: ProfileArg::Full,
            kid: DEFAULT_KID.to_string(),
            alg: AlgorithmArg::Es256,
            signature_len: None,
            format: OutputFormat::All,
            summary: false,
        }
    }
}

/// Command-line spelling of [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// 4-byte integers and 1-byte lengths.
    Minimal,
    /// Every argument up to 8 bytes.
    Full,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Minimal => Self::Minimal,
            ProfileArg::Full => Self::Full,
        }
    }
}

/// Command-line spelling of [`Algorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// ECDSA P-256 with SHA-256.
    Es256,
    /// ECDSA P-384 with SHA-384.
    Es384,
    /// ECDSA P-521 with SHA-512.
    Es512,
    /// HMAC with SHA-256.
    Hmac256,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Es256 => Self::Es256,
            AlgorithmArg::Es384 => Self::Es384,
            AlgorithmArg::Es512 => Self::Es512,
            AlgorithmArg::Hmac256 => Self::Hmac256,
        }
    }
}

/// How the token is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Length, hex and base64url, one per line.
    All,
    /// Lowercase hex only.
    Hex,
    /// Unpadded base64url only.
    Base64url,
    /// The encoded bytes themselves.
    Raw,
    /// A JSON object with encodings, layout and diagnostic notation.
    Json,
}

/// Execute the token subcommand.
///
/// # Errors
///
/// Fails if the envelope exceeds the selected profile, if `--summary` is
/// combined with a format that cannot carry it, or if writing fails.
pub fn run_token<W: Write>(args: &TokenArgs, out: &mut W) -> Result<u8> {
    if args.summary && matches!(args.format, OutputFormat::Raw | OutputFormat::Json) {
        bail!("--summary cannot be combined with --format raw or json");
    }

    let config = args.config();
    tracing::info!(
        profile = %config.profile,
        alg = %config.algorithm,
        kid = %config.kid,
        "assembling sample token"
    );

    let token = sample_envelope(&config).context("failed to assemble sample token")?;
    let bytes = token.as_bytes();
    tracing::debug!(len = bytes.len(), layout = ?token.layout(), "token assembled");

    match args.format {
        OutputFormat::All => {
            let encodings = EncodedOutput::new(bytes);
            writeln!(out, "length:    {}", encodings.len)?;
            writeln!(out, "hex:       {}", encodings.hex)?;
            writeln!(out, "base64url: {}", encodings.base64url)?;
        }
        OutputFormat::Hex => writeln!(out, "{}", cwt_fixture::to_hex(bytes))?,
        OutputFormat::Base64url => writeln!(out, "{}", cwt_fixture::to_base64url(bytes))?,
        OutputFormat::Raw => out.write_all(bytes)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &Sign1Summary::new(&token))
                .context("failed to serialize token summary")?;
            writeln!(out)?;
        }
    }

    if args.summary {
        writeln!(out)?;
        write!(out, "{}", Sign1Summary::new(&token))?;
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &TokenArgs) -> Result<String> {
        let mut out = Vec::new();
        run_token(args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn default_prints_three_encodings() {
        let text = run(&TokenArgs::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("length:    "));
        assert!(lines[1].starts_with("hex:       8443a10126"));
        assert!(lines[2].starts_with("base64url: hEOhASah"));
    }

    #[test]
    fn hex_format_is_bare() {
        let args = TokenArgs {
            format: OutputFormat::Hex,
            ..TokenArgs::default()
        };
        let text = run(&args).unwrap();

        assert!(text.starts_with("8443a10126"));
        assert!(text.trim_end().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn raw_format_writes_bytes() {
        let args = TokenArgs {
            format: OutputFormat::Raw,
            ..TokenArgs::default()
        };
        let mut out = Vec::new();
        run_token(&args, &mut out).unwrap();

        let expected = sample_envelope(&FixtureConfig::default()).unwrap();
        assert_eq!(out, expected.as_bytes());
    }

    #[test]
    fn json_format_parses() {
        let args = TokenArgs {
            format: OutputFormat::Json,
            ..TokenArgs::default()
        };
        let value: serde_json::Value = serde_json::from_str(&run(&args).unwrap()).unwrap();

        assert_eq!(value["algorithm"], -7);
        assert!(
            value["encodings"]["hex"]
                .as_str()
                .unwrap()
                .starts_with("8443")
        );
    }

    #[test]
    fn kid_and_alg_flow_into_token() {
        let args = TokenArgs {
            kid: "other".into(),
            alg: AlgorithmArg::Es384,
            summary: true,
            ..TokenArgs::default()
        };
        let text = run(&args).unwrap();

        assert!(text.contains("kid          other"));
        assert!(text.contains("alg          ES384 (-35)"));
        assert!(text.contains("    signature       98 bytes\n"));
    }

    #[test]
    fn minimal_profile_rejects_long_signature() {
        let args = TokenArgs {
            profile: ProfileArg::Minimal,
            signature_len: Some(256),
            ..TokenArgs::default()
        };
        let err = run(&args).unwrap_err();
        let message = format!("{err:#}");

        assert!(message.starts_with("failed to assemble sample token"));
        assert!(message.contains("exceeds the minimal profile maximum of 255"));
    }

    #[test]
    fn summary_with_raw_is_rejected() {
        let args = TokenArgs {
            format: OutputFormat::Raw,
            summary: true,
            ..TokenArgs::default()
        };
        assert!(run(&args).is_err());
    }
}
