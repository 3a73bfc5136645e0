use std::fs;
use std::io::{self, Read as _};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use sigil::claims::StandardClaims;
use sigil::key::Key;
use sigil::signer::by_alg;
use sigil::token::Token;

#[derive(Parser)]
#[command(name = "sigil", about = "Compact signed tokens")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a compact token and display it as JSON, without verifying.
    Inspect {
        /// Compact token string. If omitted, reads from stdin.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Sign a new token with standard claims.
    Sign {
        /// Algorithm: ES256, ES384, ES512, ES256k, or ED25519.
        #[arg(short, long)]
        algorithm: String,

        /// Key file: hex-encoded private scalar (NIST/secp256k1 curves)
        /// or 32-byte seed (Ed25519).
        #[arg(short, long)]
        key: String,

        /// Token validity duration (e.g. "4d", "1h", "30m").
        #[arg(short, long)]
        duration: String,

        /// Issuer claim (optional)
        #[arg(long)]
        issuer: Option<String>,

        /// Subject claim (optional)
        #[arg(long)]
        subject: Option<String>,

        /// Audience claim (optional)
        #[arg(long)]
        audience: Option<String>,

        /// Key identifier placed in the header (optional)
        #[arg(long)]
        kid: Option<String>,
    },

    /// Verify a compact token's signature against a public key.
    Verify {
        /// Algorithm: ES256, ES384, ES512, ES256k, or ED25519.
        #[arg(short, long)]
        algorithm: String,

        /// Key file: hex-encoded SEC1 public point (curves) or 32-byte
        /// public key (Ed25519).
        #[arg(short, long)]
        key: String,

        /// Compact token string. If omitted, reads from stdin.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Generate a key pair for the given algorithm, hex-encoded.
    GenerateKey {
        /// Algorithm: ES256, ES384, ES512, ES256k, or ED25519.
        #[arg(short, long)]
        algorithm: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Inspect { token } => cmd_inspect(token),
        Command::Sign {
            algorithm,
            key,
            duration,
            issuer,
            subject,
            audience,
            kid,
        } => cmd_sign(&algorithm, &key, &duration, issuer, subject, audience, kid),
        Command::Verify {
            algorithm,
            key,
            token,
        } => cmd_verify(&algorithm, &key, token),
        Command::GenerateKey { algorithm } => cmd_generate_key(&algorithm),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn cmd_inspect(token_arg: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let compact = read_token_string(token_arg)?;
    let token: Token<serde_json::Value> = Token::parse(&compact)?;

    let output = serde_json::json!({
        "header": token.header,
        "payload": token.payload,
        "signature_hex": hex::encode(&token.signature),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn cmd_sign(
    algorithm: &str,
    key_path: &str,
    duration_str: &str,
    issuer: Option<String>,
    subject: Option<String>,
    audience: Option<String>,
    kid: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheme = by_alg(algorithm).ok_or_else(|| format!("unknown algorithm: {algorithm}"))?;
    let key = read_signing_key(algorithm, key_path)?;

    let duration: std::time::Duration = duration_str
        .parse::<humantime::Duration>()
        .map_err(|e| format!("invalid duration '{duration_str}': {e}"))?
        .into();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before epoch")
        .as_secs() as i64;

    let expires_at = now
        .checked_add(duration.as_secs() as i64)
        .ok_or("duration overflow")?;

    let claims = StandardClaims {
        expires_at,
        issued_at: now,
        issuer: issuer.unwrap_or_default(),
        subject: subject.unwrap_or_default(),
        audience: audience.unwrap_or_default(),
        ..Default::default()
    };

    let mut token = match kid {
        Some(kid) => Token::with_key_id(claims, kid)?,
        None => Token::new(claims)?,
    };

    println!("{}", token.sign(scheme, &key)?);
    Ok(())
}

fn cmd_verify(
    algorithm: &str,
    key_path: &str,
    token_arg: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheme = by_alg(algorithm).ok_or_else(|| format!("unknown algorithm: {algorithm}"))?;
    let key = read_verifying_key(algorithm, key_path)?;

    let compact = read_token_string(token_arg)?;
    let token: Token<serde_json::Value> = Token::parse(&compact)?;

    if !token.verify(scheme, &key) {
        return Err("signature verification failed".into());
    }

    let output = serde_json::json!({
        "header": token.header,
        "payload": token.payload,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn cmd_generate_key(algorithm: &str) -> Result<(), Box<dyn std::error::Error>> {
    match algorithm {
        "ES256" => {
            let sk = p256::ecdsa::SigningKey::random(&mut OsRng);
            print_keypair(&sk.to_bytes(), &sk.verifying_key().to_sec1_bytes());
        }
        "ES384" => {
            let sk = p384::ecdsa::SigningKey::random(&mut OsRng);
            print_keypair(&sk.to_bytes(), &sk.verifying_key().to_sec1_bytes());
        }
        "ES512" => {
            let sk = p521::ecdsa::SigningKey::random(&mut OsRng);
            let vk = p521::ecdsa::VerifyingKey::from(&sk);
            print_keypair(&sk.to_bytes(), &vk.to_encoded_point(false).to_bytes());
        }
        "ES256k" => {
            let sk = k256::ecdsa::SigningKey::random(&mut OsRng);
            print_keypair(&sk.to_bytes(), &sk.verifying_key().to_sec1_bytes());
        }
        "ED25519" => {
            let sk = ed25519_dalek::SigningKey::generate(&mut OsRng);
            print_keypair(&sk.to_bytes(), &sk.verifying_key().to_bytes());
        }
        _ => return Err(format!("unknown algorithm: {algorithm}").into()),
    }
    Ok(())
}

fn print_keypair(private: &[u8], public: &[u8]) {
    println!("private: {}", hex::encode(private));
    println!("public:  {}", hex::encode(public));
}

fn read_token_string(token_arg: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match token_arg {
        Some(t) => Ok(t.trim().to_owned()),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf.trim().to_owned())
        }
    }
}

fn read_key_bytes(path: &str) -> Result<Zeroizing<Vec<u8>>, Box<dyn std::error::Error>> {
    let text = Zeroizing::new(fs::read_to_string(path)?);
    let bytes = hex::decode(text.trim()).map_err(|e| format!("key file is not hex: {e}"))?;
    Ok(Zeroizing::new(bytes))
}

fn read_signing_key(algorithm: &str, path: &str) -> Result<Key, Box<dyn std::error::Error>> {
    let bytes = read_key_bytes(path)?;
    let key = match algorithm {
        "ES256" => Key::from(p256::ecdsa::SigningKey::from_slice(&bytes)?),
        "ES384" => Key::from(p384::ecdsa::SigningKey::from_slice(&bytes)?),
        "ES512" => Key::from(p521::ecdsa::SigningKey::from_slice(&bytes)?),
        "ES256k" => Key::from(k256::ecdsa::SigningKey::from_slice(&bytes)?),
        "ED25519" => {
            let seed: [u8; 32] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| "Ed25519 seed must be 32 bytes")?;
            Key::from(ed25519_dalek::SigningKey::from_bytes(&seed))
        }
        _ => return Err(format!("unknown algorithm: {algorithm}").into()),
    };
    Ok(key)
}

fn read_verifying_key(algorithm: &str, path: &str) -> Result<Key, Box<dyn std::error::Error>> {
    let bytes = read_key_bytes(path)?;
    let key = match algorithm {
        "ES256" => Key::from(p256::ecdsa::VerifyingKey::from_sec1_bytes(&bytes)?),
        "ES384" => Key::from(p384::ecdsa::VerifyingKey::from_sec1_bytes(&bytes)?),
        "ES512" => Key::from(p521::ecdsa::VerifyingKey::from_sec1_bytes(&bytes)?),
        "ES256k" => Key::from(k256::ecdsa::VerifyingKey::from_sec1_bytes(&bytes)?),
        "ED25519" => {
            let pk: [u8; 32] = bytes
                .as_slice()
                .try_into()
                .map_err(|_| "Ed25519 public key must be 32 bytes")?;
            Key::from(ed25519_dalek::VerifyingKey::from_bytes(&pk)?)
        }
        _ => return Err(format!("unknown algorithm: {algorithm}").into()),
    };
    Ok(key)
}
