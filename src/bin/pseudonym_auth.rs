use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use pseudonym_auth::{
    Bls12381, CertificateAuthority, CertificateVerifier, DeviceRegistry, PairingGroup,
    ProtocolConfig, Stage, SystemContext, generate_pseudonym,
};
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "pseudonym-auth")]
#[command(about = "Pseudonymous device authentication: one full registration and verification cycle", long_about = None)]
#[command(version)]
struct Args {
    /// Identity of the device to register
    #[arg(short, long, default_value = "Device123")]
    device_id: String,

    /// Requested security level in bits (overrides configuration)
    #[arg(short, long)]
    security_bits: Option<u32>,

    /// Hex-encoded 32-byte seed for a reproducible run (overrides configuration)
    #[arg(long)]
    seed: Option<String>,

    /// Print public values as hex
    #[arg(short, long)]
    verbose: bool,
}

fn report(stage: Stage, label: &str, elapsed: Duration) {
    println!("{label} time: {} microseconds", elapsed.as_micros());
    tracing::debug!(%stage, micros = elapsed.as_micros() as u64, "stage complete");
}

fn run(args: Args) -> pseudonym_auth::Result<()> {
    let mut config = ProtocolConfig::from_env()
        .map_err(|e| pseudonym_auth::Error::Config(e.to_string()))?;
    if let Some(bits) = args.security_bits {
        config.security_bits = bits;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let mut rng = config.rng()?;

    let total = Instant::now();

    let start = Instant::now();
    let ctx = SystemContext::from_config_with_rng(&config, &mut rng)?;
    report(Stage::Setup, "System initialization", start.elapsed());

    let start = Instant::now();
    let mut registry = DeviceRegistry::in_memory();
    let device = registry.enroll(&ctx, args.device_id.as_bytes(), &mut rng)?;
    let elapsed = start.elapsed();
    println!(
        "Device registration complete. Stored hash: {}",
        device.commitment()
    );
    report(Stage::Registration, "Device registration", elapsed);

    let start = Instant::now();
    let verified = generate_pseudonym(&ctx, &device, &mut rng)?;
    let elapsed = start.elapsed();
    println!("Pseudonym generation successful. Pseudonym (x, y) generated.");
    report(Stage::Pseudonym, "Pseudonym generation", elapsed);

    if args.verbose {
        let pseudonym = verified.pseudonym();
        let transcript = verified.transcript();
        println!("  x = {}", hex::encode(Bls12381::g1_to_bytes(pseudonym.x())));
        println!("  y = {}", hex::encode(Bls12381::g1_to_bytes(pseudonym.y())));
        println!("  Y = {}", hex::encode(Bls12381::g1_to_bytes(transcript.commitment())));
        println!("  Z = {}", hex::encode(Bls12381::scalar_to_bytes(transcript.response())));
        println!("  ε = {}", hex::encode(Bls12381::scalar_to_bytes(transcript.challenge())));
    }

    let start = Instant::now();
    let certificate = CertificateAuthority::new(&ctx).issue(&verified);
    let elapsed = start.elapsed();
    println!("Certificate issuance complete.");
    report(Stage::Certification, "Certificate issuance", elapsed);

    if args.verbose {
        println!("  certificate = {}", hex::encode(certificate.to_bytes()));
    }

    let start = Instant::now();
    CertificateVerifier::from_context(&ctx).verify(verified.pseudonym(), &certificate)?;
    let elapsed = start.elapsed();
    println!("Identity verification successful.");
    report(Stage::Verification, "Identity verification", elapsed);

    println!(
        "Total execution time: {} microseconds",
        total.elapsed().as_micros()
    );

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(stage = %e.stage(), "{e}");
            eprintln!("{} failed: {e}", e.stage());
            ExitCode::FAILURE
        }
    }
}
