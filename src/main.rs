use anyhow::{Context, Result};
use std::env;
use tracing_subscriber::EnvFilter;

// Use library instead of local modules
use ifsc_registry::{Config, IfscError, IfscRegistry};

const USAGE: &str = "\
Usage: ifsc <command> [args]

Commands:
  validate <CODE>            Check an IFSC code against the dataset
  name <CODE>                Resolve a bank or IFSC code to a bank name
  details <BANK_CODE>        Show bank details for a bank code
  bank-code <BANK_CODE>      Check that a bank code has a known name
  codes <BANK NAME>          List bank codes registered under a name
  ifscs <BANK NAME>          List head-office IFSCs for a bank name
  check <BANK NAME> <IFSC>   Check that an IFSC belongs to a bank
  summary                    Show what was loaded

Environment:
  IFSC_DATA_DIR              Dataset directory (default: data)
  IFSC_FALLBACK_DATA_DIR     Directory used for datasets missing from the first
  RUST_LOG                   Log filter (default: info)";

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    if command == "help" || command == "--help" || command == "-h" {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::from_env();
    let loader = config.loader();
    let registry = IfscRegistry::load(&*loader)
        .with_context(|| format!("Failed to load datasets from {}", config.data_dir.display()))?;

    match run(&registry, command, &args[1..]) {
        Ok(()) => Ok(()),
        Err(CliError::Usage) => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
        Err(CliError::Lookup(e)) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

enum CliError {
    Usage,
    Lookup(IfscError),
}

impl From<IfscError> for CliError {
    fn from(e: IfscError) -> Self {
        CliError::Lookup(e)
    }
}

fn run(registry: &IfscRegistry, command: &str, args: &[String]) -> Result<(), CliError> {
    match (command, args) {
        ("validate", [code]) => {
            if registry.validate(code) {
                println!("✓ {} is valid", code);
            } else {
                println!("✗ {} is not valid", code);
            }
        }

        ("name", [code]) => {
            let name = registry.get_bank_name(code)?;
            if name.is_empty() {
                println!("{} is valid but has no bank name on record", code);
            } else {
                println!("{}", name);
            }
        }

        ("details", [bank_code]) => match registry.get_bank_details(bank_code) {
            Some(details) => {
                println!("🏦 {} ({})", details.name, details.code);
                println!("   Type:       {}", details.bank_type.as_str());
                println!("   IFSC:       {}", details.ifsc);
                println!("   MICR:       {}", details.micr);
                println!("   IIN:        {}", details.iin);
                println!("   APBS:       {}", details.apbs);
                println!("   ACH credit: {}", details.ach_credit);
                println!("   ACH debit:  {}", details.ach_debit);
                println!("   NACH debit: {}", details.nach_debit);
                println!("   UPI:        {}", details.upi);
            }
            None => println!("No details for bank code {}", bank_code),
        },

        ("bank-code", [bank_code]) => {
            if registry.validate_bank_code(bank_code) {
                println!("✓ {} is a known bank code", bank_code);
            } else {
                println!("✗ {} is not a known bank code", bank_code);
            }
        }

        ("codes", name) if !name.is_empty() => {
            for code in registry.get_bank_codes(&name.join(" "))? {
                println!("{}", code);
            }
        }

        ("ifscs", name) if !name.is_empty() => {
            for ifsc in registry.get_ifscs_by_bank_name(&name.join(" "))? {
                println!("{}", ifsc);
            }
        }

        ("check", [name @ .., ifsc]) if !name.is_empty() => {
            let bank_name = name.join(" ");
            if registry.validate_ifsc_for_bank(&bank_name, ifsc)? {
                println!("✓ {} belongs to {}", ifsc, bank_name);
            } else {
                println!("✗ {} does not belong to {}", ifsc, bank_name);
            }
        }

        ("summary", []) => {
            let summary = registry.summary();
            println!("📊 IFSC Registry v{}", ifsc_registry::VERSION);
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            for stat in &summary.datasets {
                println!("{:<22} {:>8} entries  sha256:{}", stat.dataset, stat.entries, &stat.sha256[..12]);
            }
            println!("{:<22} {:>8} names", "reverse index", summary.reverse_names);
        }

        _ => return Err(CliError::Usage),
    }

    Ok(())
}
