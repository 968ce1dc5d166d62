//! Build script for pinbank-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates bank.toml at compile time
//! - Generates the bank layout tables the firmware registers from

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pinbank_core::config::{parse_toml, BankConfig};

fn main() {
    setup_linker();
    let config = validate_config();
    generate_tables(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate bank.toml at compile time
fn validate_config() -> BankConfig {
    println!("cargo:rerun-if-changed=bank.toml");

    let config_path = Path::new("bank.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read bank.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match parse_toml(&config_content) {
        Ok(config) => {
            println!(
                "cargo:warning=bank.toml validated: {} pins, {} aliases",
                config.pin_count(),
                config.aliases.len()
            );
            config
        }
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid bank.toml                                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the validated layout as constant tables
fn generate_tables(config: &BankConfig) {
    let mut out = String::new();

    out.push_str("use pinbank_core::config::{AliasConfig, ChipConfig, PortGroupConfig};\n\n");

    out.push_str("/// Chips in registration order\n");
    out.push_str("pub const CHIPS: &[ChipConfig] = &[\n");
    for chip in &config.chips {
        writeln!(out, "    ChipConfig {{ address: {:#04x} }},", chip.address).unwrap();
    }
    out.push_str("];\n\n");

    out.push_str("/// Port groups registered after the chips\n");
    out.push_str("pub const PORT_GROUPS: &[PortGroupConfig] = &[\n");
    for group in &config.port_groups {
        writeln!(
            out,
            "    PortGroupConfig {{ address: {:#04x}, direction: {:#04x}, latch: {:#04x}, width: {} }},",
            group.address, group.direction, group.latch, group.width
        )
        .unwrap();
    }
    out.push_str("];\n\n");

    out.push_str("/// Aliases installed last\n");
    out.push_str("pub const ALIASES: &[AliasConfig] = &[\n");
    for alias in &config.aliases {
        writeln!(
            out,
            "    AliasConfig {{ virtual_pin: {}, pin: {} }},",
            alias.virtual_pin, alias.pin
        )
        .unwrap();
    }
    out.push_str("];\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("bank.rs"), out).unwrap();
}
