//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - adiabatic quantum evolution for small molecules",
        style("Evoqution").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  evoq-sim        Adiabatic Schrödinger evolution engine");
    println!("  evoq-catalog    Molecule reference table");
    println!("  evoq-dashboard  JSON web API");
    println!("  evoq-cli        Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
