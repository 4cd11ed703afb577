//! List rules command implementation.

use fsd_lint::ViolationKind;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<26} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for kind in ViolationKind::ALL {
        println!("{:<10} {:<26} {}", kind.code(), kind.id(), kind.description());
    }

    println!("\nFSD005 is reported only with `report_unknown_layers = true` in [fsd].");
    println!("FSD004 findings carry a fix; apply them with:");
    println!("  fsd-lint check --fix");
}
