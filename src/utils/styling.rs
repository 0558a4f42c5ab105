//! Terminal styling utilities

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static KEY: Emoji<'_, '_> = Emoji("🔑 ", ">> ");
pub static PHONE: Emoji<'_, '_> = Emoji("📱 ", ">> ");
pub static SHIELD: Emoji<'_, '_> = Emoji("🛡️  ", ">> ");

/// Print the application banner
pub fn print_banner(version: &str, subtitle: &str) {
    println!();
    println!(
        "    {} {}",
        style("InfraSee").cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!("    {}", style(subtitle).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print a wizard step header, e.g. `STEP 2/3 │ Verify Code`
pub fn print_step_header(step_num: usize, total: usize, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}/{}", step_num, total)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a labelled value, e.g. `Message id: abc123`
pub fn print_field(label: &str, value: &str) {
    println!("      {} {}", style(format!("{}:", label)).dim(), value);
}
