use std::fs;
use std::path::Path;

use tarot_core::generator::config::TEMPLATE;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;
    fs::write(dir.join("deck_config.json"), TEMPLATE)
        .map_err(|e| format!("cannot write deck_config.json: {e}"))?;

    println!("Created deck '{name}' in {name}/");
    println!("  deck_config.json  — word tables and title distribution");
    println!();
    println!("Get started:");
    println!("  cd {name}");
    println!("  # Edit deck_config.json to fill in your word tables");
    println!("  tarot generate deck_config.json   # Build the deck");
    println!("  tarot draw -c deck_oracle.json    # Draw from it");

    Ok(())
}
