//! `sagebot personas` — List the available assistants.

use sagebot_core::persona;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🌿 SageBot Assistants");
    println!("=====================");
    println!();
    println!("  ┌──────────┬──────────────────────────┬────────────────────────────────────────────┐");
    println!("  │ Id       │ Name                     │ Sections                                   │");
    println!("  ├──────────┼──────────────────────────┼────────────────────────────────────────────┤");
    for p in persona::all() {
        let sections = p
            .layout
            .fields
            .iter()
            .map(|f| f.key)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  │ {:<8} │ {:<24} │ {:<42} │", p.id.as_str(), p.name, sections);
    }
    println!("  └──────────┴──────────────────────────┴────────────────────────────────────────────┘");
    println!();
    println!("  Start one with:");
    println!("    sagebot chat --persona <id>");
    println!();
    println!("  Default persona:");
    println!("    default_persona = \"health\"   (config.toml, or SAGEBOT_PERSONA)");

    Ok(())
}
