//! List command implementation.

use anyhow::Result;
use owo_colors::OwoColorize;
use trainer_core::{GameRegistry, format_thousands};

pub fn run(registry: &GameRegistry) -> Result<()> {
    if registry.is_empty() {
        println!("No games configured.");
        return Ok(());
    }

    for game in registry.iter() {
        println!(
            "{} ({}, {} pointers)",
            game.identity.bold(),
            game.process_name,
            game.pointer_width
        );
        for feature in &game.features {
            if feature.is_supported() {
                let chain: Vec<String> = feature
                    .offsets
                    .iter()
                    .map(|o| format!("{:#X}", o))
                    .collect();
                println!(
                    "  {:<10} {:<20} +{} ({}) via [{}]",
                    feature.key,
                    feature.label,
                    format_thousands(feature.increment),
                    feature.width,
                    chain.join(", ")
                );
            } else {
                println!(
                    "  {:<10} {:<20} {}",
                    feature.key,
                    feature.label,
                    "not supported yet".dimmed()
                );
            }
        }
    }

    Ok(())
}
