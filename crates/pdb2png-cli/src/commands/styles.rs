use crate::cli::Cli;
use crate::config::{build_registry, load_file_config};
use crate::error::Result;
use pdb2png::core::style::{StyleOrigin, StyleRegistry};
use tracing::info;

pub fn run(cli: &Cli) -> Result<()> {
    let mut file_config = load_file_config(cli)?;
    let registry = build_registry(&mut file_config);
    info!("Listing {} registered style(s).", registry.names().len());
    for line in describe_styles(&registry) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per style: name, origin and its settings in application order.
pub fn describe_styles(registry: &StyleRegistry) -> Vec<String> {
    registry
        .names()
        .into_iter()
        .map(|(name, origin)| {
            let origin = match origin {
                StyleOrigin::Builtin => "built-in",
                StyleOrigin::Custom => "custom",
            };
            let settings = registry
                .get(&name)
                .map(|settings| {
                    settings
                        .iter()
                        .map(|(key, value)| format!("{}={}", key, value))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            format!("{:<16} [{}] {}", name, origin, settings)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdb2png::core::style::StyleSettings;

    #[test]
    fn lists_builtins_sorted_with_settings() {
        let lines = describe_styles(&StyleRegistry::new());
        let names: Vec<&str> = lines
            .iter()
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["dark", "default", "default_bw", "default_cartoon", "muted"]
        );
        let default = lines.iter().find(|l| l.starts_with("default ")).unwrap();
        assert!(default.contains("[built-in]"));
        assert!(default.contains("bg_color=white"));
        assert!(default.contains("antialias=2"));
    }

    #[test]
    fn custom_styles_are_marked_and_shadow_builtins() {
        let mut registry = StyleRegistry::new();
        registry.register("dark", StyleSettings::new().with("bg_color", "grey50"));
        registry.register("poster", StyleSettings::new().with("ray_trace_mode", 3i64));

        let lines = describe_styles(&registry);
        let dark = lines.iter().find(|l| l.starts_with("dark ")).unwrap();
        assert!(dark.contains("[custom]"));
        assert!(dark.ends_with("bg_color=grey50"));
        let poster = lines.iter().find(|l| l.starts_with("poster ")).unwrap();
        assert!(poster.contains("ray_trace_mode=3"));
    }
}
