use super::error::EngineError;
use super::traits::SceneEngine;
use crate::core::style::{BACKGROUND_KEY, StyleRegistry, StyleSettings, StyleSpec};
use tracing::debug;

/// Resolves a style request against a registry and pushes it into the engine.
pub struct StyleApplier<'a> {
    registry: &'a StyleRegistry,
}

impl<'a> StyleApplier<'a> {
    pub fn new(registry: &'a StyleRegistry) -> Self {
        Self { registry }
    }

    /// Applies every setting in order. `bg_color` goes through the engine's
    /// background setter; everything else through the generic setting call.
    pub fn apply<E: SceneEngine>(
        &self,
        engine: &mut E,
        spec: &StyleSpec,
    ) -> Result<StyleSettings, EngineError> {
        let settings = self.registry.resolve(spec)?;
        debug!("Applying style {} ({} settings)", spec, settings.len());

        for (key, value) in settings.iter() {
            if key == BACKGROUND_KEY {
                engine.bg_color(&value.to_string())?;
            } else {
                engine.set(key, value)?;
            }
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::{SettingValue, StyleError};
    use crate::engine::testing::{Call, MockEngine};

    #[test]
    fn background_key_uses_background_setter() {
        let registry = StyleRegistry::new();
        let mut engine = MockEngine::new();

        StyleApplier::new(&registry)
            .apply(&mut engine, &StyleSpec::Registered("default".to_string()))
            .unwrap();

        let calls = engine.calls();
        assert_eq!(calls[0], Call::BgColor("white".to_string()));
        assert!(calls.contains(&Call::Set("antialias".to_string(), SettingValue::Integer(2))));
        assert!(
            !calls
                .iter()
                .any(|c| matches!(c, Call::Set(key, _) if key == BACKGROUND_KEY))
        );
        assert_eq!(calls.len(), 6);
    }

    #[test]
    fn inline_settings_are_applied_in_order() {
        let registry = StyleRegistry::new();
        let spec = registry
            .parse(r#"{"ray_trace_mode": 3, "bg_color": "black"}"#)
            .unwrap();
        let mut engine = MockEngine::new();

        StyleApplier::new(&registry).apply(&mut engine, &spec).unwrap();

        assert_eq!(
            engine.calls(),
            &[
                Call::Set("ray_trace_mode".to_string(), SettingValue::Integer(3)),
                Call::BgColor("black".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_registered_style_is_a_style_error() {
        let registry = StyleRegistry::new();
        let mut engine = MockEngine::new();
        let result = StyleApplier::new(&registry)
            .apply(&mut engine, &StyleSpec::Registered("nope".to_string()));
        assert!(matches!(
            result,
            Err(EngineError::Style(StyleError::UnknownStyle(_)))
        ));
        assert!(engine.calls().is_empty());
    }
}
