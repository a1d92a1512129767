//! Engine facade: the public entry point of carbonscribe.
//!
//! A [`FootprintEngine`] owns the linguistic provider and the compiled alias
//! normalizer. Everything else (span trackers, extractions, reports) is built
//! fresh per call, so one engine can serve many threads at once.

use std::sync::Arc;

use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use crate::alias::{AliasNormalizer, AliasTable, NormalizedText};
use crate::calc::{self, EmissionReport};
use crate::config::EngineConfig;
use crate::error::{ScribeError, ScribeResult};
use crate::extract::{self, Extraction};
use crate::lingua::{LinguisticProvider, RuleBasedProvider};

/// Fold compatibility characters (full-width digits, `㎞`, `㎏`) to their
/// plain forms, then lowercase.
pub fn prepare_input(text: &str) -> String {
    let folded: String = text.nfkc().collect();
    folded.to_lowercase()
}

/// Extraction-and-scoring pipeline.
pub struct FootprintEngine {
    config: EngineConfig,
    provider: Arc<dyn LinguisticProvider>,
    aliases: AliasNormalizer,
}

impl std::fmt::Debug for FootprintEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FootprintEngine")
            .field("config", &self.config)
            .field("provider", &self.provider.name())
            .field("alias_variants", &self.aliases.variant_count())
            .finish()
    }
}

impl FootprintEngine {
    /// Create an engine backed by the bundled rule-based provider.
    pub fn new(config: EngineConfig) -> ScribeResult<Self> {
        Self::with_provider(config, Arc::new(RuleBasedProvider::new()))
    }

    /// Create an engine with a custom provider.
    ///
    /// The alias table comes from `config.alias_file` when set, otherwise
    /// the bundled table is used.
    pub fn with_provider(
        config: EngineConfig,
        provider: Arc<dyn LinguisticProvider>,
    ) -> ScribeResult<Self> {
        let table = match &config.alias_file {
            Some(path) => AliasTable::load(path)?,
            None => AliasTable::bundled(),
        };
        Self::with_aliases(config, provider, &table)
    }

    /// Create an engine from an explicit alias table. `config.alias_file` is
    /// ignored.
    pub fn with_aliases(
        config: EngineConfig,
        provider: Arc<dyn LinguisticProvider>,
        table: &AliasTable,
    ) -> ScribeResult<Self> {
        let aliases = AliasNormalizer::compile(table, provider.as_ref())
            .map_err(|e| ScribeError::from(e).flatten())?;

        tracing::info!(
            provider = provider.name(),
            alias_categories = aliases.categories().count(),
            alias_variants = aliases.variant_count(),
            fallback_detectors = config.fallback_detectors,
            "initializing carbonscribe engine"
        );

        Ok(Self {
            config,
            provider,
            aliases,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Prepare `text` and rewrite alias variants to their labels.
    pub fn normalize(&self, text: &str) -> ScribeResult<NormalizedText> {
        let prepared = prepare_input(text);
        self.aliases
            .normalize(self.provider.as_ref(), &prepared)
            .map_err(|e| ScribeError::from(e).flatten())
    }

    /// Run normalization, the seven extractors and, when enabled, the
    /// fallback detectors.
    pub fn extract(&self, text: &str) -> ScribeResult<Extraction> {
        let normalized = self.normalize(text)?;
        let mut extraction = extract::run(&normalized);

        let needs_fallback = extraction.activity.food.is_empty()
            || extraction.activity.shopping.spend == 0.0;
        if self.config.fallback_detectors && needs_fallback {
            let doc = self.provider.analyze(&normalized.text)?;
            extraction.apply_fallbacks(&doc);
        }

        Ok(extraction)
    }

    /// Score one free-form description.
    pub fn analyze(&self, text: &str) -> ScribeResult<EmissionReport> {
        let extraction = self.extract(text)?;
        let report = calc::calculate(&extraction.activity);
        tracing::debug!(
            total = report.total(),
            fallbacks = extraction.fallbacks().len(),
            "analysis complete"
        );
        Ok(report)
    }

    /// Score many descriptions in parallel. Results keep the input order.
    pub fn analyze_batch<S>(&self, inputs: &[S]) -> Vec<ScribeResult<EmissionReport>>
    where
        S: AsRef<str> + Sync,
    {
        inputs
            .par_iter()
            .map(|text| self.analyze(text.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::Category;
    use crate::lingua::{Doc, LinguisticError, LinguisticResult};

    struct Offline;

    impl LinguisticProvider for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn analyze(&self, _text: &str) -> LinguisticResult<Doc> {
            Err(LinguisticError::Unavailable {
                provider: "offline".into(),
                message: "model not loaded".into(),
            })
        }
    }

    fn engine() -> FootprintEngine {
        FootprintEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn prepare_input_folds_full_width() {
        assert_eq!(prepare_input("Drove １０㎞"), "drove 10km");
    }

    #[test]
    fn car_and_chicken_scenario() {
        let report = engine()
            .analyze("I drove 10km in a car and ate 200g chicken")
            .unwrap();
        assert_eq!(report.category_total(Category::Transport), 1.2);
        assert_eq!(report.category_total(Category::Food), 1.2);
        assert_eq!(report.total(), 2.4);
    }

    #[test]
    fn nothing_recognizable_scores_zero() {
        let report = engine().analyze("had a quiet day reading").unwrap();
        assert_eq!(report.total(), 0.0);
        assert!(report.percentages().is_none());
    }

    #[test]
    fn normalize_reports_matched_labels() {
        let normalized = engine().normalize("Took a TAXI home").unwrap();
        assert!(normalized.text.contains("cab"));
        assert_eq!(normalized.labels_in("transport").collect::<Vec<_>>(), ["cab"]);
    }

    #[test]
    fn failing_provider_is_a_linguistic_error() {
        // The bundled alias table is compiled through the provider.
        let err = FootprintEngine::with_provider(EngineConfig::default(), Arc::new(Offline))
            .unwrap_err();
        assert!(matches!(err, ScribeError::Linguistic(_)));
    }

    #[test]
    fn failing_provider_with_empty_table_fails_at_analysis() {
        let engine =
            FootprintEngine::with_aliases(EngineConfig::default(), Arc::new(Offline), &AliasTable::new())
                .unwrap();
        let err = engine.analyze("drove 10 km by car").unwrap_err();
        assert!(matches!(err, ScribeError::Linguistic(_)));
    }

    #[test]
    fn batch_keeps_input_order() {
        let inputs = ["drove 10km by car", "nothing here", "used 5kg of pet plastic"];
        let reports = engine().analyze_batch(&inputs);
        assert_eq!(reports.len(), 3);
        let totals: Vec<f64> = reports.into_iter().map(|r| r.unwrap().total()).collect();
        assert_eq!(totals, [1.2, 0.0, 30.0]);
    }
}
