// src/condition/artifact.rs

use tracing::debug;

use crate::condition::Evaluation;
use crate::source::RunSource;
use crate::types::RunContext;

/// Met once an artifact named exactly `name` exists (case-sensitive).
///
/// A failed listing is folded into "not met" and retried next tick.
pub async fn evaluate_artifact(source: &dyn RunSource, run: &RunContext, name: &str) -> Evaluation {
    let artifacts = match source.list_artifacts(run).await {
        Ok(artifacts) => artifacts,
        Err(e) => {
            debug!(%run, error = %e, "artifact listing failed");
            return Evaluation::not_met(format!("Error checking artifacts: {e}"));
        }
    };

    if artifacts.iter().any(|a| a.name == name) {
        return Evaluation::met(format!("Artifact \"{name}\" found"));
    }

    let available = if artifacts.is_empty() {
        "(none)".to_string()
    } else {
        artifacts
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    Evaluation::not_met(format!(
        "Artifact \"{name}\" not found. Available artifacts: {available}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockRunSource;

    fn run() -> RunContext {
        RunContext::from_slug("acme/widgets", 1).unwrap()
    }

    #[tokio::test]
    async fn exact_name_is_required() {
        let source = MockRunSource::new();
        source.push_artifacts(["Report", "report-v2"]);
        let eval = evaluate_artifact(&source, &run(), "report").await;
        assert!(!eval.met);
        assert_eq!(
            eval.message,
            "Artifact \"report\" not found. Available artifacts: Report, report-v2"
        );
    }

    #[tokio::test]
    async fn found_when_present() {
        let source = MockRunSource::new();
        source.push_artifacts(["coverage", "report"]);
        let eval = evaluate_artifact(&source, &run(), "report").await;
        assert!(eval.met);
        assert!(eval.all_succeeded);
    }

    #[tokio::test]
    async fn listing_error_is_not_met() {
        let source = MockRunSource::new();
        source.push_artifacts_error("503 Service Unavailable");
        let eval = evaluate_artifact(&source, &run(), "report").await;
        assert!(!eval.met);
        assert!(eval.message.contains("Error checking artifacts"));
        assert!(eval.message.contains("503 Service Unavailable"));
    }
}
