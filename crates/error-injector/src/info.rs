use random_engine::{generator_names, integer_distribution_names, real_distribution_names};
use serde::Serialize;

/// Concurrency guarantee of an injector instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadSafety {
    /// One instance may be used from several threads at once.
    Multiple,
}

/// What an injector can be configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectorConfiguration {
    pub thread_safety: ThreadSafety,
    pub generators: Vec<String>,
    pub real_distributions: Vec<String>,
    pub integer_distributions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub injection_modes: Vec<String>,
}

impl InjectorConfiguration {
    pub(crate) fn new(injection_modes: Vec<String>) -> Self {
        fn owned(names: Vec<&'static str>) -> Vec<String> {
            names.into_iter().map(str::to_string).collect()
        }

        Self {
            thread_safety: ThreadSafety::Multiple,
            generators: owned(generator_names()),
            real_distributions: owned(real_distribution_names()),
            integer_distributions: owned(integer_distribution_names()),
            injection_modes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_registered_names() {
        let info = InjectorConfiguration::new(Vec::new());
        assert_eq!(info.thread_safety, ThreadSafety::Multiple);
        assert_eq!(info.generators.len(), 11);
        assert!(info.real_distributions.iter().any(|n| n == "normal_distribution"));
        assert!(info.integer_distributions.iter().any(|n| n == "poisson_distribution"));
        assert!(!info.real_distributions.iter().any(|n| n == "poisson_distribution"));
    }

    #[test]
    fn test_serializes_without_empty_modes() {
        let yaml = serde_yaml::to_string(&InjectorConfiguration::new(Vec::new())).unwrap();
        assert!(yaml.contains("thread_safety: multiple"));
        assert!(!yaml.contains("injection_modes"));
    }
}
