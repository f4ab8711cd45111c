/// Fixed mapping from numeric class id to canonical class label, stable for
/// the lifetime of a loaded model.
///
/// Labels are canonicalized once, here, at ingestion: trimmed, lowercased,
/// spaces and hyphens folded to underscores. Every downstream lookup (the
/// knowledge base, the healthy-label test) operates on the canonical form, so
/// "leaf miner", "Leaf-Miner" and "leaf_miner" name the same class.
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    labels: Vec<String>,
}

/// Folds a raw model label into its canonical form.
pub fn canonical_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl ClassCatalog {
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            labels: labels
                .iter()
                .map(|l| canonical_label(l.as_ref()))
                .collect(),
        }
    }

    /// Resolves a class id to its canonical label. `None` means the detector
    /// returned an id outside the loaded model's class set, which is a
    /// contract violation of the adapter, not a reporting concern.
    pub fn label(&self, class_id: usize) -> Option<&str> {
        self.labels.get(class_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
