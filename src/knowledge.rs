//! Static disease knowledge: canonical disease identifiers and their
//! description/treatment text. Pure data, initialized at compile time,
//! never mutated.

use crate::common::canonical_label;

/// Canonical identifiers for the classes the deployed model is trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disease {
    Healthy,
    LeafMiner,
    RedRust,
}

// Canonical label spellings. Labels coming out of the catalog are already
// canonicalized, but `from_label` re-normalizes so callers can pass raw text.
const HEALTHY: &str = "healthy";
const LEAF_MINER: &str = "leaf_miner";
const RED_RUST: &str = "red_rust";

impl Disease {
    pub fn from_label(label: &str) -> Option<Self> {
        match canonical_label(label).as_str() {
            HEALTHY => Some(Disease::Healthy),
            LEAF_MINER => Some(Disease::LeafMiner),
            RED_RUST => Some(Disease::RedRust),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Disease::Healthy => HEALTHY,
            Disease::LeafMiner => LEAF_MINER,
            Disease::RedRust => RED_RUST,
        }
    }
}

/// Description and treatment text for one disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiseaseInfo {
    pub description: &'static str,
    pub treatment: &'static str,
}

/// Substituted when a detected label has no knowledge entry. An undocumented
/// class must not break reporting.
pub const NO_INFO: DiseaseInfo = DiseaseInfo {
    description: "No information available for this class yet.",
    treatment: "No treatment guidance available for this class yet.",
};

const HEALTHY_INFO: DiseaseInfo = DiseaseInfo {
    description: "Healthy leaf with no sign of disease.",
    treatment: "- No treatment needed.\n- Continue routine care.",
};

const LEAF_MINER_INFO: DiseaseInfo = DiseaseInfo {
    description: "Leaf miner larvae carve winding tunnels through the leaf \
                  tissue, yellowing the leaf and reducing photosynthesis.",
    treatment: "- Remove heavily infested leaves.\n\
                - Set pheromone traps.\n\
                - Spray biological agents containing Abamectin or Spinosad.",
};

const RED_RUST_INFO: DiseaseInfo = DiseaseInfo {
    description: "Red rust produces red-orange pustules on the leaf surface, \
                  yellowing the foliage and cutting yield.",
    treatment: "- Prune infected leaves.\n\
                - Improve airflow through the canopy.\n\
                - Spray Copper Oxychloride or Mancozeb.",
};

/// Read-only lookup over the static disease table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnowledgeBase;

impl KnowledgeBase {
    pub fn new() -> Self {
        Self
    }

    pub fn info(&self, disease: Disease) -> &'static DiseaseInfo {
        match disease {
            Disease::Healthy => &HEALTHY_INFO,
            Disease::LeafMiner => &LEAF_MINER_INFO,
            Disease::RedRust => &RED_RUST_INFO,
        }
    }

    /// Resolves a label to its knowledge entry, `None` when the label is
    /// valid for the model but undocumented here.
    pub fn lookup(&self, label: &str) -> Option<&'static DiseaseInfo> {
        Disease::from_label(label).map(|d| self.info(d))
    }

    pub fn is_healthy(&self, label: &str) -> bool {
        Disease::from_label(label) == Some(Disease::Healthy)
    }
}
