//! Prompt modes and their fixed templates.

/// Which prompt template a generation request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    MoleculeDesign,
    ToxicityReport,
    RegulatoryReadiness,
    Comparison,
    VersionHistory,
    Patents,
    Sketch,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::MoleculeDesign,
        Mode::ToxicityReport,
        Mode::RegulatoryReadiness,
        Mode::Comparison,
        Mode::VersionHistory,
        Mode::Patents,
        Mode::Sketch,
    ];

    /// Resolves a wire key. Missing or unknown keys fall back to
    /// [`Mode::MoleculeDesign`] rather than failing.
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("molecule-design") => Mode::MoleculeDesign,
            Some("toxicity-report") => Mode::ToxicityReport,
            Some("regulatory-readiness") => Mode::RegulatoryReadiness,
            Some("comparison") => Mode::Comparison,
            Some("version-history") => Mode::VersionHistory,
            Some("patents") => Mode::Patents,
            Some("sketch") => Mode::Sketch,
            _ => Mode::default(),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Mode::MoleculeDesign => "molecule-design",
            Mode::ToxicityReport => "toxicity-report",
            Mode::RegulatoryReadiness => "regulatory-readiness",
            Mode::Comparison => "comparison",
            Mode::VersionHistory => "version-history",
            Mode::Patents => "patents",
            Mode::Sketch => "sketch",
        }
    }

    /// Builds the prompt, substituting `effect` verbatim.
    pub fn render(self, effect: &str) -> String {
        match self {
            Mode::MoleculeDesign => format!(
                "Design a synthetic molecule that helps with: {effect}. \
                 Describe its structure, effect, and usage."
            ),
            Mode::ToxicityReport => format!(
                "Generate a toxicity profile for a synthetic molecule intended to: {effect}. \
                 Include risks, side effects, and safety thresholds."
            ),
            Mode::RegulatoryReadiness => format!(
                "What are the regulatory approval steps for a molecule targeting: {effect}? \
                 Include FDA and EMA requirements."
            ),
            Mode::Comparison => format!(
                "Compare two molecule strategies to achieve the effect: {effect}. \
                 Include structure, efficiency, and risk."
            ),
            Mode::VersionHistory => format!(
                "Show a version history of improvements for synthetic molecules \
                 developed to address: {effect}."
            ),
            Mode::Patents => format!(
                "Summarize existing patents and prior art relevant to a synthetic molecule \
                 designed for: {effect}. Highlight potential freedom-to-operate concerns."
            ),
            Mode::Sketch => format!(
                "Sketch the chemical structure of a synthetic molecule that helps with: {effect}. \
                 Provide a SMILES string and a short description of each functional group."
            ),
        }
    }
}
