//! Model aliases accepted on the wire and their per-provider identifiers.

/// Short model name a client may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelAlias {
    #[default]
    Llama,
    Mistral,
}

impl ModelAlias {
    /// Missing or unknown aliases resolve to [`ModelAlias::Llama`].
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("llama") => ModelAlias::Llama,
            Some("mistral") => ModelAlias::Mistral,
            _ => ModelAlias::default(),
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ModelAlias::Llama => "llama",
            ModelAlias::Mistral => "mistral",
        }
    }
}

/// Provider-specific model identifiers for each alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelMap {
    pub llama: &'static str,
    pub mistral: &'static str,
}

impl ModelMap {
    pub fn resolve(&self, alias: ModelAlias) -> &'static str {
        match alias {
            ModelAlias::Llama => self.llama,
            ModelAlias::Mistral => self.mistral,
        }
    }
}

pub const OPENROUTER_MODELS: ModelMap = ModelMap {
    llama: "meta-llama/llama-4-maverick:free",
    mistral: "mistralai/mistral-small-3.1-24b-instruct:free",
};

pub const TOGETHER_MODELS: ModelMap = ModelMap {
    llama: "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free",
    mistral: "mistralai/Mistral-7B-Instruct-v0.3",
};

pub const HUGGINGFACE_MODELS: ModelMap = ModelMap {
    llama: "meta-llama/Llama-3.1-8B-Instruct",
    mistral: "mistralai/Mistral-7B-Instruct-v0.3",
};

pub const MOCK_MODELS: ModelMap = ModelMap {
    llama: "mock/llama",
    mistral: "mock/mistral",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_alias_uses_default_model() {
        assert_eq!(ModelAlias::from_key(Some("gpt-4")), ModelAlias::Llama);
        assert_eq!(ModelAlias::from_key(None), ModelAlias::Llama);
        assert_eq!(
            OPENROUTER_MODELS.resolve(ModelAlias::from_key(Some("claude"))),
            "meta-llama/llama-4-maverick:free"
        );
    }

    #[test]
    fn mistral_resolves_per_provider() {
        let alias = ModelAlias::from_key(Some("mistral"));
        assert_eq!(
            OPENROUTER_MODELS.resolve(alias),
            "mistralai/mistral-small-3.1-24b-instruct:free"
        );
        assert_eq!(
            TOGETHER_MODELS.resolve(alias),
            "mistralai/Mistral-7B-Instruct-v0.3"
        );
    }
}
