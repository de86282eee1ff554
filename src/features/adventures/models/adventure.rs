use serde::Serialize;

/// Background gradients assigned to generated adventures by line position
pub const GRADIENTS: [&str; 8] = [
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(135deg, #11998e 0%, #38ef7d 100%)",
    "linear-gradient(135deg, #6a11cb 0%, #2575fc 100%)",
    "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
    "linear-gradient(135deg, #12c2e9 0%, #c471ed 100%)",
    "linear-gradient(135deg, #ff512f 0%, #f09819 100%)",
    "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
    "linear-gradient(135deg, #d299c2 0%, #fef9d7 100%)",
];

/// One quick-start scene suggestion shown as a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdventurePrompt {
    pub theme: String,
    pub lighting: String,
    pub prompt: String,
    pub emoji: String,
    pub title: String,
    pub description: String,
    pub gradient: String,
}

impl AdventurePrompt {
    fn fixed(
        theme: &str,
        lighting: &str,
        prompt: &str,
        emoji: &str,
        title: &str,
        description: &str,
        gradient: &str,
    ) -> Self {
        Self {
            theme: theme.to_string(),
            lighting: lighting.to_string(),
            prompt: prompt.to_string(),
            emoji: emoji.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            gradient: gradient.to_string(),
        }
    }
}

/// Served whenever the model cannot supply four adventures
pub fn fallback_adventures() -> Vec<AdventurePrompt> {
    vec![
        AdventurePrompt::fixed(
            "mysterious-jungle",
            "dappled-sunlight",
            "ancient artifact hunt",
            "🌿",
            "Jungle Quest",
            "Ancient artifact hunt",
            "linear-gradient(135deg, #11998e 0%, #38ef7d 100%)",
        ),
        AdventurePrompt::fixed(
            "floating-castle",
            "magical-aurora",
            "princess rescue mission",
            "🏰",
            "Sky Castle",
            "Princess rescue mission",
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        ),
        AdventurePrompt::fixed(
            "desert-oasis",
            "golden-hour",
            "genie lamp search",
            "🏜️",
            "Desert Oasis",
            "Genie lamp search",
            "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
        ),
        AdventurePrompt::fixed(
            "robot-city",
            "neon-glow",
            "AI uprising battle",
            "🤖",
            "Robot City",
            "AI uprising battle",
            "linear-gradient(135deg, #6a11cb 0%, #2575fc 100%)",
        ),
    ]
}
