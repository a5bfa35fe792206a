use clap::ValueEnum;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AiProvider {
    /// OpenAI Chat Completions API
    Openai,
    Claude,
    Codex,
    Gemini,
}

impl AiProvider {
    /// CLI経由で呼び出すプロバイダのコマンド名（APIプロバイダは `None`）
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            AiProvider::Openai => None,
            AiProvider::Claude => Some("claude"),
            AiProvider::Codex => Some("codex"),
            AiProvider::Gemini => Some("gemini"),
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiProvider::Openai => write!(f, "openai"),
            AiProvider::Claude => write!(f, "claude"),
            AiProvider::Codex => write!(f, "codex"),
            AiProvider::Gemini => write!(f, "gemini"),
        }
    }
}
