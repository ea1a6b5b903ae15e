//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Classify { text: String },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Classify { .. } => "classify",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
