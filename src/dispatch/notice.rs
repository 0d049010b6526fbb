//! User-visible outcomes

/// What the user is told after a voice activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SearchComplete,
    SearchFailed,
    /// Carries the resolved application name
    Opened(String),
    OpenFailed,
    /// Carries the resolved media title
    Playing(String),
    PlayFailed,
    NotRecognized,
    RecognitionFailed,
    /// A previous activation is still in flight
    Busy,
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Notice::SearchFailed
                | Notice::OpenFailed
                | Notice::PlayFailed
                | Notice::RecognitionFailed
        )
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::SearchComplete => write!(f, "Search complete."),
            Notice::SearchFailed => write!(f, "Search failed."),
            Notice::Opened(app) => write!(f, "Opening {}.", app),
            Notice::OpenFailed => write!(f, "Could not open the application."),
            Notice::Playing(title) => write!(f, "Playing {}.", title),
            Notice::PlayFailed => write!(f, "Could not play the media."),
            Notice::NotRecognized => write!(f, "Command not recognized."),
            Notice::RecognitionFailed => {
                write!(f, "There was an error with the speech recognition.")
            }
            Notice::Busy => write!(f, "Still working on the previous command."),
        }
    }
}
