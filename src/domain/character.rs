// Character domain model
use super::snapshot::Snapshot;

const PALETTE: [&str; 8] = [
    "#3b82f6", "#ef4444", "#10b981", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

/// Metadata for one tracked character, as served by the tracker backend
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterProfile {
    pub id: String,
    pub player_id: String,
    pub username: Option<String>,
    pub class: Option<String>,
    pub nickname: Option<String>,
    pub latest: Option<Snapshot>,
}

impl CharacterProfile {
    /// Nickname if set, otherwise "username (class)", otherwise the id
    pub fn display_name(&self) -> String {
        if let Some(nickname) = self.nickname.as_deref().filter(|n| !n.trim().is_empty()) {
            return nickname.to_string();
        }
        match (&self.username, &self.class) {
            (Some(username), Some(class)) => format!("{} ({})", username, format_class(class)),
            (Some(username), None) => username.clone(),
            _ => self.id.clone(),
        }
    }
}

fn format_class(class: &str) -> String {
    // "ARCHER" -> "Archer"
    let lower = class.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display color for the character at `index` in the listing
pub fn palette_color(index: usize) -> String {
    PALETTE[index % PALETTE.len()].to_string()
}

/// One character's identity plus its raw snapshot history
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub color: String,
    pub snapshots: Vec<Snapshot>,
}

impl Series {
    pub fn new(id: String, name: String, color: String, snapshots: Vec<Snapshot>) -> Self {
        Self {
            id,
            name,
            color,
            snapshots,
        }
    }
}
