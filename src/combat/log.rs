//! Combat logging
//!
//! Records duel events for the status line and post-match review.

use std::fmt::Write as _;
use std::path::Path;

/// A single entry in the combat log
#[derive(Debug, Clone, PartialEq)]
pub struct CombatLogEntry {
    /// Timestamp in match time (seconds since match start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatLogEventType {
    /// A spell left the wand (or a shield went up)
    Cast,
    /// A spell landed
    Hit,
    /// The opponent dodged
    Dodge,
    /// The opponent answered a dodge
    Counter,
    /// A stun, damage-over-time or other lingering effect took hold
    StatusApplied,
    /// A wand hit the floor or was picked back up
    Wand,
    /// Match event (start, end)
    MatchEvent,
}

impl CombatLogEventType {
    pub fn label(&self) -> &'static str {
        match self {
            CombatLogEventType::Cast => "CAST",
            CombatLogEventType::Hit => "HIT",
            CombatLogEventType::Dodge => "DODGE",
            CombatLogEventType::Counter => "COUNTER",
            CombatLogEventType::StatusApplied => "STATUS",
            CombatLogEventType::Wand => "WAND",
            CombatLogEventType::MatchEvent => "MATCH",
        }
    }
}

/// The combat log of the current match
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    /// Clear the log for a new match
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add a new entry to the log
    pub fn log(&mut self, timestamp: f32, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp,
            event_type,
            message,
        });
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.entries.last().map(|e| e.message.as_str())
    }

    /// Render the log as plain text, one line per entry, under a header.
    pub fn to_text(&self, header: &[String]) -> String {
        let mut out = String::new();
        for line in header {
            let _ = writeln!(out, "{}", line);
        }
        if !header.is_empty() {
            out.push('\n');
        }
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "[{:>7.2}s] {:<7} {}",
                entry.timestamp,
                entry.event_type.label(),
                entry.message
            );
        }
        out
    }

    /// Write the log to `path` (or a timestamped file in `match_logs/`).
    ///
    /// Returns the path that was written.
    pub fn save_to_file(&self, header: &[String], path: Option<&str>) -> Result<String, String> {
        let filename = match path {
            Some(path) => path.to_string(),
            None => {
                std::fs::create_dir_all("match_logs")
                    .map_err(|e| format!("Failed to create match_logs/: {}", e))?;
                let stamp = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or_default();
                format!("match_logs/duel_{}.txt", stamp)
            }
        };

        if let Some(parent) = Path::new(&filename).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
        }

        std::fs::write(&filename, self.to_text(header))
            .map_err(|e| format!("Failed to write {}: {}", filename, e))?;

        Ok(filename)
    }
}
