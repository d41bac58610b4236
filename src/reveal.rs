//! One-way section reveal and the one-shot skill-bar animation.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::collections::HashSet;

/// What a section entering the viewport should trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealOutcome {
    /// First time this section was seen: add the reveal class.
    pub reveal: bool,
    /// First time the skills section was seen: run the bar animation.
    pub animate_skills: bool,
}

/// Remembers which sections were already revealed.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    skills_id: String,
    revealed: HashSet<usize>,
    skills_animated: bool,
}

impl RevealTracker {
    #[must_use]
    pub fn new(skills_id: impl Into<String>) -> Self {
        Self { skills_id: skills_id.into(), revealed: HashSet::new(), skills_animated: false }
    }

    /// Record that the section at `index` (with optional `id`) is intersecting.
    pub fn on_intersecting(&mut self, index: usize, id: Option<&str>) -> RevealOutcome {
        let reveal = self.revealed.insert(index);
        let animate_skills = !self.skills_animated && id == Some(self.skills_id.as_str());
        if animate_skills {
            self.skills_animated = true;
        }
        RevealOutcome { reveal, animate_skills }
    }
}
