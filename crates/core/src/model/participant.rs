use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParticipantError {
    #[error("Name is required")]
    MissingName,

    #[error("Roll No. is required")]
    MissingRollNo,

    #[error("Please select a branch")]
    MissingBranch,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown branch: {0}")]
pub struct UnknownBranch(pub String);

//
// ─── BRANCH ────────────────────────────────────────────────────────────────────
//

/// Fixed list of branches a participant can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    ComputerScience,
    ElectronicsAndComputerScience,
    Electronics,
    InformationTechnology,
    AiMl,
}

impl Branch {
    pub const ALL: [Branch; 5] = [
        Branch::ComputerScience,
        Branch::ElectronicsAndComputerScience,
        Branch::Electronics,
        Branch::InformationTechnology,
        Branch::AiMl,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Branch::ComputerScience => "Computer Science and Engineering",
            Branch::ElectronicsAndComputerScience => "Electronics and CS Engineering",
            Branch::Electronics => "Electronics",
            Branch::InformationTechnology => "Information Technology Engineering",
            Branch::AiMl => "AI & ML",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Branch {
    type Err = UnknownBranch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Branch::ALL
            .into_iter()
            .find(|b| b.label() == trimmed)
            .ok_or_else(|| UnknownBranch(trimmed.to_string()))
    }
}

//
// ─── PARTICIPANT ───────────────────────────────────────────────────────────────
//

/// Validated identity of the person taking the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    name: String,
    roll_no: String,
    branch: Branch,
}

impl Participant {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn roll_no(&self) -> &str {
        &self.roll_no
    }

    #[must_use]
    pub fn branch(&self) -> Branch {
        self.branch
    }
}

/// Raw identity form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub name: String,
    pub roll_no: String,
    pub branch: Option<Branch>,
}

impl ParticipantDraft {
    /// Every field problem, in form order. Empty when the draft is valid.
    #[must_use]
    pub fn problems(&self) -> Vec<ParticipantError> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push(ParticipantError::MissingName);
        }
        if self.roll_no.trim().is_empty() {
            problems.push(ParticipantError::MissingRollNo);
        }
        if self.branch.is_none() {
            problems.push(ParticipantError::MissingBranch);
        }
        problems
    }

    /// # Errors
    ///
    /// Returns the first field problem found.
    pub fn validate(&self) -> Result<Participant, ParticipantError> {
        if let Some(problem) = self.problems().into_iter().next() {
            return Err(problem);
        }
        let branch = self.branch.ok_or(ParticipantError::MissingBranch)?;
        Ok(Participant {
            name: self.name.trim().to_string(),
            roll_no: self.roll_no.trim().to_string(),
            branch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_reports_every_missing_field() {
        let draft = ParticipantDraft {
            name: "  ".into(),
            ..ParticipantDraft::default()
        };
        assert_eq!(
            draft.problems(),
            vec![
                ParticipantError::MissingName,
                ParticipantError::MissingRollNo,
                ParticipantError::MissingBranch,
            ]
        );
        assert_eq!(draft.validate(), Err(ParticipantError::MissingName));
    }

    #[test]
    fn valid_draft_is_trimmed() {
        let draft = ParticipantDraft {
            name: " Asha ".into(),
            roll_no: "2K22/IT/123 ".into(),
            branch: Some(Branch::InformationTechnology),
        };
        let participant = draft.validate().unwrap();
        assert_eq!(participant.name(), "Asha");
        assert_eq!(participant.roll_no(), "2K22/IT/123");
        assert_eq!(participant.branch(), Branch::InformationTechnology);
    }

    #[test]
    fn branch_round_trips_through_label() {
        for branch in Branch::ALL {
            assert_eq!(branch.label().parse::<Branch>(), Ok(branch));
        }
        assert!("Mechanical".parse::<Branch>().is_err());
    }
}
