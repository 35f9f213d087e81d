use serde::{Deserialize, Serialize};

/// The hierarchy level of an artifact, determined by its id's shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Initiative,
    Milestone,
    Issue,
}

impl ArtifactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initiative => "initiative",
            Self::Milestone => "milestone",
            Self::Issue => "issue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "initiative" => Some(Self::Initiative),
            "milestone" => Some(Self::Milestone),
            "issue" => Some(Self::Issue),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An artifact id broken into its hierarchy segments.
///
/// Ids form a strict three-level hierarchy: initiatives are one or more
/// uppercase letters (`A`, `AB`), milestones append a positive integer
/// (`A.1`), issues append a second (`A.1.2`). A child's id is always its
/// parent's id plus a dotted segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedId {
    pub artifact_type: ArtifactType,
    pub initiative: String,
    pub milestone: Option<u32>,
    pub issue: Option<u32>,
}

impl ParsedId {
    /// The id of the enclosing artifact, if any.
    pub fn parent_id(&self) -> Option<String> {
        match self.artifact_type {
            ArtifactType::Initiative => None,
            ArtifactType::Milestone => Some(self.initiative.clone()),
            ArtifactType::Issue => Some(format!(
                "{}.{}",
                self.initiative,
                self.milestone.expect("issue id has a milestone segment")
            )),
        }
    }

    /// The milestone prefix of an issue id (`A.1` for `A.1.2`).
    pub fn milestone_prefix(&self) -> Option<String> {
        self.milestone.map(|m| format!("{}.{}", self.initiative, m))
    }
}

/// Classify a dotted id string into its hierarchy segments.
///
/// Returns `None` for anything that is not a well-formed id at one of the
/// three levels. Zero is not a valid segment number.
pub fn parse_artifact_id(id: &str) -> Option<ParsedId> {
    let mut parts = id.split('.');

    let initiative = parts.next()?;
    if initiative.is_empty() || !initiative.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }

    let milestone = match parts.next() {
        None => {
            return Some(ParsedId {
                artifact_type: ArtifactType::Initiative,
                initiative: initiative.to_string(),
                milestone: None,
                issue: None,
            })
        }
        Some(seg) => parse_segment(seg)?,
    };

    let issue = match parts.next() {
        None => {
            return Some(ParsedId {
                artifact_type: ArtifactType::Milestone,
                initiative: initiative.to_string(),
                milestone: Some(milestone),
                issue: None,
            })
        }
        Some(seg) => parse_segment(seg)?,
    };

    // Anything past three segments is not an artifact id.
    if parts.next().is_some() {
        return None;
    }

    Some(ParsedId {
        artifact_type: ArtifactType::Issue,
        initiative: initiative.to_string(),
        milestone: Some(milestone),
        issue: Some(issue),
    })
}

/// Classify an id without keeping the segments.
pub fn artifact_type_of(id: &str) -> Option<ArtifactType> {
    parse_artifact_id(id).map(|p| p.artifact_type)
}

fn parse_segment(seg: &str) -> Option<u32> {
    if seg.is_empty() || !seg.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: u32 = seg.parse().ok()?;
    if n == 0 {
        return None;
    }
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_at_each_level() {
        assert_eq!(artifact_type_of("A"), Some(ArtifactType::Initiative));
        assert_eq!(artifact_type_of("AB"), Some(ArtifactType::Initiative));
        assert_eq!(artifact_type_of("A.1"), Some(ArtifactType::Milestone));
        assert_eq!(artifact_type_of("A.1.2"), Some(ArtifactType::Issue));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_eq!(artifact_type_of(""), None);
        assert_eq!(artifact_type_of("a"), None);
        assert_eq!(artifact_type_of("A1"), None);
        assert_eq!(artifact_type_of("A."), None);
        assert_eq!(artifact_type_of("A.0"), None);
        assert_eq!(artifact_type_of("A.1.2.3"), None);
        assert_eq!(artifact_type_of("A.x"), None);
        assert_eq!(artifact_type_of("A.1.-2"), None);
    }

    #[test]
    fn derives_parent_ids() {
        assert_eq!(parse_artifact_id("A").unwrap().parent_id(), None);
        assert_eq!(
            parse_artifact_id("A.1").unwrap().parent_id(),
            Some("A".to_string())
        );
        assert_eq!(
            parse_artifact_id("AB.3.7").unwrap().parent_id(),
            Some("AB.3".to_string())
        );
    }
}
