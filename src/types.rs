use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Role name on the generateContent wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }
}

/// One turn of the assistant conversation. Turns are appended, never edited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Target readership for the audience translator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    CSuite,
    Engineering,
    Legal,
    Clients,
    Hr,
    Marketing,
}

impl Audience {
    pub const ALL: [Audience; 6] = [
        Audience::CSuite,
        Audience::Engineering,
        Audience::Legal,
        Audience::Clients,
        Audience::Hr,
        Audience::Marketing,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Audience::CSuite => "csuite",
            Audience::Engineering => "engineering",
            Audience::Legal => "legal",
            Audience::Clients => "clients",
            Audience::Hr => "hr",
            Audience::Marketing => "marketing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Audience::CSuite => "C-Suite Executives",
            Audience::Engineering => "Engineering Team",
            Audience::Legal => "Legal Department",
            Audience::Clients => "External Clients",
            Audience::Hr => "Human Resources",
            Audience::Marketing => "Marketing Team",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Audience::CSuite => "👔",
            Audience::Engineering => "⚙️",
            Audience::Legal => "⚖️",
            Audience::Clients => "🤝",
            Audience::Hr => "💼",
            Audience::Marketing => "📢",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Audience::CSuite => "Strategic, concise, focused on business impact and ROI",
            Audience::Engineering => {
                "Technical details, implementation specifics, system implications"
            }
            Audience::Legal => "Compliance, risk, liability, contractual implications",
            Audience::Clients => "Clear, professional, no internal jargon, benefit-focused",
            Audience::Hr => "People impact, policy implications, organizational changes",
            Audience::Marketing => {
                "Market positioning, messaging opportunities, brand implications"
            }
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|audience| audience.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audience_keys_round_trip() {
        for audience in Audience::ALL {
            assert_eq!(Audience::from_key(audience.key()), Some(audience));
        }
        assert_eq!(Audience::from_key("finance"), None);
    }

    #[test]
    fn assistant_turns_use_model_role_on_the_wire() {
        assert_eq!(Role::User.wire_name(), "user");
        assert_eq!(Role::Assistant.wire_name(), "model");
    }
}
