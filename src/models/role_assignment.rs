use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// ROLE ASSIGNMENT ENUMERATIONS
// =============================================================================

/// Breadth of the resource a role assignment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleType {
    Organisation,
    Case,
}

/// Breadth of the authority a role assignment grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrantType {
    Basic,
    Standard,
    Specific,
    Challenged,
    Excluded,
}

/// Sensitivity tier of the data a role may access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Public,
    Private,
    Restricted,
    Unknown,
}

impl Classification {
    /// Single-character signature code. `None` renders as the wildcard:
    /// an UNKNOWN classification constrains nothing.
    pub fn abbreviation(self) -> Option<char> {
        match self {
            Classification::Public => Some('U'),
            Classification::Private => Some('P'),
            Classification::Restricted => Some('R'),
            Classification::Unknown => None,
        }
    }
}

/// Professional category a role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleCategory {
    Judicial,
    LegalOperations,
    Admin,
    Ctsc,
}

impl RoleCategory {
    /// Single-character signature code. Total: every category abbreviates.
    pub fn abbreviation(self) -> char {
        match self {
            RoleCategory::Judicial => 'J',
            RoleCategory::LegalOperations => 'L',
            RoleCategory::Admin => 'A',
            RoleCategory::Ctsc => 'C',
        }
    }
}

/// Keys of the role-assignment attribute map. An absent key means the role is
/// unconstrained on that dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleAttributeKey {
    Jurisdiction,
    Region,
    BaseLocation,
    CaseId,
    CaseType,
}

// =============================================================================
// ROLE ASSIGNMENT
// =============================================================================

/// One role assignment held by an actor, as delivered by the role-assignment
/// service. Treated as an immutable snapshot everywhere in this crate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleAssignment {
    pub actor_id: Uuid,
    pub role_type: RoleType,
    pub grant_type: GrantType,
    #[schema(example = "hmcts-judiciary")]
    pub role_name: String,
    pub classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_category: Option<RoleCategory>,
    #[serde(default)]
    pub authorisations: Vec<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub attributes: HashMap<RoleAttributeKey, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl RoleAssignment {
    pub fn new(
        actor_id: Uuid,
        role_type: RoleType,
        grant_type: GrantType,
        role_name: impl Into<String>,
        classification: Classification,
    ) -> Self {
        Self {
            actor_id,
            role_type,
            grant_type,
            role_name: role_name.into(),
            classification,
            role_category: None,
            authorisations: Vec::new(),
            attributes: HashMap::new(),
            begin_time: None,
            end_time: None,
        }
    }

    pub fn with_attribute(mut self, key: RoleAttributeKey, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value.into());
        self
    }

    pub fn with_authorisations(
        mut self,
        skills: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.authorisations = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_role_category(mut self, category: RoleCategory) -> Self {
        self.role_category = Some(category);
        self
    }

    pub fn with_validity(
        mut self,
        begin_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.begin_time = begin_time;
        self.end_time = end_time;
        self
    }

    pub fn attribute(&self, key: RoleAttributeKey) -> Option<&str> {
        self.attributes.get(&key).map(String::as_str)
    }

    pub fn jurisdiction(&self) -> Option<&str> {
        self.attribute(RoleAttributeKey::Jurisdiction)
    }

    pub fn region(&self) -> Option<&str> {
        self.attribute(RoleAttributeKey::Region)
    }

    pub fn base_location(&self) -> Option<&str> {
        self.attribute(RoleAttributeKey::BaseLocation)
    }

    pub fn case_id(&self) -> Option<&str> {
        self.attribute(RoleAttributeKey::CaseId)
    }

    /// Whether the assignment is in force at `now`. Absent bounds are
    /// unconstrained; `end_time` is exclusive.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        if let Some(begin) = self.begin_time {
            if now < begin {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if now >= end {
                return false;
            }
        }
        true
    }
}
