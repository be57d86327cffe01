use std::collections::HashSet;

use crate::models::role_assignment::{GrantType, RoleAssignment, RoleType};
use crate::models::search::{RequestContext, SearchRequest};

use super::{abbreviation_or_wildcard, permission_token, WILDCARD};

/// Build the set of grant signatures for a principal's role assignments.
///
/// Each signature has eight colon-separated fields:
/// `jurisdiction:region:location:roleName:caseId:permission:classification:authorisation`
///
/// Jurisdiction, region and location come from the role assignment's own
/// attributes; the search request never widens or narrows a role's intrinsic
/// scope. The request only drives the permission letter and, under the
/// available-tasks context, the per-skill authorisation expansion.
pub fn build_role_signatures(
    assignments: &[RoleAssignment],
    request: &SearchRequest,
) -> HashSet<String> {
    let permission = permission_token(request.context);
    let mut signatures = HashSet::new();

    for assignment in assignments {
        push_signatures(assignment, request, permission, &mut signatures);
    }

    tracing::debug!(
        assignments = assignments.len(),
        signatures = signatures.len(),
        "built grant signatures"
    );

    signatures
}

fn push_signatures(
    assignment: &RoleAssignment,
    request: &SearchRequest,
    permission: char,
    out: &mut HashSet<String>,
) {
    let jurisdiction = assignment.jurisdiction().unwrap_or(WILDCARD);
    let region = assignment.region().unwrap_or(WILDCARD);
    let location = assignment.base_location().unwrap_or(WILDCARD);

    // Only single-case grants surface a case id; organisation-wide and
    // standard grants stay unconstrained on it.
    let case_id = if assignment.role_type == RoleType::Case
        && assignment.grant_type == GrantType::Specific
    {
        assignment.case_id().unwrap_or(WILDCARD)
    } else {
        WILDCARD
    };

    let classification = abbreviation_or_wildcard(assignment.classification.abbreviation());

    let render = |authorisation: &str| {
        format!(
            "{jurisdiction}:{region}:{location}:{role_name}:{case_id}:{permission}:{classification}:{authorisation}",
            role_name = assignment.role_name,
        )
    };

    // The skill-unconstrained capability is always granted; available-tasks
    // requests additionally expand one signature per authorisation skill.
    out.insert(render(WILDCARD));

    if request.context == Some(RequestContext::AvailableTasks) {
        for skill in &assignment.authorisations {
            out.insert(render(skill));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role_assignment::{Classification, RoleAttributeKey};
    use uuid::Uuid;

    fn organisation_role() -> RoleAssignment {
        RoleAssignment::new(
            Uuid::new_v4(),
            RoleType::Organisation,
            GrantType::Standard,
            "hmcts-judiciary",
            Classification::Public,
        )
        .with_attribute(RoleAttributeKey::Jurisdiction, "IA")
        .with_attribute(RoleAttributeKey::Region, "1")
        .with_attribute(RoleAttributeKey::BaseLocation, "765324")
    }

    #[test]
    fn empty_assignments_yield_empty_set() {
        let request = SearchRequest {
            context: Some(RequestContext::AllWork),
            jurisdictions: vec!["IA".to_string()],
            ..SearchRequest::default()
        };

        assert!(build_role_signatures(&[], &request).is_empty());
    }

    #[test]
    fn organisation_role_general_context() {
        let signatures = build_role_signatures(&[organisation_role()], &SearchRequest::default());

        let expected: HashSet<String> =
            ["IA:1:765324:hmcts-judiciary:*:r:U:*".to_string()].into();
        assert_eq!(signatures, expected);
    }

    #[test]
    fn request_filters_never_populate_role_scope_fields() {
        let bare = RoleAssignment::new(
            Uuid::new_v4(),
            RoleType::Organisation,
            GrantType::Standard,
            "senior-tribunal-caseworker",
            Classification::Public,
        );
        let request = SearchRequest {
            jurisdictions: vec!["IA".to_string(), "WA".to_string()],
            regions: vec!["1".to_string()],
            locations: vec!["765324".to_string()],
            ..SearchRequest::default()
        };

        let signatures = build_role_signatures(&[bare], &request);

        let expected: HashSet<String> =
            ["*:*:*:senior-tribunal-caseworker:*:r:U:*".to_string()].into();
        assert_eq!(signatures, expected);
    }

    #[test]
    fn permission_letter_follows_request_context() {
        let role = organisation_role();

        for (context, letter) in [
            (Some(RequestContext::AllWork), 'm'),
            (Some(RequestContext::AvailableTasks), 'a'),
            (None, 'r'),
        ] {
            let request = SearchRequest {
                context,
                ..SearchRequest::default()
            };
            let signatures = build_role_signatures(std::slice::from_ref(&role), &request);
            assert!(
                signatures.contains(&format!("IA:1:765324:hmcts-judiciary:*:{letter}:U:*")),
                "missing permission letter {letter}"
            );
        }
    }

    #[test]
    fn case_id_requires_case_specific_grant() {
        let actor = Uuid::new_v4();
        let case_specific = RoleAssignment::new(
            actor,
            RoleType::Case,
            GrantType::Specific,
            "case-manager",
            Classification::Public,
        )
        .with_attribute(RoleAttributeKey::CaseId, "1623278362431003");

        let signatures = build_role_signatures(&[case_specific], &SearchRequest::default());
        assert!(signatures.contains("*:*:*:case-manager:1623278362431003:r:U:*"));

        // A standard grant on a case role never surfaces the case id.
        let standard = RoleAssignment::new(
            actor,
            RoleType::Case,
            GrantType::Standard,
            "case-manager",
            Classification::Public,
        )
        .with_attribute(RoleAttributeKey::CaseId, "1623278362431003");

        let signatures = build_role_signatures(&[standard], &SearchRequest::default());
        assert!(signatures.contains("*:*:*:case-manager:*:r:U:*"));
    }

    #[test]
    fn unknown_classification_renders_as_wildcard() {
        let role = RoleAssignment::new(
            Uuid::new_v4(),
            RoleType::Organisation,
            GrantType::Standard,
            "ctsc-admin",
            Classification::Unknown,
        );

        let signatures = build_role_signatures(&[role], &SearchRequest::default());
        assert!(signatures.contains("*:*:*:ctsc-admin:*:r:*:*"));
    }

    #[test]
    fn available_tasks_expands_authorisation_skills() {
        let actor = Uuid::new_v4();
        let case_specific = RoleAssignment::new(
            actor,
            RoleType::Case,
            GrantType::Specific,
            "case-manager",
            Classification::Public,
        )
        .with_attribute(RoleAttributeKey::CaseId, "1623278362431003")
        .with_authorisations(["Skill1"]);
        let organisation_wide = RoleAssignment::new(
            actor,
            RoleType::Organisation,
            GrantType::Standard,
            "tribunal-caseworker",
            Classification::Public,
        );

        let request = SearchRequest {
            context: Some(RequestContext::AvailableTasks),
            ..SearchRequest::default()
        };

        let signatures = build_role_signatures(&[case_specific, organisation_wide], &request);

        // one wildcard entry per role, plus the skill expansion
        assert_eq!(signatures.len(), 3);
        assert!(signatures.contains("*:*:*:case-manager:1623278362431003:a:U:*"));
        assert!(signatures.contains("*:*:*:case-manager:1623278362431003:a:U:Skill1"));
        assert!(signatures.contains("*:*:*:tribunal-caseworker:*:a:U:*"));
    }

    #[test]
    fn skills_do_not_expand_outside_available_tasks() {
        let role = organisation_role().with_authorisations(["Skill1", "Skill2"]);

        let request = SearchRequest {
            context: Some(RequestContext::AllWork),
            ..SearchRequest::default()
        };

        let signatures = build_role_signatures(&[role], &request);
        let expected: HashSet<String> =
            ["IA:1:765324:hmcts-judiciary:*:m:U:*".to_string()].into();
        assert_eq!(signatures, expected);
    }

    #[test]
    fn skill_less_role_still_emits_one_signature_under_available_tasks() {
        let role = organisation_role();
        let request = SearchRequest {
            context: Some(RequestContext::AvailableTasks),
            ..SearchRequest::default()
        };

        let signatures = build_role_signatures(&[role], &request);
        assert_eq!(signatures.len(), 1);
        assert!(signatures.contains("IA:1:765324:hmcts-judiciary:*:a:U:*"));
    }

    #[test]
    fn duplicate_capabilities_collapse() {
        // Two assignments that differ only in an attribute the signature
        // never encodes.
        let first = organisation_role().with_attribute(RoleAttributeKey::CaseType, "Asylum");
        let second = organisation_role().with_attribute(RoleAttributeKey::CaseType, "Bail");

        let signatures = build_role_signatures(&[first, second], &SearchRequest::default());
        assert_eq!(signatures.len(), 1);
    }

    #[test]
    fn builder_is_idempotent() {
        let roles = [
            organisation_role().with_authorisations(["Skill1"]),
            RoleAssignment::new(
                Uuid::new_v4(),
                RoleType::Case,
                GrantType::Specific,
                "case-manager",
                Classification::Restricted,
            ),
        ];
        let request = SearchRequest {
            context: Some(RequestContext::AvailableTasks),
            ..SearchRequest::default()
        };

        let first = build_role_signatures(&roles, &request);
        let second = build_role_signatures(&roles, &request);
        assert_eq!(first, second);
    }
}
