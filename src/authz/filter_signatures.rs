use std::collections::HashSet;

use crate::models::search::SearchRequest;

use super::WILDCARD;

/// Build the set of filter signatures for a search request.
///
/// Each signature has six colon-separated fields:
/// `state:jurisdiction:roleCategory:workType:region:location`
///
/// The result is the full cartesian product of the six dimensions. An empty
/// filter list contributes the single wildcard candidate, so a request with
/// no filters at all produces exactly one all-wildcard signature.
pub fn build_filter_signatures(request: &SearchRequest) -> HashSet<String> {
    let states = candidates(
        request
            .task_states
            .iter()
            .map(|state| state.abbreviation().to_string()),
    );
    let jurisdictions = verbatim_candidates(&request.jurisdictions);
    let categories = candidates(
        request
            .role_categories
            .iter()
            .map(|category| category.abbreviation().to_string()),
    );
    let work_types = verbatim_candidates(&request.work_types);
    let regions = verbatim_candidates(&request.regions);
    let locations = verbatim_candidates(&request.locations);

    let mut partials = states;
    for dimension in [jurisdictions, categories, work_types, regions, locations] {
        let mut next = Vec::with_capacity(partials.len() * dimension.len());
        for prefix in &partials {
            for value in &dimension {
                next.push(format!("{prefix}:{value}"));
            }
        }
        partials = next;
    }

    partials.into_iter().collect()
}

fn candidates(values: impl Iterator<Item = String>) -> Vec<String> {
    let collected: Vec<String> = values.collect();
    if collected.is_empty() {
        vec![WILDCARD.to_string()]
    } else {
        collected
    }
}

fn verbatim_candidates(values: &[String]) -> Vec<String> {
    if values.is_empty() {
        vec![WILDCARD.to_string()]
    } else {
        values.to_vec()
    }
}
