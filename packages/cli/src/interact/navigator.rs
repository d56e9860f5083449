/// The protocol's main contract, pinned to the top of the contract list
pub const MAIN_CONTRACT: &str = "Meridian";

/// Contract choices for a query: the main contract pinned first, the rest
/// alphabetical, all filtered case-insensitively by substring match
pub fn contract_choices(names: &[String], query: &str) -> Vec<String> {
    let needle = query.to_lowercase();

    let mut choices = Vec::new();
    if names.iter().any(|name| name == MAIN_CONTRACT)
        && MAIN_CONTRACT.to_lowercase().contains(&needle)
    {
        choices.push(MAIN_CONTRACT.to_string());
    }

    let mut rest: Vec<String> = names
        .iter()
        .filter(|name| *name != MAIN_CONTRACT && name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    rest.sort();

    choices.extend(rest);
    choices
}
